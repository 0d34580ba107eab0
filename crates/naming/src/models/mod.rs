mod camera;
mod filename;
mod sequence;

pub use self::camera::Camera;
pub use self::filename::RenamedFilename;
pub use self::sequence::{Sequence, Suffix};
