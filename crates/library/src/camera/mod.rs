//! Camera identification for files the naming scheme can't place by itself.

mod prompt;
mod resolver;

pub use self::prompt::{Prompt, Terminal};
pub use self::resolver::CameraResolver;
