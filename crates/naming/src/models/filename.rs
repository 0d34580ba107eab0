use crate::RENAMED_PREFIX;
use crate::models::{Camera, Sequence, Suffix};
use std::fmt;

/// Target filename of an imported file: `z3<camera><sequence><suffix>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RenamedFilename {
    pub camera: Camera,
    pub sequence: Sequence,
    pub suffix: Suffix,
}
impl RenamedFilename {
    pub fn new(camera: Camera, sequence: Sequence, suffix: Suffix) -> Self {
        Self { camera, sequence, suffix }
    }
}
impl fmt::Display for RenamedFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{RENAMED_PREFIX}{}{}{}", self.camera, self.sequence, self.suffix)
    }
}
