use crate::error::{Error, ErrorKind};
use std::fmt;
use std::str::FromStr;

/// Two-character code identifying which physical camera produced a file.
///
/// The first character comes from a fixed alphabet, the second is always
/// `0`. Several cameras can reuse the same sequence numbers within a year, the
/// identifier keeps their renamed files apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Camera {
    NikonD90,
    NikonD600,
    Nikon1V1,
    CanonS95,
    Other,
    Extra,
    Unknown,
}
impl Camera {
    /// Every identifier, in the order the operator sees them.
    pub const ALL: [Camera; 7] = [
        Self::NikonD90,
        Self::NikonD600,
        Self::Nikon1V1,
        Self::CanonS95,
        Self::Other,
        Self::Extra,
        Self::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NikonD90 => "d0",
            Self::NikonD600 => "f0",
            Self::Nikon1V1 => "v0",
            Self::CanonS95 => "s0",
            Self::Other => "o0",
            Self::Extra => "e0",
            Self::Unknown => "u0",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::NikonD90 => "Nikon D90",
            Self::NikonD600 => "Nikon D600",
            Self::Nikon1V1 => "Nikon 1 V1",
            Self::CanonS95 => "Canon S95",
            Self::Other => "other",
            Self::Extra => "extra",
            Self::Unknown => "unknown",
        }
    }
}
impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for Camera {
    type Err = Error;

    /// Accepts exactly two characters: one of `d f v s o e u`, then `0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|camera| camera.as_str() == s)
            .ok_or_else(|| Error::from(ErrorKind::InvalidCamera(s.to_string())))
    }
}
impl TryFrom<String> for Camera {
    // Plain kind rather than `Exn`, serde only needs something it can display.
    type Error = ErrorKind;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map_err(|e: Error| (*e).clone())
    }
}
impl From<Camera> for String {
    fn from(camera: Camera) -> Self {
        camera.as_str().to_string()
    }
}
