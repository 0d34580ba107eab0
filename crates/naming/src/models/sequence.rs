use std::fmt;

/// A camera's image sequence number, always rendered as exactly four digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sequence(u16);
impl Sequence {
    /// Callers guarantee exactly four ASCII digits.
    pub(crate) fn from_digits(digits: &str) -> Self {
        Self(digits.bytes().fold(0, |acc, b| acc * 10 + u16::from(b - b'0')))
    }
}
impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Lowercase file extension, including the leading dot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Suffix(String);
impl Suffix {
    pub(crate) fn new(suffix: &str) -> Self {
        Self(suffix.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
