use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Event names must be shorter than this (in characters) to be used as part
/// of a folder name. `NAME_MAX` would be the real deal, but it varies per
/// filesystem.
pub const MAX_NAME_LEN: usize = 200;

/// Constant prefix of every renamed file.
pub const RENAMED_PREFIX: &str = "z3";

/// Operator documentation for the renaming schema, shown in `--help`.
pub const FILENAME_SCHEMA: &str = "\
Imported files are renamed according to a schema, because:
 1) Cameras only use 4 digits for the image sequence number. Unique file names prevent serious problems.
 2) Recognizable file names are a nice side effect.
Let DSC_4321.JPG be the original filename, then the resulting filename is z3d04321.jpg
Format: |constant prefix z3|camera identifier|original 4 digits|.|lowercase file suffix|
Camera identifiers: d0 = Nikon D90, f0 = Nikon D600, v0 = Nikon 1 V1, s0 = Canon S95, o0 = other, e0 = extra, u0 = unknown
When a camera passes 9999 pictures (the original 4 digits wrap around), pick a different camera identifier.";

/// The digit run holding the sequence number must start within this many
/// characters of the beginning of the filename.
pub(crate) const MAX_SEQUENCE_OFFSET: usize = 20;

// Whole runs of ASCII digits long enough to hold a sequence number.
regex!(DIGIT_RUN_REGEX, r"[0-9]{4,}");
regex!(WHITESPACE_REGEX, r"\s+");
regex!(NON_WORD_REGEX, r"[^A-Za-z0-9_]");
