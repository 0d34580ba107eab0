use crate::consts::{DIGIT_RUN_REGEX, MAX_NAME_LEN, MAX_SEQUENCE_OFFSET, NON_WORD_REGEX, WHITESPACE_REGEX};
use crate::error::{ErrorKind, Result};
use crate::models::{Sequence, Suffix};
use exn::OptionExt;
use tracing::instrument;

/// First run of at least four ASCII digits, if it starts within the first
/// [`MAX_SEQUENCE_OFFSET`] characters.
fn digit_run(filename: &str) -> Option<regex::Match<'_>> {
    let run = DIGIT_RUN_REGEX.find(filename)?;
    (filename[..run.start()].chars().count() <= MAX_SEQUENCE_OFFSET).then_some(run)
}

/// Extracts the camera's 4-digit sequence number from an original filename.
///
/// The first run of at least four ASCII digits starting within the first 20
/// characters holds it. Longer runs carry a folder or camera number in front
/// (`P1000123.JPG` is picture `0123`), so the last four digits are used.
///
/// # Errors
/// Returns [`ErrorKind::SequenceNotFound`] when no such run exists.
#[instrument(level = "trace")]
pub fn extract_sequence(filename: &str) -> Result<Sequence> {
    let run = digit_run(filename).ok_or_raise(|| ErrorKind::SequenceNotFound(filename.to_string()))?;
    let digits = run.as_str();
    Ok(Sequence::from_digits(&digits[digits.len() - 4..]))
}

/// Returns the text preceding the sequence number's digit run, e.g. `DSC_`
/// for `DSC_4321.JPG`. Files from the same camera share it.
pub fn sequence_prefix(filename: &str) -> Option<&str> {
    let run = digit_run(filename)?;
    Some(&filename[..run.start()])
}

/// Extracts the file extension (from the last `.` onwards), lowercased.
///
/// # Errors
/// Returns [`ErrorKind::MissingSuffix`] when the filename has no `.`, or
/// nothing follows the last one. A renamed file without an extension would
/// break the naming schema.
#[instrument(level = "trace")]
pub fn extract_suffix(filename: &str) -> Result<Suffix> {
    match filename.rfind('.') {
        Some(dot) if dot + 1 < filename.len() => Ok(Suffix::new(&filename[dot..])),
        _ => exn::bail!(ErrorKind::MissingSuffix(filename.to_string())),
    }
}

/// Turns free-text event names into something safe for a folder name.
///
/// Runs of whitespace become a single `_`, then every remaining character
/// outside `[A-Za-z0-9_]` becomes an `x`. The result is never empty, never
/// longer than the input, and sanitizing it again changes nothing.
///
/// # Errors
/// Returns [`ErrorKind::EmptyEventName`] or [`ErrorKind::EventNameTooLong`]
/// unless `0 < length < MAX_NAME_LEN` (in characters).
#[instrument(level = "trace")]
pub fn sanitize_event_name(name: &str) -> Result<String> {
    let length = name.chars().count();
    if length == 0 {
        exn::bail!(ErrorKind::EmptyEventName);
    }
    if length >= MAX_NAME_LEN {
        exn::bail!(ErrorKind::EventNameTooLong(length));
    }
    // Whitespace first, otherwise spaces become `x` like any other non-word character.
    let underscored = WHITESPACE_REGEX.replace_all(name, "_");
    let sanitized = NON_WORD_REGEX.replace_all(&underscored, "x").into_owned();
    if sanitized != name {
        tracing::info!(original = name, sanitized = %sanitized, "Replaced event name");
    }
    Ok(sanitized)
}
