use thiserror::Error;

/// A malformed on-disk record. Detected by `core-format` parsers, downgraded
/// by `core-reader` into the chromosome's degraded-mode flag (spec.md §7).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("metadata record at byte {offset} has an out-of-range tag 0x{tag:02x}")]
    InvalidTag { offset: usize, tag: u8 },

    #[error("gene payload at byte {offset} is missing its leading NUL sentinel")]
    MissingLeadingNul { offset: usize },

    #[error("gene payload at byte {offset} is missing its trailing NUL terminator")]
    MissingTrailingNul { offset: usize },

    #[error("record at byte {offset} truncated: expected {expected} more bytes, found {found}")]
    Truncated {
        offset: usize,
        expected: usize,
        found: usize,
    },

    #[error("gene name at byte {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    #[error("tag_copy trailer at byte {offset} (0x{found:02x}) does not match record tag (0x{expected:02x})")]
    TagCopyMismatch {
        offset: usize,
        expected: u8,
        found: u8,
    },
}
