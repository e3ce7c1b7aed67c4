//! `<chr>.gap` file: pairs of `u32 LE` half-open ranges of unknown bases.
//!
//! Consumed only by the metadata builder (out of scope for this viewer, per
//! spec.md §1/§4.1); kept here, parsed and tested, purely so the full data
//! contract is represented in one place and available to anything that
//! wants to validate a `.gap` file independent of the transformation tools
//! that are not part of this repo.

use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapRange {
    pub start_inclusive: u32,
    pub end_exclusive: u32,
}

#[derive(Debug, Clone, Default)]
pub struct GapFile {
    pub ranges: Vec<GapRange>,
}

impl GapFile {
    pub fn from_bytes(bytes: &[u8]) -> io::Result<Self> {
        let mut ranges = Vec::with_capacity(bytes.len() / 8);
        let mut chunks = bytes.chunks_exact(8);
        for chunk in &mut chunks {
            let start = u32::from_le_bytes(chunk[0..4].try_into().unwrap());
            let end = u32::from_le_bytes(chunk[4..8].try_into().unwrap());
            ranges.push(GapRange {
                start_inclusive: start,
                end_exclusive: end,
            });
        }
        if !chunks.remainder().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "gap file length is not a multiple of 8 bytes",
            ));
        }
        Ok(GapFile { ranges })
    }

    pub fn open(path: &Path) -> io::Result<Self> {
        Self::from_bytes(&std::fs::read(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs() {
        let mut bytes = Vec::new();
        bytes.extend(100u32.to_le_bytes());
        bytes.extend(200u32.to_le_bytes());
        bytes.extend(500u32.to_le_bytes());
        bytes.extend(600u32.to_le_bytes());
        let gaps = GapFile::from_bytes(&bytes).unwrap();
        assert_eq!(gaps.ranges.len(), 2);
        assert_eq!(gaps.ranges[0].start_inclusive, 100);
        assert_eq!(gaps.ranges[1].end_exclusive, 600);
    }

    #[test]
    fn rejects_truncated_pair() {
        let bytes = vec![0u8; 5];
        assert!(GapFile::from_bytes(&bytes).is_err());
    }
}
