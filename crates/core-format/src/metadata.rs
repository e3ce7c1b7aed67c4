//! `.dat` metadata file: a sorted sequence of feature events with
//! variable-length payloads, plus the byte-level forward/backward cursor
//! operations that make O(1) reverse traversal possible.
//!
//! Record layout: `position:u32 LE  tag:u8  payload?`. Gene and CDS payloads
//! end with a `tag_copy` byte identical to the record's own tag — this is
//! what lets [`MetadataCursor::unget_feature`] discover a preceding record's
//! type without knowing its payload length in advance (spec.md §4.1's "key
//! to O(1) reverse traversal").

use crate::error::FormatError;
use crate::feature::{CdsPayload, FeatureKind, FeatureTag, GenePayload, RecordPayload, Strand};
use std::io;
use std::path::Path;

/// Owns the raw bytes of a `.dat` file. Small enough (a few MB per
/// chromosome even for dense annotation) to hold entirely in memory, which
/// turns reverse-scan byte arithmetic into plain slice indexing instead of
/// file seeks.
#[derive(Debug, Clone)]
pub struct MetadataFile {
    bytes: Vec<u8>,
}

impl MetadataFile {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        MetadataFile { bytes }
    }

    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self::from_bytes(std::fs::read(path)?))
    }

    pub fn empty() -> Self {
        Self::from_bytes(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw bytes, for callers that need to tolerate truncation past the
    /// normal cursor error paths (`core-reader`'s degenerate end-of-file
    /// bookkeeping, which the reference implementation treats leniently).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn cursor_at(&self, pos: usize) -> MetadataCursor<'_> {
        MetadataCursor {
            bytes: &self.bytes,
            pos,
        }
    }

    pub fn cursor_at_start(&self) -> MetadataCursor<'_> {
        self.cursor_at(0)
    }

    pub fn cursor_at_end(&self) -> MetadataCursor<'_> {
        self.cursor_at(self.bytes.len())
    }
}

/// A byte offset into a [`MetadataFile`] plus the primitives `core-reader`
/// composes into forward advance, absolute jump, and backward retreat.
///
/// `pos` always denotes "the next unread byte", mirroring a Python file
/// object's `tell()`/`seek()`/`read(n)` semantics that the reference
/// implementation relies on.
#[derive(Debug, Clone, Copy)]
pub struct MetadataCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> MetadataCursor<'a> {
    pub fn tell(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Read one byte and advance the cursor. Exposed so `core-reader` can
    /// implement the EOF edge case of backward traversal, which reads a
    /// single trailing byte rather than going through [`unget_feature`].
    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        let b = *self
            .bytes
            .get(self.pos)
            .ok_or(FormatError::Truncated {
                offset: self.pos,
                expected: 1,
                found: 0,
            })?;
        self.pos += 1;
        Ok(b)
    }

    /// Read a little-endian `u32` and advance the cursor. Exposed for
    /// `core-reader`'s CDS phase lookup, which re-reads a position field at
    /// an offset it has already located via [`unget_feature`].
    pub fn read_u32(&mut self) -> Result<u32, FormatError> {
        self.read_u32_le()
    }

    fn read_u32_le(&mut self) -> Result<u32, FormatError> {
        let end = self.pos + 4;
        let slice = self.bytes.get(self.pos..end).ok_or(FormatError::Truncated {
            offset: self.pos,
            expected: 4,
            found: self.bytes.len().saturating_sub(self.pos),
        })?;
        let v = u32::from_le_bytes(slice.try_into().unwrap());
        self.pos = end;
        Ok(v)
    }

    /// `true` when fewer than 4 bytes remain: no further record header can
    /// be read. Used in place of Python's `dword == b""` EOF check.
    pub fn at_eof_for_header(&self) -> bool {
        self.pos + 4 > self.bytes.len()
    }

    /// Read the next record's header `(position, tag)`. Call only when
    /// [`at_eof_for_header`] is `false`.
    pub fn read_header(&mut self) -> Result<(u32, FeatureTag), FormatError> {
        let position = self.read_u32_le()?;
        let tag = FeatureTag(self.read_u8()?);
        Ok((position, tag))
    }

    /// Consume and decode the payload (if any) following `tag`, which must
    /// be the tag just returned by [`read_header`]. Mirrors
    /// `Reader.get_feature_info`. Leaves the cursor at the following
    /// record's header (or EOF).
    pub fn read_payload(&mut self, tag: FeatureTag) -> Result<RecordPayload, FormatError> {
        // Payload only ever follows a *start* event of the matching kind;
        // the reference implementation compares the raw byte (not masked),
        // so an end-bit-set tag never triggers payload parsing here.
        match tag.kind() {
            Some(FeatureKind::Gene) if !tag.is_end() => {
                let start = self.pos;
                let _leading_nul = self.read_u8()?;
                let strand_byte = self.read_u8()?;
                let strand = Strand::from_byte(strand_byte).unwrap_or(Strand::Unknown);
                let mut name_bytes = Vec::new();
                loop {
                    let b = self.read_u8()?;
                    if b == 0 {
                        break;
                    }
                    name_bytes.push(b);
                }
                let _tag_copy = self.read_u8()?;
                let name = String::from_utf8(name_bytes)
                    .map_err(|_| FormatError::InvalidUtf8 { offset: start })?;
                Ok(RecordPayload::Gene(GenePayload { strand, name }))
            }
            Some(FeatureKind::Cds) if !tag.is_end() => {
                let phase = self.read_u8()?;
                let _tag_copy = self.read_u8()?;
                Ok(RecordPayload::Cds(CdsPayload { phase }))
            }
            _ => Ok(RecordPayload::None),
        }
    }

    /// Mirrors `Reader.unget_feature`: assuming the cursor sits exactly
    /// after some record's already-consumed tag byte, step back over the
    /// *preceding* record's payload and header using its `tag_copy` trailer,
    /// leaving the cursor positioned just after that preceding record's tag
    /// byte. Returns that record's raw tag, or `None` if fewer than 10 bytes
    /// precede the cursor (no full previous record can exist).
    pub fn unget_feature(&mut self) -> Result<Option<FeatureTag>, FormatError> {
        if self.pos < 10 {
            return Ok(None);
        }
        self.pos -= 6;
        let raw = self.read_u8_at(self.pos)?;
        self.pos += 1;
        let tag = FeatureTag(raw);
        match tag.kind() {
            Some(FeatureKind::Gene) => {
                self.pos = self.pos.checked_sub(3).ok_or(FormatError::Truncated {
                    offset: 0,
                    expected: 3,
                    found: self.pos,
                })?;
                loop {
                    let b = self.read_u8_at(self.pos)?;
                    self.pos += 1;
                    if b == 0 {
                        break;
                    }
                    self.pos = self.pos.checked_sub(2).ok_or(FormatError::MissingLeadingNul {
                        offset: self.pos,
                    })?;
                }
                self.pos -= 1;
            }
            Some(FeatureKind::Cds) => {
                self.pos = self.pos.checked_sub(2).ok_or(FormatError::Truncated {
                    offset: 0,
                    expected: 2,
                    found: self.pos,
                })?;
            }
            _ => {}
        }
        Ok(Some(tag))
    }

    fn read_u8_at(&self, at: usize) -> Result<u8, FormatError> {
        self.bytes.get(at).copied().ok_or(FormatError::Truncated {
            offset: at,
            expected: 1,
            found: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureKind;

    fn gene_record(pos: u32, strand: u8, name: &str) -> Vec<u8> {
        let mut out = pos.to_le_bytes().to_vec();
        out.push(FeatureKind::Gene.code());
        out.push(0); // leading NUL
        out.push(strand);
        out.extend_from_slice(name.as_bytes());
        out.push(0); // trailing NUL
        out.push(FeatureKind::Gene.code()); // tag_copy
        out
    }

    fn end_record(pos: u32, kind: FeatureKind) -> Vec<u8> {
        let mut out = pos.to_le_bytes().to_vec();
        out.push(kind.code() | crate::feature::END_BIT);
        out
    }

    fn cds_record(pos: u32, phase: u8) -> Vec<u8> {
        let mut out = pos.to_le_bytes().to_vec();
        out.push(FeatureKind::Cds.code());
        out.push(phase);
        out.push(FeatureKind::Cds.code());
        out
    }

    #[test]
    fn forward_parses_gene_record() {
        let mut bytes = gene_record(1, 1, "GENE1");
        bytes.extend(end_record(5, FeatureKind::Gene));
        let file = MetadataFile::from_bytes(bytes);
        let mut cur = file.cursor_at_start();
        let (pos, tag) = cur.read_header().unwrap();
        assert_eq!(pos, 1);
        assert_eq!(tag.kind(), Some(FeatureKind::Gene));
        let payload = cur.read_payload(tag).unwrap();
        match payload {
            RecordPayload::Gene(g) => {
                assert_eq!(g.name, "GENE1");
                assert_eq!(g.strand, Strand::Plus);
            }
            other => panic!("expected gene payload, got {other:?}"),
        }
        let (pos2, tag2) = cur.read_header().unwrap();
        assert_eq!(pos2, 5);
        assert!(tag2.is_end());
        assert!(cur.at_eof_for_header());
    }

    #[test]
    fn unget_feature_walks_back_over_gene_payload() {
        let mut bytes = gene_record(1, 1, "GENE1");
        let end = end_record(5, FeatureKind::Gene);
        bytes.extend(end.clone());
        let file = MetadataFile::from_bytes(bytes);
        // Position the cursor as if we'd just read the end record's header:
        // i.e. right after its tag byte.
        let gene_len = gene_record(1, 1, "GENE1").len();
        let mut cur = file.cursor_at(gene_len + 5);
        let found = cur.unget_feature().unwrap().unwrap();
        assert_eq!(found.kind(), Some(FeatureKind::Gene));
        assert!(!found.is_end());
        // Cursor should now sit right after the gene record's tag byte,
        // i.e. at offset 5 (position field is 4 bytes, tag is 1 byte).
        assert_eq!(cur.tell(), 5);
    }

    #[test]
    fn unget_feature_walks_back_over_cds_payload() {
        let mut bytes = cds_record(1, 0);
        bytes.extend(end_record(13, FeatureKind::Cds));
        let file = MetadataFile::from_bytes(bytes);
        let cds_len = cds_record(1, 0).len();
        let mut cur = file.cursor_at(cds_len + 5);
        let found = cur.unget_feature().unwrap().unwrap();
        assert_eq!(found.kind(), Some(FeatureKind::Cds));
        assert_eq!(cur.tell(), 5);
    }

    #[test]
    fn unget_feature_none_when_too_close_to_start() {
        let bytes = end_record(5, FeatureKind::Gap);
        let file = MetadataFile::from_bytes(bytes);
        let mut cur = file.cursor_at(5);
        assert_eq!(cur.unget_feature().unwrap(), None);
    }

    #[test]
    fn truncated_gene_payload_is_reported() {
        let mut bytes = 1u32.to_le_bytes().to_vec();
        bytes.push(FeatureKind::Gene.code());
        bytes.push(0);
        bytes.push(1);
        // no trailing NUL / tag_copy: file ends abruptly
        let file = MetadataFile::from_bytes(bytes);
        let mut cur = file.cursor_at_start();
        let (_, tag) = cur.read_header().unwrap();
        assert!(cur.read_payload(tag).is_err());
    }
}
