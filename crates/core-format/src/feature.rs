//! Feature tags and variable-length payloads carried by `.dat` metadata records.
//!
//! Tag byte layout: bits 0-5 name the feature kind (0-7 used, 8-63 reserved),
//! bit 6 is unused, bit 7 (`0x80`) marks an end event.

use std::fmt;

pub const FEATURE_MASK: u8 = 0x3f;
pub const END_BIT: u8 = 0x80;

/// One of the eight biological region classes a metadata record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FeatureKind {
    Gap = 0,
    Exon = 1,
    Cds = 2,
    Pseudogene = 3,
    Gene = 4,
    Trna = 5,
    Rrna = 6,
    Mirna = 7,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 8] = [
        FeatureKind::Gap,
        FeatureKind::Exon,
        FeatureKind::Cds,
        FeatureKind::Pseudogene,
        FeatureKind::Gene,
        FeatureKind::Trna,
        FeatureKind::Rrna,
        FeatureKind::Mirna,
    ];

    /// Decode the low 6 bits of a tag byte. `None` for the reserved range 8-63.
    pub fn from_code(code: u8) -> Option<Self> {
        match code & FEATURE_MASK {
            0 => Some(FeatureKind::Gap),
            1 => Some(FeatureKind::Exon),
            2 => Some(FeatureKind::Cds),
            3 => Some(FeatureKind::Pseudogene),
            4 => Some(FeatureKind::Gene),
            5 => Some(FeatureKind::Trna),
            6 => Some(FeatureKind::Rrna),
            7 => Some(FeatureKind::Mirna),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// A raw tag byte: feature kind plus the start/end bit, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureTag(pub u8);

impl FeatureTag {
    pub fn new(kind: FeatureKind, is_end: bool) -> Self {
        FeatureTag(kind.code() | if is_end { END_BIT } else { 0 })
    }

    pub fn is_end(self) -> bool {
        self.0 & END_BIT != 0
    }

    pub fn kind(self) -> Option<FeatureKind> {
        FeatureKind::from_code(self.0)
    }

    /// Flip the start/end bit, used by reverse traversal to undo an event.
    pub fn inverted(self) -> FeatureTag {
        FeatureTag(self.0 ^ END_BIT)
    }
}

impl fmt::Display for FeatureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) => write!(f, "{kind:?}{}", if self.is_end() { "(end)" } else { "" }),
            None => write!(f, "unknown(0x{:02x})", self.0),
        }
    }
}

/// Strand orientation carried by a gene's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Plus,
    Minus,
    Unknown,
}

impl Strand {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            1 => Some(Strand::Plus),
            2 => Some(Strand::Minus),
            3 => Some(Strand::Unknown),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Strand::Plus => 1,
            Strand::Minus => 2,
            Strand::Unknown => 3,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Strand::Plus => '+',
            Strand::Minus => '-',
            Strand::Unknown => '.',
        }
    }
}

/// Payload trailing a `gene` start event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenePayload {
    pub strand: Strand,
    pub name: String,
}

/// Payload trailing a `CDS` start event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CdsPayload {
    pub phase: u8,
}

/// The decoded payload of a metadata record, if its tag carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordPayload {
    None,
    Gene(GenePayload),
    Cds(CdsPayload),
}

/// Reference counts for the active-feature multiset: nested features of the
/// same kind increment rather than replace, so a set would lose information
/// (spec.md §3's "Active-feature multiset").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureCounts([u16; 64]);

impl Default for FeatureCounts {
    fn default() -> Self {
        FeatureCounts([0; 64])
    }
}

impl FeatureCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: FeatureKind) -> u16 {
        self.0[kind.code() as usize]
    }

    pub fn contains(&self, kind: FeatureKind) -> bool {
        self.count(kind) > 0
    }

    pub fn clear(&mut self) {
        self.0 = [0; 64];
    }

    /// Apply a feature event (start increments, end decrements) to the
    /// multiset. Decrementing past zero is a no-op (mirrors the original's
    /// defensive `if tag not in current_features: return`).
    pub fn apply(&mut self, tag: FeatureTag) {
        let Some(kind) = tag.kind() else { return };
        let idx = kind.code() as usize;
        if tag.is_end() {
            if self.0[idx] > 0 {
                self.0[idx] -= 1;
            }
        } else {
            self.0[idx] += 1;
        }
    }
}
