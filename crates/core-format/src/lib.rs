//! On-disk binary formats for the genome viewer: the 2-bit packed sequence
//! (`.bin`), the sorted feature-event metadata stream (`.dat`), and the gap
//! ranges (`.gap`) produced upstream.
//!
//! This crate owns decode/encode types and byte-level parsing only; it has
//! no opinion on file I/O policy (caching, lazy opening, degraded modes —
//! that's `core-reader`'s job).

pub mod chromosome;
pub mod error;
pub mod feature;
pub mod gap;
pub mod metadata;
pub mod sequence;

pub use chromosome::CHROMOSOMES;
pub use error::FormatError;
pub use feature::{
    CdsPayload, FeatureCounts, FeatureKind, FeatureTag, GenePayload, RecordPayload, Strand,
    END_BIT, FEATURE_MASK,
};
pub use gap::{GapFile, GapRange};
pub use metadata::{MetadataCursor, MetadataFile};
pub use sequence::{nucleotide_char, SequenceFile, NUCLEOTIDE_A, NUCLEOTIDE_C, NUCLEOTIDE_G, NUCLEOTIDE_T, NUCLEOTIDE_UNKNOWN};
