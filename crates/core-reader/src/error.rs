use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure opening a chromosome's file pair. Only a missing/unreadable
/// sequence file is fatal; a missing metadata file degrades the reader
/// instead (spec.md §7) and never reaches this type.
#[derive(Debug, Error)]
pub enum ReaderOpenError {
    #[error("sequence file for chromosome {chromosome} not found at {path}", path = path.display())]
    MissingSequence {
        chromosome: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
