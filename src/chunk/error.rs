use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::common::error::{EmitError, QRError};
use crate::common::metadata::ECLevel;

// Error
//------------------------------------------------------------------------------

/// Failures raised while planning chunks or emitting their barcodes.
///
/// Overflow during capacity probing is a search signal and never shows up here.
#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("no data to chunk")]
    EmptyData,
    #[error("not even one character fits a version 40 symbol at level {0}")]
    NoCapacity(ECLevel),
    #[error("capacity probe failed: {0}")]
    Probe(QRError),
    #[error("failed to emit chunk {index} ({} earlier artifacts kept): {source}", .completed.len())]
    Emission { index: usize, completed: Vec<PathBuf>, source: EmitError },
    #[error("failed to prepare output directory: {0}")]
    OutputDir(#[source] io::Error),
}

pub type ChunkResult<T> = Result<T, ChunkError>;
