use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{ChunkError, ChunkResult};

// Output directory
//------------------------------------------------------------------------------

/// Directory that receives the artifacts of one chunking run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Wipes `path` and recreates it empty.
    pub fn prepare(path: impl Into<PathBuf>) -> ChunkResult<Self> {
        let path = path.into();
        if path.exists() {
            fs::remove_dir_all(&path).map_err(ChunkError::OutputDir)?;
        }
        fs::create_dir_all(&path).map_err(ChunkError::OutputDir)?;
        debug!("Prepared output directory {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // qr_<random 128-bit token>.png
    pub fn next_artifact_path(&self) -> PathBuf {
        self.path.join(format!("qr_{:032x}.png", rand::random::<u128>()))
    }
}
