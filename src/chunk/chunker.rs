use std::path::PathBuf;

use tracing::info;

use super::emitter::{Emitter, QrEmitter};
use super::error::ChunkResult;
use super::output::OutputDir;
use super::planner::{emit, plan_with_mode, PlanMode};
use crate::common::metadata::ECLevel;

/// Outcome of a full chunking run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRun {
    pub capacity: usize,
    pub chunks: Vec<String>,
    pub images: Vec<PathBuf>,
}

/// Splits a string into capacity-sized chunks and saves one QR image per chunk.
///
/// ```no_run
/// use hadaqr::{ECLevel, QrChunker};
///
/// let run = QrChunker::new("static/qrcodes").ec_level(ECLevel::L).run("HELLO WORLD").unwrap();
/// assert_eq!(run.images.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct QrChunker {
    dir: PathBuf,
    ec_level: ECLevel,
    mode: PlanMode,
    module_size: u32,
    border: u32,
}

impl QrChunker {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let emitter = QrEmitter::default();
        Self {
            dir: dir.into(),
            ec_level: ECLevel::M,
            mode: PlanMode::Uniform,
            module_size: emitter.module_size(),
            border: emitter.border(),
        }
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mode(&mut self, mode: PlanMode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn module_size(&mut self, module_size: u32) -> &mut Self {
        self.module_size = module_size;
        self
    }

    pub fn border(&mut self, border: u32) -> &mut Self {
        self.border = border;
        self
    }

    pub fn emitter(&self) -> QrEmitter {
        QrEmitter::new(self.module_size, self.border)
    }

    pub fn run(&self, data: &str) -> ChunkResult<ChunkRun> {
        self.run_with(&self.emitter(), data)
    }

    /// Clears the output directory, plans the chunks and emits them with `emitter`.
    pub fn run_with<E: Emitter + ?Sized>(&self, emitter: &E, data: &str) -> ChunkResult<ChunkRun> {
        let output = OutputDir::prepare(&self.dir)?;
        let plan = plan_with_mode(emitter, data, self.ec_level, self.mode)?;
        let images = emit(emitter, &plan, &output)?;
        info!("Saved {} QR images to {}", images.len(), output.path().display());
        Ok(ChunkRun { capacity: plan.capacity(), chunks: plan.into_chunks(), images })
    }
}
