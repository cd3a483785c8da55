//! Capacity probing and chunking of strings into sequences of QR symbols.

pub mod capacity;
pub mod chunker;
pub mod emitter;
pub mod error;
pub mod output;
pub mod planner;

pub use capacity::max_chunk_size;
pub use chunker::{ChunkRun, QrChunker};
pub use emitter::{Emitter, QrEmitter};
pub use error::{ChunkError, ChunkResult};
pub use output::OutputDir;
pub use planner::{emit, plan, plan_with_mode, ChunkPlan, PlanMode};
