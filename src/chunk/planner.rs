use std::path::PathBuf;

use tracing::{debug, info};

use super::capacity::{max_chunk_size, max_chunk_size_from};
use super::emitter::Emitter;
use super::error::{ChunkError, ChunkResult};
use super::output::OutputDir;
use crate::common::metadata::ECLevel;

// Plan
//------------------------------------------------------------------------------

/// How the chunk size bound is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanMode {
    /// Probe the whole data once and cut every chunk to that bound.
    #[default]
    Uniform,
    /// Probe the remaining data before cutting each chunk, searching outwards from
    /// the previous bound.
    Reprobe,
}

/// Ordered chunks whose concatenation is the source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    capacity: usize,
    ec_level: ECLevel,
    chunks: Vec<String>,
}

impl ChunkPlan {
    // Bound probed on the full data
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn into_chunks(self) -> Vec<String> {
        self.chunks
    }
}

pub fn plan<E: Emitter + ?Sized>(emitter: &E, data: &str, ec_level: ECLevel) -> ChunkResult<ChunkPlan> {
    plan_with_mode(emitter, data, ec_level, PlanMode::Uniform)
}

pub fn plan_with_mode<E: Emitter + ?Sized>(
    emitter: &E,
    data: &str,
    ec_level: ECLevel,
    mode: PlanMode,
) -> ChunkResult<ChunkPlan> {
    if data.is_empty() {
        return Err(ChunkError::EmptyData);
    }

    let capacity = max_chunk_size(emitter, data, ec_level)?;
    if capacity == 0 {
        return Err(ChunkError::NoCapacity(ec_level));
    }

    let chunks = match mode {
        PlanMode::Uniform => split_chars(data, capacity),
        PlanMode::Reprobe => {
            let mut chunks = Vec::new();
            let mut rest = data;
            let mut size = capacity;
            loop {
                let (head, tail) = split_at_char(rest, size);
                chunks.push(head.to_owned());
                rest = tail;
                if rest.is_empty() {
                    break;
                }
                size = max_chunk_size_from(emitter, rest, ec_level, size)?;
                if size == 0 {
                    return Err(ChunkError::NoCapacity(ec_level));
                }
            }
            chunks
        }
    };

    info!(
        "Planned {} chunks of at most {capacity} chars for {} chars at level {ec_level} ({mode:?})",
        chunks.len(),
        data.chars().count()
    );
    Ok(ChunkPlan { capacity, ec_level, chunks })
}

// Splits after `n` characters, or at the end when shorter
fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    let end = s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    s.split_at(end)
}

fn split_chars(data: &str, size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        let (head, tail) = split_at_char(rest, size);
        chunks.push(head.to_owned());
        rest = tail;
    }
    chunks
}

// Emission
//------------------------------------------------------------------------------

/// Emits one artifact per chunk, in plan order. Stops at the first failure and
/// reports the chunk index together with the artifacts already written.
pub fn emit<E: Emitter + ?Sized>(
    emitter: &E,
    plan: &ChunkPlan,
    output: &OutputDir,
) -> ChunkResult<Vec<PathBuf>> {
    let mut completed = Vec::with_capacity(plan.len());
    for (index, chunk) in plan.chunks().iter().enumerate() {
        let dest = output.next_artifact_path();
        match emitter.render_and_save(chunk, plan.ec_level(), &dest) {
            Ok(path) => {
                debug!("Chunk {index} ({} chars) -> {}", chunk.chars().count(), path.display());
                completed.push(path);
            }
            Err(source) => return Err(ChunkError::Emission { index, completed, source }),
        }
    }
    Ok(completed)
}
