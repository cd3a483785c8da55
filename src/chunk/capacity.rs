use std::iter::once;
use std::str::CharIndices;

use tracing::{debug, trace};

use super::emitter::Emitter;
use super::error::{ChunkError, ChunkResult};
use crate::common::error::QRError;
use crate::common::metadata::{ECLevel, Version};

// Capacity prober
//------------------------------------------------------------------------------

/// Largest number of leading characters of `data` that fit one symbol of the largest
/// version at `ec_level`.
///
/// Binary search over the prefix length, one `try_build` per probe. Returns 0 when
/// not even one character fits, and for empty data.
pub fn max_chunk_size<E: Emitter + ?Sized>(
    emitter: &E,
    data: &str,
    ec_level: ECLevel,
) -> ChunkResult<usize> {
    if data.is_empty() {
        return Ok(0);
    }

    // Byte offset where the prefix of m characters ends
    let ends = data.char_indices().map(|(i, _)| i).chain(once(data.len())).collect::<Vec<_>>();

    let (mut lo, mut hi) = (1, ends.len() - 1);
    let mut max_size = 0;
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        if fits(emitter, &data[..ends[mid]], ec_level)? {
            max_size = mid;
            lo = mid + 1;
        } else {
            hi = mid - 1;
        }
    }

    debug!("Capacity at level {ec_level}: {max_size} of {} chars", ends.len() - 1);
    Ok(max_size)
}

/// Same bound as [`max_chunk_size`], searched outwards from `hint`.
///
/// Doubles the prefix length from `hint` until a prefix overflows or the data runs out,
/// then binary searches the last gap. Only the probed prefixes are scanned, so the
/// cost follows the bound rather than the length of `data`.
pub(crate) fn max_chunk_size_from<E: Emitter + ?Sized>(
    emitter: &E,
    data: &str,
    ec_level: ECLevel,
    hint: usize,
) -> ChunkResult<usize> {
    let mut ends = PrefixEnds::new(data);

    // `fit` chars are known to fit, `over` chars are known to overflow
    let mut fit = 0;
    let mut m = hint.max(1);
    let over = loop {
        let end = match ends.get(m) {
            Some(end) => end,
            None => {
                m = ends.scanned();
                if m <= fit {
                    return Ok(fit);
                }
                data.len()
            }
        };
        if !fits(emitter, &data[..end], ec_level)? {
            break m;
        }
        fit = m;
        if end == data.len() {
            return Ok(fit);
        }
        m *= 2;
    };

    let (mut lo, mut hi) = (fit + 1, over - 1);
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let end = ends.get(mid).unwrap_or(data.len());
        if fits(emitter, &data[..end], ec_level)? {
            fit = mid;
            lo = mid + 1;
        } else {
            hi = mid - 1;
        }
    }

    trace!("Capacity at level {ec_level} from hint {hint}: {fit} chars");
    Ok(fit)
}

// Overflow is the only error that steers the search
fn fits<E: Emitter + ?Sized>(emitter: &E, prefix: &str, ec_level: ECLevel) -> ChunkResult<bool> {
    match emitter.try_build(prefix, Version::MAX, ec_level) {
        Ok(()) => Ok(true),
        Err(QRError::DataTooLong) => Ok(false),
        Err(e) => Err(ChunkError::Probe(e)),
    }
}

// Byte offsets where prefixes of 0, 1, 2.. chars end, scanned on demand
struct PrefixEnds<'a> {
    chars: CharIndices<'a>,
    ends: Vec<usize>,
}

impl<'a> PrefixEnds<'a> {
    fn new(data: &'a str) -> Self {
        Self { chars: data.char_indices(), ends: vec![0] }
    }

    // Byte length of the first `m` chars, None when the data is shorter
    fn get(&mut self, m: usize) -> Option<usize> {
        while self.ends.len() <= m {
            let (i, c) = self.chars.next()?;
            self.ends.push(i + c.len_utf8());
        }
        Some(self.ends[m])
    }

    fn scanned(&self) -> usize {
        self.ends.len() - 1
    }
}
