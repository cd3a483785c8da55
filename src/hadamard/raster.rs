use std::path::Path;

use image::GrayImage;
use rayon::prelude::*;
use tracing::debug;

use super::codebook::HadamardEncoder;
use super::error::{CodecError, CodecResult};

pub const MIN_IMAGE_CODE_ORDER: u32 = 7;

// Encoded image
//------------------------------------------------------------------------------

/// Codeword grid of shape (rows, cols, N), stored row major in one flat buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    rows: usize,
    cols: usize,
    codeword_len: usize,
    bits: Vec<u8>,
}

impl EncodedImage {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn codeword_len(&self) -> usize {
        self.codeword_len
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.rows, self.cols, self.codeword_len)
    }

    pub fn as_flat(&self) -> &[u8] {
        &self.bits
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&[u8]> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let start = (row * self.cols + col) * self.codeword_len;
        Some(&self.bits[start..start + self.codeword_len])
    }

    pub fn to_nested(&self) -> Vec<Vec<Vec<u8>>> {
        (0..self.rows)
            .map(|r| (0..self.cols).filter_map(|c| self.get(r, c)).map(<[u8]>::to_vec).collect())
            .collect()
    }

    /// Nested list text form `[[[b,...],...],...]`, the string handed to the chunker.
    pub fn to_json(&self) -> CodecResult<String> {
        serde_json::to_string(&self.to_nested()).map_err(|e| CodecError::MalformedGrid(e.to_string()))
    }

    /// Parses the text form back. Rows must have equal length, every cell must hold
    /// the same power-of-two number of 0/1 values, and the grid must have a cell.
    pub fn from_json(s: &str) -> CodecResult<Self> {
        let nested: Vec<Vec<Vec<u8>>> =
            serde_json::from_str(s).map_err(|e| CodecError::MalformedGrid(e.to_string()))?;
        Self::from_nested(nested)
    }

    pub fn from_nested(nested: Vec<Vec<Vec<u8>>>) -> CodecResult<Self> {
        let rows = nested.len();
        let cols = nested.first().map_or(0, Vec::len);
        let codeword_len = nested.first().and_then(|r| r.first()).map_or(0, Vec::len);
        if cols == 0 || codeword_len == 0 {
            return Err(CodecError::MalformedGrid("grid has no cells".to_owned()));
        }
        if !codeword_len.is_power_of_two() {
            return Err(CodecError::MalformedGrid(format!(
                "codeword length {codeword_len} is not a power of two"
            )));
        }

        let mut bits = Vec::with_capacity(rows * cols * codeword_len);
        for (r, row) in nested.into_iter().enumerate() {
            if row.len() != cols {
                return Err(CodecError::MalformedGrid(format!(
                    "row {r} has {} cells, expected {cols}",
                    row.len()
                )));
            }
            for (c, cell) in row.into_iter().enumerate() {
                if cell.len() != codeword_len {
                    return Err(CodecError::MalformedGrid(format!(
                        "cell ({r}, {c}) has {} bits, expected {codeword_len}",
                        cell.len()
                    )));
                }
                if let Some(b) = cell.iter().find(|&&b| b > 1) {
                    return Err(CodecError::MalformedGrid(format!("cell ({r}, {c}) holds {b}")));
                }
                bits.extend(cell);
            }
        }
        Ok(Self { rows, cols, codeword_len, bits })
    }
}

// Image encoding
//------------------------------------------------------------------------------

impl HadamardEncoder {
    /// Encodes every pixel intensity, saturated to `2^K - 1`, into its codeword.
    /// Rows are encoded in parallel.
    pub fn encode_image(&self, img: &GrayImage) -> CodecResult<EncodedImage> {
        if self.code_order() < MIN_IMAGE_CODE_ORDER {
            return Err(CodecError::InsufficientCodeOrder(self.code_order()));
        }

        let (cols, rows) = (img.width() as usize, img.height() as usize);
        let n = self.codeword_len();
        let max = self.max_message();
        let mut bits = vec![0; rows * cols * n];
        if !bits.is_empty() {
            bits.par_chunks_mut(cols * n).enumerate().for_each(|(r, row)| {
                for (c, cell) in row.chunks_exact_mut(n).enumerate() {
                    let px = img.get_pixel(c as u32, r as u32).0[0] as u32;
                    self.write_codeword(px.min(max), cell);
                }
            });
        }

        debug!("Encoded {rows}x{cols} image into {n}-bit codewords");
        Ok(EncodedImage { rows, cols, codeword_len: n, bits })
    }

    pub fn encode_image_file(&self, path: impl AsRef<Path>) -> CodecResult<EncodedImage> {
        if self.code_order() < MIN_IMAGE_CODE_ORDER {
            return Err(CodecError::InsufficientCodeOrder(self.code_order()));
        }
        let img = image::open(path.as_ref())?.to_luma8();
        self.encode_image(&img)
    }
}
