//! Extended Hadamard encoding of integers, strings and grayscale images.

pub mod codebook;
pub mod error;
pub mod payload;
pub mod raster;

pub use codebook::{parity, Codeword, HadamardEncoder, Message, MAX_CODE_ORDER, MIN_CODE_ORDER};
pub use error::{CodecError, CodecResult};
pub use payload::{is_binary_string, EncodedText, TextKind};
pub use raster::{EncodedImage, MIN_IMAGE_CODE_ORDER};
