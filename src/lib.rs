//! # hadaqr
//!
//! Extended Hadamard encoding of text, bit strings and grayscale images, with the
//! encoded output packed into the fewest QR codes that can hold it.
//!
//! ## Features
//!
//! - **Hadamard codebook**: order K codewords of length `2^(K-1)` for messages in `[0, 2^K)`
//! - **Payload encoding**: text by code point, bit strings bit by bit, images pixel by pixel
//! - **Capacity probing**: binary search for the longest prefix of the data that fits one
//!   version 40 QR symbol at a given error correction level
//! - **Chunking**: splits the data into capacity-sized chunks and saves one PNG per chunk
//! - **QR generation**: versions 1-40, levels L/M/Q/H, numeric, alphanumeric & byte modes
//!
//! ## Quick Start
//!
//! ### Encoding
//!
//! ```rust
//! use hadaqr::{HadamardEncoder, TextKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let encoder = HadamardEncoder::new(8)?;
//!
//! // One 128-bit codeword per character
//! let bits = encoder.encode_text("Hi")?;
//! assert_eq!(bits.len(), 256);
//!
//! // Strings of 0s and 1s are encoded bit by bit
//! let encoded = encoder.encode_auto("1010")?;
//! assert_eq!(encoded.kind, TextKind::Binary);
//! # Ok(())
//! # }
//! ```
//!
//! ### Chunking into QR codes
//!
//! ```rust,no_run
//! use hadaqr::{ECLevel, HadamardEncoder, QrChunker};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let encoder = HadamardEncoder::new(8)?;
//! let encoded = encoder.encode_image_file("photo.png")?;
//!
//! let run = QrChunker::new("static/qrcodes").ec_level(ECLevel::M).run(&encoded.to_json()?)?;
//! println!("{} chunks of up to {} chars", run.chunks.len(), run.capacity);
//! # Ok(())
//! # }
//! ```
//!
//! ### Single QR code
//!
//! ```rust
//! use hadaqr::{ECLevel, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new(b"HELLO WORLD")
//!     .version(Version::new(1)?)
//!     .ec_level(ECLevel::Q)
//!     .build()?;
//!
//! let img = qr.render(10, 4);
//! assert_eq!(img.width(), (21 + 8) * 10);
//! # Ok(())
//! # }
//! ```

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub mod chunk;
pub(crate) mod common;
pub mod hadamard;

pub use builder::{QRBuilder, QR};
pub use chunk::{
    emit, max_chunk_size, plan, plan_with_mode, ChunkError, ChunkPlan, ChunkResult, ChunkRun,
    Emitter, OutputDir, PlanMode, QrChunker, QrEmitter,
};
pub use common::error::{EmitError, QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};
pub use hadamard::{
    is_binary_string, CodecError, CodecResult, Codeword, EncodedImage, EncodedText,
    HadamardEncoder, TextKind,
};
