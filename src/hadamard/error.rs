use thiserror::Error;

// Error
//------------------------------------------------------------------------------

/// Failures raised while Hadamard-encoding a payload.
///
/// Every variant is detected before any codeword is written, so a failed call
/// never hands back partial output.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("code order {0} is outside [1, 16]")]
    InvalidCodeOrder(u32),
    #[error("message {message} is out of range for code order {code_order}")]
    OutOfRange { message: u32, code_order: u32 },
    #[error("character {ch:?} does not fit code order {code_order}")]
    CharacterOutOfRange { ch: char, code_order: u32 },
    #[error("non-binary character {ch:?} at position {position}")]
    NonBinaryInput { position: usize, ch: char },
    #[error("image encoding needs code order 7 or more, got {0}")]
    InsufficientCodeOrder(u32),
    #[error("failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),
    #[error("malformed encoded grid: {0}")]
    MalformedGrid(String),
}

pub type CodecResult<T> = Result<T, CodecError>;
