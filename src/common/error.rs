use thiserror::Error;

// Error
//------------------------------------------------------------------------------

/// Failures raised while building a QR symbol.
///
/// `DataTooLong` is the overflow signal: the payload does not fit the requested
/// version (or any version when none is requested). Capacity probing branches on
/// it, so it must stay distinguishable from every other variant.
#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    #[error("empty data")]
    EmptyData,
    #[error("data too long")]
    DataTooLong,
    #[error("invalid version")]
    InvalidVersion,
    #[error("invalid error correction level")]
    InvalidECLevel,
    #[error("invalid mask pattern")]
    InvalidMaskPattern,
}

pub type QRResult<T> = Result<T, QRError>;

/// Failures raised while turning a payload into a saved barcode image.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to build QR: {0}")]
    Build(#[from] QRError),
    #[error("failed to save QR image: {0}")]
    Save(#[from] image::ImageError),
}
