use std::path::{Path, PathBuf};

use tracing::trace;

use crate::builder::QRBuilder;
use crate::common::codec::encode_with_version;
use crate::common::error::{EmitError, QRResult};
use crate::common::metadata::{ECLevel, Version};

// Emitter
//------------------------------------------------------------------------------

/// Barcode backend used by the capacity prober and the chunk planner.
pub trait Emitter {
    /// Checks whether `payload` fits a symbol of `version` at `ec_level`.
    ///
    /// Overflow must be reported as [`QRError::DataTooLong`] and be monotonic in
    /// payload length: if a prefix overflows, every longer prefix overflows too.
    ///
    /// [`QRError::DataTooLong`]: crate::QRError::DataTooLong
    fn try_build(&self, payload: &str, version: Version, ec_level: ECLevel) -> QRResult<()>;

    /// Renders `payload` in the smallest fitting symbol and writes it to `dest`.
    fn render_and_save(
        &self,
        payload: &str,
        ec_level: ECLevel,
        dest: &Path,
    ) -> Result<PathBuf, EmitError>;
}

// QR emitter
//------------------------------------------------------------------------------

/// Emits QR symbols as PNG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrEmitter {
    module_size: u32,
    border: u32,
}

impl Default for QrEmitter {
    fn default() -> Self {
        Self { module_size: 10, border: 4 }
    }
}

impl QrEmitter {
    pub fn new(module_size: u32, border: u32) -> Self {
        Self { module_size, border }
    }

    pub fn module_size(&self) -> u32 {
        self.module_size
    }

    pub fn border(&self) -> u32 {
        self.border
    }
}

impl Emitter for QrEmitter {
    // Overflow is fully decided by the data encoding, so no symbol is drawn
    fn try_build(&self, payload: &str, version: Version, ec_level: ECLevel) -> QRResult<()> {
        let res = encode_with_version(payload.as_bytes(), version, ec_level).map(|_| ());
        trace!("Probe {} bytes at {version}-{ec_level}: {res:?}", payload.len());
        res
    }

    fn render_and_save(
        &self,
        payload: &str,
        ec_level: ECLevel,
        dest: &Path,
    ) -> Result<PathBuf, EmitError> {
        let qr = QRBuilder::new(payload.as_bytes()).ec_level(ec_level).build()?;
        qr.render(self.module_size, self.border).save(dest)?;
        trace!("Saved version {} QR to {}", *qr.version(), dest.display());
        Ok(dest.to_path_buf())
    }
}

#[cfg(test)]
mod emitter_tests {
    use super::{Emitter, QrEmitter};
    use crate::common::error::{EmitError, QRError};
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_try_build_overflow() {
        let emitter = QrEmitter::default();
        let fits = "a".repeat(2331);
        assert_eq!(emitter.try_build(&fits, Version::MAX, ECLevel::M), Ok(()));
        let overflow = "a".repeat(2332);
        assert_eq!(emitter.try_build(&overflow, Version::MAX, ECLevel::M), Err(QRError::DataTooLong));
    }

    #[test]
    fn test_try_build_other_errors() {
        let emitter = QrEmitter::default();
        assert_eq!(emitter.try_build("", Version::MAX, ECLevel::M), Err(QRError::EmptyData));
    }

    #[test]
    fn test_render_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("qr.png");
        let emitter = QrEmitter::new(2, 1);
        let path = emitter.render_and_save("HELLO WORLD", ECLevel::Q, &dest).unwrap();
        assert_eq!(path, dest);

        let img = image::open(&path).unwrap().to_luma8();
        // Version 1 is 21 modules wide
        assert_eq!(img.dimensions(), (46, 46));
    }

    #[test]
    fn test_render_and_save_errors() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = QrEmitter::default();

        let res = emitter.render_and_save("", ECLevel::M, &dir.path().join("qr.png"));
        assert!(matches!(res, Err(EmitError::Build(QRError::EmptyData))));

        let res = emitter.render_and_save("ok", ECLevel::M, &dir.path().join("missing/qr.png"));
        assert!(matches!(res, Err(EmitError::Save(_))));
    }
}
