mod qr;

pub use qr::{Module, QR};

use tracing::debug;

use crate::common::{
    bitstream::BitStream,
    codec::{encode, encode_with_version},
    ec::{ecc, interleave},
    error::{QRError, QRResult},
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
};

pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::M, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn metadata(&self) -> String {
        match self.version {
            Some(v) => format!("{{ Version: {}, Ec level: {} }}", *v, self.ec_level),
            None => format!("{{ Version: None, Ec level: {} }}", self.ec_level),
        }
    }
}

#[cfg(test)]
mod qrbuilder_util_tests {
    use super::QRBuilder;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_metadata() {
        let data = "Hello, world!".as_bytes();
        let mut qr_builder = QRBuilder::new(data);
        qr_builder.version(Version::MIN).ec_level(ECLevel::L);
        assert_eq!(qr_builder.metadata(), "{ Version: 1, Ec level: L }");
        qr_builder.unset_version();
        assert_eq!(qr_builder.metadata(), "{ Version: None, Ec level: L }");
    }
}

impl QRBuilder<'_> {
    /// Encodes the payload into a finished symbol.
    ///
    /// With a pinned version the payload either fits that version or the build fails
    /// with [`QRError::DataTooLong`]; otherwise the smallest fitting version is used.
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}", self.metadata());
        if self.data.is_empty() {
            return Err(QRError::EmptyData);
        }

        let (encoded_data, version) = match self.version {
            Some(v) => (encode_with_version(self.data, v, self.ec_level)?, v),
            None => encode(self.data, self.ec_level)?,
        };

        let (data_blocks, ecc_blocks) = ecc(encoded_data.data(), version, self.ec_level);
        let mut payload = BitStream::new(version.total_codewords() << 3);
        interleave(&data_blocks)
            .into_iter()
            .chain(interleave(&ecc_blocks))
            .for_each(|b| payload.push_bits(b as u16, 8));

        let mut qr = QR::new(version, self.ec_level);
        qr.draw_all_function_patterns();
        qr.draw_encoding_region(&payload);

        let mask = match self.mask {
            Some(m) => {
                qr.apply_mask(m);
                m
            }
            None => apply_best_mask(&mut qr),
        };

        let total_modules = version.width() * version.width();
        debug!(
            "Built QR: version {version}, ec level {}, mask {}, data {} bytes, dark modules {}%",
            self.ec_level,
            *mask,
            self.data.len(),
            qr.count_dark_modules() * 100 / total_modules
        );

        Ok(qr)
    }
}
