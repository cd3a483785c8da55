#[cfg(test)]
mod chunk_proptests {

    use std::path::{Path, PathBuf};

    use proptest::prelude::*;

    use hadaqr::*;

    // Holds at most `limit` bytes
    struct ByteLimit(usize);

    impl Emitter for ByteLimit {
        fn try_build(&self, payload: &str, _: Version, _: ECLevel) -> QRResult<()> {
            if payload.len() > self.0 {
                Err(QRError::DataTooLong)
            } else {
                Ok(())
            }
        }

        fn render_and_save(&self, _: &str, _: ECLevel, dest: &Path) -> Result<PathBuf, EmitError> {
            Ok(dest.to_path_buf())
        }
    }

    pub fn ec_level_strategy() -> BoxedStrategy<ECLevel> {
        prop_oneof![Just(ECLevel::L), Just(ECLevel::M), Just(ECLevel::Q), Just(ECLevel::H)].boxed()
    }

    proptest! {
        #[test]
        fn proptest_round_trip(data in "\\PC{1,200}", limit in 4usize..64, ecl in ec_level_strategy()) {
            let plan = plan(&ByteLimit(limit), &data, ecl).unwrap();

            prop_assert_eq!(plan.chunks().concat(), data);
        }

        #[test]
        fn proptest_chunks_within_bound(data in "\\PC{1,200}", limit in 4usize..64) {
            let plan = plan(&ByteLimit(limit), &data, ECLevel::M).unwrap();
            let (last, full) = plan.chunks().split_last().unwrap();

            prop_assert!(plan.capacity() >= 1);
            prop_assert!(full.iter().all(|c| c.chars().count() == plan.capacity()));
            prop_assert!(last.chars().count() <= plan.capacity());
            prop_assert!(!last.is_empty());
        }

        #[test]
        fn proptest_reprobe_chunks_fit(data in "\\PC{1,200}", limit in 4usize..64) {
            let plan = plan_with_mode(&ByteLimit(limit), &data, ECLevel::M, PlanMode::Reprobe).unwrap();

            prop_assert_eq!(plan.chunks().concat(), data);
            prop_assert!(plan.chunks().iter().all(|c| c.len() <= limit));
        }

        #[test]
        fn proptest_capacity_bounds(data in "\\PC{0,100}", limit in 0usize..64) {
            let capacity = max_chunk_size(&ByteLimit(limit), &data, ECLevel::M).unwrap();
            let fits = data.chars().take(capacity).map(char::len_utf8).sum::<usize>();

            prop_assert!(capacity <= data.chars().count());
            prop_assert!(fits <= limit);
            if capacity < data.chars().count() {
                let next = data.chars().nth(capacity).unwrap().len_utf8();
                prop_assert!(fits + next > limit);
            }
        }

        #[test]
        fn proptest_qr_capacity_bounds(data in "[0-9A-Za-z]{1,40}", ecl in ec_level_strategy()) {
            let emitter = QrEmitter::default();
            let capacity = max_chunk_size(&emitter, &data, ecl).unwrap();

            prop_assert_eq!(capacity, data.len());
        }
    }
}

#[cfg(test)]
mod chunk_tests {

    use image::GrayImage;
    use test_case::test_case;

    use hadaqr::*;

    fn decode(img: &GrayImage) -> String {
        let (w, h) = img.dimensions();
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
            img.get_pixel(x as u32, y as u32).0[0]
        });
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1);
        let (_meta, decoded) = grids[0].decode().expect("Failed to read QR");
        decoded
    }

    #[test]
    fn test_single_char_capacity() {
        let capacity = max_chunk_size(&QrEmitter::default(), "x", ECLevel::H).unwrap();
        assert_eq!(capacity, 1);
    }

    #[test_case(ECLevel::L, 2)]
    #[test_case(ECLevel::H, 3)]
    fn test_encoded_image_round_trip_through_qr(ecl: ECLevel, exp_chunks: usize) {
        // 5x5 pixels of 64-bit codewords serialize to 3261 chars of byte mode data
        let enc = HadamardEncoder::new(7).unwrap();
        let img = GrayImage::from_fn(5, 5, |x, y| image::Luma([(x * 50 + y * 10) as u8]));
        let encoded = enc.encode_image(&img).unwrap();
        let json = encoded.to_json().unwrap();
        assert_eq!(json.len(), 3261);

        let tmp = tempfile::tempdir().unwrap();
        let run = QrChunker::new(tmp.path().join("qrcodes")).ec_level(ecl).module_size(3).run(&json).unwrap();
        assert_eq!(run.chunks.len(), exp_chunks);

        let decoded = run
            .images
            .iter()
            .map(|p| decode(&image::open(p).unwrap().to_luma8()))
            .collect::<String>();
        assert_eq!(decoded, json);
        assert_eq!(EncodedImage::from_json(&decoded).unwrap(), encoded);
    }

    #[test]
    fn test_binary_payload_through_qr() {
        let enc = HadamardEncoder::new(8).unwrap();
        let bits = enc.encode_text("Hadamard").unwrap();
        let data = bits.iter().map(|b| char::from(b'0' + b)).collect::<String>();
        assert_eq!(data.len(), 8 * 128);

        let tmp = tempfile::tempdir().unwrap();
        let run = QrChunker::new(tmp.path()).ec_level(ECLevel::Q).module_size(3).run(&data).unwrap();
        // A string of digits stays in numeric mode and fits one symbol
        assert_eq!(run.capacity, data.len());
        assert_eq!(run.images.len(), 1);
        assert_eq!(decode(&image::open(&run.images[0]).unwrap().to_luma8()), data);
    }

    #[test]
    fn test_emission_failure_reports_progress() {
        let tmp = tempfile::tempdir().unwrap();
        let out = OutputDir::prepare(tmp.path().join("out")).unwrap();
        let emitter = QrEmitter::default();
        let plan = plan(&emitter, &"A".repeat(5000), ECLevel::L).unwrap();
        assert_eq!(plan.chunks().len(), 2);

        // Remove the directory under the emitter's feet
        std::fs::remove_dir_all(out.path()).unwrap();
        match emit(&emitter, &plan, &out) {
            Err(ChunkError::Emission { index: 0, completed, source: EmitError::Save(_) }) => {
                assert!(completed.is_empty())
            }
            res => panic!("Unexpected result {res:?}"),
        }
    }
}
