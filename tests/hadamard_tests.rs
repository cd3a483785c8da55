#[cfg(test)]
mod hadamard_proptests {

    use image::{GrayImage, Luma};
    use proptest::prelude::*;

    use hadaqr::*;

    pub fn message_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=12).prop_flat_map(|k| (Just(k), 0..1u32 << k))
    }

    proptest! {
        #[test]
        fn proptest_codeword_shape((k, msg) in message_strategy()) {
            let enc = HadamardEncoder::new(k).unwrap();
            let cw = enc.encode(msg).unwrap();

            prop_assert_eq!(cw.len(), 1 << (k - 1));
            prop_assert!(cw.iter().all(|&b| b <= 1));
        }

        #[test]
        fn proptest_deterministic((k, msg) in message_strategy()) {
            let a = HadamardEncoder::new(k).unwrap().encode(msg).unwrap();
            let b = HadamardEncoder::new(k).unwrap().encode(msg).unwrap();

            prop_assert_eq!(a, b);
        }

        #[test]
        fn proptest_out_of_range(k in 1u32..=16, excess in 0u32..1000) {
            let enc = HadamardEncoder::new(k).unwrap();
            let msg = (1 << k) + excess;

            let is_out_of_range = matches!(enc.encode(msg), Err(CodecError::OutOfRange { .. }));
            prop_assert!(is_out_of_range);
        }

        #[test]
        fn proptest_distinct_lower_half(k in 2u32..=8, a in any::<u32>(), b in any::<u32>()) {
            let n = 1 << (k - 1);
            let (a, b) = (a % n, b % n);
            prop_assume!(a != b);
            let enc = HadamardEncoder::new(k).unwrap();

            prop_assert_ne!(enc.encode(a).unwrap(), enc.encode(b).unwrap());
        }

        #[test]
        fn proptest_text_is_codeword_concat(text in "[ -~]{0,40}") {
            let enc = HadamardEncoder::new(8).unwrap();
            let bits = enc.encode_text(&text).unwrap();
            let exp = text.chars().flat_map(|c| Vec::from(enc.encode(c as u32).unwrap())).collect::<Vec<_>>();

            prop_assert_eq!(bits, exp);
        }

        #[test]
        fn proptest_auto_classification(text in "[01a]{0,30}") {
            let enc = HadamardEncoder::new(8).unwrap();
            let encoded = enc.encode_auto(&text).unwrap();

            prop_assert_eq!(encoded.kind == TextKind::Binary, is_binary_string(&text));
            prop_assert_eq!(encoded.bits.len(), text.len() * 128);
        }

        #[test]
        fn proptest_image_json_round_trip(w in 1u32..6, h in 1u32..6, k in 7u32..=9, seed in any::<u64>()) {
            let img = GrayImage::from_fn(w, h, |x, y| Luma([(seed >> ((x + y * 3) % 56)) as u8]));
            let enc = HadamardEncoder::new(k).unwrap();
            let encoded = enc.encode_image(&img).unwrap();
            let json = encoded.to_json().unwrap();

            prop_assert_eq!(encoded.shape(), (h as usize, w as usize, 1 << (k - 1)));
            prop_assert_eq!(EncodedImage::from_json(&json).unwrap(), encoded);
        }
    }

    #[test]
    fn test_single_saturated_pixel() {
        let enc = HadamardEncoder::new(7).unwrap();
        let encoded = enc.encode_image(&GrayImage::from_pixel(1, 1, Luma([255]))).unwrap();

        assert_eq!(encoded.shape(), (1, 1, 64));
        assert_eq!(encoded.get(0, 0).unwrap(), &*enc.encode(127).unwrap());
    }

    #[test]
    fn test_binary_order_2() {
        let enc = HadamardEncoder::new(2).unwrap();
        let one = enc.encode(1).unwrap();
        let zero = enc.encode(0).unwrap();
        let exp = [&*one, &*zero, &*one].concat();

        assert_eq!(enc.encode_binary("101").unwrap(), exp);
        assert_eq!(exp, [1, 0, 1, 1, 1, 0]);
    }
}
