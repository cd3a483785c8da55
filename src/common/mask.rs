use std::ops::Deref;

use super::error::{QRError, QRResult};
use super::metadata::Color;
use crate::builder::QR;

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        if pattern < 8 {
            Ok(Self(pattern))
        } else {
            Err(QRError::InvalidMaskPattern)
        }
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        (p & 1) + (p % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((p & 1) + (p % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let p = r as i32 * c as i32;
        ((((r + c) & 1) as i32) + (p % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_function(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Invalid pattern {}", self.0),
        }
    }
}

#[cfg(test)]
mod mask_function_tests {
    use super::MaskPattern;

    #[test]
    fn test_invalid_pattern() {
        assert!(MaskPattern::new(8).is_err());
    }

    #[test]
    fn test_checkerboard() {
        let f = MaskPattern::new(0).unwrap().mask_function();
        assert!(f(0, 0));
        assert!(!f(0, 1));
        assert!(f(1, 1));
    }

    #[test]
    fn test_large_checkerboard() {
        let f = MaskPattern::new(4).unwrap().mask_function();
        assert!(f(0, 2));
        assert!(!f(0, 3));
        assert!(!f(2, 0));
        assert!(f(2, 3));
    }

    #[test]
    fn test_meadow() {
        let f = MaskPattern::new(7).unwrap().mask_function();
        assert!(f(0, 0));
        assert!(!f(0, 1));
        assert!(!f(1, 1));
        assert!(f(1, 3));
    }
}

// Mask selection
//------------------------------------------------------------------------------

pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let best_mask = MaskPattern::all()
        .min_by_key(|m| {
            let mut qr = qr.clone();
            qr.apply_mask(*m);
            compute_total_penalty(&qr)
        })
        .unwrap_or(MaskPattern(0));
    qr.apply_mask(best_mask);
    best_mask
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr, true) + compute_adjacent_penalty(qr, false);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen = compute_finder_pattern_penalty(qr, true) + compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen + bal_pen
}

// Runs of 5 or more same colored modules in a line
fn compute_adjacent_penalty(qr: &QR, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for i in 0..w {
        let mut last = qr.color_at(i, 0, is_hor);
        let mut run = 1;
        for j in 1..w {
            let clr = qr.color_at(i, j, is_hor);
            if clr == last {
                run += 1;
                if run == 5 {
                    pen += 3;
                } else if run > 5 {
                    pen += 1;
                }
            } else {
                last = clr;
                run = 1;
            }
        }
    }
    pen
}

// 2x2 blocks of the same color
fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

// 1:1:3:1:1 finder-like runs with 4 light modules on either side. Modules beyond
// the symbol edge count as light.
fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];

    let mut pen = 0;
    let w = qr.width() as i16;
    let light_at = |i: i16, j: i16| j < 0 || j >= w || qr.color_at(i, j, is_hor) == Color::Light;
    for i in 0..w {
        for j in 0..=w - 7 {
            if !(0..7).all(|k| qr.color_at(i, j + k, is_hor) == PATTERN[k as usize]) {
                continue;
            }
            if (1..=4).all(|k| light_at(i, j - k)) {
                pen += 40;
            }
            if (7..11).all(|k| light_at(i, j + k)) {
                pen += 40;
            }
        }
    }
    pen
}

// Deviation of the dark module ratio from 50%, in steps of 5%
fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark = qr.count_dark_modules() as i64;
    let total = (qr.width() * qr.width()) as i64;
    let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
    k.max(0) as u32 * 10
}

#[cfg(test)]
mod penalty_tests {
    use super::{apply_best_mask, compute_total_penalty, MaskPattern};
    use crate::builder::QRBuilder;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_best_mask_has_min_penalty() {
        let qr = QRBuilder::new(b"HELLO WORLD")
            .version(Version::new(1).unwrap())
            .ec_level(ECLevel::Q)
            .build()
            .unwrap();
        let best = compute_total_penalty(&qr);
        for m in MaskPattern::all() {
            let qr = QRBuilder::new(b"HELLO WORLD")
                .version(Version::new(1).unwrap())
                .ec_level(ECLevel::Q)
                .mask(m)
                .build()
                .unwrap();
            assert!(best <= compute_total_penalty(&qr), "Mask {m:?} beats the chosen mask");
        }
    }

    #[test]
    fn test_apply_best_mask_sets_mask() {
        let mut qr = QRBuilder::new(b"12345")
            .version(Version::new(2).unwrap())
            .mask(MaskPattern::new(3).unwrap())
            .build()
            .unwrap();
        let mask = apply_best_mask(&mut qr);
        assert_eq!(qr.mask(), Some(mask));
    }
}
