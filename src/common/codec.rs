use tracing::trace;

use super::bitstream::BitStream;
use super::error::{QRError, QRResult};
use super::metadata::{ECLevel, Version};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
}

impl Mode {
    // Narrowest mode able to hold every byte. A prefix never needs a wider mode than
    // the whole payload, which keeps overflow monotonic in payload length.
    pub fn narrowest(data: &[u8]) -> Self {
        MODES
            .iter()
            .copied()
            .find(|m| data.iter().all(|b| m.contains(*b)))
            .unwrap_or(Self::Byte)
    }

    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => {
                matches!(byte, b'0'..=b'9' | b'A'..=b'Z' | b' ' | b'$' | b'%' | b'*' | b'+' | b'-' | b'.' | b'/' | b':')
            }
            Self::Byte => true,
        }
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        match char {
            b'0'..=b'9' => (char - b'0') as u16,
            b'A'..=b'Z' => (char - b'A' + 10) as u16,
            b' ' => 36,
            b'$' => 37,
            b'%' => 38,
            b'*' => 39,
            b'+' => 40,
            b'-' => 41,
            b'.' => 42,
            b'/' => 43,
            b':' => 44,
            _ => unreachable!("Invalid alphanumeric {char}"),
        }
    }

    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + (b - b'0') as u16)
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data[0] as u16
            }
        }
    }

    // Bit length of `len` characters, excluding the segment header
    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
        }
    }

    fn chunk_size(&self) -> usize {
        match *self {
            Self::Numeric => 3,
            Self::Alphanumeric => 2,
            Self::Byte => 1,
        }
    }
}

#[cfg(test)]
mod mode_tests {
    use super::Mode::{self, *};

    #[test]
    fn test_comparison() {
        assert!(Numeric < Alphanumeric);
        assert!(Alphanumeric < Byte);
    }

    #[test]
    fn test_narrowest() {
        assert_eq!(Mode::narrowest(b"0123456789"), Numeric);
        assert_eq!(Mode::narrowest(b"HELLO WORLD"), Alphanumeric);
        assert_eq!(Mode::narrowest(b"Hello, world!"), Byte);
        assert_eq!(Mode::narrowest(b"[[[1, 0]]]"), Byte);
    }

    #[test]
    fn test_is_alphanumeric() {
        assert!(Alphanumeric.contains(b'0'));
        assert!(Alphanumeric.contains(b'Z'));
        assert!(Alphanumeric.contains(b':'));
        assert!(!Alphanumeric.contains(b'a'));
        assert!(!Alphanumeric.contains(b'['));
    }

    #[test]
    fn test_numeric_encoding() {
        assert_eq!(Numeric.encode_chunk(b"012"), 0b0000001100);
        assert_eq!(Numeric.encode_chunk(b"345"), 0b0101011001);
        assert_eq!(Numeric.encode_chunk(b"67"), 0b1000011);
        assert_eq!(Numeric.encode_chunk(b"8"), 0b1000);
    }

    #[test]
    fn test_alphanumeric_encoding() {
        assert_eq!(Alphanumeric.encode_chunk(b"AC"), 0b00111001110);
        assert_eq!(Alphanumeric.encode_chunk(b"-4"), 0b11100111001);
        assert_eq!(Alphanumeric.encode_chunk(b"2"), 0b000010);
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(Numeric.encoded_len(3), 10);
        assert_eq!(Numeric.encoded_len(2), 7);
        assert_eq!(Numeric.encoded_len(1), 4);
        assert_eq!(Alphanumeric.encoded_len(2), 11);
        assert_eq!(Alphanumeric.encoded_len(1), 6);
        assert_eq!(Byte.encoded_len(1), 8);
    }
}

// Segment
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub mode: Mode,
    pub data: &'a [u8],
}

impl<'a> Segment<'a> {
    pub fn new(mode: Mode, data: &'a [u8]) -> Self {
        debug_assert!(data.iter().all(|b| mode.contains(*b)), "Data doesn't fit mode {mode:?}");
        Self { mode, data }
    }

    pub fn bit_len(&self, ver: Version) -> usize {
        ver.mode_bits() + ver.char_cnt_bits(self.mode) + self.mode.encoded_len(self.data.len())
    }

    pub fn fits(&self, ver: Version, ecl: ECLevel) -> bool {
        self.data.len() < (1 << ver.char_cnt_bits(self.mode))
            && self.bit_len(ver) <= ver.data_bit_capacity(ecl)
    }
}


// Encoder
//------------------------------------------------------------------------------

// Encodes data into the smallest version that holds it
pub fn encode(data: &[u8], ecl: ECLevel) -> QRResult<(BitStream, Version)> {
    if data.is_empty() {
        return Err(QRError::EmptyData);
    }

    let seg = Segment::new(Mode::narrowest(data), data);
    let ver = Version::all().find(|v| seg.fits(*v, ecl)).ok_or(QRError::DataTooLong)?;
    trace!("Smallest version for {} bytes in {:?} mode: {ver}", data.len(), seg.mode);
    Ok((write(&seg, ver, ecl), ver))
}

pub fn encode_with_version(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<BitStream> {
    if data.is_empty() {
        return Err(QRError::EmptyData);
    }

    let seg = Segment::new(Mode::narrowest(data), data);
    if !seg.fits(ver, ecl) {
        return Err(QRError::DataTooLong);
    }
    Ok(write(&seg, ver, ecl))
}

fn write(seg: &Segment, ver: Version, ecl: ECLevel) -> BitStream {
    let mut bs = BitStream::new(ver.data_bit_capacity(ecl));
    push_segment(seg, ver, &mut bs);
    push_terminator(&mut bs);
    pad_remaining_capacity(&mut bs);
    bs
}

// Writer for encoded data
//------------------------------------------------------------------------------

fn push_segment(seg: &Segment, ver: Version, out: &mut BitStream) {
    out.push_bits(seg.mode as u16, ver.mode_bits());
    let char_cnt = seg.data.len();
    let len_bits = ver.char_cnt_bits(seg.mode);
    debug_assert!(
        char_cnt < (1 << len_bits),
        "Char count exceeds bit length: Char count {char_cnt}, Char count bits {len_bits}"
    );
    out.push_bits(char_cnt as u16, len_bits);
    for chunk in seg.data.chunks(seg.mode.chunk_size()) {
        let len = seg.mode.encoded_len(chunk.len());
        out.push_bits(seg.mode.encode_chunk(chunk), len);
    }
}

fn push_terminator(out: &mut BitStream) {
    let bit_len = out.len();
    let bit_capacity = out.capacity();
    if bit_len < bit_capacity {
        let term_len = std::cmp::min(4, bit_capacity - bit_len);
        out.push_bits(0, term_len);
    }
}

fn pad_remaining_capacity(out: &mut BitStream) {
    let offset = out.len() & 7;
    if offset > 0 {
        out.push_bits(0, 8 - offset);
    }

    let remain_byte_capacity = (out.capacity() - out.len()) >> 3;
    PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
        out.push_bits(pc as u16, 8);
    });
}


// Global constants
//------------------------------------------------------------------------------

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

pub static MODES: [Mode; 3] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
