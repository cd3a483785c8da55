use std::ops::Deref;

use super::error::{CodecError, CodecResult};

pub type Message = u32;

pub const MIN_CODE_ORDER: u32 = 1;
pub const MAX_CODE_ORDER: u32 = 16;

// Codeword
//------------------------------------------------------------------------------

/// One encoded message: `2^(K-1)` bits stored as 0/1 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Codeword(Vec<u8>);

impl Deref for Codeword {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Codeword> for Vec<u8> {
    fn from(cw: Codeword) -> Self {
        cw.0
    }
}

// Hadamard encoder
//------------------------------------------------------------------------------

/// Extended Hadamard encoder of order K.
///
/// The sign table `s(i) = (-1)^popcount(i)` for every row index `i < 2^K` is built
/// once on construction and owned by the encoder, so encoders of different orders
/// never share state.
///
/// ```
/// use hadaqr::HadamardEncoder;
///
/// let enc = HadamardEncoder::new(2).unwrap();
/// assert_eq!(&*enc.encode(1).unwrap(), &[1, 0]);
/// assert_eq!(enc.encode_binary("101").unwrap(), [1, 0, 1, 1, 1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HadamardEncoder {
    k: u32,
    signs: Vec<i8>,
}

impl HadamardEncoder {
    pub fn new(k: u32) -> CodecResult<Self> {
        if !(MIN_CODE_ORDER..=MAX_CODE_ORDER).contains(&k) {
            return Err(CodecError::InvalidCodeOrder(k));
        }
        let signs = (0..1u32 << k).map(|i| 1 - 2 * parity(i) as i8).collect();
        Ok(Self { k, signs })
    }

    pub fn code_order(&self) -> u32 {
        self.k
    }

    // W
    pub fn matrix_size(&self) -> usize {
        1 << self.k
    }

    // N
    pub fn codeword_len(&self) -> usize {
        1 << (self.k - 1)
    }

    pub fn max_message(&self) -> Message {
        (1 << self.k) - 1
    }

    pub fn signs(&self) -> &[i8] {
        &self.signs
    }

    pub fn encode(&self, message: Message) -> CodecResult<Codeword> {
        if message > self.max_message() {
            return Err(CodecError::OutOfRange { message, code_order: self.k });
        }
        let mut bits = vec![0; self.codeword_len()];
        self.write_codeword(message, &mut bits);
        Ok(Codeword(bits))
    }

    // Writes the codeword of an already validated message into `out`
    pub(crate) fn write_codeword(&self, message: Message, out: &mut [u8]) {
        debug_assert!(message <= self.max_message(), "Message out of range: {message}");
        debug_assert_eq!(out.len(), self.codeword_len(), "Output is not one codeword long");

        let n = self.codeword_len();
        for (j, bit) in out.iter_mut().enumerate() {
            let row = message as usize & (j | n);
            *bit = (self.signs[row] == 1) as u8;
        }
    }
}

/// Parity of the set bits of `x`: 0 when even, 1 when odd.
pub fn parity(mut x: u32) -> u32 {
    x ^= x >> 16;
    x ^= x >> 8;
    x ^= x >> 4;
    x ^= x >> 2;
    x ^= x >> 1;
    x & 1
}
