use std::fmt::{Display, Formatter};

use tracing::debug;

use super::codebook::HadamardEncoder;
use super::error::{CodecError, CodecResult};

// Input classification
//------------------------------------------------------------------------------

/// True iff every character is `'0'` or `'1'`. The empty string is binary.
pub fn is_binary_string(input: &str) -> bool {
    input.chars().all(|c| matches!(c, '0' | '1'))
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum TextKind {
    Text,
    Binary,
}

impl Display for TextKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Binary => f.write_str("binary"),
        }
    }
}

/// Flat codeword bits of a string, tagged with the path that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    pub kind: TextKind,
    pub bits: Vec<u8>,
}

// Text & bit string encoding
//------------------------------------------------------------------------------

impl HadamardEncoder {
    /// Encodes every character's code point as one message, in order.
    pub fn encode_text(&self, input: &str) -> CodecResult<Vec<u8>> {
        let max = self.max_message();
        if let Some(ch) = input.chars().find(|&c| c as u32 > max) {
            return Err(CodecError::CharacterOutOfRange { ch, code_order: self.code_order() });
        }
        Ok(self.encode_messages(input.chars().map(|c| c as u32)))
    }

    /// Encodes every `'0'`/`'1'` character as message 0 or 1, in order.
    pub fn encode_binary(&self, input: &str) -> CodecResult<Vec<u8>> {
        if let Some((position, ch)) = input.chars().enumerate().find(|(_, c)| !matches!(c, '0' | '1')) {
            return Err(CodecError::NonBinaryInput { position, ch });
        }
        Ok(self.encode_messages(input.chars().map(|c| (c == '1') as u32)))
    }

    /// Picks bit string encoding when the input is binary, text encoding otherwise.
    pub fn encode_auto(&self, input: &str) -> CodecResult<EncodedText> {
        let kind = if is_binary_string(input) { TextKind::Binary } else { TextKind::Text };
        let bits = match kind {
            TextKind::Binary => self.encode_binary(input)?,
            TextKind::Text => self.encode_text(input)?,
        };
        debug!("Encoded {} chars as {kind} into {} bits", input.chars().count(), bits.len());
        Ok(EncodedText { kind, bits })
    }

    // Concatenates the codewords of validated messages
    fn encode_messages(&self, messages: impl Iterator<Item = u32>) -> Vec<u8> {
        let n = self.codeword_len();
        let mut bits = Vec::with_capacity(messages.size_hint().0 * n);
        for msg in messages {
            let start = bits.len();
            bits.resize(start + n, 0);
            self.write_codeword(msg, &mut bits[start..]);
        }
        bits
    }
}
