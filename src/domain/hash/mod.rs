pub mod keccak256;

/// A 32-byte hash word, the unit every layer and proof is made of.
pub type Word = [u8; 32];

pub trait HashMethod {
    /// Hash a raw value. The value is forced into a [`Word`] first.
    fn hash_leaf(data: &[u8]) -> Word;

    /// Hash two child nodes together, left operand first.
    fn hash_nodes(left: &Word, right: &Word) -> Word;
}

/// Force `data` into exactly 32 bytes: long values keep their leading 32
/// bytes, short values are left-padded with zeros.
pub fn canonical_word(data: &[u8]) -> Word {
    let mut word = [0u8; 32];
    if data.len() >= 32 {
        word.copy_from_slice(&data[..32]);
    } else {
        word[32 - data.len()..].copy_from_slice(data);
    }
    word
}

pub fn to_hex(word: &Word) -> String {
    format!("0x{}", hex::encode(word))
}

#[cfg(test)]
mod tests {
    use super::{canonical_word, to_hex};

    #[test]
    fn test_short_value_is_left_padded() {
        let word = canonical_word(&[0xab, 0xcd]);
        assert_eq!(word[..30], [0u8; 30]);
        assert_eq!(word[30..], [0xab, 0xcd]);
    }

    #[test]
    fn test_long_value_keeps_leading_bytes() {
        let data: Vec<u8> = (0..40).collect();
        let word = canonical_word(&data);
        assert_eq!(word.to_vec(), data[..32].to_vec());
    }

    #[test]
    fn test_exact_width_is_unchanged() {
        let data = [7u8; 32];
        assert_eq!(canonical_word(&data), data);
    }

    #[test]
    fn test_empty_value_is_zero_word() {
        assert_eq!(canonical_word(&[]), [0u8; 32]);
    }

    #[test]
    fn test_hex_is_prefixed() {
        let hex = to_hex(&[0xff; 32]);
        assert!(hex.starts_with("0xffff"));
        assert_eq!(hex.len(), 66);
    }
}
