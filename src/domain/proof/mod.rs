use super::error::ConstructionError;
use super::hash::{to_hex, Word};

pub mod extension;
pub mod indices;
pub mod multi;

/// Sibling hashes per tree layer, leaf layer first, root layer excluded.
///
/// Each layer is stored in stack order: the verifier takes the *last* word
/// first. This layout is shared with the on-chain verifier and must not be
/// reordered.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MultiProof {
    layers: Vec<Vec<Word>>,
}

impl MultiProof {
    pub fn from_layers(layers: Vec<Vec<Word>>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[Vec<Word>] {
        &self.layers
    }

    pub fn into_layers(self) -> Vec<Vec<Word>> {
        self.layers
    }

    /// Number of proof layers (one per non-root tree layer).
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// All words, layer by layer, in stored order.
    pub fn proof_hashes(&self) -> Vec<Word> {
        self.layers.iter().flatten().copied().collect()
    }

    pub fn layers_hex(&self) -> Vec<Vec<String>> {
        self.layers
            .iter()
            .map(|layer| layer.iter().map(to_hex).collect())
            .collect()
    }

    /// `u32` BE layer count, then per layer a `u32` BE word count and the
    /// raw words in stored order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let words: usize = self.layers.iter().map(Vec::len).sum();
        let mut out = Vec::with_capacity(4 + 4 * self.layers.len() + 32 * words);
        out.extend_from_slice(&(self.layers.len() as u32).to_be_bytes());
        for layer in &self.layers {
            out.extend_from_slice(&(layer.len() as u32).to_be_bytes());
            for word in layer {
                out.extend_from_slice(word);
            }
        }
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConstructionError> {
        let mut reader = ByteReader { bytes };
        let layer_count = reader.read_u32()?;

        let mut layers = Vec::new();
        for _ in 0..layer_count {
            let word_count = reader.read_u32()? as usize;
            if word_count > reader.remaining() / 32 {
                return Err(ConstructionError::MalformedProofBytes {
                    reason: "layer longer than remaining input",
                });
            }
            let mut layer = Vec::with_capacity(word_count);
            for _ in 0..word_count {
                layer.push(reader.read_word()?);
            }
            layers.push(layer);
        }

        if reader.remaining() != 0 {
            return Err(ConstructionError::MalformedProofBytes {
                reason: "trailing bytes after last layer",
            });
        }
        Ok(Self { layers })
    }
}

impl From<Vec<Vec<Word>>> for MultiProof {
    fn from(layers: Vec<Vec<Word>>) -> Self {
        Self::from_layers(layers)
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
}

impl ByteReader<'_> {
    fn remaining(&self) -> usize {
        self.bytes.len()
    }

    fn take(&mut self, n: usize) -> Result<&[u8], ConstructionError> {
        if self.bytes.len() < n {
            return Err(ConstructionError::MalformedProofBytes {
                reason: "unexpected end of input",
            });
        }
        let (head, tail) = self.bytes.split_at(n);
        self.bytes = tail;
        Ok(head)
    }

    fn read_u32(&mut self) -> Result<u32, ConstructionError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(buf))
    }

    fn read_word(&mut self) -> Result<Word, ConstructionError> {
        let mut word = [0u8; 32];
        word.copy_from_slice(self.take(32)?);
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use super::MultiProof;
    use crate::domain::error::ConstructionError;

    fn sample() -> MultiProof {
        MultiProof::from_layers(vec![vec![[3u8; 32], [0u8; 32]], vec![], vec![[9u8; 32]]])
    }

    #[test]
    fn test_bytes_layout() {
        let bytes = sample().to_bytes();
        assert_eq!(bytes.len(), 4 + 3 * 4 + 3 * 32);
        assert_eq!(bytes[..4], [0, 0, 0, 3]);
        assert_eq!(bytes[4..8], [0, 0, 0, 2]);
        // stored order is kept: the word consumed last comes first
        assert_eq!(bytes[8..40], [3u8; 32]);
    }

    #[test]
    fn test_bytes_decode_restores_layers() {
        let proof = sample();
        assert_eq!(MultiProof::from_bytes(&proof.to_bytes()), Ok(proof));
    }

    #[test]
    fn test_truncated_bytes_fail() {
        let bytes = sample().to_bytes();
        let result = MultiProof::from_bytes(&bytes[..bytes.len() - 1]);
        assert!(matches!(
            result,
            Err(ConstructionError::MalformedProofBytes { .. })
        ));
        assert!(MultiProof::from_bytes(&[]).is_err());
    }

    #[test]
    fn test_trailing_bytes_fail() {
        let mut bytes = sample().to_bytes();
        bytes.push(0);
        assert!(MultiProof::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_huge_word_count_fails_without_allocating() {
        let bytes = [0, 0, 0, 1, 0xff, 0xff, 0xff, 0xff];
        assert!(MultiProof::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_proof_hashes_flatten_in_stored_order() {
        let hashes = sample().proof_hashes();
        assert_eq!(hashes, vec![[3u8; 32], [0u8; 32], [9u8; 32]]);
        assert_eq!(sample().layers_hex()[2][0], format!("0x{}", "09".repeat(32)));
    }
}
