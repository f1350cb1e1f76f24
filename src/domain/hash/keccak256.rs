use sha3::{digest::FixedOutput, Digest, Keccak256};

use super::{canonical_word, HashMethod, Word};

/// Keccak-256 over canonical words. This must stay byte-identical to the
/// on-chain verifier, so there is no other implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keccak256Method;

impl HashMethod for Keccak256Method {
    fn hash_leaf(data: &[u8]) -> Word {
        let mut hasher = Keccak256::new();
        hasher.update(canonical_word(data));
        hasher.finalize_fixed().into()
    }

    fn hash_nodes(left: &Word, right: &Word) -> Word {
        let mut hasher = Keccak256::new();
        hasher.update(left);
        hasher.update(right);
        hasher.finalize_fixed().into()
    }
}
