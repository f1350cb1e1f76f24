use log::debug;

use super::multi::{generate_multi_proof, verify_with};
use super::MultiProof;
use crate::domain::error::ConstructionError;
use crate::domain::hash::{keccak256::Keccak256Method, HashMethod, Word};

/// Prove that the last of `values` was appended to the sequence before it.
pub fn prove_extension<V: AsRef<[u8]> + Sync>(values: &[V]) -> Result<MultiProof, ConstructionError> {
    if values.is_empty() {
        return Err(ConstructionError::EmptyValues);
    }
    generate_multi_proof(values, &[values.len() - 1])
}

/// Check that `added_hash` sits at `index` under `curr_root`, and that the
/// same proof folds back into `prev_root`.
pub fn verify_extension(
    index: usize,
    prev_root: &Word,
    curr_root: &Word,
    added_hash: &Word,
    proof: &MultiProof,
) -> bool {
    verify_with::<Keccak256Method>(curr_root, &[index], &[*added_hash], proof)
        && verify_previous(prev_root, proof)
}

pub fn verify_previous(prev_root: &Word, proof: &MultiProof) -> bool {
    match fold_previous::<Keccak256Method>(proof) {
        Some(acc) => acc == *prev_root,
        None => {
            debug!("Rejecting extension: proof holds no words");
            false
        }
    }
}

/// Fold every proof word into one chain, ignoring layer boundaries. Words are
/// taken last-first within each layer, layers in order; each taken word is
/// the left operand over the accumulator.
///
/// The on-chain verifier folds exactly this way. For a single-index proof of
/// the last leaf this reproduces the root of the shorter sequence.
pub fn fold_previous<Method: HashMethod>(proof: &MultiProof) -> Option<Word> {
    proof
        .layers()
        .iter()
        .flat_map(|layer| layer.iter().rev())
        .fold(None, |acc, word| match acc {
            None => Some(*word),
            Some(acc) => Some(Method::hash_nodes(word, &acc)),
        })
}

#[cfg(test)]
mod tests {
    use super::{fold_previous, prove_extension, verify_extension, verify_previous};
    use crate::domain::error::ConstructionError;
    use crate::domain::hash::{keccak256::Keccak256Method, HashMethod, Word};
    use crate::domain::proof::MultiProof;
    use crate::domain::tree::root_of;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn leaf(data: &[u8]) -> Word {
        Keccak256Method::hash_leaf(data)
    }

    fn trace(count: usize) -> Vec<Vec<u8>> {
        (0..count).map(|i| format!("gate-{}", i).into_bytes()).collect()
    }

    #[test]
    fn test_extension_consistency_for_many_lengths() {
        init();
        for len in 1..40 {
            let before = trace(len);
            let mut after = before.clone();
            after.push(b"appended".to_vec());

            let proof = prove_extension(&after).unwrap();
            let prev_root = root_of(&before).unwrap();
            let curr_root = root_of(&after).unwrap();

            assert!(
                verify_extension(len, &prev_root, &curr_root, &leaf(b"appended"), &proof),
                "Extension from {} values must verify",
                len
            );
        }
    }

    #[test]
    fn test_extension_rejects_wrong_prior_root() {
        init();
        let before = trace(6);
        let mut after = before.clone();
        after.push(b"x".to_vec());

        let proof = prove_extension(&after).unwrap();
        let curr_root = root_of(&after).unwrap();
        let wrong_prev = root_of(&trace(5)).unwrap();

        assert!(!verify_extension(6, &wrong_prev, &curr_root, &leaf(b"x"), &proof));
    }

    #[test]
    fn test_extension_rejects_wrong_value_or_index() {
        init();
        let before = trace(4);
        let mut after = before.clone();
        after.push(b"x".to_vec());

        let proof = prove_extension(&after).unwrap();
        let prev_root = root_of(&before).unwrap();
        let curr_root = root_of(&after).unwrap();

        assert!(verify_extension(4, &prev_root, &curr_root, &leaf(b"x"), &proof));
        assert!(!verify_extension(4, &prev_root, &curr_root, &leaf(b"y"), &proof));
        assert!(!verify_extension(3, &prev_root, &curr_root, &leaf(b"x"), &proof));
    }

    #[test]
    fn test_fold_takes_popped_word_as_left_operand() {
        let a = leaf(b"a");
        let b = leaf(b"b");
        let c = leaf(b"c");
        let proof = MultiProof::from_layers(vec![vec![b, a], vec![], vec![c]]);

        // a, then b, then c are taken
        let ab = Keccak256Method::hash_nodes(&b, &a);
        let expected = Keccak256Method::hash_nodes(&c, &ab);
        assert_eq!(fold_previous::<Keccak256Method>(&proof), Some(expected));
        assert!(verify_previous(&expected, &proof));
    }

    #[test]
    fn test_empty_proof_never_matches() {
        init();
        assert!(!verify_previous(&[0u8; 32], &MultiProof::default()));
        assert!(!verify_previous(
            &[0u8; 32],
            &MultiProof::from_layers(vec![vec![], vec![]])
        ));

        // extending an empty sequence has no prior root to fold into
        let proof = prove_extension(&[b"first"]).unwrap();
        let root = leaf(b"first");
        assert!(!verify_extension(0, &[0u8; 32], &root, &root, &proof));
    }

    #[test]
    fn test_prove_extension_requires_values() {
        let empty: Vec<Vec<u8>> = vec![];
        assert_eq!(prove_extension(&empty), Err(ConstructionError::EmptyValues));
    }
}
