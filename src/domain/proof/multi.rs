use log::{debug, trace};
use std::time::Instant;

use super::indices::{is_strictly_ascending, SortedIndices};
use super::MultiProof;
use crate::domain::error::ConstructionError;
use crate::domain::hash::{keccak256::Keccak256Method, HashMethod, Word};
use crate::domain::tree::MerkleTree;

/// Build the tree over `values` and prove membership of `indices`.
pub fn generate_multi_proof<V: AsRef<[u8]> + Sync>(
    values: &[V],
    indices: &[usize],
) -> Result<MultiProof, ConstructionError> {
    check_request(values.len(), indices)?;
    MerkleTree::<Keccak256Method>::build(values).multi_proof(indices)
}

/// Check that `root` commits to `value_hashes` at `indices`.
///
/// `indices` must be strictly ascending and `value_hashes[i]` must be the
/// leaf hash at `indices[i]`; use [`SortedIndices::sort_with`] to normalize
/// both together. Anything malformed yields `false`, never a panic.
pub fn verify_multi_proof(
    root: &Word,
    indices: &[usize],
    value_hashes: &[Word],
    proof: &MultiProof,
) -> bool {
    verify_with::<Keccak256Method>(root, indices, value_hashes, proof)
}

/// Same as [`verify_multi_proof`] but takes raw values and hashes them first.
pub fn verify_multi_proof_data<V: AsRef<[u8]>>(
    root: &Word,
    indices: &[usize],
    values: &[V],
    proof: &MultiProof,
) -> bool {
    let hashes: Vec<Word> = values
        .iter()
        .map(|v| Keccak256Method::hash_leaf(v.as_ref()))
        .collect();
    verify_multi_proof(root, indices, &hashes, proof)
}

pub fn verify_with<Method: HashMethod>(
    root: &Word,
    indices: &[usize],
    value_hashes: &[Word],
    proof: &MultiProof,
) -> bool {
    match compute_root::<Method>(indices, value_hashes, proof) {
        Some(computed) => computed == *root,
        None => false,
    }
}

/// Fold `value_hashes` up through `proof` and return the candidate root, or
/// `None` when the input cannot describe a single root.
pub fn compute_root<Method: HashMethod>(
    indices: &[usize],
    value_hashes: &[Word],
    proof: &MultiProof,
) -> Option<Word> {
    if indices.is_empty() || indices.len() != value_hashes.len() {
        debug!(
            "Rejecting proof: {} indices for {} value hashes",
            indices.len(),
            value_hashes.len()
        );
        return None;
    }
    if !is_strictly_ascending(indices) {
        debug!("Rejecting proof: indices are not strictly ascending");
        return None;
    }

    let mut indices = indices.to_vec();
    let mut hashes = value_hashes.to_vec();

    for layer in proof.layers() {
        // stack cursor: the last stored word is consumed first
        let mut stack = layer.iter().rev();
        let mut next_indices = Vec::with_capacity(indices.len());
        let mut next_hashes = Vec::with_capacity(hashes.len());

        let mut i = 0;
        while i < indices.len() {
            let index = indices[i];
            let sibling = index ^ 1;

            let covered = indices
                .get(i + 1)
                .is_some_and(|&next| ordered_pair(next) == ordered_pair(index));

            if covered {
                next_hashes.push(Method::hash_nodes(&hashes[i], &hashes[i + 1]));
                i += 2;
            } else {
                let parent = match stack.next() {
                    Some(sib) if sibling < index => Method::hash_nodes(sib, &hashes[i]),
                    Some(sib) => Method::hash_nodes(&hashes[i], sib),
                    // trailing odd node, carried up unchanged
                    None => hashes[i],
                };
                next_hashes.push(parent);
                i += 1;
            }
            next_indices.push(index >> 1);
        }

        indices = next_indices;
        hashes = next_hashes;
    }

    match hashes.as_slice() {
        [root] => Some(*root),
        _ => {
            debug!(
                "Rejecting proof: {} hashes left after the last layer",
                hashes.len()
            );
            None
        }
    }
}

impl<Method: HashMethod> MerkleTree<Method> {
    /// Collect, per non-root layer, the sibling hashes needed to rebuild the
    /// root from the leaves at `indices`. Indices are sorted and deduplicated
    /// first.
    pub fn multi_proof(&self, indices: &[usize]) -> Result<MultiProof, ConstructionError> {
        check_request(self.len(), indices)?;
        let start = Instant::now();

        let below_root = &self.layers()[..self.layers().len() - 1];
        let mut current = SortedIndices::new(indices).into_inner();
        let mut proof = Vec::with_capacity(below_root.len());

        for (depth, layer) in below_root.iter().enumerate() {
            let mut siblings = Vec::new();
            let mut parents = Vec::with_capacity(current.len());

            let mut i = 0;
            while i < current.len() {
                let index = current[i];
                let sibling = index ^ 1;

                if current.get(i + 1) == Some(&sibling) {
                    // both children are targets, nothing to reveal
                    i += 2;
                } else {
                    if let Some(hash) = layer.get(sibling) {
                        siblings.push(*hash);
                    }
                    i += 1;
                }
                parents.push(index >> 1);
            }

            siblings.reverse();
            trace!("Layer {}: {} siblings", depth, siblings.len());
            proof.push(siblings);
            current = parents;
        }

        debug!(
            "Multi-proof for {} indices over {} values took {:?}",
            indices.len(),
            self.len(),
            start.elapsed()
        );
        Ok(MultiProof::from_layers(proof))
    }
}

fn ordered_pair(index: usize) -> (usize, usize) {
    let sibling = index ^ 1;
    (index.min(sibling), index.max(sibling))
}

fn check_request(values: usize, indices: &[usize]) -> Result<(), ConstructionError> {
    if values == 0 {
        return Err(ConstructionError::EmptyValues);
    }
    if indices.is_empty() {
        return Err(ConstructionError::EmptyIndices);
    }
    if indices.len() > values {
        return Err(ConstructionError::TooManyIndices {
            indices: indices.len(),
            values,
        });
    }
    if let Some(&index) = indices.iter().find(|&&index| index >= values) {
        return Err(ConstructionError::IndexOutOfRange { index, len: values });
    }
    Ok(())
}
