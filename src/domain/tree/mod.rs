use anyhow::Result;
use log::{debug, info};
use rayon::prelude::*;
use std::marker::PhantomData;
use std::time::Instant;

use super::error::ConstructionError;
use super::hash::{keccak256::Keccak256Method, to_hex, HashMethod, Word};

pub mod options;

pub use options::BuildOptions;

/// Layered Merkle tree over an ordered value sequence.
///
/// Layer 0 holds the leaf hashes in value order. Each following layer pairs
/// nodes `(2k, 2k + 1)`; an unpaired trailing node is carried up unchanged.
/// The last layer holds the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree<Method: HashMethod = Keccak256Method> {
    layers: Vec<Vec<Word>>,
    method: PhantomData<Method>,
}

impl<Method: HashMethod> MerkleTree<Method> {
    /// Build a tree from raw values (each one hashed with `hash_leaf`).
    pub fn build<V: AsRef<[u8]> + Sync>(values: &[V]) -> Self {
        Self::build_with_options(values, &BuildOptions::default())
    }

    pub fn build_with_options<V: AsRef<[u8]> + Sync>(values: &[V], options: &BuildOptions) -> Self {
        let start = Instant::now();
        let leaves: Vec<Word> = if options.is_parallel(values.len()) {
            values
                .par_iter()
                .map(|v| Method::hash_leaf(v.as_ref()))
                .collect()
        } else {
            values.iter().map(|v| Method::hash_leaf(v.as_ref())).collect()
        };
        debug!("Hashing {} leaves took {:?}", leaves.len(), start.elapsed());

        Self::from_leaf_hashes_with_options(leaves, options)
    }

    /// Build a tree from already-hashed leaves.
    pub fn from_leaf_hashes(leaves: Vec<Word>) -> Self {
        Self::from_leaf_hashes_with_options(leaves, &BuildOptions::default())
    }

    pub fn from_leaf_hashes_with_options(leaves: Vec<Word>, options: &BuildOptions) -> Self {
        let start = Instant::now();
        let leaves_len = leaves.len();

        let mut layers = vec![leaves];
        while layers[layers.len() - 1].len() > 1 {
            let next = next_layer::<Method>(&layers[layers.len() - 1], options);
            layers.push(next);
        }

        let duration = start.elapsed();
        if options.is_parallel(leaves_len) {
            info!(
                "Built tree over {} leaves ({} layers) in {:?}",
                leaves_len,
                layers.len(),
                duration
            );
        } else {
            debug!(
                "Built tree over {} leaves ({} layers) in {:?}",
                leaves_len,
                layers.len(),
                duration
            );
        }

        Self {
            layers,
            method: PhantomData,
        }
    }

    pub fn layers(&self) -> &[Vec<Word>] {
        &self.layers
    }

    pub fn leaves(&self) -> &[Word] {
        &self.layers[0]
    }

    /// Number of committed values.
    pub fn len(&self) -> usize {
        self.layers[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers[0].is_empty()
    }

    /// Return the Merkle root, or an error when the tree holds no values.
    pub fn root(&self) -> Result<Word> {
        self.layers
            .last()
            .and_then(|layer| layer.first())
            .copied()
            .ok_or_else(|| ConstructionError::EmptyTree.into())
    }

    pub fn root_hex(&self) -> Result<String> {
        self.root().map(|r| to_hex(&r))
    }
}

/// Root of `values` under Keccak-256.
pub fn root_of<V: AsRef<[u8]> + Sync>(values: &[V]) -> Result<Word> {
    MerkleTree::<Keccak256Method>::build(values).root()
}

fn next_layer<Method: HashMethod>(layer: &[Word], options: &BuildOptions) -> Vec<Word> {
    let combine = |pair: &[Word]| match pair {
        [left, right] => Method::hash_nodes(left, right),
        // odd node is carried up unhashed
        [single] => *single,
        _ => unreachable!("chunks(2) yields one or two nodes"),
    };

    if options.is_parallel(layer.len()) {
        layer.par_chunks(2).map(combine).collect()
    } else {
        layer.chunks(2).map(combine).collect()
    }
}
