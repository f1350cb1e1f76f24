use itertools::Itertools;
use std::ops::Deref;

use crate::domain::hash::Word;

/// Leaf positions, strictly ascending.
///
/// Generator and verifier both walk indices left to right and detect covered
/// pairs by adjacency, so any other ordering silently changes what is proven.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SortedIndices(Vec<usize>);

impl SortedIndices {
    /// Sort and deduplicate.
    pub fn new(indices: &[usize]) -> Self {
        Self(indices.iter().copied().sorted_unstable().dedup().collect())
    }

    /// Accept `indices` only if they are already strictly ascending.
    pub fn from_sorted(indices: Vec<usize>) -> Option<Self> {
        is_strictly_ascending(&indices).then_some(Self(indices))
    }

    /// Sort `indices` and permute `hashes` the same way. When an index
    /// repeats, the first hash given for it is kept. Returns `None` when the
    /// two lists differ in length.
    pub fn sort_with(indices: &[usize], hashes: &[Word]) -> Option<(Self, Vec<Word>)> {
        if indices.len() != hashes.len() {
            return None;
        }
        let (sorted, aligned): (Vec<usize>, Vec<Word>) = indices
            .iter()
            .copied()
            .zip(hashes.iter().copied())
            .sorted_by_key(|(index, _)| *index)
            .dedup_by(|a, b| a.0 == b.0)
            .unzip();
        Some((Self(sorted), aligned))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for SortedIndices {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

pub(crate) fn is_strictly_ascending(indices: &[usize]) -> bool {
    indices.windows(2).all(|w| w[0] < w[1])
}

#[cfg(test)]
mod tests {
    use super::SortedIndices;

    #[test]
    fn test_new_sorts_and_dedups() {
        let indices = SortedIndices::new(&[5, 1, 3, 1, 5]);
        assert_eq!(indices.as_slice(), &[1, 3, 5]);
    }

    #[test]
    fn test_from_sorted_rejects_unsorted_and_duplicates() {
        assert!(SortedIndices::from_sorted(vec![0, 2, 7]).is_some());
        assert!(SortedIndices::from_sorted(vec![2, 0]).is_none());
        assert!(SortedIndices::from_sorted(vec![1, 1]).is_none());
        assert!(SortedIndices::from_sorted(vec![]).is_some());
    }

    #[test]
    fn test_sort_with_keeps_alignment() {
        let (indices, hashes) =
            SortedIndices::sort_with(&[4, 0, 2], &[[4u8; 32], [0u8; 32], [2u8; 32]]).unwrap();
        assert_eq!(indices.as_slice(), &[0, 2, 4]);
        assert_eq!(hashes, vec![[0u8; 32], [2u8; 32], [4u8; 32]]);
    }

    #[test]
    fn test_sort_with_keeps_first_duplicate() {
        let (indices, hashes) =
            SortedIndices::sort_with(&[1, 1], &[[1u8; 32], [9u8; 32]]).unwrap();
        assert_eq!(indices.as_slice(), &[1]);
        assert_eq!(hashes, vec![[1u8; 32]]);
    }

    #[test]
    fn test_sort_with_rejects_length_mismatch() {
        assert!(SortedIndices::sort_with(&[0, 1], &[[0u8; 32]]).is_none());
    }
}
