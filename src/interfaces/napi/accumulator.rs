use napi::bindgen_prelude::{Uint32Array, Uint8Array};

use super::{
  js_error, options::AccumulatorOptionsJs, proof::MultiProofJs, to_word, to_words, word_array,
};
use crate::domain::{
  hash::{keccak256::Keccak256Method, to_hex, HashMethod},
  proof::{
    extension::{prove_extension, verify_extension, verify_previous},
    multi::{verify_multi_proof, verify_multi_proof_data},
  },
  tree::{BuildOptions, MerkleTree},
};

/// Ordered value sequence with its commitment, rebuilt lazily after appends.
#[napi(js_name = "Accumulator")]
pub struct AccumulatorJs {
  values: Vec<Vec<u8>>,
  options: AccumulatorOptionsJs,
  tree: Option<MerkleTree>,
}

#[napi]
impl AccumulatorJs {
  #[napi]
  pub fn hash_leaf(data: Uint8Array) -> Uint8Array {
    word_array(&Keccak256Method::hash_leaf(&data))
  }

  #[napi(constructor)]
  #[allow(clippy::new_without_default)]
  pub fn new() -> Self {
    Self {
      values: Vec::new(),
      options: AccumulatorOptionsJs::default(),
      tree: None,
    }
  }

  #[napi(factory)]
  pub fn from_values(values: Vec<Uint8Array>) -> Self {
    let mut accumulator = Self::new();
    accumulator.values = values.iter().map(|v| v.to_vec()).collect();
    accumulator
  }

  #[napi]
  pub fn set_options(&mut self, options: &AccumulatorOptionsJs) {
    self.options = options.clone();
  }

  #[napi]
  pub fn values(&self) -> Vec<Uint8Array> {
    self.values.iter().map(|v| Uint8Array::new(v.clone())).collect()
  }

  #[napi]
  pub fn len(&self) -> u32 {
    self.values.len() as u32
  }

  #[napi]
  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Append one value and return its leaf hash.
  #[napi]
  pub fn append(&mut self, value: Uint8Array) -> Uint8Array {
    let hash = Keccak256Method::hash_leaf(&value);
    self.values.push(value.to_vec());
    self.tree = None;
    word_array(&hash)
  }

  #[napi]
  pub fn root(&mut self) -> Option<Uint8Array> {
    self.tree().root().ok().map(|r| word_array(&r))
  }

  #[napi]
  pub fn root_hex(&mut self) -> Option<String> {
    self.tree().root().ok().map(|r| to_hex(&r))
  }

  #[napi]
  pub fn multi_proof(&mut self, indices: Uint32Array) -> napi::Result<MultiProofJs> {
    let indices: Vec<usize> = indices.iter().map(|i| *i as usize).collect();
    self
      .tree()
      .multi_proof(&indices)
      .map(MultiProofJs::new_inner)
      .map_err(js_error)
  }

  /// Proof that the most recently appended value extends the sequence before it.
  #[napi]
  pub fn extension_proof(&self) -> napi::Result<MultiProofJs> {
    prove_extension(&self.values)
      .map(MultiProofJs::new_inner)
      .map_err(js_error)
  }

  #[napi]
  pub fn verify(
    root: Uint8Array,
    indices: Uint32Array,
    value_hashes: Vec<Uint8Array>,
    proof: &MultiProofJs,
  ) -> bool {
    let (Some(root), Some(hashes)) = (to_word(&root), to_words(&value_hashes)) else {
      return false;
    };
    let indices: Vec<usize> = indices.iter().map(|i| *i as usize).collect();
    verify_multi_proof(&root, &indices, &hashes, proof.inner())
  }

  /// Like verify, but hashes `values` into leaves first.
  #[napi]
  pub fn verify_data(
    root: Uint8Array,
    indices: Uint32Array,
    values: Vec<Uint8Array>,
    proof: &MultiProofJs,
  ) -> bool {
    let Some(root) = to_word(&root) else {
      return false;
    };
    let indices: Vec<usize> = indices.iter().map(|i| *i as usize).collect();
    let values: Vec<&[u8]> = values.iter().map(|v| &v[..]).collect();
    verify_multi_proof_data(&root, &indices, &values, proof.inner())
  }

  #[napi]
  pub fn verify_extension(
    index: u32,
    prev_root: Uint8Array,
    curr_root: Uint8Array,
    added_hash: Uint8Array,
    proof: &MultiProofJs,
  ) -> bool {
    match (to_word(&prev_root), to_word(&curr_root), to_word(&added_hash)) {
      (Some(prev), Some(curr), Some(added)) => {
        verify_extension(index as usize, &prev, &curr, &added, proof.inner())
      }
      _ => false,
    }
  }

  #[napi]
  pub fn verify_previous(prev_root: Uint8Array, proof: &MultiProofJs) -> bool {
    to_word(&prev_root).is_some_and(|prev| verify_previous(&prev, proof.inner()))
  }

  fn tree(&mut self) -> &MerkleTree {
    let options = BuildOptions::from(&self.options);
    let values = &self.values;
    self
      .tree
      .get_or_insert_with(|| MerkleTree::build_with_options(values, &options))
  }
}
