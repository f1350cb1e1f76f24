#![deny(clippy::all)]

#[cfg(feature = "napi")]
#[macro_use]
extern crate napi_derive;

mod domain;
#[cfg(feature = "napi")]
mod interfaces;

pub use domain::error::ConstructionError;
pub use domain::hash::{canonical_word, keccak256::Keccak256Method, to_hex, HashMethod, Word};
pub use domain::proof::extension::{fold_previous, prove_extension, verify_extension, verify_previous};
pub use domain::proof::indices::SortedIndices;
pub use domain::proof::multi::{
    compute_root, generate_multi_proof, verify_multi_proof, verify_multi_proof_data, verify_with,
};
pub use domain::proof::MultiProof;
pub use domain::tree::{root_of, BuildOptions, MerkleTree};

/// Silence the default panic printer inside the Node process.
#[cfg(feature = "napi")]
#[napi]
pub fn init() {
    std::panic::set_hook(Box::new(|_| {}));
}
