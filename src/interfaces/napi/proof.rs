use napi::bindgen_prelude::Uint8Array;

use super::{js_error, to_words, word_array};
use crate::domain::{hash::to_hex, proof::MultiProof};

/// JavaScript-facing multi-proof. Layers keep the stack order the on-chain
/// verifier consumes.
#[napi(js_name = "MultiProof")]
pub struct MultiProofJs {
    inner: MultiProof,
}

#[napi]
impl MultiProofJs {
    /// Every element of every layer must be a 32-byte word.
    #[napi(constructor)]
    pub fn new(layers: Vec<Vec<Uint8Array>>) -> napi::Result<Self> {
        let mut converted = Vec::with_capacity(layers.len());
        for layer in &layers {
            let words = to_words(layer).ok_or_else(|| {
                napi::Error::from_reason("proof words must be 32 bytes long")
            })?;
            converted.push(words);
        }
        Ok(Self::new_inner(MultiProof::from_layers(converted)))
    }

    /// So the Rust side can wrap a proof it generated.
    pub fn new_inner(inner: MultiProof) -> Self {
        MultiProofJs { inner }
    }

    pub fn inner(&self) -> &MultiProof {
        &self.inner
    }

    #[napi(factory)]
    pub fn from_bytes(bytes: Uint8Array) -> napi::Result<Self> {
        MultiProof::from_bytes(&bytes)
            .map(Self::new_inner)
            .map_err(js_error)
    }

    #[napi]
    pub fn to_bytes(&self) -> Uint8Array {
        Uint8Array::new(self.inner.to_bytes())
    }

    #[napi]
    pub fn layers(&self) -> Vec<Vec<Uint8Array>> {
        self.inner
            .layers()
            .iter()
            .map(|layer| layer.iter().map(word_array).collect())
            .collect()
    }

    #[napi]
    pub fn layers_hex(&self) -> Vec<Vec<String>> {
        self.inner.layers_hex()
    }

    #[napi]
    pub fn proof_hashes(&self) -> Vec<Uint8Array> {
        self.inner.proof_hashes().iter().map(word_array).collect()
    }

    #[napi]
    pub fn proof_hashes_hex(&self) -> Vec<String> {
        self.inner.proof_hashes().iter().map(to_hex).collect()
    }
}
