use napi::bindgen_prelude::Uint8Array;

use crate::domain::hash::Word;

pub mod accumulator;
pub mod options;
pub mod proof;

pub(crate) fn to_word(bytes: &[u8]) -> Option<Word> {
    bytes.try_into().ok()
}

pub(crate) fn to_words(arrays: &[Uint8Array]) -> Option<Vec<Word>> {
    arrays.iter().map(|a| to_word(a)).collect()
}

pub(crate) fn word_array(word: &Word) -> Uint8Array {
    Uint8Array::new(word.to_vec())
}

pub(crate) fn js_error(err: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(err.to_string())
}
