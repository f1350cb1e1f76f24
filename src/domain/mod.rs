pub mod error;
pub mod hash;
pub mod proof;
pub mod tree;
