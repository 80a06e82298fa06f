pub mod errors;
pub mod hash;
pub mod merkle_tree;
pub mod transcript;
