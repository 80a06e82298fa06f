pub mod sha3;
