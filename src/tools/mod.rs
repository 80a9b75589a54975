//! Internal building blocks for the adaptive Huffman codec.
//!
//! `tree` implements the static Huffman-tree algorithms (`Build`/`BuildSorted`
//! and code extraction). `symbols` layers the mutable, adaptive symbol table
//! on top of it. `window` implements the optional sliding-window aging policy.

pub mod tree;
pub mod symbols;
pub mod window;
pub mod ring_buffer;
