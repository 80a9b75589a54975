//! # huffstream
//!
//! An adaptive Huffman streaming codec: a paired encoder/decoder that
//! transmits a byte stream as variable-length bit codes whose lengths are
//! continuously re-derived from an evolving symbol-frequency table.
//! Neither side ever transmits the code table; both sides stay in
//! lock-step by applying the same deterministic update rule after every
//! symbol.
//!
//! * `symbol` is the dense alphabet shared by the tree, the table, and the codec.
//! * `tools::tree` builds static Huffman trees and extracts leaf codes.
//! * `tools::symbols` is the mutable, weight-sorted symbol table the codec rebuilds on every byte.
//! * `tools::window` is the optional sliding window that ages symbols back out.
//! * `codec` is the `Encoder`/`Decoder` pair that drives the above over a bit stream.
//!
//! The encoder and decoder are generics over `std::io::Write`/`Read`. There
//! are convenience functions for working directly with buffers.
//!
//! ## File Example
//!
//! ```rs
//! use huffstream::codec::Encoder;
//! let dat = std::fs::read("some_input_path").expect("read failed");
//! let out_file = std::fs::File::create("some_output_path").expect("create failed");
//! let mut enc = Encoder::new(out_file);
//! enc.write(&dat).expect("compression failed");
//! enc.close().expect("close failed");
//! ```
//!
//! ## Buffer Example
//!
//! ```rs
//! use huffstream::codec::{compress_slice, Options};
//! let test_data = "This is the chaunt of the priests.  The chaunt of the priests of Mung.".as_bytes();
//! let compressed = compress_slice(test_data, &Options::default()).expect("compression failed");
//! ```

pub mod symbol;
pub mod tools;
pub mod codec;
pub mod error;

pub use codec::{Decoder, Encoder, Options, compress_slice, expand_slice};
pub use error::Error;
