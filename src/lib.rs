//! # huffman_arena
//!
//! Lossless Huffman compression of byte streams. The tree lives in an
//! index arena and is built with a min-heap over arena ids; the frequency
//! table travels in the compressed file, so decoding needs nothing else.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffman_arena::HuffmanCodec;
//!
//! let mut codec = HuffmanCodec::new();
//! let compressed = codec.encode(b"abracadabra")?;
//! let restored = codec.decode(&compressed)?;
//! assert_eq!(restored, b"abracadabra");
//! # Ok::<(), huffman_arena::HuffmanError>(())
//! ```
//!
//! Files go through [`HuffmanCodec::encode_file`] and
//! [`HuffmanCodec::decode_file`]. Progress is reported to an
//! [`Observer`](observer::Observer); [`observer::LogObserver`] forwards it to
//! the `log` facade.

pub mod arena;
pub mod bit_io;
pub mod code_table;
pub mod config;
pub mod error;
pub mod frequency;
pub mod header;
pub mod huffman_codec;
pub mod hufftree;
pub mod min_heap;
pub mod observer;

#[cfg(test)]
mod proptests;

// Re-export main types for convenience
pub use code_table::{CodeTable, Codeword};
pub use config::CodecConfig;
pub use error::{DecodeError, HeaderError, HuffmanError, Phase, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::{DecodeSummary, EncodeSummary, HuffmanCodec};
pub use hufftree::HuffmanTree;
pub use observer::{LogObserver, NoopObserver, Observer};
