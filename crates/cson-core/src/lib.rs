//! # cson-core
//!
//! Streaming decoder for **CSON (Comma-Separated Object Notation)**.
//!
//! CSON is a keyless, JSON-like literal notation where every physical line is
//! an independent record. A line is a comma-separated list of values; nested
//! objects use `{}` and arrays use `[]`, with no field names anywhere. Scalar
//! kinds are decided from the literal's shape alone:
//!
//! - `"text"` / `'text'` → string
//! - `true` / `false` → bool
//! - `1`, `-42` → integer
//! - `2.3`, `1e5` → float
//!
//! ## Quick start
//!
//! ```rust
//! use cson_core::{decode_str, Node};
//!
//! let nodes = decode_str("1,{2,3},[\"a\",\"b\"]\ntrue,false").unwrap();
//! assert_eq!(nodes.len(), 2);
//! assert_eq!(
//!     nodes[0],
//!     Node::Object(vec![
//!         Node::Integer(1),
//!         Node::Object(vec![Node::Integer(2), Node::Integer(3)]),
//!         Node::Array(vec![Node::String("a".into()), Node::String("b".into())]),
//!     ])
//! );
//! assert_eq!(nodes[1].to_json(), serde_json::json!([true, false]));
//! ```
//!
//! ## Modules
//!
//! - [`decoder`]: line-by-line driver and the `decode_*` entry points
//! - [`parser`]: stack-based parser for one line
//! - [`lexer`]: tokenizer for one line
//! - [`reader`]: newline-bounded reading over any `BufRead`
//! - [`types`]: the `Node` value tree
//! - [`error`]: error types for I/O and syntax failures

pub mod decoder;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod reader;
pub mod types;

pub use decoder::{
    decode_all, decode_bytes, decode_file, decode_one, decode_str, Decoder, PartialDecode,
};
pub use error::CsonError;
pub use reader::LineReader;
pub use types::{Node, NodeKind};
