//! # yaml2json
//!
//! Convert multi-document YAML to pretty-printed JSON.
//!
//! The input byte stream is split into YAML documents on `---` separator
//! lines, documents containing a `#` byte are dropped, each remaining
//! document is converted to JSON, and the results are combined: a single
//! document is emitted as a bare JSON value, two or more become a JSON
//! array. The combined output is re-encoded with 2-space indentation.
//!
//! ## Module Organization
//!
//! - [`split`] - Incremental scanner yielding `---`-delimited documents
//! - [`convert`] - Per-document YAML→JSON conversion and combination
//!
//! ## Quick Start
//!
//! ```
//! use std::io::Cursor;
//! use yaml2json::convert_stream;
//!
//! let input = Cursor::new("a: 1\n---\nb: 2\n");
//! let mut output = Vec::new();
//! convert_stream(input, &mut output).unwrap();
//!
//! let text = String::from_utf8(output).unwrap();
//! assert!(text.starts_with("[\n"));
//! ```

/// Incremental splitting of a byte stream into YAML documents.
pub mod split;

/// YAML→JSON conversion, combination, and the error taxonomy.
pub mod convert;

pub use convert::{convert_stream, Error};
pub use split::DocumentSplitter;
