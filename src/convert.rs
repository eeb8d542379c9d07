//! YAML→JSON conversion and combination.
//!
//! Each document from the splitter is converted to a compact JSON fragment.
//! Fragments are comma-joined and wrapped in a JSON array when there are two
//! or more; a single fragment is emitted bare. The combined buffer is then
//! parsed back into a generic value and re-encoded with 2-space indentation,
//! which both validates it structurally and makes the output whitespace
//! canonical.
//!
//! A conversion failure in any document aborts the run; nothing is written
//! to the output on any error path.

use std::fmt;
use std::io::{self, Read, Write};

use crate::split::DocumentSplitter;

/// Errors terminating a conversion run.
#[derive(Debug)]
pub enum Error {
    /// Reading the input failed.
    Io(io::Error),
    /// A document is not convertible YAML. `index` is the zero-based
    /// position of the document among those that survived comment dropping.
    Convert {
        index: usize,
        source: serde_yaml::Error,
    },
    /// The combined buffer is not valid JSON, or re-encoding it failed.
    /// Notably raised when the input contained no documents at all.
    Encode(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "failed to read input: {e}"),
            Error::Convert { index, source } => {
                write!(f, "document {index} is not valid YAML: {source}")
            }
            Error::Encode(e) => write!(f, "combined output is not valid JSON: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Convert { source, .. } => Some(source),
            Error::Encode(e) => Some(e),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

/// Convert one YAML document to a generic JSON value.
pub fn yaml_to_json(doc: &[u8]) -> Result<serde_json::Value, serde_yaml::Error> {
    serde_yaml::from_slice(doc)
}

/// Comma-join JSON fragments, wrapping in `[` … `]` iff there are two or
/// more. Zero fragments produce an empty buffer, which later fails the JSON
/// parse.
pub fn combine(fragments: &[Vec<u8>]) -> Vec<u8> {
    let mut joined = Vec::new();
    for (i, fragment) in fragments.iter().enumerate() {
        if i > 0 {
            joined.push(b',');
        }
        joined.extend_from_slice(fragment);
    }
    if fragments.len() >= 2 {
        let mut wrapped = Vec::with_capacity(joined.len() + 2);
        wrapped.push(b'[');
        wrapped.extend_from_slice(&joined);
        wrapped.push(b']');
        return wrapped;
    }
    joined
}

/// Run the whole pipeline: split `input` into documents, convert each to
/// JSON, combine, and write the canonical 2-space-indented result (plus a
/// trailing newline) to `output`.
///
/// Output element order matches input document order. On error nothing has
/// been written to `output`.
pub fn convert_stream<R: Read, W: Write>(input: R, mut output: W) -> Result<(), Error> {
    let mut fragments: Vec<Vec<u8>> = Vec::new();
    for (index, doc) in DocumentSplitter::new(input).enumerate() {
        let doc = doc?;
        let value = yaml_to_json(&doc).map_err(|source| Error::Convert { index, source })?;
        fragments.push(serde_json::to_vec(&value).map_err(Error::Encode)?);
    }

    let combined = combine(&fragments);
    let value: serde_json::Value = serde_json::from_slice(&combined).map_err(Error::Encode)?;

    let mut pretty = serde_json::to_vec_pretty(&value).map_err(Error::Encode)?;
    pretty.push(b'\n');
    output.write_all(&pretty)?;
    Ok(())
}
