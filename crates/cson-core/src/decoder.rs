//! CSON decode driver: turns a byte stream into one [`Node`] per line.
//!
//! The driver pulls one logical line at a time from a [`LineReader`] and runs
//! a fresh parser over it. Lines are independent: nothing decoded on one line
//! influences how the next is read.
//!
//! # Key design decisions
//!
//! - **Abort on first error**: [`decode_all`] returns the first I/O or syntax
//!   error alone and drops every node decoded before it. Callers that want the
//!   nodes preceding the failure opt in through [`Decoder::decode_all_partial`].
//! - **Empty lines**: a blank or whitespace-only line decodes to an empty
//!   `Object`, since the top-level list may legitimately have no elements.
//! - **Trailing newline**: input ending in `\n` has no extra empty line after
//!   it, so `"1\n2\n"` decodes to exactly two nodes.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{CsonError, Result};
use crate::parser::parse_line;
use crate::reader::LineReader;
use crate::types::Node;

/// Line-by-line decoder over a buffered byte source.
///
/// Also usable as an iterator of `Result<Node>`; the iterator stops after
/// yielding its first error.
#[derive(Debug)]
pub struct Decoder<R> {
    lines: LineReader<R>,
    failed: bool,
}

/// Outcome of [`Decoder::decode_all_partial`]: every node decoded before the
/// first failure, plus that failure if there was one.
#[derive(Debug)]
pub struct PartialDecode {
    pub nodes: Vec<Node>,
    pub error: Option<CsonError>,
}

impl PartialDecode {
    /// Collapse into the default all-or-nothing contract.
    pub fn into_result(self) -> Result<Vec<Node>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.nodes),
        }
    }
}

impl<R: BufRead> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
            failed: false,
        }
    }

    /// Decode the next line, or `Ok(None)` once the source is exhausted.
    pub fn decode_next(&mut self) -> Result<Option<Node>> {
        let Some(line) = self.lines.next_line()? else {
            return Ok(None);
        };
        let line_no = self.lines.lines_read();

        match parse_line(&line, line_no) {
            Ok(node) => {
                debug!(line = line_no, items = node.len(), "decoded CSON line");
                Ok(Some(node))
            }
            Err(err) => {
                debug!(line = line_no, error = %err, "CSON line failed to decode");
                Err(err)
            }
        }
    }

    /// Decode exactly one line.
    ///
    /// An exhausted source reads as a single empty line and yields an empty
    /// `Object`.
    pub fn decode_one(&mut self) -> Result<Node> {
        Ok(self.decode_next()?.unwrap_or(Node::Object(Vec::new())))
    }

    /// Decode every remaining line, aborting on the first error.
    pub fn decode_all(self) -> Result<Vec<Node>> {
        self.collect()
    }

    /// Decode every remaining line, keeping the nodes that precede a failure.
    pub fn decode_all_partial(mut self) -> PartialDecode {
        let mut nodes = Vec::new();
        loop {
            match self.decode_next() {
                Ok(Some(node)) => nodes.push(node),
                Ok(None) => return PartialDecode { nodes, error: None },
                Err(err) => {
                    return PartialDecode {
                        nodes,
                        error: Some(err),
                    }
                }
            }
        }
    }

    /// True once the underlying source has reported end of data.
    pub fn is_exhausted(&self) -> bool {
        self.lines.is_exhausted()
    }

    /// Number of lines read so far, including a line that failed to decode.
    pub fn lines_read(&self) -> usize {
        self.lines.lines_read()
    }
}

impl<R: BufRead> Iterator for Decoder<R> {
    type Item = Result<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = self.decode_next().transpose();
        if matches!(next, Some(Err(_))) {
            self.failed = true;
        }
        next
    }
}

/// Decode a single line from `reader`.
///
/// To keep reading after the first line, hold your own `BufRead` and pass it
/// as `&mut reader`. The internal buffer then survives the call and the next
/// read resumes right after the first `\n`. A `BufReader` passed by value is
/// dropped on return, and any bytes it had buffered beyond the first line are
/// lost with it.
pub fn decode_one<R: BufRead>(reader: R) -> Result<Node> {
    Decoder::new(reader).decode_one()
}

/// Decode every line of `reader`, one node per line in order.
///
/// The first error aborts the whole operation and no nodes are returned.
pub fn decode_all<R: BufRead>(reader: R) -> Result<Vec<Node>> {
    Decoder::new(reader).decode_all()
}

/// Decode an in-memory buffer.
pub fn decode_bytes(data: &[u8]) -> Result<Vec<Node>> {
    decode_all(data)
}

/// Decode a string slice.
pub fn decode_str(text: &str) -> Result<Vec<Node>> {
    decode_bytes(text.as_bytes())
}

/// Decode a file. The file is closed before returning, on success or failure.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<Vec<Node>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "decoding CSON file");
    let file = File::open(path)?;
    decode_all(BufReader::new(file))
}
