//! Line-bounded reading over an arbitrary byte source.
//!
//! [`LineReader`] hands out one logical line at a time. The terminating `\n`
//! is consumed but never included in the returned buffer, so it can neither
//! leak into the current line nor reappear at the start of the next one.

use std::io::{self, BufRead};

/// Splits a buffered byte stream into newline-terminated lines.
///
/// The sequence is lazy, finite, and non-restartable: once the source reports
/// end of data the reader is exhausted for good.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    exhausted: bool,
    lines_read: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            exhausted: false,
            lines_read: 0,
        }
    }

    /// Read the next logical line, without its `\n`.
    ///
    /// Returns `Ok(None)` once the source is exhausted. A final line lacking a
    /// trailing newline is still returned; input that ends right after a `\n`
    /// produces no extra empty line. I/O errors leave the reader's state
    /// untouched.
    pub fn next_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        if self.exhausted {
            return Ok(None);
        }

        let mut buf = Vec::new();
        let n = self.inner.read_until(b'\n', &mut buf)?;
        if n == 0 {
            self.exhausted = true;
            return Ok(None);
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
        } else {
            // No newline means read_until hit end of data.
            self.exhausted = true;
        }
        self.lines_read += 1;
        Ok(Some(buf))
    }

    /// Sticky: true once the underlying source has reported end of data.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Number of logical lines handed out so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
