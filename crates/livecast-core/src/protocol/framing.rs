//! Newline framing over a raw byte stream.
//!
//! The server pushes frames as `\n`-terminated lines, but a single socket
//! read can end anywhere: mid-line, mid-codepoint, or spanning several
//! lines. The accumulator keeps the undelivered tail across reads and only
//! surfaces complete lines.

use bytes::{BufMut, BytesMut};

/// Accumulates raw bytes and yields complete, decoded lines.
///
/// A line is complete once its `\n` terminator has been observed; everything
/// after the last terminator stays buffered until the next push. Decoding is
/// lossy (`U+FFFD` for invalid UTF-8 sequences) so a garbled line never
/// aborts the stream.
#[derive(Debug, Default)]
pub struct LineAccumulator {
    tail: BytesMut,
}

impl LineAccumulator {
    pub fn new() -> Self {
        Self {
            tail: BytesMut::new(),
        }
    }

    /// Feed freshly read bytes, returning every line completed by them.
    ///
    /// Splits at the *last* `\n` in the buffered data: the prefix is decoded
    /// and broken into lines (empty strings discarded), the remainder becomes
    /// the new tail. With no terminator in sight the whole buffer is retained
    /// and the batch is empty.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.tail.put_slice(chunk);

        let Some(last_newline) = self.tail.iter().rposition(|&b| b == b'\n') else {
            return Vec::new();
        };

        let complete = self.tail.split_to(last_newline + 1);
        String::from_utf8_lossy(&complete)
            .split('\n')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Bytes held back waiting for their terminator.
    pub fn tail(&self) -> &[u8] {
        &self.tail
    }
}
