//! Socket-side line framing.

use tokio::io::{AsyncRead, AsyncReadExt};

use livecast_core::protocol::framing::LineAccumulator;

/// Reads from the socket and yields batches of complete lines.
///
/// One call performs at most one underlying read (bounded by the configured
/// buffer size), making it safe to race against the keepalive tick in a
/// `select!`. EOF, I/O errors, and reads that complete no line all surface
/// as an empty batch; the caller's empty-read policy decides when to give up.
pub struct Framer<R> {
    reader: R,
    acc: LineAccumulator,
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> Framer<R> {
    pub fn new(reader: R, buffer_size: usize) -> Self {
        Self {
            reader,
            acc: LineAccumulator::new(),
            buf: vec![0; buffer_size],
        }
    }

    /// Never fails: read problems are logged and yield an empty batch.
    pub async fn receive(&mut self) -> Vec<String> {
        match self.reader.read(&mut self.buf).await {
            Ok(0) => Vec::new(),
            Ok(n) => self.acc.push(&self.buf[..n]),
            Err(e) => {
                tracing::warn!(error = %e, "socket read failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn line_split_across_reads_dispatches_once() {
        let (mut tx, rx) = tokio::io::duplex(64);
        let mut framer = Framer::new(rx, 4096);

        tx.write_all(b"MSG\tA\t{\"t\":9").await.unwrap();
        assert!(framer.receive().await.is_empty());

        tx.write_all(b"}\n").await.unwrap();
        let lines = framer.receive().await;
        assert_eq!(lines, vec!["MSG\tA\t{\"t\":9}".to_owned()]);
    }

    #[tokio::test]
    async fn eof_reads_are_empty() {
        let (tx, rx) = tokio::io::duplex(64);
        drop(tx);
        let mut framer = Framer::new(rx, 4096);
        assert!(framer.receive().await.is_empty());
        assert!(framer.receive().await.is_empty());
    }
}
