//! Connection setup and outbound frame writing.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use livecast_core::error::Result;

/// Open the duplex stream to the broadcast endpoint.
pub async fn connect(host: &str, port: u16) -> Result<TcpStream> {
    let stream = TcpStream::connect((host, port)).await?;
    tracing::debug!(host, port, "broadcast endpoint connected");
    Ok(stream)
}

/// Exclusive owner of the write half.
///
/// Every outbound frame (subscribe, keepalive ping, quit) goes through this
/// one value, so partial writes can never interleave.
pub struct FrameWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub async fn send(&mut self, frame: &str) -> Result<()> {
        self.writer.write_all(frame.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}
