//! Response bodies fed by blocking writers.

use std::io::{self, Write};

use axum::body::Body;
use tokio::sync::mpsc;

/// Writes into a response body while it is being sent.
///
/// Each `write` blocks until the body has room for the chunk, so use it from
/// blocking code such as a `spawn_blocking` task.
#[derive(Debug, Clone)]
pub struct BodyWriter {
    tx: mpsc::Sender<io::Result<Vec<u8>>>,
    written: usize,
}

impl BodyWriter {
    /// Bytes accepted so far by this handle.
    #[must_use]
    pub const fn bytes_written(&self) -> usize {
        self.written
    }

    /// Ends the body with an error so the client sees a broken transfer
    /// rather than a short file.
    pub fn abort(self, message: &str) {
        // Nothing left to tell if the client is already gone
        let _ = self.tx.blocking_send(Err(io::Error::other(message.to_string())));
    }
}

impl Write for BodyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.tx
            .blocking_send(Ok(buf.to_vec()))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "response body closed"))?;
        self.written += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Creates a body that streams whatever is written into the returned writer.
///
/// At most `capacity` chunks wait in memory; the body ends when every
/// writer handle is dropped.
pub fn channel_body(capacity: usize) -> (BodyWriter, Body) {
    let (tx, rx) = mpsc::channel(capacity);
    let chunks = futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (chunk, rx))
    });

    (BodyWriter { tx, written: 0 }, Body::from_stream(chunks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_writes_reach_the_body_in_order() {
        let (mut writer, body) = channel_body(1);

        let task = tokio::task::spawn_blocking(move || {
            writer.write_all(b"%PDF-").unwrap();
            writer.write_all(b"1.7").unwrap();
            writer.bytes_written()
        });

        let bytes = body.collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"%PDF-1.7");
        assert_eq!(task.await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_abort_fails_the_body() {
        let (mut writer, body) = channel_body(4);
        let handle = writer.clone();

        tokio::task::spawn_blocking(move || {
            writer.write_all(b"%PDF-").unwrap();
            drop(writer);
            handle.abort("render failed");
        })
        .await
        .unwrap();

        assert!(body.collect().await.is_err());
    }

    #[tokio::test]
    async fn test_write_after_client_left_is_broken_pipe() {
        let (mut writer, body) = channel_body(4);
        drop(body);

        let err = tokio::task::spawn_blocking(move || writer.write(b"%PDF-").unwrap_err())
            .await
            .unwrap();

        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
