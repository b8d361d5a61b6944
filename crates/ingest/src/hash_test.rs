//! Tests for content hashing

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

use super::*;

/// Reader that yields some bytes and then fails
struct FailingReader {
    good: &'static [u8],
    served: usize,
}

impl AsyncRead for FailingReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        if self.served < self.good.len() {
            let n = (self.good.len() - self.served).min(buf.remaining());
            buf.put_slice(&self.good[self.served..self.served + n]);
            self.served += n;
            Poll::Ready(Ok(()))
        } else {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated")))
        }
    }
}

#[test]
fn test_hash_bytes_matches_content_hash() {
    assert_eq!(hash_bytes(b"abc"), ContentHash::of_bytes(b"abc"));
}

#[tokio::test]
async fn test_hash_reader_matches_in_memory_hash() {
    let data = vec![7u8; 3 * CHUNK_SIZE + 11];
    let streamed = hash_reader(&data[..]).await.unwrap();
    assert_eq!(streamed, hash_bytes(&data));
}

#[tokio::test]
async fn test_hash_reader_empty() {
    let streamed = hash_reader(&b""[..]).await.unwrap();
    assert_eq!(streamed, hash_bytes(b""));
}

#[tokio::test]
async fn test_hash_reader_propagates_io_error() {
    // Must error out, never return a digest of the partial prefix
    let reader = FailingReader {
        good: b"partial content",
        served: 0,
    };
    let err = hash_reader(reader).await.unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}
