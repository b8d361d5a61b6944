//! Content hashing
//!
//! Thin wrappers over [`ContentHash`] for the two ways content arrives:
//! a complete in-memory buffer, or a reader that may fail mid-stream.
//! The streaming variant never returns a digest of a partial read - an
//! I/O error aborts the whole computation.

use sha2::{Digest, Sha256};
use tokio::io::{AsyncRead, AsyncReadExt};

use logtide_protocol::ContentHash;

/// Read chunk size for streaming hashing
const CHUNK_SIZE: usize = 64 * 1024;

/// Hash a complete in-memory buffer
pub fn hash_bytes(data: &[u8]) -> ContentHash {
    ContentHash::of_bytes(data)
}

/// Hash everything a reader yields
///
/// Propagates the first I/O error instead of silently hashing whatever
/// was read so far.
pub async fn hash_reader<R>(mut reader: R) -> std::io::Result<ContentHash>
where
    R: AsyncRead + Unpin,
{
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(ContentHash::from_digest(hasher.finalize().into()))
}

#[cfg(test)]
#[path = "hash_test.rs"]
mod tests;
