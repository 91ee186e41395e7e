//! Streaming fingerprint computation
//!
//! The body is fed through an incremental digest in fixed-size chunks and the
//! stream is left at the position it had before computation, so the caller
//! can still transmit it.

use super::{Algorithm, Fingerprint};
use crate::error::{StampError, StampResult};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use tracing::trace;

/// Bytes read from the body per digest update
pub const CHUNK_SIZE: usize = 8192;

/// Incremental digest state for one computation
enum Hasher {
    Md5(md5::Context),
    Sha224(Sha224),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
}

impl Hasher {
    fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Md5 => Self::Md5(md5::Context::new()),
            Algorithm::Sha224 => Self::Sha224(Sha224::new()),
            Algorithm::Sha256 => Self::Sha256(Sha256::new()),
            Algorithm::Sha384 => Self::Sha384(Sha384::new()),
            Algorithm::Sha512 => Self::Sha512(Sha512::new()),
        }
    }

    fn update(&mut self, chunk: &[u8]) {
        match self {
            Self::Md5(ctx) => ctx.consume(chunk),
            Self::Sha224(h) => h.update(chunk),
            Self::Sha256(h) => h.update(chunk),
            Self::Sha384(h) => h.update(chunk),
            Self::Sha512(h) => h.update(chunk),
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            Self::Md5(ctx) => format!("{:x}", ctx.compute()),
            Self::Sha224(h) => hex::encode(h.finalize()),
            Self::Sha256(h) => hex::encode(h.finalize()),
            Self::Sha384(h) => hex::encode(h.finalize()),
            Self::Sha512(h) => hex::encode(h.finalize()),
        }
    }
}

/// Compute the fingerprint of a whole body stream.
///
/// The digest always covers the body from its first byte. On success the
/// stream is seeked back to the position it had on entry. Read or seek
/// failures surface as [`StampError::StreamRead`].
pub fn compute_fingerprint<S>(
    stream: &mut S,
    algorithm: Algorithm,
    weak: bool,
) -> StampResult<Fingerprint>
where
    S: Read + Seek + ?Sized,
{
    let original = stream.stream_position().map_err(StampError::stream_read)?;
    stream
        .seek(SeekFrom::Start(0))
        .map_err(StampError::stream_read)?;

    let mut hasher = Hasher::new(algorithm);
    let mut buf = [0u8; CHUNK_SIZE];
    let mut total: u64 = 0;

    loop {
        let n = match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(StampError::stream_read(e)),
        };
        hasher.update(&buf[..n]);
        total += n as u64;
    }

    stream
        .seek(SeekFrom::Start(original))
        .map_err(StampError::stream_read)?;

    let hash = hasher.finalize_hex();
    trace!("Hashed {} body bytes with {}", total, algorithm);

    Ok(if weak {
        Fingerprint::weak(hash)
    } else {
        Fingerprint::strong(hash)
    })
}

/// Compute the fingerprint of an in-memory body
pub fn compute_fingerprint_bytes(
    body: &[u8],
    algorithm: Algorithm,
    weak: bool,
) -> StampResult<Fingerprint> {
    compute_fingerprint(&mut std::io::Cursor::new(body), algorithm, weak)
}
