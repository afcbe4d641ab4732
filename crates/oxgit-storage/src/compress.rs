//! zlib wrapping for stored objects.
//!
//! Loose objects are deflate streams with the zlib header and Adler-32
//! trailer, byte-compatible with git.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use crate::error::{StoreError, StoreResult};

/// Compress `data` into a zlib stream.
pub fn compress(data: &[u8]) -> StoreResult<Vec<u8>> {
    let buffer = Vec::with_capacity(data.len() / 2 + 16);
    let mut encoder = ZlibEncoder::new(buffer, Compression::default());
    encoder.write_all(data).map_err(StoreError::Compression)?;
    encoder.finish().map_err(StoreError::Compression)
}

/// Decompress a complete zlib stream.
///
/// The stream must reach its end marker and pass the checksum; a stream that
/// simply runs out of input is reported as truncated rather than returning a
/// partial result. Bytes after the end of the stream are ignored.
pub fn decompress(data: &[u8]) -> StoreResult<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(data.len().saturating_mul(2).max(64));

    loop {
        if out.len() == out.capacity() {
            out.reserve(out.capacity());
        }

        let consumed = inflater.total_in() as usize;
        let produced = out.len();
        // The output buffer grows between calls, so inflate incrementally.
        let status = inflater
            .decompress_vec(&data[consumed..], &mut out, FlushDecompress::None)
            .map_err(|e| StoreError::CorruptStream(e.to_string()))?;

        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                let stalled = inflater.total_in() as usize == consumed && out.len() == produced;
                if stalled {
                    return Err(StoreError::CorruptStream("truncated zlib stream".to_string()));
                }
            }
        }
    }
}
