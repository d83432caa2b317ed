use flate2::{Decompress, FlushDecompress, Status};

use crate::error::{StoreError, StoreResult};

const MIN_GROW: usize = 4096;

/// Decompress a complete zlib stream.
///
/// The stream must run to its end marker and be the last thing in `compressed`.
/// A truncated stream, a corrupt one, or trailing bytes after the end marker
/// all fail with [`StoreError::CorruptObject`]; partial output is never returned.
pub fn inflate(compressed: &[u8]) -> StoreResult<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut out = Vec::with_capacity(compressed.len().saturating_mul(2).max(MIN_GROW));

    loop {
        if out.len() == out.capacity() {
            out.reserve(out.capacity().max(MIN_GROW));
        }

        let in_before = inflater.total_in();
        let out_before = inflater.total_out();
        let input = &compressed[in_before as usize..];

        let status = inflater
            .decompress_vec(input, &mut out, FlushDecompress::None)
            .map_err(|e| StoreError::CorruptObject(format!("invalid zlib stream: {e}")))?;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                let has_room = out.len() < out.capacity();
                if has_room && inflater.total_in() as usize == compressed.len() {
                    return Err(StoreError::CorruptObject(format!(
                        "zlib stream truncated after {} input bytes",
                        compressed.len()
                    )));
                }
                let stalled =
                    inflater.total_in() == in_before && inflater.total_out() == out_before;
                if has_room && stalled {
                    return Err(StoreError::CorruptObject(
                        "zlib stream made no progress".into(),
                    ));
                }
            }
        }
    }

    let consumed = inflater.total_in() as usize;
    if consumed != compressed.len() {
        return Err(StoreError::CorruptObject(format!(
            "{} trailing bytes after zlib stream",
            compressed.len() - consumed
        )));
    }

    Ok(out)
}
