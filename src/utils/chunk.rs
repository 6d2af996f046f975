//! Splitting id lists into request-sized batches.

use std::slice::Chunks;

use crate::error::{Result, TapError};

/// Lazily split `items` into consecutive slices of `size` elements.
///
/// The final slice holds whatever remains and may be shorter. An empty input
/// yields no slices.
pub fn chunk<T>(items: &[T], size: usize) -> Result<Chunks<'_, T>> {
    if size == 0 {
        return Err(TapError::InvalidChunkSize);
    }
    Ok(items.chunks(size))
}
