use ndarray::{Array2, Axis};

use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Windowing (image mode)
// ---------------------------------------------------------------------------

/// Cut `items` into consecutive, non-overlapping windows of exactly `window`
/// elements. The trailing `len % window` elements are dropped.
pub fn window_frames<T: Clone>(items: &[T], window: usize) -> Vec<Vec<T>> {
    if window == 0 {
        return Vec::new();
    }
    items.chunks_exact(window).map(|chunk| chunk.to_vec()).collect()
}

// ---------------------------------------------------------------------------
// Resampling (feature mode)
// ---------------------------------------------------------------------------

/// Row indices kept when shrinking `len` rows to `target`.
///
/// Uniform stride `len / target` starting at 0, truncated to `target`
/// entries. No interpolation.
pub fn resample_indices(len: usize, target: usize) -> Result<Vec<usize>> {
    if target == 0 || len < target {
        return Err(DatasetError::ResampleTooShort {
            available: len,
            target,
        });
    }
    let stride = len / target;
    Ok((0..len).step_by(stride).take(target).collect())
}

/// Resample a list to exactly `target` elements.
pub fn resample_list<T: Clone>(items: &[T], target: usize) -> Result<Vec<T>> {
    Ok(resample_indices(items.len(), target)?
        .into_iter()
        .map(|i| items[i].clone())
        .collect())
}

/// Resample the rows (time steps) of a feature table to exactly `target`.
pub fn resample_rows(table: &Array2<f32>, target: usize) -> Result<Array2<f32>> {
    let indices = resample_indices(table.nrows(), target)?;
    Ok(table.select(Axis(0), &indices))
}
