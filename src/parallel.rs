//! Parallel processing utilities using Rayon.

use crate::channels::{Channel, SampleMatrix};
use rayon::prelude::*;

/// Minimum number of samples in a matrix before enabling parallelization.
/// Below this threshold, sequential processing is faster due to
/// thread spawn overhead.
pub const PARALLEL_THRESHOLD: usize = 100_000;

/// Apply `f` to every channel of the matrix, returning results in
/// declaration order.
///
/// Channels are independent, so large matrices are split across the rayon
/// pool one channel per task.
pub fn map_channels<F, T>(matrix: &SampleMatrix, f: F) -> Vec<T>
where
    F: Fn(&Channel) -> T + Sync + Send,
    T: Send,
{
    if matrix.sample_count() >= PARALLEL_THRESHOLD && matrix.channel_count() > 1 {
        matrix.channels().par_iter().map(f).collect()
    } else {
        matrix.channels().iter().map(f).collect()
    }
}
