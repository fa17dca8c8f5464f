//! Fan-out/fan-in assembly of a feature matrix over many samples.
//!
//! Each sample is extracted by exactly one worker against its own reader
//! handle; the only state shared between workers is the read-only path list
//! and the collected output. Collection preserves input order, so row `i` of
//! the matrix always belongs to `paths[i]` no matter which worker finished
//! first.

use std::path::PathBuf;

use ndarray::Array2;
use rayon::prelude::*;

use crate::core::concurrency;
use crate::core::errors::{Result, ScreenError};
use crate::features::extract::extract_sample;

/// A feature matrix with its row-aligned labels, ready for a classifier.
#[derive(Debug, Clone)]
pub struct ArraySet<L> {
    /// Rows = samples, columns = `3 * region count` features.
    pub features: Array2<f64>,
    /// Label `i` belongs to row `i`. Empty when assembling for prediction.
    pub labels: Vec<L>,
}

/// Extract every sample in `paths` and stack the vectors into a matrix.
///
/// Runs up to `workers` extractions concurrently; the first failure aborts
/// the batch. Fails with [`ScreenError::InvalidArgument`] when `workers` is
/// zero and with [`ScreenError::InconsistentFeatureWidth`] should any sample
/// produce a divergent vector length.
pub fn assemble<L>(
    paths: &[PathBuf],
    labels: &[L],
    chunksize: u64,
    contig: &str,
    workers: usize,
) -> Result<ArraySet<L>>
where
    L: Clone + Send + Sync,
{
    let pool = concurrency::worker_pool(workers)?;
    let rows: Vec<Vec<f64>> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| extract_sample(path, chunksize, contig))
            .collect::<Result<Vec<_>>>()
    })?;

    let n_samples = rows.len();
    let width = rows.first().map(|row| row.len()).unwrap_or(0);
    for (row, path) in rows.iter().zip(paths) {
        if row.len() != width {
            return Err(ScreenError::InconsistentFeatureWidth {
                path: path.clone(),
                expected: width,
                actual: row.len(),
            });
        }
    }

    let mut flat = Vec::with_capacity(n_samples * width);
    for row in &rows {
        flat.extend_from_slice(row);
    }
    let features = Array2::from_shape_vec((n_samples, width), flat)
        .map_err(|err| ScreenError::InvalidArgument(format!("Feature matrix shape: {}", err)))?;

    Ok(ArraySet {
        features,
        labels: labels.to_vec(),
    })
}
