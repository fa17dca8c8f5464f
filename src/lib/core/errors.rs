//! Error types shared across the mitoscreen library.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the feature-extraction pipeline and its boundaries.
#[derive(Error, Debug)]
pub enum ScreenError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Contig '{contig}' does not exist in {path}")]
    ContigNotFound { contig: String, path: PathBuf },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to open alignment file {path}: {source}")]
    UnreadableFile {
        path: PathBuf,
        source: rust_htslib::errors::Error,
    },

    #[error("No reads aligned to '{contig}' in {path}, features cannot be normalized")]
    NoReadsOnContig { contig: String, path: PathBuf },

    #[error("Inconsistent feature width for {path}: expected {expected}, got {actual}")]
    InconsistentFeatureWidth {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("Alignment reader error: {0}")]
    Htslib(#[from] rust_htslib::errors::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ScreenError>;

/// Returns `true` if the error originated from a broken pipe.
#[inline]
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.root_cause()
        .downcast_ref::<io::Error>()
        .map(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe)
        .unwrap_or(false)
}
