//! mitoscreen: chunked chrM alignment features for contamination screening.
//!
//! The library turns indexed BAM/CRAM files into fixed-width numeric feature
//! vectors by chopping a target contig (chrM by default) into fixed-size
//! regions and recording read count, mean coverage, and soft-clipped bases
//! per region. Batches of samples are processed by a worker pool into a
//! matrix suitable for training or applying a contamination classifier.
//!
//! # Modules
//!
//! - [`features`]: region chopping, per-region metrics, sample extraction,
//!   and parallel batch assembly
//! - [`classify`]: the external classifier's interface and call thresholds
//! - [`core`]: errors, concurrency helpers, input resolution, TSV output
//! - [`utils`]: flat re-exports of the `core` helpers

pub mod classify;
pub mod core;
pub mod features;
pub mod utils;
