//! Chunked per-region feature extraction from alignment files.
//!
//! The pipeline runs leaf to root:
//!
//! 1. [`regions::chop`] tiles the target contig into fixed-size half-open
//!    regions.
//! 2. [`metrics`] computes read count, coverage, and soft-clip totals per
//!    region.
//! 3. [`extract::extract_sample`] drives both across one sample and
//!    normalizes the flattened buffer by total read count.
//! 4. [`batch::assemble`] fans extraction out over a worker pool and stacks
//!    the vectors into an [`ndarray::Array2`] with row-aligned labels.

pub mod batch;
pub mod extract;
pub mod metrics;
pub mod regions;

pub use batch::{assemble, ArraySet};
pub use extract::{extract_sample, feature_width, FEATURES_PER_REGION};
pub use regions::{chop, Region};
