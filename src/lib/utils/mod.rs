//! Backwards-compatible utility re-exports.
//!
//! Shared helpers live under `crate::core`; this module re-exports the flat
//! `utils::*` names used by the binary and steers new code toward
//! `core::prelude`.

pub use crate::core::concurrency::{determine_allowed_cpus, worker_pool};
pub use crate::core::errors::is_broken_pipe;
pub use crate::core::fs::{dir_to_bam_list, is_alignment_file, load_list_file, BamSource};
pub use crate::core::io::get_writer;
