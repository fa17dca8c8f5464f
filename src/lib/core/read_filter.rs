//! Read filtering primitives for coverage counting.
//!
//! This module exposes the [`ReadFilter`] trait along with the default
//! filter applied during coverage pileups.

use rust_htslib::bam::record::Record;

/// A trait for filtering reads based on various criteria.
///
/// Implementors define how reads should be filtered, returning `true` if the
/// read passes the filter and `false` otherwise.
pub trait ReadFilter {
    /// Filter a read based on various criteria.
    fn filter_read(&self, read: &Record) -> bool;
}

/// The htslib "all" coverage filter: only primary, mapped, QC-passing,
/// non-duplicate records contribute depth.
///
/// Read counting and soft-clip totals deliberately do not use this filter;
/// region fetches count every overlapping record.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultReadFilter;

impl DefaultReadFilter {
    /// Create a new [`DefaultReadFilter`].
    pub fn new() -> Self {
        Self
    }
}

impl ReadFilter for DefaultReadFilter {
    /// Filter reads on the unmapped, secondary, QC-fail, and duplicate flags.
    #[inline(always)]
    fn filter_read(&self, read: &Record) -> bool {
        !(read.is_unmapped()
            || read.is_secondary()
            || read.is_quality_check_failed()
            || read.is_duplicate())
    }
}
