//! Chopping a contig into fixed-size regions.
//!
//! A [`Region`] is a half-open, 0-based interval `[start, end)` along a
//! contig. [`chop`] tiles `[0, size)` with regions of `chunksize` bases,
//! truncating only the final region so it ends exactly at `size`. The tiling
//! is what gives every sample of a `(contig, chunksize)` pair the same
//! feature width downstream.

use serde::Serialize;

use crate::core::errors::{Result, ScreenError};

/// A half-open `[start, end)` interval on a contig, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub start: u64,
    pub end: u64,
}

impl Region {
    /// Number of bases covered by the region. Never zero for chopped regions.
    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Lazy tiling of `[0, size)` produced by [`chop`].
#[derive(Debug, Clone)]
pub struct RegionChop {
    pos: u64,
    size: u64,
    chunksize: u64,
}

impl Iterator for RegionChop {
    type Item = Region;

    fn next(&mut self) -> Option<Region> {
        if self.pos >= self.size {
            return None;
        }
        let start = self.pos;
        let end = std::cmp::min(start + self.chunksize, self.size);
        self.pos = start + self.chunksize;
        Some(Region { start, end })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = region_count(self.size.saturating_sub(self.pos), self.chunksize.max(1));
        (remaining as usize, Some(remaining as usize))
    }
}

impl ExactSizeIterator for RegionChop {}

/// For a contig of `size` bases, generate regions maximally `chunksize` long.
///
/// Fails before yielding anything when either argument is below 1. The
/// sequence is a pure function of its inputs and can be restarted by calling
/// `chop` again.
pub fn chop(size: u64, chunksize: u64) -> Result<RegionChop> {
    if size < 1 {
        return Err(ScreenError::InvalidArgument(
            "Size must be at least 1.".to_string(),
        ));
    }
    if chunksize < 1 {
        return Err(ScreenError::InvalidArgument(
            "Chunksize must be at least 1.".to_string(),
        ));
    }
    Ok(RegionChop {
        pos: 0,
        size,
        chunksize,
    })
}

/// Number of regions `chop(size, chunksize)` yields, `ceil(size / chunksize)`.
#[inline]
pub fn region_count(size: u64, chunksize: u64) -> u64 {
    (size + chunksize - 1) / chunksize
}
