//! Turning one sample into a flat feature vector.
//!
//! For every chopped region of the target contig the extractor records the
//! triple `(read count, mean coverage, soft-clipped bases)`, in region order,
//! then scales the whole buffer by the sample's total read count. The result
//! is a vector of `3 * ceil(contig length / chunksize)` floats, identical in
//! width for every sample sharing a `(contig, chunksize)` pair.

use std::path::Path;

use log::info;
use rust_htslib::bam::IndexedReader;

use crate::core::errors::{Result, ScreenError};
use crate::features::{metrics, regions};

/// Number of statistics recorded per region.
pub const FEATURES_PER_REGION: usize = 3;

/// Feature vector width for a contig of `length` bases at `chunksize`.
#[inline]
pub fn feature_width(length: u64, chunksize: u64) -> u64 {
    FEATURES_PER_REGION as u64 * regions::region_count(length, chunksize)
}

/// Open an indexed alignment reader, distinguishing a missing file from an
/// unreadable or unindexed one.
pub fn open_reader(path: &Path) -> Result<IndexedReader> {
    if !path.exists() {
        return Err(ScreenError::FileNotFound(path.to_path_buf()));
    }
    IndexedReader::from_path(path).map_err(|source| ScreenError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve a contig name against a reader's reference list, once per sample.
pub fn resolve_contig(reader: &IndexedReader, path: &Path, contig: &str) -> Result<(u32, u64)> {
    use rust_htslib::bam::Read;

    let header = reader.header();
    let not_found = || ScreenError::ContigNotFound {
        contig: contig.to_string(),
        path: path.to_path_buf(),
    };
    let tid = header.tid(contig.as_bytes()).ok_or_else(not_found)?;
    let length = header.target_len(tid).ok_or_else(not_found)?;
    Ok((tid, length))
}

/// Compute the unnormalized feature buffer for a contig, threading the total
/// read count through the per-region loop as an explicit accumulator.
pub fn raw_features(
    reader: &mut IndexedReader,
    tid: u32,
    length: u64,
    chunksize: u64,
) -> Result<(Vec<f64>, u64)> {
    let chopped = regions::chop(length, chunksize)?;
    let mut features = Vec::with_capacity(chopped.len() * FEATURES_PER_REGION);
    let mut total_reads = 0u64;
    for region in chopped {
        let n_reads = metrics::read_count(reader, tid, region)?;
        total_reads += n_reads;
        let cov = metrics::coverage(reader, tid, region)?;
        let softclip = metrics::softclip_bases(reader, tid, region)?;
        features.push(n_reads as f64);
        features.push(cov);
        features.push(softclip as f64);
    }
    Ok((features, total_reads))
}

/// Process one alignment file into a normalized feature vector.
///
/// Every call recomputes from scratch; two calls on the same file yield
/// bit-identical vectors. A sample with no reads on the target contig fails
/// with [`ScreenError::NoReadsOnContig`] rather than normalizing by zero.
pub fn extract_sample(path: &Path, chunksize: u64, contig: &str) -> Result<Vec<f64>> {
    info!("Calculating features for {}", path.display());
    let mut reader = open_reader(path)?;
    let (tid, length) = resolve_contig(&reader, path, contig)?;
    let (mut features, total_reads) = raw_features(&mut reader, tid, length, chunksize)?;
    if total_reads == 0 {
        return Err(ScreenError::NoReadsOnContig {
            contig: contig.to_string(),
            path: path.to_path_buf(),
        });
    }
    let scale = total_reads as f64;
    for value in &mut features {
        *value /= scale;
    }
    info!("Done calculating features for {}", path.display());
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_matches_region_count() {
        assert_eq!(feature_width(1000, 100), 30);
        assert_eq!(feature_width(1000, 101), 30);
        assert_eq!(feature_width(16571, 16571), 3);
        assert_eq!(feature_width(16571, 1000), 51);
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let err = extract_sample(Path::new("/no/such/sample.bam"), 100, "chrM").unwrap_err();
        assert!(matches!(err, ScreenError::FileNotFound(_)));
    }
}
