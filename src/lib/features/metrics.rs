//! Per-region alignment statistics.
//!
//! Three independent read-only queries against an indexed BAM/CRAM reader:
//! overlapping read count, per-position coverage reduced to a scalar, and
//! total soft-clipped bases. Each query performs its own fetch, so a single
//! reader can serve any number of region calls for one sample.
//!
//! Contig existence is the caller's responsibility; the extractor resolves
//! the target id once per sample before any region work starts.

use rust_htslib::bam::{record::Cigar, IndexedReader, Read};

use crate::core::errors::Result;
use crate::core::read_filter::{DefaultReadFilter, ReadFilter};
use crate::features::regions::Region;

/// Bases below this quality count toward no coverage channel.
pub const BASE_QUALITY_CUTOFF: u8 = 15;

/// Depth cap for the pileup engine. Mitochondrial pileups routinely reach
/// tens of thousands deep, so the htslib default of 8000 would clip them.
const MAX_PILEUP_DEPTH: u32 = 1_000_000;

/// Count alignment records overlapping the region.
pub fn read_count(reader: &mut IndexedReader, tid: u32, region: Region) -> Result<u64> {
    reader.fetch((tid, region.start as i64, region.end as i64))?;
    let mut count = 0u64;
    for result in reader.records() {
        result?;
        count += 1;
    }
    Ok(count)
}

/// Arithmetic mean of a per-position depth array.
pub fn mean(depths: &[u32]) -> f64 {
    if depths.is_empty() {
        return 0.0;
    }
    depths.iter().map(|&d| u64::from(d)).sum::<u64>() as f64 / depths.len() as f64
}

/// Median of a per-position depth array.
pub fn median(depths: &[u32]) -> f64 {
    if depths.is_empty() {
        return 0.0;
    }
    let mut sorted = depths.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        f64::from(sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        f64::from(sorted[mid])
    }
}

/// Mean coverage over the region. See [`coverage_with`].
pub fn coverage(reader: &mut IndexedReader, tid: u32, region: Region) -> Result<f64> {
    coverage_with(reader, tid, region, mean)
}

/// Coverage over the region, reduced with the supplied aggregator.
///
/// Depth is built per nucleotide channel (A, C, G, T) and the channels are
/// summed per position before aggregation; ambiguous bases and bases below
/// [`BASE_QUALITY_CUTOFF`] contribute to no channel, and records failing
/// [`DefaultReadFilter`] (unmapped, secondary, QC-fail, duplicate) are
/// skipped entirely. Positions nothing aligns to stay at zero, so the
/// aggregator always sees an array exactly as long as the region.
pub fn coverage_with<F>(
    reader: &mut IndexedReader,
    tid: u32,
    region: Region,
    aggregator: F,
) -> Result<f64>
where
    F: Fn(&[u32]) -> f64,
{
    reader.fetch((tid, region.start as i64, region.end as i64))?;
    let mut depths = vec![0u32; region.len() as usize];
    let read_filter = DefaultReadFilter::new();

    let mut pileups = reader.pileup();
    pileups.set_max_depth(MAX_PILEUP_DEPTH);
    for pileup in pileups {
        let pileup = pileup?;
        let pos = u64::from(pileup.pos());
        // A fetch returns whole reads, so the pileup can extend past the
        // region bounds on either side.
        if pos < region.start || pos >= region.end {
            continue;
        }

        let mut channels = [0u32; 4];
        for alignment in pileup.alignments() {
            if alignment.is_del() || alignment.is_refskip() {
                continue;
            }
            let record = alignment.record();
            if !read_filter.filter_read(&record) {
                continue;
            }
            let qpos = match alignment.qpos() {
                Some(qpos) => qpos,
                None => continue,
            };
            if record.qual().get(qpos).copied().unwrap_or(0) < BASE_QUALITY_CUTOFF {
                continue;
            }
            match record.seq()[qpos].to_ascii_uppercase() {
                b'A' => channels[0] += 1,
                b'C' => channels[1] += 1,
                b'G' => channels[2] += 1,
                b'T' => channels[3] += 1,
                _ => {}
            }
        }
        depths[(pos - region.start) as usize] = channels.iter().sum();
    }

    Ok(aggregator(&depths))
}

/// Sum of soft-clipped base lengths across records overlapping the region.
///
/// Records without CIGAR information (e.g. unmapped mates) contribute 0.
pub fn softclip_bases(reader: &mut IndexedReader, tid: u32, region: Region) -> Result<u64> {
    reader.fetch((tid, region.start as i64, region.end as i64))?;
    let mut total = 0u64;
    for result in reader.records() {
        let record = result?;
        for op in record.cigar().iter() {
            if let Cigar::SoftClip(len) = op {
                total += u64::from(*len);
            }
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn mean_includes_uncovered_positions() {
        assert_eq!(mean(&[4, 0, 0, 0]), 1.0);
    }

    #[test]
    fn median_handles_even_and_odd_lengths() {
        assert_eq!(median(&[1, 3, 2]), 2.0);
        assert_eq!(median(&[1, 2, 3, 4]), 2.5);
        assert_eq!(median(&[]), 0.0);
    }
}
