//! End-to-end tests of the feature pipeline against synthetic BAM files.
//!
//! Fixtures are written with rust-htslib: a coordinate-sorted BAM per test
//! scenario, indexed in place, then pushed through extraction and batch
//! assembly.

use std::path::{Path, PathBuf};

use mitoscreen_lib::classify::Label;
use mitoscreen_lib::core::errors::ScreenError;
use mitoscreen_lib::features::{self, extract, metrics, Region};
use rust_htslib::bam::{self, header::HeaderRecord, Format, Header, HeaderView, Writer};
use tempfile::TempDir;

/// Write a coordinate-sorted, indexed BAM with the given contigs and SAM
/// record lines.
fn write_bam(path: &Path, contigs: &[(&str, u64)], sam_lines: &[&str]) {
    let mut header = Header::new();
    for (name, length) in contigs {
        let mut rec = HeaderRecord::new(b"SQ");
        rec.push_tag(b"SN", name);
        rec.push_tag(b"LN", length);
        header.push_record(&rec);
    }

    {
        let mut writer = Writer::from_path(path, &header, Format::Bam).unwrap();
        let view = HeaderView::from_header(&header);
        for line in sam_lines {
            let record = bam::Record::from_sam(&view, line.as_bytes()).unwrap();
            writer.write(&record).unwrap();
        }
    }

    bam::index::build(path, None, bam::index::Type::Bai, 1).unwrap();
}

/// Four reads on a 1000 bp chrM: two in the first chunk (one soft-clipped
/// on the left), one soft-clipped read in the second chunk, one fully
/// aligned read in the sixth chunk.
const MICRO_READS: &[&str] = &[
    "r1\t0\tchrM\t1\t60\t10M\t*\t0\t0\tACGTACGTAC\tIIIIIIIIII",
    "r2\t0\tchrM\t51\t60\t5S10M\t*\t0\t0\tAAAAACGTACGTACG\tIIIIIIIIIIIIIII",
    "r3\t0\tchrM\t121\t60\t10M5S\t*\t0\t0\tACGTACGTACAAAAA\tIIIIIIIIIIIIIII",
    "r4\t0\tchrM\t501\t60\t20M\t*\t0\t0\tACGTACGTACGTACGTACGT\tIIIIIIIIIIIIIIIIIIII",
];

fn micro_bam(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    write_bam(&path, &[("chrM", 1000)], MICRO_READS);
    path
}

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-12, "{} != {}", a, b);
}

#[test]
fn sample_vector_has_expected_width_and_values() {
    let dir = TempDir::new().unwrap();
    let bam = micro_bam(&dir, "micro.bam");

    let vector = extract::extract_sample(&bam, 100, "chrM").unwrap();
    assert_eq!(vector.len(), 30);
    assert_eq!(vector.len() as u64, extract::feature_width(1000, 100));

    // 4 reads in total; region 0 holds r1 and r2.
    approx(vector[0], 2.0 / 4.0);
    // r1 and r2 each cover 10 of the 100 positions.
    approx(vector[1], 0.2 / 4.0);
    // r2 carries a 5-base soft clip.
    approx(vector[2], 5.0 / 4.0);

    // Region 1 holds r3: 10 aligned bases, 5 soft-clipped.
    approx(vector[3], 1.0 / 4.0);
    approx(vector[4], 0.1 / 4.0);
    approx(vector[5], 5.0 / 4.0);

    // Region 5 holds r4: 20 aligned bases, no clipping.
    approx(vector[15], 1.0 / 4.0);
    approx(vector[16], 0.2 / 4.0);
    approx(vector[17], 0.0);

    // Every other region saw no reads at all.
    for region in [2, 3, 4, 6, 7, 8, 9] {
        for offset in 0..3 {
            approx(vector[region * 3 + offset], 0.0);
        }
    }
}

#[test]
fn zero_read_regions_yield_zero_triples_before_normalization() {
    let dir = TempDir::new().unwrap();
    let bam = micro_bam(&dir, "micro.bam");

    let mut reader = extract::open_reader(&bam).unwrap();
    let (tid, length) = extract::resolve_contig(&reader, &bam, "chrM").unwrap();
    let (raw, total_reads) = extract::raw_features(&mut reader, tid, length, 100).unwrap();

    assert_eq!(total_reads, 4);
    // Region 9 ([900, 1000)) has no overlapping reads.
    assert_eq!(&raw[27..30], &[0.0, 0.0, 0.0]);
}

#[test]
fn extraction_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let bam = micro_bam(&dir, "micro.bam");

    let first = extract::extract_sample(&bam, 100, "chrM").unwrap();
    let second = extract::extract_sample(&bam, 100, "chrM").unwrap();
    assert_eq!(first, second);
}

#[test]
fn worker_count_does_not_change_the_matrix() {
    let dir = TempDir::new().unwrap();
    let bam = micro_bam(&dir, "micro.bam");

    let paths = vec![bam; 6];
    let labels = vec![Label::Pos; 6];

    let reference = features::assemble(&paths, &labels, 100, "chrM", 1).unwrap();
    assert_eq!(reference.features.dim(), (6, 30));
    assert_eq!(reference.labels, labels);

    for workers in [2, 4, 8] {
        let set = features::assemble(&paths, &labels, 100, "chrM", workers).unwrap();
        assert_eq!(set.features, reference.features);
    }
}

#[test]
fn width_depends_only_on_the_target_contig() {
    let dir = TempDir::new().unwrap();
    let plain = micro_bam(&dir, "plain.bam");

    // Same chrM, but the file also carries a much larger nuclear contig.
    let with_nuclear = dir.path().join("nuclear.bam");
    write_bam(&with_nuclear, &[("chrM", 1000), ("chr1", 50_000)], MICRO_READS);

    let set = features::assemble(
        &[plain, with_nuclear],
        &[Label::Pos, Label::Neg],
        100,
        "chrM",
        2,
    )
    .unwrap();
    assert_eq!(set.features.dim(), (2, 30));
    assert_eq!(set.features.row(0), set.features.row(1));
}

#[test]
fn divergent_contig_lengths_are_an_inconsistent_width() {
    let dir = TempDir::new().unwrap();
    let short = micro_bam(&dir, "short.bam");

    let long = dir.path().join("long.bam");
    write_bam(&long, &[("chrM", 1500)], MICRO_READS);

    let err = features::assemble(
        &[short, long],
        &[Label::Pos, Label::Neg],
        100,
        "chrM",
        1,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ScreenError::InconsistentFeatureWidth {
            expected: 30,
            actual: 45,
            ..
        }
    ));
}

#[test]
fn coverage_ignores_duplicate_and_secondary_records() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("flagged.bam");
    write_bam(
        &bam,
        &[("chrM", 1000)],
        &[
            "r1\t0\tchrM\t1\t60\t10M\t*\t0\t0\tACGTACGTAC\tIIIIIIIIII",
            "r1dup\t1024\tchrM\t1\t60\t10M\t*\t0\t0\tACGTACGTAC\tIIIIIIIIII",
            "r1sec\t256\tchrM\t1\t60\t10M\t*\t0\t0\tACGTACGTAC\tIIIIIIIIII",
        ],
    );

    let mut reader = extract::open_reader(&bam).unwrap();
    let (tid, _) = extract::resolve_contig(&reader, &bam, "chrM").unwrap();
    let region = Region { start: 0, end: 10 };

    // Region fetches count every overlapping record, flagged or not.
    assert_eq!(metrics::read_count(&mut reader, tid, region).unwrap(), 3);
    // Depth comes from the primary read alone.
    approx(metrics::coverage(&mut reader, tid, region).unwrap(), 1.0);
}

#[test]
fn missing_contig_aborts_the_sample() {
    let dir = TempDir::new().unwrap();
    let bam = micro_bam(&dir, "micro.bam");

    let err = extract::extract_sample(&bam, 100, "MT").unwrap_err();
    assert!(matches!(err, ScreenError::ContigNotFound { .. }));
}

#[test]
fn contig_without_reads_fails_instead_of_dividing_by_zero() {
    let dir = TempDir::new().unwrap();
    let bam = dir.path().join("nuclear.bam");
    write_bam(&bam, &[("chrM", 1000), ("chr1", 50_000)], MICRO_READS);

    let err = extract::extract_sample(&bam, 1000, "chr1").unwrap_err();
    assert!(matches!(err, ScreenError::NoReadsOnContig { .. }));
}
