//! Input resolution for alignment files.
//!
//! Samples arrive either as a directory of BAM/CRAM files or as a plain text
//! file listing one path per line. The two are mutually exclusive at the CLI
//! level; internally they are a single tagged [`BamSource`] resolved once at
//! the boundary.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::core::errors::{Result, ScreenError};

/// Where a batch of alignment files comes from.
#[derive(Debug, Clone)]
pub enum BamSource {
    /// A directory whose `.bam`/`.cram` entries are the batch.
    Directory(PathBuf),
    /// A text file listing one alignment path per line.
    ListFile(PathBuf),
}

impl BamSource {
    /// Resolve the source to a concrete list of alignment paths.
    pub fn resolve(&self) -> Result<Vec<PathBuf>> {
        match self {
            BamSource::Directory(dir) => dir_to_bam_list(dir),
            BamSource::ListFile(list) => load_list_file(list),
        }
    }
}

/// Detect whether a file name carries an alignment-file extension.
#[inline]
pub fn is_alignment_file<P: AsRef<Path>>(path: P) -> bool {
    matches!(
        path.as_ref().extension().unwrap_or_else(|| OsStr::new("")),
        ext if ext == "bam" || ext == "cram"
    )
}

/// Collect the `.bam`/`.cram` entries of a directory, sorted by name.
///
/// Sorting keeps batch row order stable across filesystems, which matters
/// because output rows are matched to inputs by position.
pub fn dir_to_bam_list<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ScreenError::FileNotFound(dir.to_path_buf()));
    }
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_alignment_file(path))
        .collect();
    paths.sort();
    Ok(paths)
}

/// Load a file containing a list of alignment paths, one per line.
pub fn load_list_file<P: AsRef<Path>>(list: P) -> Result<Vec<PathBuf>> {
    let list = list.as_ref();
    let handle = File::open(list).map_err(|_| ScreenError::FileNotFound(list.to_path_buf()))?;
    let mut paths = Vec::new();
    for line in BufReader::new(handle).lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }
    Ok(paths)
}
