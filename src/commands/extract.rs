use std::path::PathBuf;

use anyhow::{bail, Result};
use log::info;
use mitoscreen_lib::classify::Label;
use mitoscreen_lib::features;
use mitoscreen_lib::utils::{self, BamSource};
use structopt::StructOpt;

/// CLI arguments for the `extract` subcommand.
#[derive(Debug, Clone, StructOpt)]
#[structopt(author, name = "extract")]
pub struct ExtractArgs {
    /// Chunksize in bases.
    #[structopt(long, default_value = "100")]
    pub chunksize: u64,

    /// Name of the mitochondrial contig in your BAM files.
    #[structopt(long, short = "c", default_value = "chrM")]
    pub contig: String,

    /// Number of workers to use for processing of BAM files.
    #[structopt(long, short = "j", default_value = "1")]
    pub workers: usize,

    /// Path to a directory with BAM files to process. Mutually exclusive
    /// with --list-items.
    #[structopt(long, short = "d")]
    pub directory: Option<PathBuf>,

    /// Path to a file containing a list of BAM paths to process. Mutually
    /// exclusive with --directory.
    #[structopt(long, short = "l")]
    pub list_items: Option<PathBuf>,

    /// Path to the output TSV, stdout when omitted.
    #[structopt(long, short = "o")]
    pub output: Option<PathBuf>,
}

impl ExtractArgs {
    /// Resolve the dir-or-list pair into a single tagged source.
    fn source(&self) -> Result<BamSource> {
        match (&self.directory, &self.list_items) {
            (Some(_), Some(_)) => {
                bail!("--directory and --list-items are mutually exclusive.")
            }
            (Some(dir), None) => Ok(BamSource::Directory(dir.clone())),
            (None, Some(list)) => Ok(BamSource::ListFile(list.clone())),
            (None, None) => bail!("Must set either --directory or --list-items."),
        }
    }
}

/// Execute the `extract` command end-to-end.
pub fn run_extract(args: ExtractArgs) -> Result<()> {
    let paths = args.source()?.resolve()?;
    info!(
        "Extracting features for {} samples on contig '{}' with {} workers",
        paths.len(),
        args.contig,
        args.workers
    );

    let labels: Vec<Label> = Vec::new();
    let set = features::assemble(&paths, &labels, args.chunksize, &args.contig, args.workers)?;

    let mut writer = utils::get_writer(&args.output, false)?;
    let width = set.features.ncols();
    let mut header = Vec::with_capacity(width + 1);
    header.push("sample".to_string());
    header.extend((0..width).map(|i| format!("f{}", i)));
    writer.write_record(&header)?;

    for (path, row) in paths.iter().zip(set.features.rows()) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mut record = Vec::with_capacity(width + 1);
        record.push(name);
        record.extend(row.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;

    info!("Wrote {} x {} feature matrix", set.features.nrows(), width);
    Ok(())
}
