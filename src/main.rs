//! mitoscreen - contamination screening features from chrM alignments
//!
//! mitoscreen chops the mitochondrial contig of indexed BAM/CRAM files into
//! fixed-size regions and summarizes each region as a `(read count, mean
//! coverage, soft-clipped bases)` triple, normalized by the sample's total
//! read count. The resulting fixed-width vectors feed a contamination
//! classifier.
//!
//! # Usage
//!
//! ```bash
//! # Feature matrix for every BAM in a directory, 4 workers
//! mitoscreen extract --directory samples/ -j 4 -o features.tsv
//!
//! # Same, driven by a list file and a non-default contig
//! mitoscreen extract --list-items samples.txt -c MT -o features.tsv
//! ```

extern crate mitoscreen_lib;
pub mod commands;

use anyhow::Result;
use env_logger::Env;
use log::*;
use mitoscreen_lib::utils;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(rename_all = "kebab-case", author, about)]
/// Commands for extracting per-region alignment features with mitoscreen
struct Args {
    #[structopt(subcommand)]
    subcommand: Subcommand,
}

#[derive(StructOpt)]
enum Subcommand {
    /// Extract a per-sample feature matrix from BAM/CRAM files
    Extract(commands::ExtractArgs),
}

impl Subcommand {
    fn run(self) -> Result<()> {
        match self {
            Subcommand::Extract(args) => commands::run_extract(args)?,
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    if let Err(err) = Args::from_args().subcommand.run() {
        if utils::is_broken_pipe(&err) {
            std::process::exit(0);
        }
        error!("{}", err);
        std::process::exit(1);
    }
    Ok(())
}
