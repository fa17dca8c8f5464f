use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use grep_cli::stdout;
use termcolor::ColorChoice;

use crate::core::errors::Result;

/// Build a TSV writer targeting a file or stdout.
pub fn get_writer<P: AsRef<Path>>(
    path: &Option<P>,
    write_headers: bool,
) -> Result<csv::Writer<Box<dyn Write>>> {
    let raw_writer: Box<dyn Write> = match path {
        Some(path) if path.as_ref().to_str() != Some("-") => {
            Box::new(BufWriter::new(File::create(path)?))
        }
        _ => Box::new(stdout(ColorChoice::Never)),
    };

    Ok(csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(write_headers)
        .from_writer(raw_writer))
}
