//! Batch lookup of an address file.
//!
//! Reads every line of the input, geocodes it and appends
//! `original line;result` to the output file, one record per line.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use tracing::info;

use crate::geocode::{lookup_postal_code, Geocoder};
use crate::models::{OutputFormat, PostalCodeOutcome};
use crate::normalize::AddressNormalizer;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("input file does not exist: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("output file already exists: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub format: OutputFormat,
    /// Draw a progress bar on stderr
    pub progress: bool,
}

/// Per-run tally of outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub found: usize,
    pub not_found: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &PostalCodeOutcome) {
        self.total += 1;
        match outcome {
            PostalCodeOutcome::Found(_) => self.found += 1,
            PostalCodeOutcome::NotFound => self.not_found += 1,
            _ => self.failed += 1,
        }
    }
}

pub async fn run_batch<G: Geocoder>(
    input: &Path,
    output: &Path,
    geocoder: &G,
    normalizer: &AddressNormalizer,
    options: &BatchOptions,
) -> Result<BatchSummary, BatchError> {
    if !input.is_file() {
        return Err(BatchError::InputMissing(input.to_path_buf()));
    }
    if output.exists() {
        return Err(BatchError::OutputExists(output.to_path_buf()));
    }

    let content = fs::read_to_string(input).map_err(|source| BatchError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let lines = split_lines(&content);

    let mut writer = open_output(output)?;

    let pb = if options.progress {
        let pb = ProgressBar::new(lines.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    // Log lines go to stdout while the bar draws on stderr; suspend keeps them apart
    pb.suspend(|| {
        info!(
            "Processing {} addresses from {}",
            lines.len(),
            input.display()
        )
    });

    let last = lines.len().saturating_sub(1);
    let mut summary = BatchSummary::default();

    for (i, line) in lines.iter().enumerate() {
        pb.suspend(|| info!("{} / {}: {}", i, last, line));

        let address = normalizer.normalize(line);
        let outcome = lookup_postal_code(geocoder, &address).await;
        let rendered = outcome.render(options.format);
        pb.suspend(|| info!(" ---> {}", rendered));

        write_record(&mut writer, line, &rendered).map_err(|source| BatchError::Write {
            path: output.to_path_buf(),
            source,
        })?;

        summary.record(&outcome);
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!(
        "Done: {} lines, {} found, {} not found, {} failed",
        summary.total, summary.found, summary.not_found, summary.failed
    );

    Ok(summary)
}

/// Split on `\n`, `\r\n` or a lone `\r`; a trailing break adds no empty line.
fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;

    while let Some(pos) = rest.find(|c: char| c == '\r' || c == '\n') {
        lines.push(&rest[..pos]);
        let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + skip..];
    }
    if !rest.is_empty() {
        lines.push(rest);
    }

    lines
}

fn open_output(output: &Path) -> Result<BufWriter<File>, BatchError> {
    // create_new also covers a file appearing after the existence check
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(output)
        .map_err(|source| match source.kind() {
            io::ErrorKind::AlreadyExists => BatchError::OutputExists(output.to_path_buf()),
            _ => BatchError::Write {
                path: output.to_path_buf(),
                source,
            },
        })?;
    Ok(BufWriter::new(file))
}

fn write_record<W: Write>(writer: &mut W, line: &str, result: &str) -> io::Result<()> {
    writeln!(writer, "{};{}", line, result)?;
    writer.flush()
}
