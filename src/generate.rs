//! Gophermap generation.
//!
//! Ties the stages together for one phlog directory:
//!
//! ```text
//! phlogmap.toml ──► config
//! <TEMPLATE>    ──► template ─┐
//! <DIRECTORY>/* ──► scan ─────┼──► render ──► <DIRECTORY>/gophermap
//! local clock   ──► timestamp ┘
//! ```
//!
//! The output file is created or truncated only after the template has been
//! read and the scan produced at least one entry, so a failed run leaves an
//! existing gophermap untouched. Once rendering starts there is no rollback:
//! a write failure leaves the lines written so far in place.

use crate::config::{self, ConfigError, PhlogConfig};
use crate::render::{RenderError, Renderer, local_timestamp};
use crate::scan::{self, Rules, ScanError};
use crate::template::{self, Template, TemplateError};
use crate::types::{ScanResult, SkippedEntry};
use log::{debug, info};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Nothing to write: no posts or directories found in {}", .0.display())]
    NothingToWrite(PathBuf),
    #[error("Cannot create {}: {source}", .path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
    /// Buffered output failed to reach `path`. `written` lines had been
    /// rendered, but any of them may be missing from the file.
    #[error("Cannot finish writing {} after {written} lines: {source}", .path.display())]
    Flush {
        path: PathBuf,
        written: usize,
        #[source]
        source: io::Error,
    },
}

/// Summary of a finished run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Where the gophermap went; `None` when rendered to a caller's writer.
    pub output: Option<PathBuf>,
    pub regular_entries: usize,
    pub archive_entries: usize,
    pub lines_written: usize,
    pub skipped: Vec<SkippedEntry>,
}

/// Everything a render needs, loaded from disk.
struct Prepared {
    config: PhlogConfig,
    template: Template,
    entries: ScanResult,
}

/// Load the config, read the template (relative to `dir`), and scan `dir`.
///
/// Fails with `GenerateError::NothingToWrite` when the scan finds no entries.
fn prepare(dir: &Path, template_name: &Path) -> Result<Prepared, GenerateError> {
    let config = config::load_config(dir)?;

    let template_path = dir.join(template_name);
    let template = template::read_template(&template_path)?;
    debug!(
        "Read {} template lines from {}",
        template.len(),
        template_path.display()
    );

    let entries = scan::scan(dir, &Rules::from_config(&config))?;
    if entries.is_empty() {
        return Err(GenerateError::NothingToWrite(dir.to_path_buf()));
    }

    Ok(Prepared {
        config,
        template,
        entries,
    })
}

/// Generate `<dir>/<output_file>` from the template `template_name`.
///
/// Any existing output file is overwritten. Output is buffered, so a write
/// failure usually surfaces as [`GenerateError::Flush`] rather than a
/// [`RenderError::Write`]; both carry the number of lines rendered.
pub fn generate(dir: &Path, template_name: &Path) -> Result<GenerateReport, GenerateError> {
    let prepared = prepare(dir, template_name)?;
    let output_path = dir.join(&prepared.config.output_file);

    let file = File::create(&output_path).map_err(|source| GenerateError::OutputUnwritable {
        path: output_path.clone(),
        source,
    })?;
    let mut out = BufWriter::new(file);

    let mut report = render_prepared(&prepared, &mut out)?;
    out.flush().map_err(|source| GenerateError::Flush {
        path: output_path.clone(),
        written: report.lines_written,
        source,
    })?;

    info!(
        "Wrote {} lines to {}",
        report.lines_written,
        output_path.display()
    );
    report.output = Some(output_path);
    Ok(report)
}

/// Like [`generate`], but writes the gophermap to `out` instead of the output
/// file. Nothing in `dir` is modified.
pub fn generate_to<W: Write>(
    dir: &Path,
    template_name: &Path,
    out: &mut W,
) -> Result<GenerateReport, GenerateError> {
    let prepared = prepare(dir, template_name)?;
    let report = render_prepared(&prepared, out)?;
    out.flush().map_err(|source| GenerateError::Flush {
        path: PathBuf::from("-"),
        written: report.lines_written,
        source,
    })?;
    Ok(report)
}

fn render_prepared<W: Write>(
    prepared: &Prepared,
    out: &mut W,
) -> Result<GenerateReport, GenerateError> {
    let timestamp = local_timestamp(&prepared.config.date_format)?;
    let renderer = Renderer::new(&prepared.entries, timestamp);
    let lines_written = renderer.render(&prepared.template, out)?;

    Ok(GenerateReport {
        output: None,
        regular_entries: prepared.entries.regular.len(),
        archive_entries: prepared.entries.archive.len(),
        lines_written,
        skipped: prepared.entries.skipped.clone(),
    })
}
