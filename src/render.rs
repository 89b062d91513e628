//! Gophermap rendering.
//!
//! Stage 2 of the phlogmap pipeline. Walks the template line by line and
//! writes the gophermap:
//!
//! | Template line | Output |
//! |---------------|--------|
//! | `{{ FILE_LIST }}` | one line per regular entry, template line dropped |
//! | `{{ ARCHIVE_LIST }}` | one line per archive entry, template line dropped |
//! | `x {{ DATE_TIME }} y` | `x <timestamp> y` |
//! | `{{ UNKNOWN }}`, no placeholder | the line verbatim |
//!
//! Entry lines are `<glyph><title>\t<target>`. Every output line ends in `\n`.
//! Lines are independent: nothing carries over from one template line to the
//! next.

use crate::template::{Keyword, Template, find_placeholder};
use crate::types::{Entry, ScanResult};
use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;
use std::env;
use std::fmt::Write as _;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    /// Output stopped at template line `line` (1-based) after `written`
    /// output lines had been written.
    #[error("Write failed at template line {line} after {written} lines: {source}")]
    Write {
        line: usize,
        written: usize,
        #[source]
        source: io::Error,
    },
    #[error("Cannot format date with '{0}'")]
    DateFormat(String),
}

/// What a single template line turns into.
#[derive(Debug, PartialEq, Eq)]
pub enum Expansion<'l, 'e> {
    /// Emit the template line unchanged.
    Verbatim(&'l str),
    /// Emit one line per entry; the template line itself is dropped.
    Entries(&'e [Entry]),
    /// Emit this line in place of the template line.
    Substituted(String),
}

/// Format the current local time for the `DATE_TIME` placeholder.
///
/// `%Z` prints the zone abbreviation of the system zone. Falls back to the
/// numeric UTC offset when the zone cannot be resolved.
pub fn local_timestamp(format: &str) -> Result<String, RenderError> {
    format_timestamp(Utc::now(), system_zone(), format)
}

/// Format `now` in `zone`, or in the `Local` offset when `zone` is `None`.
pub fn format_timestamp(
    now: DateTime<Utc>,
    zone: Option<Tz>,
    format: &str,
) -> Result<String, RenderError> {
    let mut timestamp = String::new();
    let written = match zone {
        Some(tz) => write!(timestamp, "{}", now.with_timezone(&tz).format(format)),
        None => write!(timestamp, "{}", now.with_timezone(&Local).format(format)),
    };
    written.map_err(|_| RenderError::DateFormat(format.to_string()))?;
    Ok(timestamp)
}

/// The system zone: `TZ` when it names a known zone, else the OS setting.
fn system_zone() -> Option<Tz> {
    env::var("TZ")
        .ok()
        .and_then(|name| parse_zone(&name))
        .or_else(|| {
            iana_time_zone::get_timezone()
                .ok()
                .and_then(|name| parse_zone(&name))
        })
}

/// Parse an IANA zone name. A leading `:` is accepted, as in `TZ=:Europe/Paris`.
fn parse_zone(name: &str) -> Option<Tz> {
    name.trim().trim_start_matches(':').parse().ok()
}

/// Renders templates against one scan result.
pub struct Renderer<'e> {
    entries: &'e ScanResult,
    timestamp: String,
}

impl<'e> Renderer<'e> {
    /// `timestamp` is substituted for every `DATE_TIME` placeholder.
    pub fn new(entries: &'e ScanResult, timestamp: impl Into<String>) -> Self {
        Self {
            entries,
            timestamp: timestamp.into(),
        }
    }

    /// Decide what a template line expands to.
    pub fn expand<'l>(&self, line: &'l str) -> Expansion<'l, 'e> {
        let Some(placeholder) = find_placeholder(line) else {
            return Expansion::Verbatim(line);
        };
        match placeholder.keyword() {
            Some(Keyword::FileList) => Expansion::Entries(&self.entries.regular),
            Some(Keyword::ArchiveList) => Expansion::Entries(&self.entries.archive),
            Some(Keyword::DateTime) => Expansion::Substituted(format!(
                "{}{}{}",
                placeholder.before, self.timestamp, placeholder.after
            )),
            None => Expansion::Verbatim(line),
        }
    }

    /// Render `template` into `out`, returning the number of lines written.
    ///
    /// Stops at the first failed write. Lines written before the failure stay
    /// in `out`.
    pub fn render<W: Write>(
        &self,
        template: &Template,
        out: &mut W,
    ) -> Result<usize, RenderError> {
        let mut written = 0;
        for (index, line) in template.lines.iter().enumerate() {
            let fail = |written: usize, source: io::Error| RenderError::Write {
                line: index + 1,
                written,
                source,
            };
            match self.expand(line) {
                Expansion::Verbatim(text) => {
                    write_line(out, text).map_err(|e| fail(written, e))?;
                    written += 1;
                }
                Expansion::Substituted(text) => {
                    write_line(out, &text).map_err(|e| fail(written, e))?;
                    written += 1;
                }
                Expansion::Entries(entries) => {
                    for entry in entries {
                        write_line(out, &entry.to_map_line()).map_err(|e| fail(written, e))?;
                        written += 1;
                    }
                }
            }
        }
        Ok(written)
    }
}

fn write_line<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    let mut line = String::with_capacity(text.len() + 1);
    line.push_str(text);
    line.push('\n');
    out.write_all(line.as_bytes())
}
