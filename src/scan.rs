//! Directory scanning and entry classification.
//!
//! Stage 1 of the phlogmap pipeline. Reads the direct children of the phlog
//! directory, turns each one into at most one [`Entry`], and groups the
//! entries for the renderer.
//!
//! ## Directory Structure
//!
//! ```text
//! phlog/
//! ├── gophermap                         # Output (ignored by the scan)
//! ├── 2024-05-01__My_First_Post.txt     # Post   → 0[2024-05-01] My First Post
//! ├── 2024-05-09__Notes.md              # Post   → 0[2024-05-09] Notes
//! ├── 2024-06-01__Elsewhere.glink       # Link   → 0[2024-06-01] Elsewhere  <first line>
//! ├── 2024-04-20__Photos/               # Dir    → 1[2024-04-20] Photos
//! ├── AR_2023/                          # Archive → 12023
//! └── cover.jpg                         # Ignored
//! ```
//!
//! ## Classification Rules
//!
//! - Regular files ending in a text suffix (`.txt`, `.md`, exact and
//!   case-sensitive) become text entries titled from the name without extension.
//! - Regular files ending in the link suffix (`.glink`) are read: the first line
//!   is the selector. Unreadable or empty link files are skipped and recorded,
//!   never fatal.
//! - Directories always become entries. Those starting with the archive prefix
//!   go to the archive group, titled with the rest of their name verbatim.
//! - Everything else (other files, sockets, dangling symlinks) is ignored.
//!
//! ## Ordering
//!
//! Each group is sorted ascending by title with a stable sort and then the
//! whole sequence is reversed, so newer dated posts come first. Entries with
//! equal titles end up in the reverse of their enumeration order.

use crate::config::PhlogConfig;
use crate::naming::{format_title, strip_extension};
use crate::types::{Entry, EntryKind, ScanResult, SkipReason, SkippedEntry};
use log::{debug, warn};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read directory {}: {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// File type of a directory child, after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildType {
    Regular,
    Directory,
    Other,
}

impl From<fs::FileType> for ChildType {
    fn from(file_type: fs::FileType) -> Self {
        if file_type.is_file() {
            ChildType::Regular
        } else if file_type.is_dir() {
            ChildType::Directory
        } else {
            ChildType::Other
        }
    }
}

/// Outcome of classifying a single directory child.
#[derive(Debug, PartialEq, Eq)]
pub enum Classified {
    Entry(Entry),
    /// A glink that could not be resolved.
    Skipped(SkippedEntry),
    /// Not something that belongs in the gophermap.
    Ignored,
}

/// Naming rules used to classify directory children.
///
/// Built from a [`PhlogConfig`]; [`Rules::default`] matches the stock config.
#[derive(Debug, Clone)]
pub struct Rules {
    text_suffixes: Vec<String>,
    link_suffix: String,
    archive_prefix: Option<String>,
}

impl Rules {
    pub fn from_config(config: &PhlogConfig) -> Self {
        Self {
            text_suffixes: config.text_suffixes(),
            link_suffix: config.link_suffix(),
            archive_prefix: config.archive_prefix().map(str::to_string),
        }
    }

    fn is_text(&self, name: &str) -> bool {
        self.text_suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    fn is_link(&self, name: &str) -> bool {
        name.ends_with(self.link_suffix.as_str())
    }

    /// Title of an archive directory, if `name` carries the prefix and has
    /// something after it.
    fn archive_title<'a>(&self, name: &'a str) -> Option<&'a str> {
        let prefix = self.archive_prefix.as_deref()?;
        name.strip_prefix(prefix).filter(|rest| !rest.is_empty())
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::from_config(&PhlogConfig::default())
    }
}

/// Scan `dir` and return its grouped, ordered entries.
///
/// Only direct children are considered. Failing to open or iterate the
/// directory is an error; a directory without eligible children yields an
/// empty [`ScanResult`].
pub fn scan(dir: &Path, rules: &Rules) -> Result<ScanResult, ScanError> {
    let unreadable = |source: io::Error| ScanError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut result = ScanResult::default();

    for child in fs::read_dir(dir).map_err(unreadable)? {
        let child = child.map_err(unreadable)?;
        let name = child.file_name().to_string_lossy().into_owned();
        let child_type = resolve_child_type(&child);

        match classify(dir, &name, child_type, rules) {
            Classified::Entry(entry) => {
                debug!("{name}: {:?} '{}'", entry.kind(), entry.title());
                if entry.is_archive() {
                    result.archive.push(entry);
                } else {
                    result.regular.push(entry);
                }
            }
            Classified::Skipped(skipped) => {
                warn!("Skipping link file {}: {:?}", skipped.name, skipped.reason);
                result.skipped.push(skipped);
            }
            Classified::Ignored => debug!("{name}: ignored"),
        }
    }

    sort_descending(&mut result.regular);
    sort_descending(&mut result.archive);
    Ok(result)
}

/// Classify one directory child.
///
/// `dir` is only used to open link files.
pub fn classify(dir: &Path, name: &str, child_type: ChildType, rules: &Rules) -> Classified {
    match child_type {
        ChildType::Regular => classify_file(dir, name, rules),
        ChildType::Directory => classify_directory(name, rules),
        ChildType::Other => Classified::Ignored,
    }
}

fn classify_file(dir: &Path, name: &str, rules: &Rules) -> Classified {
    let title = || format_title(strip_extension(name));

    if rules.is_text(name) {
        return entry_or_ignored(EntryKind::File, title(), name.to_string());
    }
    if !rules.is_link(name) {
        return Classified::Ignored;
    }

    match read_first_line(&dir.join(name)) {
        Ok(Some(target)) => entry_or_ignored(EntryKind::File, title(), target),
        Ok(None) => Classified::Skipped(SkippedEntry {
            name: name.to_string(),
            reason: SkipReason::Empty,
        }),
        Err(e) => Classified::Skipped(SkippedEntry {
            name: name.to_string(),
            reason: SkipReason::Unreadable(e.to_string()),
        }),
    }
}

fn classify_directory(name: &str, rules: &Rules) -> Classified {
    match rules.archive_title(name) {
        Some(title) => {
            entry_or_ignored(EntryKind::Archive, title.to_string(), name.to_string())
        }
        None => entry_or_ignored(EntryKind::Directory, format_title(name), name.to_string()),
    }
}

fn entry_or_ignored(kind: EntryKind, title: String, target: String) -> Classified {
    Entry::new(kind, title, target)
        .map(Classified::Entry)
        .unwrap_or(Classified::Ignored)
}

/// Read the first line of a link file, without its terminator.
///
/// Returns `Ok(None)` for an empty file or an empty first line.
fn read_first_line(path: &Path) -> io::Result<Option<String>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = String::new();
    reader.read_line(&mut line)?;

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line).filter(|l| !l.is_empty()))
}

/// Determine a child's type, following symlinks the way a directory listing
/// with type info would. Dangling links are [`ChildType::Other`].
fn resolve_child_type(child: &fs::DirEntry) -> ChildType {
    match child.file_type() {
        Ok(ft) if ft.is_symlink() => fs::metadata(child.path())
            .map(|meta| ChildType::from(meta.file_type()))
            .unwrap_or(ChildType::Other),
        Ok(ft) => ChildType::from(ft),
        Err(e) => {
            warn!("Cannot stat {}: {e}", child.path().display());
            ChildType::Other
        }
    }
}

/// Ascending stable sort by title, then reverse the whole sequence.
fn sort_descending(entries: &mut [Entry]) {
    entries.sort_by(|a, b| a.title().cmp(b.title()));
    entries.reverse();
}
