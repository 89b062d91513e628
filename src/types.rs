//! Shared types passed from the scan stage to the render stage.
//!
//! An [`Entry`] is one gophermap line. Entries are built once by
//! [`crate::scan`], grouped into a [`ScanResult`], and only read afterwards.

use serde::Serialize;

/// Classification of a gophermap entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A text post (`.txt`, `.md`) or a glink pointing to one.
    File,
    /// A plain subdirectory.
    Directory,
    /// A subdirectory carrying the archive prefix (previous years' posts).
    Archive,
}

impl EntryKind {
    /// Gopher item type written at the start of the line.
    pub fn glyph(self) -> char {
        match self {
            EntryKind::File => '0',
            EntryKind::Directory | EntryKind::Archive => '1',
        }
    }
}

/// One navigation line: `<glyph><title>\t<target>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    kind: EntryKind,
    title: String,
    target: String,
}

impl Entry {
    /// Returns `None` if either the title or the target is empty.
    pub fn new(kind: EntryKind, title: String, target: String) -> Option<Self> {
        if title.is_empty() || target.is_empty() {
            return None;
        }
        Some(Self {
            kind,
            title,
            target,
        })
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn glyph(&self) -> char {
        self.kind.glyph()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The selector clients request. Usually the file name; for glinks the
    /// first line of the link file.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_archive(&self) -> bool {
        self.kind == EntryKind::Archive
    }

    /// Format as a gophermap line, without the line terminator.
    pub fn to_map_line(&self) -> String {
        format!("{}{}\t{}", self.glyph(), self.title, self.target)
    }
}

/// Why a glink file did not produce an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipReason {
    /// The link file could not be opened or read.
    Unreadable(String),
    /// The link file is empty or its first line is empty.
    Empty,
}

/// A directory child that looked like an entry but was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub name: String,
    pub reason: SkipReason,
}

/// Result of scanning one directory.
///
/// Both groups are ordered by title, descending.
#[derive(Debug, Default, Serialize)]
pub struct ScanResult {
    /// Posts, glinks and plain subdirectories.
    pub regular: Vec<Entry>,
    /// Archive subdirectories.
    pub archive: Vec<Entry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedEntry>,
}

impl ScanResult {
    /// True when neither group holds an entry. Skipped glinks don't count.
    pub fn is_empty(&self) -> bool {
        self.regular.is_empty() && self.archive.is_empty()
    }

    pub fn entry_count(&self) -> usize {
        self.regular.len() + self.archive.len()
    }
}
