//! Gophermap templates.
//!
//! A template is a plain text file processed line by line. A line may hold one
//! placeholder of the form `{{ KEYWORD }}`:
//!
//! ```text
//! iWelcome to my phlog	fake	(NULL)	0
//! {{ FILE_LIST }}
//! iArchives	fake	(NULL)	0
//! {{ ARCHIVE_LIST }}
//! iGenerated {{ DATE_TIME }}	fake	(NULL)	0
//! ```
//!
//! The placeholder spans from the **first** `{{` to the **last** `}}` after
//! it, so `a {{ X }} b }} c` has the keyword `X }} b`. Only one placeholder per
//! line is recognized and placeholders cannot nest.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Cannot read template {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The lines of a template file, terminators stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    pub lines: Vec<String>,
}

impl Template {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Read a template file. An empty file is a valid, zero-line template.
pub fn read_template(path: &Path) -> Result<Template, TemplateError> {
    let unreadable = |source: io::Error| TemplateError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(unreadable)?);
    let lines = reader
        .lines()
        .collect::<io::Result<Vec<String>>>()
        .map_err(unreadable)?;
    Ok(Template { lines })
}

/// Keywords recognized inside a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    FileList,
    ArchiveList,
    DateTime,
}

impl Keyword {
    /// Parse an already trimmed keyword. Matching is case-sensitive.
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "FILE_LIST" => Some(Keyword::FileList),
            "ARCHIVE_LIST" => Some(Keyword::ArchiveList),
            "DATE_TIME" => Some(Keyword::DateTime),
            _ => None,
        }
    }
}

/// A placeholder found in a template line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Text before the opening `{{`.
    pub before: &'a str,
    /// Text between the markers, whitespace-trimmed.
    pub keyword: &'a str,
    /// Text after the closing `}}`.
    pub after: &'a str,
}

impl Placeholder<'_> {
    pub fn keyword(&self) -> Option<Keyword> {
        Keyword::parse(self.keyword)
    }
}

/// Locate the placeholder in `line`: the first `{{` and the last `}}` that
/// follows it. Returns `None` if either marker is missing.
pub fn find_placeholder(line: &str) -> Option<Placeholder<'_>> {
    let start = line.find(OPEN)?;
    let inner_start = start + OPEN.len();
    let inner_len = line[inner_start..].rfind(CLOSE)?;
    let end = inner_start + inner_len;

    Some(Placeholder {
        before: &line[..start],
        keyword: line[inner_start..end].trim(),
        after: &line[end + CLOSE.len()..],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn placeholder_alone_on_line() {
        let p = find_placeholder("{{ FILE_LIST }}").unwrap();
        assert_eq!(p.before, "");
        assert_eq!(p.keyword, "FILE_LIST");
        assert_eq!(p.after, "");
        assert_eq!(p.keyword(), Some(Keyword::FileList));
    }

    #[test]
    fn placeholder_with_surrounding_text() {
        let p = find_placeholder("before {{ DATE_TIME }} after").unwrap();
        assert_eq!(p.before, "before ");
        assert_eq!(p.keyword(), Some(Keyword::DateTime));
        assert_eq!(p.after, " after");
    }

    #[test]
    fn placeholder_without_spaces() {
        let p = find_placeholder("{{ARCHIVE_LIST}}").unwrap();
        assert_eq!(p.keyword(), Some(Keyword::ArchiveList));
    }

    #[test]
    fn last_closing_marker_wins() {
        let p = find_placeholder("a {{ X }} b }} c").unwrap();
        assert_eq!(p.keyword, "X }} b");
        assert_eq!(p.after, " c");
    }

    #[test]
    fn first_opening_marker_wins() {
        let p = find_placeholder("{{ A {{ B }}").unwrap();
        assert_eq!(p.keyword, "A {{ B");
        assert_eq!(p.keyword(), None);
    }

    #[test]
    fn missing_markers() {
        assert!(find_placeholder("plain line").is_none());
        assert!(find_placeholder("{{ FILE_LIST").is_none());
        assert!(find_placeholder("FILE_LIST }}").is_none());
    }

    #[test]
    fn closing_before_opening_is_not_a_placeholder() {
        assert!(find_placeholder("}} FILE_LIST {{").is_none());
    }

    #[test]
    fn markers_do_not_overlap() {
        // "{{}" has no closing marker after the opening one
        assert!(find_placeholder("{{}").is_none());
        let p = find_placeholder("{{}}").unwrap();
        assert_eq!(p.keyword, "");
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(Keyword::parse("file_list"), None);
        assert_eq!(Keyword::parse("Date_Time"), None);
        assert_eq!(Keyword::parse("UNKNOWN"), None);
    }

    #[test]
    fn read_template_strips_terminators() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("gophermap.tmpl");
        fs::write(&path, "first\r\n{{ FILE_LIST }}\n\nlast").unwrap();

        let template = read_template(&path).unwrap();
        assert_eq!(
            template.lines,
            vec!["first", "{{ FILE_LIST }}", "", "last"]
        );
    }

    #[test]
    fn read_empty_template() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.tmpl");
        fs::write(&path, "").unwrap();

        let template = read_template(&path).unwrap();
        assert!(template.is_empty());
    }

    #[test]
    fn read_missing_template_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = read_template(&tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, TemplateError::Unreadable { .. }));
        assert!(err.to_string().contains("missing"));
    }
}
