//! Shared test utilities for the phlogmap test suite.
//!
//! ```text
//! fixtures/phlog/
//! ├── gophermap.tmpl                    # TEMPLATE
//! ├── 2024-05-01__My_First_Post.txt
//! ├── 2024-05-09__Second_Post.md
//! ├── 2024-06-01__Elsewhere.glink       # points to friend.example.org
//! ├── 2024-02-02__Broken.glink          # empty, skipped
//! ├── 2024-04-20__Photos/
//! ├── AR_2022/
//! ├── AR_2023/
//! └── cover.jpg                         # ignored
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::Entry;

/// Template file name inside the fixture directory.
pub const TEMPLATE: &str = "gophermap.tmpl";

/// Posts, glink and plain directory in the fixture.
pub const FIXTURE_REGULAR_ENTRIES: usize = 4;

pub const FIXTURE_ARCHIVE_ENTRIES: usize = 2;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/phlog/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/phlog");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Read a generated file as lines.
pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
        .lines()
        .map(str::to_string)
        .collect()
}

// =========================================================================
// Entry lookups and assertions
// =========================================================================

/// Find an entry by target. Panics if not found.
pub fn find_entry<'a>(entries: &'a [Entry], target: &str) -> &'a Entry {
    entries
        .iter()
        .find(|e| e.target() == target)
        .unwrap_or_else(|| {
            let targets: Vec<&str> = entries.iter().map(|e| e.target()).collect();
            panic!("entry '{target}' not found. Available: {targets:?}")
        })
}

/// Assert that titles never increase from one entry to the next.
pub fn assert_descending(entries: &[Entry]) {
    for pair in entries.windows(2) {
        assert!(
            pair[0].title() >= pair[1].title(),
            "'{}' sorted before '{}'",
            pair[0].title(),
            pair[1].title()
        );
    }
}
