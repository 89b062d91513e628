//! # phlogmap
//!
//! Generates a Gopher `gophermap` for a phlog: a directory of dated text posts.
//! Your filesystem is the data source. Post files and subdirectories become
//! menu entries, titles come from the file names, and a plain-text template
//! decides where the entries go.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      phlog/            →  ScanResult   (children → typed, ordered entries)
//! 2. Render    template + scan   →  lines        (placeholder substitution)
//! 3. Write     lines             →  phlog/gophermap
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Classifies directory children, resolves glinks, groups and sorts entries |
//! | [`naming`] | `DATE__Title_Words` filename convention → display title |
//! | [`template`] | Template loading and `{{ KEYWORD }}` placeholder parsing |
//! | [`render`] | Line-by-line substitution into any `io::Write` |
//! | [`generate`] | Runs config → template → scan → render for one directory |
//! | [`config`] | Optional `phlogmap.toml`: output name, suffixes, archive prefix, date format |
//! | [`types`] | `Entry` and `ScanResult`, shared between scan and render |
//! | [`output`] | CLI output formatting |
//! | [`logger`] | `env_logger` setup for the binary |
//!
//! # Naming Convention
//!
//! ```text
//! 2024-05-01__My_First_Post.txt  →  0[2024-05-01] My First Post	2024-05-01__My_First_Post.txt
//! 2024-04-20__Photos/            →  1[2024-04-20] Photos	2024-04-20__Photos
//! AR_2023/                       →  12023	AR_2023                  (archive group)
//! 2024-06-01__Elsewhere.glink    →  0[2024-06-01] Elsewhere	<first line of the file>
//! ```
//!
//! Entries are listed newest first: each group is sorted by title and then
//! reversed, which puts ISO dates in descending order.
//!
//! # Full Rebuilds
//!
//! Every run rewrites the whole gophermap. There is no incremental mode and
//! no recursion into subdirectories; each subdirectory that wants its own
//! gophermap gets its own run.

pub mod config;
pub mod generate;
pub mod logger;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
