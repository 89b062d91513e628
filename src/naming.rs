//! Filename parsing for the `DATE__Title_Words` phlog convention.
//!
//! Posts and directories are named with a date token, a double underscore, and
//! the title words joined by single underscores. This module turns such a name
//! into the display title shown in the gophermap.
//!
//! ## Display Titles
//!
//! The first `__`-separated token is bracketed, every later token has its
//! underscores converted to spaces:
//! - `2024-05-01__My_First_Post.txt` → "[2024-05-01] My First Post"
//! - `2023-12-24__Xmas` → "[2023-12-24] Xmas" (directory, no extension)
//! - `notes.md` → "[notes]"

/// Separator between the tokens of a post name.
const TOKEN_SEPARATOR: &str = "__";

/// Remove everything from the **last** `.` onwards.
///
/// Names without a dot are returned unchanged. Only the final dot counts, so
/// `a.b.txt` keeps its inner dot.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name,
    }
}

/// Build the display title for a (extension-less) post name.
///
/// - `"2024-05-01__My_Post"` → `"[2024-05-01] My Post"`
/// - `"solo"` → `"[solo]"`
/// - `"a____b"` → `"[a]  b"` (the empty middle token still gets its space)
///
/// The result is never trimmed and never empty.
pub fn format_title(name: &str) -> String {
    let mut tokens = name.split(TOKEN_SEPARATOR);
    // split() always yields at least one item, even for ""
    let first = tokens.next().unwrap_or_default();

    let mut title = format!("[{first}]");
    for token in tokens {
        title.push(' ');
        title.push_str(&token.replace('_', " "));
    }
    title
}
