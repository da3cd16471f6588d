//! Inline markdown for plain rules text.

use regex_lite::Regex;
use std::sync::LazyLock;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid regex"));
static ITALIC_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("valid regex"));
static ITALIC_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b_([^_]+)_\b").expect("valid regex"));

/// `**bold**`, `*italic*` and `_italic_` to `<strong>` / `<em>`.
///
/// Underscores inside words (`snake_case_name`) are left alone.
pub fn apply_inline_markdown(text: &str) -> String {
    if !text.contains('*') && !text.contains('_') {
        return text.to_string();
    }
    let text = BOLD_RE.replace_all(text, "<strong>$1</strong>");
    let text = ITALIC_STAR_RE.replace_all(&text, "<em>$1</em>");
    ITALIC_UNDERSCORE_RE
        .replace_all(&text, "<em>$1</em>")
        .into_owned()
}
