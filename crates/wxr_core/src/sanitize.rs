use once_cell::sync::Lazy;
use regex::Regex;

/// Opening and closing block-editor annotations, e.g. `<!-- wp:paragraph -->`
/// and `<!-- /wp:paragraph -->`, including ones carrying JSON attributes.
static BLOCK_COMMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<!--\s*/?wp:[^>]*-->").expect("block comment pattern is valid")
});

/// Removes block-editor annotation comments from post content.
///
/// The HTML between annotations and any other comments are left untouched.
pub fn strip_block_comments(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    BLOCK_COMMENT_RE.replace_all(html, "").into_owned()
}
