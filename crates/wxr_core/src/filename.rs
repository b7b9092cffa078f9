use crate::PostRecord;

/// Longest sanitized name, in characters, before the extension.
pub const MAX_FILENAME_LEN: usize = 200;

/// Name used when sanitizing leaves nothing behind.
pub const FALLBACK_FILENAME: &str = "post";

/// Filesystem- and URL-safe name: lowercase ASCII alphanumerics separated by
/// single `-`, no leading or trailing separator, at most
/// [`MAX_FILENAME_LEN`] characters, [`FALLBACK_FILENAME`] when empty.
pub fn safe_filename(input: &str) -> String {
    let mut compacted = String::with_capacity(input.len());
    let mut pending_separator = false;
    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !compacted.is_empty() {
                compacted.push('-');
            }
            pending_separator = false;
            compacted.push(c);
        } else {
            pending_separator = true;
        }
    }
    // Only ASCII was pushed, so byte and char lengths agree.
    compacted.truncate(MAX_FILENAME_LEN);
    if compacted.is_empty() {
        compacted.push_str(FALLBACK_FILENAME);
    }
    compacted
}

/// Output filename for a record: its slug when present, its sanitized title
/// otherwise, sanitized and given `extension`.
pub fn output_filename(record: &PostRecord, extension: &str) -> String {
    let slug = match record.slug.as_deref() {
        Some(slug) => slug.to_string(),
        None => safe_filename(&record.title),
    };
    format!("{}.{extension}", safe_filename(&slug))
}
