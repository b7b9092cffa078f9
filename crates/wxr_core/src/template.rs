use std::fmt::Write;

use crate::date::PublishDate;
use crate::escape::escape_html;
use crate::record::PostRecord;
use crate::sanitize::strip_block_comments;

/// Everything the HTML template needs, already sanitized but not escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDocument {
    pub title: String,
    pub canonical_link: Option<String>,
    /// Trusted HTML, emitted as-is.
    pub content_html: String,
    pub date: PublishDate,
    pub categories: Vec<String>,
}

impl PostDocument {
    pub fn from_record(record: &PostRecord) -> Self {
        Self {
            title: record.title.clone(),
            canonical_link: record.link.clone(),
            content_html: strip_block_comments(&record.raw_content),
            date: record.publish_date(),
            categories: record.categories.clone(),
        }
    }
}

/// Renders a standalone HTML page for one post.
///
/// Every interpolated field except the content is escaped. The `<time>`
/// element carries a `datetime` attribute only when the date parsed; an
/// unparsable date is shown as written.
pub fn render_post_document(doc: &PostDocument) -> String {
    let title = escape_html(&doc.title);
    let mut out = String::with_capacity(doc.content_html.len() + 512);

    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("  <meta charset=\"utf-8\">\n");
    out.push_str("  <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n");
    let _ = writeln!(out, "  <title>{title}</title>");
    if let Some(link) = doc.canonical_link.as_deref() {
        let _ = writeln!(out, "  <link rel=\"canonical\" href=\"{}\">", escape_html(link));
    }
    out.push_str("</head>\n<body>\n  <article>\n    <header>\n");
    let _ = writeln!(out, "      <h1>{title}</h1>");
    match (&doc.date, doc.date.display()) {
        (PublishDate::Parsed(_), Some(human)) => {
            let iso = doc.date.iso().unwrap_or_default();
            let _ = writeln!(
                out,
                "      <time datetime=\"{}\">{}</time>",
                escape_html(&iso),
                escape_html(&human)
            );
        }
        (_, Some(raw)) => {
            let _ = writeln!(out, "      <time>{}</time>", escape_html(&raw));
        }
        (_, None) => {}
    }
    out.push_str("    </header>\n    <section class=\"content\">\n");
    let _ = writeln!(out, "      {}", doc.content_html);
    out.push_str("    </section>\n");
    if !doc.categories.is_empty() {
        let listed: Vec<String> = doc.categories.iter().map(|c| escape_html(c)).collect();
        let _ = writeln!(
            out,
            "    <footer><p>Categories: {}</p></footer>",
            listed.join(", ")
        );
    }
    out.push_str("  </article>\n</body>\n</html>\n");
    out
}
