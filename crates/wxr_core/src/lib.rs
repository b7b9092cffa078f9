//! WXR core: pure transforms from a parsed export item to an HTML document.
mod date;
mod escape;
mod fields;
mod filename;
mod record;
mod sanitize;
mod template;

pub use date::{parse_publish_date, PublishDate};
pub use escape::escape_html;
pub use fields::{scalar, sequence, text_of};
pub use filename::{output_filename, safe_filename, FALLBACK_FILENAME, MAX_FILENAME_LEN};
pub use record::{
    Eligibility, PostRecord, RecordAnomaly, ELIGIBLE_POST_TYPE, ELIGIBLE_STATUS,
};
pub use sanitize::strip_block_comments;
pub use template::{render_post_document, PostDocument};
