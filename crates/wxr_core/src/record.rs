use serde_json::Value;

use crate::date::{parse_publish_date, PublishDate};
use crate::fields::{scalar, sequence, text_of};
use crate::filename::FALLBACK_FILENAME;

/// Only items of this `wp:post_type` are exported.
pub const ELIGIBLE_POST_TYPE: &str = "post";
/// Only items with this `wp:status` are exported.
pub const ELIGIBLE_STATUS: &str = "publish";

/// One `<item>` of the export, projected to the fields the importer uses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostRecord {
    pub title: String,
    pub link: Option<String>,
    /// `content:encoded`, still carrying block-editor annotations.
    pub raw_content: String,
    pub pub_date: String,
    pub categories: Vec<String>,
    pub post_type: String,
    pub status: String,
    pub slug: Option<String>,
}

/// Result of the publication filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    WrongPostType(String),
    WrongStatus(String),
}

/// Recoverable oddities in an eligible record. The record is still written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordAnomaly {
    MissingTitle,
    UnparsableDate(String),
    FallbackFilename,
}

impl std::fmt::Display for RecordAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordAnomaly::MissingTitle => write!(f, "missing title"),
            RecordAnomaly::UnparsableDate(raw) => {
                write!(f, "unparsable publish date {raw:?}, kept verbatim")
            }
            RecordAnomaly::FallbackFilename => {
                write!(f, "slug and title sanitize to nothing, using {FALLBACK_FILENAME:?}")
            }
        }
    }
}

impl PostRecord {
    /// Extracts a record from a parsed `<item>`, whatever shape its fields
    /// were parsed into.
    pub fn from_item(item: &Value) -> Self {
        let item = Some(item);
        let categories = sequence(item, "category")
            .into_iter()
            .map(text_of)
            .filter(|c| !c.is_empty())
            .collect();
        Self {
            title: scalar(item, "title"),
            link: non_empty(scalar(item, "link")),
            raw_content: scalar(item, "content:encoded"),
            pub_date: scalar(item, "pubDate"),
            categories,
            post_type: scalar(item, "wp:post_type"),
            status: scalar(item, "wp:status"),
            slug: non_empty(scalar(item, "wp:post_name")),
        }
    }

    pub fn eligibility(&self) -> Eligibility {
        if self.post_type != ELIGIBLE_POST_TYPE {
            Eligibility::WrongPostType(self.post_type.clone())
        } else if self.status != ELIGIBLE_STATUS {
            Eligibility::WrongStatus(self.status.clone())
        } else {
            Eligibility::Eligible
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.eligibility() == Eligibility::Eligible
    }

    pub fn publish_date(&self) -> PublishDate {
        parse_publish_date(&self.pub_date)
    }

    pub fn anomalies(&self) -> Vec<RecordAnomaly> {
        let mut found = Vec::new();
        if self.title.trim().is_empty() {
            found.push(RecordAnomaly::MissingTitle);
        }
        if let PublishDate::Raw(raw) = self.publish_date() {
            found.push(RecordAnomaly::UnparsableDate(raw));
        }
        let stem_source = self.slug.as_deref().unwrap_or(&self.title);
        let has_name_chars = stem_source
            .chars()
            .flat_map(char::to_lowercase)
            .any(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        if !has_name_chars {
            found.push(RecordAnomaly::FallbackFilename);
        }
        found
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
