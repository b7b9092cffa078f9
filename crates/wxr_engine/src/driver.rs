use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use wxr_core::{output_filename, render_post_document, sequence, Eligibility, PostDocument, PostRecord};
use wxr_logging::{wxr_debug, wxr_error, wxr_info, wxr_trace, wxr_warn};

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::persist::{ensure_output_dir, AtomicFileWriter};
use crate::snapshot::write_debug_snapshot;
use crate::types::ImportSummary;
use crate::xml_tree::{parse_document, top_level_keys};

/// Runs one import: export file in, one HTML document per published post out.
///
/// Records are handled in input order. Only document-level problems return
/// an error; see [`ImportError`].
pub fn run_import(config: &ImportConfig) -> Result<ImportSummary, ImportError> {
    ensure_output_dir(&config.output_dir).map_err(ImportError::OutputDir)?;
    let writer = AtomicFileWriter::new(config.output_dir.clone());

    let bytes = fs::read(&config.input_path).map_err(|source| ImportError::InputUnavailable {
        path: config.input_path.clone(),
        source,
    })?;
    let xml = String::from_utf8_lossy(&bytes);
    if matches!(xml, Cow::Owned(_)) {
        wxr_warn!(
            "{:?} is not valid UTF-8; invalid bytes were replaced with U+FFFD",
            config.input_path
        );
    }
    let document = parse_document(&xml).map_err(|source| ImportError::InputMalformed {
        path: config.input_path.clone(),
        source,
    })?;
    wxr_info!("Parsed top-level keys: {:?}", top_level_keys(&document));

    let Some(channel) = document.get("rss").and_then(|rss| rss.get("channel")) else {
        let snapshot = dump_snapshot(&writer, config, &document);
        return Err(ImportError::MissingChannel { snapshot });
    };
    let items = sequence(Some(channel), "item");
    if items.is_empty() {
        let snapshot = dump_snapshot(&writer, config, &document);
        return Err(ImportError::NoItems { snapshot });
    }
    wxr_info!("Found {} items; processing posts...", items.len());

    let mut summary = ImportSummary {
        items_seen: items.len(),
        output_dir: config.output_dir.clone(),
        ..ImportSummary::default()
    };
    let mut used_names: HashSet<String> = HashSet::new();

    for (index, item) in items.into_iter().enumerate() {
        let record = PostRecord::from_item(item);
        match record.eligibility() {
            Eligibility::Eligible => {}
            reason => {
                wxr_debug!("Skipping item {} ({:?}): {:?}", index, record.title, reason);
                summary.skipped += 1;
                continue;
            }
        }

        for anomaly in record.anomalies() {
            wxr_warn!("Item {} ({:?}): {}", index, record.title, anomaly);
        }

        let filename = output_filename(&record, &config.document_extension);
        if !used_names.insert(filename.clone()) {
            wxr_warn!(
                "Item {} ({:?}) overwrites {} written earlier in this run",
                index,
                record.title,
                filename
            );
            if !summary.collisions.contains(&filename) {
                summary.collisions.push(filename.clone());
            }
        }

        let html = render_post_document(&PostDocument::from_record(&record));
        let written = writer.write(&filename, &html)?;
        wxr_trace!(
            "Wrote {:?} ({} bytes, replaced existing: {})",
            written.path,
            written.bytes,
            written.replaced
        );
        summary.written += 1;
    }

    wxr_info!(
        "Import finished: {} written, {} skipped, {} colliding names",
        summary.written,
        summary.skipped,
        summary.collisions.len()
    );
    Ok(summary)
}

/// Best effort: a failed snapshot is logged and never masks the structural error.
fn dump_snapshot(
    writer: &AtomicFileWriter,
    config: &ImportConfig,
    document: &Value,
) -> Option<PathBuf> {
    match write_debug_snapshot(writer, &config.snapshot_filename, document) {
        Ok(written) => Some(written.path),
        Err(err) => {
            wxr_error!(
                "Failed to write debug snapshot to {:?}: {}",
                config.snapshot_path(),
                err
            );
            None
        }
    }
}
