//! WXR engine: reads the export, drives the per-record transform, and
//! persists documents.
mod config;
mod driver;
mod error;
mod persist;
mod snapshot;
mod types;
mod xml_tree;

pub use config::{
    ImportConfig, DEFAULT_DOCUMENT_EXTENSION, DEFAULT_INPUT, DEFAULT_OUTPUT_DIR,
    DEFAULT_SNAPSHOT_FILENAME,
};
pub use driver::run_import;
pub use error::ImportError;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError, WrittenFile};
pub use snapshot::write_debug_snapshot;
pub use types::ImportSummary;
pub use xml_tree::{parse_document, top_level_keys, XmlTreeError};
