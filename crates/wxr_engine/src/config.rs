use std::path::{Path, PathBuf};

/// Export file, relative to the base directory.
pub const DEFAULT_INPUT: &str = "artifacts/wordpress-export.xml";
/// Output directory, relative to the base directory.
pub const DEFAULT_OUTPUT_DIR: &str = "artifacts/posts";
pub const DEFAULT_SNAPSHOT_FILENAME: &str = "parsed-debug.json";
pub const DEFAULT_DOCUMENT_EXTENSION: &str = "html";

/// Where one import run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    /// Written into `output_dir` only when the export structure is unexpected.
    pub snapshot_filename: String,
    pub document_extension: String,
}

impl ImportConfig {
    /// The fixed artifact layout resolved against `base`.
    pub fn default_with_base(base: &Path) -> Self {
        Self::new(base.join(DEFAULT_INPUT), base.join(DEFAULT_OUTPUT_DIR))
    }

    pub fn new(input_path: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            input_path,
            output_dir,
            snapshot_filename: DEFAULT_SNAPSHOT_FILENAME.to_string(),
            document_extension: DEFAULT_DOCUMENT_EXTENSION.to_string(),
        }
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.output_dir.join(&self.snapshot_filename)
    }
}
