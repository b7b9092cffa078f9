use std::path::PathBuf;

/// Outcome of a completed import run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Items found in the channel, eligible or not.
    pub items_seen: usize,
    /// Documents written (including ones that overwrote an earlier record).
    pub written: usize,
    pub skipped: usize,
    /// Filenames produced by more than one record this run; last write won.
    pub collisions: Vec<String>,
    pub output_dir: PathBuf,
}
