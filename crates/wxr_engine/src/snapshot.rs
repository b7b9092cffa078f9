use serde_json::Value;

use crate::persist::{AtomicFileWriter, PersistError, WrittenFile};

/// Writes the full parsed document, pretty-printed, for post-mortem
/// inspection of exports whose structure was not understood.
pub fn write_debug_snapshot(
    writer: &AtomicFileWriter,
    filename: &str,
    document: &Value,
) -> Result<WrittenFile, PersistError> {
    let pretty = serde_json::to_string_pretty(document).map_err(|e| PersistError::Io {
        path: writer.dir().join(filename),
        source: e.into(),
    })?;
    writer.write(filename, &pretty)
}
