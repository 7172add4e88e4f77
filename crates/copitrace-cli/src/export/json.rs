use anyhow::Result;
use serde_json::Value;
use std::io::BufWriter;
use std::path::Path;

/// Pretty-print the export bundle to a JSON file, creating parent
/// directories on demand.
pub fn write(bundle: &Value, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), bundle)?;
    Ok(())
}
