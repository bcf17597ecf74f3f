//! File system utilities.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Writes content to a file atomically using a temp file and rename.
///
/// Used for synthesized audio and downloaded training data, so an interrupted
/// download never leaves a truncated file behind. The temp file sits next to
/// the target so the rename stays on one filesystem.
pub fn atomic_write(file_path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
    let parent = file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = file_path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write file: {}", temp_path.display()))?;

    fs::rename(&temp_path, file_path)
        .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

    Ok(())
}
