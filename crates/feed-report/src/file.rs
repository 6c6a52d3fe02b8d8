use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

/// Replace the feed file at `path` with `text`.
///
/// The text is written to a sibling temporary file first and then renamed
/// over the target, so the file is never observed half-written.
pub fn write_feed_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let staging = staging_path(path)?;
    fs::write(&staging, text).with_context(|| format!("write {}", staging.display()))?;
    fs::rename(&staging, path).with_context(|| {
        let _ = fs::remove_file(&staging);
        format!("replace {}", path.display())
    })?;
    Ok(())
}

fn staging_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("feed path {} has no file name", path.display()))?;
    let mut staging = file_name.to_os_string();
    staging.push(".tmp");
    Ok(path.with_file_name(staging))
}
