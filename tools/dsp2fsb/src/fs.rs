//! Filesystem helpers for reading sources and writing banks.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Maximum DSP file size read into memory.
pub const MAX_DSP_BYTES: u64 = 512 * 1024 * 1024; // 512 MiB

/// Read a source file, refusing anything over `max_bytes`.
pub fn read_source(path: &Path, max_bytes: u64) -> Result<Vec<u8>> {
    let len = fs::metadata(path)
        .with_context(|| format!("Cannot stat source {}", path.display()))?
        .len();
    if len > max_bytes {
        anyhow::bail!(
            "Source {} is {} bytes, over the {} byte limit",
            path.display(),
            len,
            max_bytes
        );
    }
    fs::read(path).with_context(|| format!("Cannot read source {}", path.display()))
}

/// Write `data` to `path` through a sibling temp file.
///
/// The destination either keeps its previous contents or holds all of `data`.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    if let Err(e) = write_synced(tmp_path, data) {
        let _ = fs::remove_file(tmp_path);
        return Err(e).with_context(|| format!("Failed to write file: {}", tmp_path.display()));
    }

    #[cfg(windows)]
    {
        if path.exists() {
            // Windows rename fails if destination exists.
            fs::remove_file(path)
                .with_context(|| format!("Failed to replace file: {}", path.display()))?;
        }
    }

    fs::rename(tmp_path, path)
        .with_context(|| format!("Failed to move {} into place", path.display()))
}

fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut f = fs::File::create(path)?;
    f.write_all(data)?;
    f.sync_all()
}
