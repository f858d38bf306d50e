//! JSON snapshot persistence.
//!
//! The snapshot is the export bundle written to a single file. Writes go
//! to a sibling temp file first and are renamed into place.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use muse_sdk::types::DataBundle;
use tokio::fs;
use tracing::{debug, info};

/// Load a snapshot. Returns `None` if the file does not exist yet.
pub async fn load(path: &Path) -> Result<Option<DataBundle>> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no snapshot on disk");
            return Ok(None);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read snapshot {}", path.display()));
        }
    };

    let bundle: DataBundle = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;

    info!(
        path = %path.display(),
        content_types = bundle.content_types.len(),
        entries = bundle.entries.len(),
        media = bundle.media.len(),
        "snapshot loaded"
    );
    Ok(Some(bundle))
}

/// Write a snapshot atomically.
pub async fn save(path: &Path, bundle: &DataBundle) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .context("failed to create snapshot directory")?;
    }

    let json = serde_json::to_vec_pretty(bundle).context("failed to serialize snapshot")?;
    let tmp = temp_path(path);
    fs::write(&tmp, &json)
        .await
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .await
        .with_context(|| format!("failed to move snapshot into {}", path.display()))?;

    info!(path = %path.display(), bytes = json.len(), "snapshot saved");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
