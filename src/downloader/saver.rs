//! Writing downloaded payloads to disk

use crate::api::models::DownloadResult;
use crate::utils::error::{Result, VidgrabError};
use crate::utils::filename::sanitize_filename;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Give up renaming after this many collisions
const MAX_NAME_ATTEMPTS: usize = 1000;

/// Save `result` into `dir` under its sanitized suggested name.
///
/// Existing files are never overwritten: `clip.mp4` becomes `clip (1).mp4`,
/// `clip (2).mp4` and so on. Returns the path that was written.
pub async fn save_download(result: &DownloadResult, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).await?;

    let filename = sanitize_filename(&result.filename);
    let (stem, ext) = split_extension(&filename);

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let candidate = if attempt == 0 {
            dir.join(&filename)
        } else {
            dir.join(format!("{} ({}){}", stem, attempt, ext))
        };

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                debug!("{:?} exists, trying next name", candidate);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        file.write_all(&result.bytes).await?;
        file.flush().await?;

        info!("Saved {} bytes to {:?}", result.bytes.len(), candidate);
        return Ok(candidate);
    }

    Err(VidgrabError::Download(format!(
        "Could not find a free file name for {} in {}",
        filename,
        dir.display()
    )))
}

/// `clip.mp4` -> (`clip`, `.mp4`); names without an extension keep an empty one.
fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(pos) if pos > 0 => filename.split_at(pos),
        _ => (filename, ""),
    }
}
