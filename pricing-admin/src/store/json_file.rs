//! Whole-document JSON persistence

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{AppError, AppResult, ErrorCode};
use std::io::ErrorKind;
use std::path::Path;

/// Read and decode `path`; `None` when the file does not exist
pub(crate) async fn read_document<T: DeserializeOwned>(path: &Path) -> AppResult<Option<T>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(AppError::database(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )));
        }
    };

    serde_json::from_slice(&bytes).map(Some).map_err(|e| {
        AppError::with_message(
            ErrorCode::StorageCorrupted,
            format!("Failed to decode {}: {}", path.display(), e),
        )
        .with_detail("path", path.display().to_string())
    })
}

/// Encode `value` and replace `path` through a sibling temp file
pub(crate) async fn write_document<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| AppError::internal(format!("Failed to encode document: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::database(format!("Failed to create {}: {}", parent.display(), e)))?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    tokio::fs::write(tmp, &bytes)
        .await
        .map_err(|e| AppError::database(format!("Failed to write {}: {}", tmp.display(), e)))?;
    tokio::fs::rename(tmp, path)
        .await
        .map_err(|e| AppError::database(format!("Failed to replace {}: {}", path.display(), e)))?;
    Ok(())
}
