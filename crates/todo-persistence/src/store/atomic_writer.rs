use std::path::Path;
use todo_core::TodoResult;
use tokio::fs;

/// Write-to-temp-then-rename file writer, so readers never see a
/// half-written file.
pub struct AtomicWriter;

impl AtomicWriter {
    /// Atomically replace `path` with `data`, creating missing parent
    /// directories first.
    pub async fn write_atomic(path: &Path, data: &[u8]) -> TodoResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).await?;

        // Same directory keeps the rename on one filesystem.
        let temp_path = tempfile::NamedTempFile::new_in(parent)?.into_temp_path();
        fs::write(&temp_path, data).await?;
        temp_path.persist(path).map_err(|e| e.error)?;

        tracing::debug!(
            "Atomically wrote {} bytes to {}",
            data.len(),
            path.display()
        );
        Ok(())
    }

    pub async fn read_all(path: &Path) -> TodoResult<Vec<u8>> {
        let data = fs::read(path).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }
}
