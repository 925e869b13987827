//! Local image storage.
//!
//! Uploaded images land in one flat directory under a generated name and are
//! served back from `/uploads/<name>`.

use axum::body::Bytes;
use axum::extract::multipart::Field;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Largest accepted upload request, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 << 20;

/// URL prefix under which stored images are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Accepted extensions, compared case-sensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("failed to save file")]
    Create(#[source] std::io::Error),

    #[error("failed to write file")]
    Write(#[source] std::io::Error),

    #[error("failed to write file")]
    Read(String),
}

/// Something an upload body can be pulled from chunk by chunk.
pub trait ChunkSource: Send {
    /// `Ok(None)` once the body is exhausted.
    fn next_chunk(&mut self) -> impl Future<Output = Result<Option<Bytes>, String>> + Send;
}

impl ChunkSource for Field<'_> {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>, String> {
        self.chunk().await.map_err(|e| e.body_text())
    }
}

/// Final extension of `filename`, dot included, or `""` when there is none.
pub fn extension_of(filename: &str) -> &str {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match base.rfind('.') {
        Some(idx) => &base[idx..],
        None => "",
    }
}

/// Returns the extension when it is on the allow-list.
pub fn allowed_extension(filename: &str) -> Option<&str> {
    let ext = extension_of(filename);
    ALLOWED_EXTENSIONS.contains(&ext).then_some(ext)
}

/// `<unix nanos><ext>`. Two uploads in the same nanosecond collide.
pub fn generate_filename(ext: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{nanos}{ext}")
}

/// Public URL for a stored file name.
pub fn public_url(filename: &str) -> String {
    format!("{PUBLIC_PREFIX}/{filename}")
}

/// The directory uploaded images are written to.
#[derive(Debug, Clone)]
pub struct UploadDir {
    root: PathBuf,
}

impl UploadDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the directory if it is missing.
    pub async fn ensure_exists(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Streams chunks into `filename` and returns the bytes written.
    ///
    /// Whatever was written before a failure stays on disk.
    pub async fn write_stream<S: ChunkSource>(
        &self,
        filename: &str,
        source: &mut S,
    ) -> Result<u64, UploadError> {
        let mut file = File::create(self.path_for(filename))
            .await
            .map_err(UploadError::Create)?;

        let mut written = 0u64;
        while let Some(chunk) = source.next_chunk().await.map_err(UploadError::Read)? {
            file.write_all(&chunk).await.map_err(UploadError::Write)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(UploadError::Write)?;

        Ok(written)
    }
}
