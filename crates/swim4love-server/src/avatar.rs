//! Avatar images on disk.
//!
//! Each swimmer may have `<avatar-dir>/<id>.jpg`. Any swimmer without one
//! gets the shared default image from the same directory. This module only
//! decides which file answers a request; the handler streams it with
//! [`tower_http::services::ServeFile`]. Files are written once, at
//! registration.

use std::io;
use std::path::{Path, PathBuf};

use swim4love_types::SwimmerId;
use tracing::{debug, warn};

/// Reads and writes swimmer avatars in one directory.
#[derive(Debug, Clone)]
pub struct AvatarStore {
    dir: PathBuf,
    default_file: String,
}

impl AvatarStore {
    /// Create a store over `dir`, falling back to `dir/default_file`.
    pub fn new(dir: impl Into<PathBuf>, default_file: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            default_file: default_file.into(),
        }
    }

    /// The avatar directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the avatar for `id` lives (whether or not it exists).
    pub fn path_for(&self, id: SwimmerId) -> PathBuf {
        self.dir.join(format!("{id}.jpg"))
    }

    /// Where the fallback image lives.
    pub fn default_path(&self) -> PathBuf {
        self.dir.join(&self.default_file)
    }

    /// Pick the file to serve for `id`: its own avatar if one was
    /// uploaded, otherwise the default image.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::NotFound`] if neither file exists. An
    /// avatar path that exists but is not a regular file is skipped.
    pub async fn resolve(&self, id: SwimmerId) -> io::Result<PathBuf> {
        let own = self.path_for(id);
        if is_file(&own).await {
            return Ok(own);
        }
        debug!(swimmer_id = %id, "No avatar uploaded, serving default");

        let default = self.default_path();
        if is_file(&default).await {
            Ok(default)
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("default avatar {} missing", default.display()),
            ))
        }
    }

    /// Write the avatar for `id`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the directory cannot be created or the file
    /// cannot be written.
    pub async fn save(&self, id: SwimmerId, bytes: &[u8]) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(id);
        tokio::fs::write(&path, bytes).await?;
        debug!(swimmer_id = %id, path = %path.display(), size = bytes.len(), "Avatar saved");
        Ok(())
    }

    /// Create the directory if needed and warn when the default image is
    /// missing. Called once at startup.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the directory cannot be created.
    pub async fn prepare(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let default = self.default_path();
        if !is_file(&default).await {
            warn!(
                path = %default.display(),
                "Default avatar missing; avatar requests for swimmers without an upload will fail"
            );
        }
        Ok(())
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|meta| meta.is_file())
}
