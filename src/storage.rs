//! Image attachment storage.
//!
//! Uploaded images are copied into a local directory under a generated name
//! and referenced by the public URL the server exposes them at.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Public path prefix the upload directory is served under.
pub const FILES_PATH: &str = "/files";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// An uploaded image whose content type has already been checked.
#[derive(Debug, Clone, Copy)]
pub struct ImageUpload<'a> {
    /// Location of the uploaded bytes on disk.
    pub path: &'a Path,
    /// Lower-cased MIME essence, e.g. `image/png`.
    pub content_type: &'a str,
    pub size: usize,
}

pub trait ImageStorage {
    /// Persists the upload and returns the URL it is reachable at.
    fn store(&self, upload: &ImageUpload<'_>) -> StorageResult<String>;
    /// Removes a file previously returned by [`ImageStorage::store`].
    ///
    /// URLs not owned by this storage are ignored.
    fn delete(&self, url: &str) -> StorageResult<()>;
}

/// Maps an accepted image content type to the extension used on disk.
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpg" | "image/jpeg" => Some("jpg"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    root: PathBuf,
    public_path: String,
}

impl FileSystemStorage {
    /// Opens (creating if needed) `root` as the upload directory.
    pub fn new(root: impl Into<PathBuf>, public_path: impl Into<String>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            public_path: public_path.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a public URL back to a file inside `root`.
    fn local_path(&self, url: &str) -> Option<PathBuf> {
        let name = url
            .strip_prefix(self.public_path.as_str())?
            .strip_prefix('/')?;
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return None;
        }
        Some(self.root.join(name))
    }
}

impl ImageStorage for FileSystemStorage {
    fn store(&self, upload: &ImageUpload<'_>) -> StorageResult<String> {
        let extension = extension_for(upload.content_type)
            .ok_or_else(|| StorageError::UnsupportedContentType(upload.content_type.to_string()))?;
        let name = format!("{}.{extension}", Uuid::new_v4());

        fs::copy(upload.path, self.root.join(&name))?;
        log::info!("Stored image {name} ({} bytes)", upload.size);

        Ok(format!("{}/{name}", self.public_path))
    }

    fn delete(&self, url: &str) -> StorageResult<()> {
        let Some(path) = self.local_path(url) else {
            return Ok(());
        };
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn upload_file(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn store_copies_under_generated_name() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSystemStorage::new(dir.path(), "/files/").unwrap();
        let source = upload_file(b"\x89PNG");

        let url = storage
            .store(&ImageUpload {
                path: source.path(),
                content_type: "image/png",
                size: 4,
            })
            .unwrap();

        assert!(url.starts_with("/files/"));
        assert!(url.ends_with(".png"));
        let stored = storage.local_path(&url).unwrap();
        assert_eq!(fs::read(stored).unwrap(), b"\x89PNG");
    }

    #[test]
    fn store_rejects_unknown_types() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSystemStorage::new(dir.path(), FILES_PATH).unwrap();
        let source = upload_file(b"hola");

        let result = storage.store(&ImageUpload {
            path: source.path(),
            content_type: "text/plain",
            size: 4,
        });

        assert!(matches!(
            result,
            Err(StorageError::UnsupportedContentType(_))
        ));
    }

    #[test]
    fn delete_removes_owned_files_and_ignores_foreign_urls() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSystemStorage::new(dir.path(), FILES_PATH).unwrap();
        let source = upload_file(b"GIF89a");
        let url = storage
            .store(&ImageUpload {
                path: source.path(),
                content_type: "image/gif",
                size: 6,
            })
            .unwrap();
        let path = storage.local_path(&url).unwrap();

        storage.delete(&url).unwrap();
        assert!(!path.exists());
        storage.delete(&url).unwrap();

        storage.delete("https://cdn.example.com/a.png").unwrap();
        storage.delete("/files/../secret").unwrap();
        assert!(storage.local_path("/files/../secret").is_none());
    }
}
