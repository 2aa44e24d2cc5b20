//! Image files attached to a mutation

use std::path::PathBuf;

use crate::error::{ClientError, ClientResult};

/// Multipart field of the main image
pub const MAIN_IMAGE_FIELD: &str = "main_image";

/// Multipart field of gallery images (repeated)
pub const GALLERY_FIELD: &str = "gallery_images[]";

/// Multipart field listing removed existing images (repeated)
pub const REMOVED_FIELD: &str = "removed_images[]";

/// Where the bytes of a file come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    /// Read from disk at send time
    Path(PathBuf),
    /// Already in memory
    Bytes(Vec<u8>),
}

/// One raw file to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub source: UploadSource,
}

impl UploadFile {
    /// File read from a path when the request is sent
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Self {
            mime: mime_guess::from_path(&file_name).first_or_octet_stream().to_string(),
            file_name,
            source: UploadSource::Path(path),
        }
    }

    /// File held in memory
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        Self {
            mime: mime_guess::from_path(&file_name).first_or_octet_stream().to_string(),
            file_name,
            source: UploadSource::Bytes(bytes),
        }
    }

    /// Turn the file into a multipart part
    pub async fn into_part(self) -> ClientResult<reqwest::multipart::Part> {
        let bytes = match self.source {
            UploadSource::Bytes(bytes) => bytes,
            UploadSource::Path(path) => tokio::fs::read(&path).await.map_err(|e| {
                ClientError::Storage(format!("cannot read {}: {}", path.display(), e))
            })?,
        };
        Ok(reqwest::multipart::Part::bytes(bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)?)
    }
}

/// Images submitted with an entity form
///
/// The first newly selected file is the main image, the rest are gallery
/// images. Existing images removed in the form are listed by server id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUpload {
    pub main_image: Option<UploadFile>,
    pub gallery_images: Vec<UploadFile>,
    pub removed_image_ids: Vec<u64>,
}

impl ImageUpload {
    /// Split an ordered list of new files into main image and gallery
    pub fn from_files(files: Vec<UploadFile>) -> Self {
        let mut files = files.into_iter();
        Self {
            main_image: files.next(),
            gallery_images: files.collect(),
            removed_image_ids: Vec::new(),
        }
    }

    /// Number of new files
    pub fn file_count(&self) -> usize {
        self.gallery_images.len() + usize::from(self.main_image.is_some())
    }

    /// Whether the request needs to be multipart
    pub fn has_files(&self) -> bool {
        self.file_count() > 0
    }

    /// Whether there is nothing image-related to send
    pub fn is_empty(&self) -> bool {
        !self.has_files() && self.removed_image_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_file_is_main() {
        let upload = ImageUpload::from_files(vec![
            UploadFile::from_bytes("a.jpg", vec![1]),
            UploadFile::from_bytes("b.PNG", vec![2]),
            UploadFile::from_bytes("c.webp", vec![3]),
        ]);
        assert_eq!(upload.main_image.as_ref().unwrap().file_name, "a.jpg");
        assert_eq!(upload.gallery_images.len(), 2);
        assert_eq!(upload.gallery_images[0].mime, "image/png");
        assert_eq!(upload.file_count(), 3);
        assert!(upload.has_files());
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(UploadFile::from_bytes("logo.svg", vec![]).mime, "image/svg+xml");
        assert_eq!(UploadFile::from_bytes("scan.BMP", vec![]).mime, "image/bmp");
        assert_eq!(UploadFile::from_bytes("notes", vec![]).mime, "application/octet-stream");
    }

    #[test]
    fn test_empty_upload() {
        let upload = ImageUpload::from_files(Vec::new());
        assert!(upload.is_empty());
        assert_eq!(upload.file_count(), 0);
    }

    #[test]
    fn test_from_path_keeps_file_name() {
        let file = UploadFile::from_path("/tmp/photos/pool.jpeg");
        assert_eq!(file.file_name, "pool.jpeg");
        assert_eq!(file.mime, "image/jpeg");
    }

    #[tokio::test]
    async fn test_missing_file_is_a_storage_error() {
        let err = UploadFile::from_path("/definitely/not/here.png")
            .into_part()
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Storage(_)));
    }
}
