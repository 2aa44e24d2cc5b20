//! Image picker state
//!
//! Keeps the existing images of the record being edited next to the files
//! picked in this session. Removing a preview is local; the server only
//! hears about it when the form is submitted.

use sejour_client::{ImageUpload, UploadFile};
use sejour_model::{ImageRef, ImageSet, MAX_IMAGES};
use uuid::Uuid;

/// Message shown when a form has no image at all
pub const IMAGE_REQUIRED: &str = "At least one image is required";

/// Stable key of a preview in the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKey {
    /// Image already stored on the server
    Existing(Uuid),
    /// File picked in this session
    New(Uuid),
}

#[derive(Debug, Clone, PartialEq)]
struct ExistingImage {
    key: Uuid,
    image: ImageRef,
    is_main: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct NewImage {
    key: Uuid,
    file: UploadFile,
}

/// One preview tile
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePreview {
    pub key: ImageKey,
    pub label: String,
    /// Remote URL for stored images, `None` for local files
    pub url: Option<String>,
    pub is_main: bool,
    /// Stored images the server gave no id cannot be deleted
    pub removable: bool,
}

/// Existing and newly selected images of one form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSelection {
    existing: Vec<ExistingImage>,
    removed_ids: Vec<u64>,
    files: Vec<NewImage>,
}

impl ImageSelection {
    /// Empty selection (create mode)
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the images of a record (edit mode)
    pub fn from_existing(images: &ImageSet) -> Self {
        let existing = images
            .main_image
            .iter()
            .map(|image| (image, true))
            .chain(images.gallery.iter().map(|image| (image, false)))
            .map(|(image, is_main)| ExistingImage {
                key: Uuid::new_v4(),
                image: image.clone(),
                is_main,
            })
            .collect();
        Self {
            existing,
            ..Default::default()
        }
    }

    /// Append picked files, keeping their order
    pub fn add_files(&mut self, files: impl IntoIterator<Item = UploadFile>) {
        self.files.extend(files.into_iter().map(|file| NewImage {
            key: Uuid::new_v4(),
            file,
        }));
    }

    /// Remove a preview; returns whether anything was removed
    ///
    /// A stored image without an id stays: the server could not be told to
    /// delete it, so it would come back on the next load.
    pub fn remove(&mut self, key: ImageKey) -> bool {
        match key {
            ImageKey::Existing(key) => {
                let Some(index) = self.existing.iter().position(|e| e.key == key) else {
                    return false;
                };
                let Some(id) = self.existing[index].image.id else {
                    tracing::warn!(url = %self.existing[index].image.url, "Stored image has no id, keeping it");
                    return false;
                };
                self.existing.remove(index);
                self.removed_ids.push(id);
                true
            }
            ImageKey::New(key) => {
                let before = self.files.len();
                self.files.retain(|f| f.key != key);
                self.files.len() < before
            }
        }
    }

    /// Images kept plus files picked
    pub fn total(&self) -> usize {
        self.existing.len() + self.files.len()
    }

    /// Number of newly picked files
    pub fn new_count(&self) -> usize {
        self.files.len()
    }

    /// Whether the stored main image is still kept
    pub fn keeps_main_image(&self) -> bool {
        self.existing.iter().any(|e| e.is_main)
    }

    /// Image-area error, if the selection cannot be submitted
    pub fn error(&self) -> Option<String> {
        let total = self.total();
        if total == 0 {
            Some(IMAGE_REQUIRED.to_string())
        } else if total > MAX_IMAGES {
            Some(format!(
                "You can attach at most {} images ({} selected)",
                MAX_IMAGES, total
            ))
        } else {
            None
        }
    }

    /// Tiles in display order: stored images first, then picked files
    pub fn previews(&self) -> Vec<ImagePreview> {
        let main_taken = self.keeps_main_image();
        let existing = self.existing.iter().map(|e| ImagePreview {
            key: ImageKey::Existing(e.key),
            label: e
                .image
                .url
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string(),
            url: Some(e.image.preview_url().to_string()),
            is_main: e.is_main,
            removable: e.image.id.is_some(),
        });
        let files = self.files.iter().enumerate().map(|(i, f)| ImagePreview {
            key: ImageKey::New(f.key),
            label: f.file.file_name.clone(),
            url: None,
            is_main: !main_taken && i == 0,
            removable: true,
        });
        existing.chain(files).collect()
    }

    /// Files to send with the payload
    ///
    /// The first picked file becomes the main image unless the stored main
    /// image is kept, in which case every picked file joins the gallery.
    pub fn to_upload(&self) -> ImageUpload {
        let files: Vec<UploadFile> = self.files.iter().map(|f| f.file.clone()).collect();
        let mut upload = if self.keeps_main_image() {
            ImageUpload {
                gallery_images: files,
                ..Default::default()
            }
        } else {
            ImageUpload::from_files(files)
        };
        upload.removed_image_ids = self.removed_ids.clone();
        upload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file(name: &str) -> UploadFile {
        UploadFile::from_bytes(name, vec![1, 2, 3])
    }

    fn stored(id: u64) -> ImageRef {
        ImageRef {
            id: Some(id),
            url: format!("https://cdn.test/{}.jpg", id),
            thumbnail_url: None,
        }
    }

    #[test]
    fn test_empty_selection_requires_image() {
        assert_eq!(ImageSelection::new().error().as_deref(), Some(IMAGE_REQUIRED));
    }

    #[test]
    fn test_first_file_is_main_in_create_mode() {
        let mut images = ImageSelection::new();
        images.add_files([file("a.jpg"), file("b.jpg"), file("c.jpg")]);
        assert!(images.error().is_none());

        let upload = images.to_upload();
        assert_eq!(upload.main_image.unwrap().file_name, "a.jpg");
        assert_eq!(upload.gallery_images.len(), 2);
        assert!(images.previews()[0].is_main);
    }

    #[test]
    fn test_more_than_ten_is_blocked_with_count() {
        let mut images = ImageSelection::new();
        images.add_files((0..11).map(|i| file(&format!("{}.png", i))));
        let error = images.error().unwrap();
        assert!(error.contains("10"));
        assert!(error.contains("11"));
    }

    #[test]
    fn test_existing_images_count_toward_limit() {
        let set = ImageSet {
            main_image: Some(stored(1)),
            gallery: (2..10).map(stored).collect(),
        };
        let mut images = ImageSelection::from_existing(&set);
        assert_eq!(images.total(), 9);
        images.add_files([file("x.jpg")]);
        assert!(images.error().is_none());
        images.add_files([file("y.jpg")]);
        assert!(images.error().is_some());
    }

    #[test]
    fn test_edit_mode_keeps_main_and_tracks_removals() {
        let set = ImageSet {
            main_image: Some(stored(1)),
            gallery: vec![stored(2)],
        };
        let mut images = ImageSelection::from_existing(&set);
        let gallery_key = images.previews()[1].key;
        images.remove(gallery_key);
        images.add_files([file("new.jpg")]);

        let upload = images.to_upload();
        assert!(upload.main_image.is_none());
        assert_eq!(upload.gallery_images.len(), 1);
        assert_eq!(upload.removed_image_ids, vec![2]);
    }

    #[test]
    fn test_removing_every_image_blocks_edit() {
        let set = ImageSet {
            main_image: Some(stored(1)),
            gallery: vec![],
        };
        let mut images = ImageSelection::from_existing(&set);
        assert!(images.error().is_none());
        let key = images.previews()[0].key;
        images.remove(key);
        assert_eq!(images.error().as_deref(), Some(IMAGE_REQUIRED));
    }

    #[test]
    fn test_replacing_main_image() {
        let set = ImageSet {
            main_image: Some(stored(1)),
            gallery: vec![],
        };
        let mut images = ImageSelection::from_existing(&set);
        let key = images.previews()[0].key;
        images.remove(key);
        images.add_files([file("cover.jpg")]);

        let upload = images.to_upload();
        assert_eq!(upload.main_image.unwrap().file_name, "cover.jpg");
        assert_eq!(upload.removed_image_ids, vec![1]);
    }

    #[test]
    fn test_stored_image_without_id_is_kept() {
        let set = ImageSet {
            main_image: Some(ImageRef {
                id: None,
                url: "https://cdn.test/legacy.jpg".to_string(),
                thumbnail_url: None,
            }),
            gallery: vec![stored(5)],
        };
        let mut images = ImageSelection::from_existing(&set);
        let previews = images.previews();
        assert!(!previews[0].removable);
        assert!(previews[1].removable);

        assert!(!images.remove(previews[0].key));
        assert!(images.keeps_main_image());
        assert_eq!(images.total(), 2);

        assert!(images.remove(previews[1].key));
        assert_eq!(images.total(), 1);
        assert_eq!(images.to_upload().removed_image_ids, vec![5]);
    }
}
