//! Image references returned by the API
//!
//! Image storage is owned by the server. The client only displays the
//! returned URLs and uploads raw files.

use serde::{Deserialize, Serialize};

/// Maximum number of images (main + gallery) in one submission
pub const MAX_IMAGES: usize = 10;

/// One stored image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Server identifier, when the API exposes one (needed to remove it)
    #[serde(default)]
    pub id: Option<u64>,
    pub url: String,
    #[serde(default, alias = "thumbnail")]
    pub thumbnail_url: Option<String>,
}

impl ImageRef {
    /// Create a reference from a URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: None,
            url: url.into(),
            thumbnail_url: None,
        }
    }

    /// URL to show in lists (thumbnail when available)
    pub fn preview_url(&self) -> &str {
        self.thumbnail_url.as_deref().unwrap_or(&self.url)
    }
}

/// Main image plus ordered gallery of a listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub main_image: Option<ImageRef>,
    #[serde(default)]
    pub gallery: Vec<ImageRef>,
}

impl ImageSet {
    /// Total number of images
    pub fn len(&self) -> usize {
        self.gallery.len() + usize::from(self.main_image.is_some())
    }

    /// Whether there are no images
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All images, main first
    pub fn all(&self) -> Vec<&ImageRef> {
        self.main_image.iter().chain(self.gallery.iter()).collect()
    }
}

/// Records exposing an image set
pub trait HasImages {
    /// Current images of the record
    fn image_set(&self) -> ImageSet;
}
