//! Media Value Objects
//!
//! Files received from clients and the remote references the media host
//! hands back for them.

use axum::body::Bytes;
use derive_more::Display;
use serde::Serialize;

/// Remote media folder. Displays as the folder name on the media host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MediaFolder {
    #[display("PORTFOLIO AVATAR")]
    Avatar,
    #[display("PORTFOLIO RESUME")]
    Resume,
}

/// Reference to a file stored on the media host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaAsset {
    /// Host-side identifier, needed to destroy the file
    pub public_id: String,
    /// Public HTTPS URL
    pub url: String,
}

impl MediaAsset {
    pub fn new(public_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            public_id: public_id.into(),
            url: url.into(),
        }
    }

    /// No remote file behind this reference
    pub fn is_empty(&self) -> bool {
        self.public_id.is_empty()
    }
}

/// A file part pulled out of a multipart request
#[derive(Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type
            .to_ascii_lowercase()
            .starts_with("image/")
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_names() {
        assert_eq!(MediaFolder::Avatar.to_string(), "PORTFOLIO AVATAR");
        assert_eq!(MediaFolder::Resume.to_string(), "PORTFOLIO RESUME");
    }

    #[test]
    fn test_is_image() {
        assert!(UploadedFile::new("me.png", "image/png", vec![1u8]).is_image());
        assert!(UploadedFile::new("me.JPG", "Image/JPEG", vec![1u8]).is_image());
        assert!(!UploadedFile::new("cv.pdf", "application/pdf", vec![1u8]).is_image());
    }

    #[test]
    fn test_debug_hides_content() {
        let file = UploadedFile::new("cv.pdf", "application/pdf", vec![0u8; 4]);
        let debug = format!("{file:?}");
        assert!(debug.contains("len: 4"));
    }

    #[test]
    fn test_asset_serializes_snake_case() {
        let asset = MediaAsset::new("PORTFOLIO AVATAR/abc", "https://res.example.com/abc.png");
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["public_id"], "PORTFOLIO AVATAR/abc");
        assert_eq!(json["url"], "https://res.example.com/abc.png");
        assert!(MediaAsset::default().is_empty());
    }
}
