//! Outbound Ports
//!
//! External services the use cases talk to: the media host and the mail
//! relay. Adapters live in `infra/`.

use crate::domain::value_object::media_asset::{MediaAsset, MediaFolder, UploadedFile};
use crate::error::AccountResult;

/// Remote file storage
#[trait_variant::make(MediaStore: Send)]
pub trait LocalMediaStore {
    /// Store a file in `folder`. Failures are `AccountError::MediaUpload`.
    async fn upload(&self, file: &UploadedFile, folder: MediaFolder) -> AccountResult<MediaAsset>;

    /// Remove a stored file by its public ID
    async fn destroy(&self, public_id: &str) -> AccountResult<()>;
}

/// Plain-text email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail relay
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Failures are `AccountError::MailDelivery`.
    async fn send(&self, email: &OutgoingEmail) -> AccountResult<()>;
}
