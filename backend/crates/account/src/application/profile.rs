//! Profile Use Cases
//!
//! Reading the signed-in user, reading the public portfolio owner, and
//! patching the profile (including avatar/resume replacement).

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AccountConfig;
use crate::domain::entity::user::User;
use crate::domain::ports::MediaStore;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    media_asset::{MediaAsset, MediaFolder, UploadedFile},
    profile_links::LinkKind,
    profile_text::{AboutMe, FullName, Phone},
};
use crate::error::{AccountError, AccountResult};

// ============================================================================
// Read
// ============================================================================

/// Get profile use case
pub struct GetProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AccountConfig>,
}

impl<U> GetProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AccountConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, user_id: &UserId) -> AccountResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)
    }

    /// The account shown on the public portfolio site
    pub async fn portfolio_user(&self) -> AccountResult<User> {
        let Some(user_id) = self.config.portfolio_user_id else {
            tracing::warn!("Portfolio user requested but none is configured");
            return Err(AccountError::UserNotFound);
        };
        self.execute(&user_id).await
    }
}

// ============================================================================
// Update
// ============================================================================

/// Profile patch; `None` leaves a field untouched
#[derive(Default)]
pub struct UpdateProfileInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub about_me: Option<String>,
    /// Blank value clears the link
    pub links: Vec<(LinkKind, String)>,
    pub avatar: Option<UploadedFile>,
    pub resume: Option<UploadedFile>,
}

/// Update profile use case
pub struct UpdateProfileUseCase<U, M>
where
    U: UserRepository,
    M: MediaStore,
{
    user_repo: Arc<U>,
    media: Arc<M>,
}

impl<U, M> UpdateProfileUseCase<U, M>
where
    U: UserRepository,
    M: MediaStore,
{
    pub fn new(user_repo: Arc<U>, media: Arc<M>) -> Self {
        Self { user_repo, media }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdateProfileInput) -> AccountResult<User> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        // Validate everything before touching the media host
        if let Some(full_name) = input.full_name.as_deref() {
            user.full_name = FullName::new(full_name)?;
        }
        if let Some(phone) = input.phone.as_deref() {
            user.phone = Phone::new(phone)?;
        }
        if let Some(about_me) = input.about_me.as_deref() {
            user.about_me = AboutMe::new(about_me)?;
        }
        for (kind, raw) in &input.links {
            user.links.set(*kind, raw)?;
        }
        if let Some(email) = input.email {
            let email = Email::new(email)?;
            if email != user.email {
                if self.user_repo.exists_by_email(&email).await? {
                    return Err(AccountError::EmailTaken);
                }
                user.email = email;
            }
        }

        let avatar = input.avatar.filter(|f| !f.is_empty());
        let resume = input.resume.filter(|f| !f.is_empty());
        if avatar.as_ref().is_some_and(|f| !f.is_image()) {
            return Err(AccountError::InvalidUpload(
                "Avatar must be an image file".to_string(),
            ));
        }

        // New files go up first; old ones are only removed once the row is saved
        let mut uploaded: Vec<MediaAsset> = Vec::new();
        let mut replaced: Vec<MediaAsset> = Vec::new();

        if let Some(file) = avatar {
            let asset = self.media.upload(&file, MediaFolder::Avatar).await?;
            uploaded.push(asset.clone());
            replaced.push(std::mem::replace(&mut user.avatar, asset));
        }
        if let Some(file) = resume {
            match self.media.upload(&file, MediaFolder::Resume).await {
                Ok(asset) => {
                    uploaded.push(asset.clone());
                    replaced.push(std::mem::replace(&mut user.resume, asset));
                }
                Err(e) => {
                    self.discard_all(&uploaded).await;
                    return Err(e);
                }
            }
        }

        user.touch();
        if let Err(e) = self.user_repo.update_profile(&user).await {
            self.discard_all(&uploaded).await;
            return Err(e);
        }

        self.discard_all(&replaced).await;

        tracing::info!(user_id = %user.user_id, "Profile updated");
        Ok(user)
    }

    /// Best-effort removal; failures are only logged
    async fn discard_all(&self, assets: &[MediaAsset]) {
        for asset in assets.iter().filter(|a| !a.is_empty()) {
            if let Err(e) = self.media.destroy(&asset.public_id).await {
                tracing::warn!(
                    public_id = %asset.public_id,
                    error = %e,
                    "Failed to remove media asset"
                );
            }
        }
    }
}
