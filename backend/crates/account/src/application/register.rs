//! Register Use Case
//!
//! Creates the account: validates the form, uploads avatar and resume,
//! stores the user and signs them in.

use std::sync::Arc;

use platform::client::ClientInfo;

use crate::application::AuthenticatedOutput;
use crate::application::config::AccountConfig;
use crate::application::session_token::open_session;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::ports::MediaStore;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    media_asset::{MediaAsset, MediaFolder, UploadedFile},
    profile_links::{LinkKind, ProfileLinks},
    profile_text::{AboutMe, FullName, Phone},
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AccountError, AccountResult};

/// Register input
#[derive(Default)]
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub about_me: String,
    pub password: String,
    pub links: Vec<(LinkKind, String)>,
    pub avatar: Option<UploadedFile>,
    pub resume: Option<UploadedFile>,
}

/// Register use case
pub struct RegisterUseCase<U, S, M>
where
    U: UserRepository,
    S: SessionRepository,
    M: MediaStore,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    media: Arc<M>,
    config: Arc<AccountConfig>,
}

impl<U, S, M> RegisterUseCase<U, S, M>
where
    U: UserRepository,
    S: SessionRepository,
    M: MediaStore,
{
    pub fn new(
        user_repo: Arc<U>,
        session_repo: Arc<S>,
        media: Arc<M>,
        config: Arc<AccountConfig>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            media,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: RegisterInput,
        client: &ClientInfo,
    ) -> AccountResult<AuthenticatedOutput> {
        let avatar = input.avatar.filter(|f| !f.is_empty());
        let resume = input.resume.filter(|f| !f.is_empty());
        let (Some(avatar), Some(resume)) = (avatar, resume) else {
            return Err(AccountError::MissingUploads);
        };
        if !avatar.is_image() {
            return Err(AccountError::InvalidUpload(
                "Avatar must be an image file".to_string(),
            ));
        }

        let full_name = FullName::new(&input.full_name)?;
        let email = Email::new(input.email)?;
        let phone = Phone::new(&input.phone)?;
        let about_me = AboutMe::new(&input.about_me)?;
        let links = ProfileLinks::from_raw(
            input.links.iter().map(|(kind, raw)| (*kind, raw.as_str())),
        )?;
        let raw_password = RawPassword::new(input.password)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AccountError::EmailTaken);
        }

        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        // Nothing is stored remotely before this point
        let avatar = self.media.upload(&avatar, MediaFolder::Avatar).await?;
        let resume = match self.media.upload(&resume, MediaFolder::Resume).await {
            Ok(asset) => asset,
            Err(e) => {
                self.discard(&avatar).await;
                return Err(e);
            }
        };

        let user = User::new(NewUser {
            full_name,
            email,
            phone,
            about_me,
            password,
            links,
            avatar,
            resume,
        });

        if let Err(e) = self.user_repo.create(&user).await {
            self.discard(&user.avatar).await;
            self.discard(&user.resume).await;
            return Err(e);
        }

        let session_token =
            open_session(self.session_repo.as_ref(), &self.config, user.user_id, client).await?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(AuthenticatedOutput {
            user,
            session_token,
        })
    }

    /// Best-effort removal of an orphaned upload
    async fn discard(&self, asset: &MediaAsset) {
        if let Err(e) = self.media.destroy(&asset.public_id).await {
            tracing::warn!(
                public_id = %asset.public_id,
                error = %e,
                "Failed to remove orphaned upload"
            );
        }
    }
}
