//! Cloudinary Media Store
//!
//! Signed uploads and deletions against the Cloudinary REST API.
//! Every request carries `signature = sha1_hex(sorted "k=v&..." + api_secret)`
//! over the signed parameters (everything except `file`, `api_key` and the
//! signature itself).

use std::sync::Arc;

use chrono::Utc;
use platform::crypto::sha1_hex;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::domain::ports::MediaStore;
use crate::domain::value_object::media_asset::{MediaAsset, MediaFolder, UploadedFile};
use crate::error::{AccountError, AccountResult};

pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";

/// Cloudinary credentials
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// API origin, overridable for tests
    pub base_url: String,
}

impl CloudinaryConfig {
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v1_1/{}/image/{}",
            self.base_url.trim_end_matches('/'),
            self.cloud_name,
            action
        )
    }
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Request signature over `params`
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, &str)> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    sha1_hex(format!("{to_sign}{api_secret}").as_bytes())
}

#[derive(Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Cloudinary-backed media store
#[derive(Clone)]
pub struct CloudinaryMediaStore {
    client: reqwest::Client,
    config: Arc<CloudinaryConfig>,
}

impl CloudinaryMediaStore {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: CloudinaryConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(body) => format!("{status}: {}", body.error.message),
            Err(_) => status.to_string(),
        }
    }
}

impl MediaStore for CloudinaryMediaStore {
    async fn upload(&self, file: &UploadedFile, folder: MediaFolder) -> AccountResult<MediaAsset> {
        let timestamp = Utc::now().timestamp().to_string();
        let folder = folder.to_string();
        let signature = sign_params(
            &[("folder", folder.as_str()), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );

        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| AccountError::InvalidUpload(format!("Unsupported content type: {e}")))?;

        let form = Form::new()
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.clone())
            .text("signature", signature)
            .part("file", part);

        let response = self
            .client
            .post(self.config.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AccountError::MediaUpload(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AccountError::MediaUpload(Self::error_message(response).await));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AccountError::MediaUpload(format!("Unexpected upload response: {e}")))?;

        tracing::debug!(folder = %folder, public_id = %body.public_id, "Uploaded media");

        Ok(MediaAsset::new(body.public_id, body.secure_url))
    }

    async fn destroy(&self, public_id: &str) -> AccountResult<()> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );

        let response = self
            .client
            .post(self.config.endpoint("destroy"))
            .form(&[
                ("public_id", public_id),
                ("timestamp", timestamp.as_str()),
                ("api_key", self.config.api_key.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AccountError::MediaUpload(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AccountError::MediaUpload(Self::error_message(response).await));
        }

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| AccountError::MediaUpload(format!("Unexpected destroy response: {e}")))?;

        // Already gone is as good as deleted
        match body.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(AccountError::MediaUpload(format!(
                "Destroy of {public_id} returned {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_documented_vector() {
        let signature = sign_params(
            &[
                ("timestamp", "1315060510"),
                ("public_id", "sample_image"),
                ("eager", "w_400,h_300,c_pad|w_260,h_200,c_crop"),
            ],
            "abcd",
        );
        assert_eq!(signature, "bfd09f95f331f558cbd1320e67aa8d488770583e");
    }

    #[test]
    fn test_signature_upload_and_destroy_params() {
        assert_eq!(
            sign_params(
                &[("folder", "PORTFOLIO AVATAR"), ("timestamp", "1700000000")],
                "secret"
            ),
            "ba5f602082397750769edcddc37522a7f7b42b77"
        );
        assert_eq!(
            sign_params(
                &[("timestamp", "1700000000"), ("public_id", "PORTFOLIO AVATAR/abc")],
                "secret"
            ),
            "5ea98b4ca6cbcf2d75749dff8c2bbaaeb278187e"
        );
    }

    #[test]
    fn test_empty_params_are_not_signed() {
        assert_eq!(
            sign_params(&[("folder", ""), ("timestamp", "1")], "s"),
            sign_params(&[("timestamp", "1")], "s")
        );
    }

    #[test]
    fn test_endpoint_and_debug() {
        let mut config = CloudinaryConfig::new("demo", "key", "top-secret");
        assert_eq!(
            config.endpoint("upload"),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );

        config.base_url = "http://127.0.0.1:9000/".to_string();
        assert_eq!(
            config.endpoint("destroy"),
            "http://127.0.0.1:9000/v1_1/demo/image/destroy"
        );
        assert!(!format!("{config:?}").contains("top-secret"));
    }
}
