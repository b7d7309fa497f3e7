//! Request Extractors
//!
//! Multipart form collection, client info, and JSON bodies whose
//! rejections render as account errors.

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, FromRequestParts, Multipart};
use axum::http::request::Parts;
use kernel::error::app_error::AppError;
use platform::client::ClientInfo;

use crate::domain::value_object::media_asset::UploadedFile;
use crate::domain::value_object::profile_links::LinkKind;
use crate::error::{AccountError, AccountResult};

/// Caller IP and User-Agent.
///
/// Works with or without `into_make_service_with_connect_info`.
pub struct Client(pub ClientInfo);

impl<S> FromRequestParts<S> for Client
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let direct_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());

        Ok(Client(ClientInfo::from_headers(&parts.headers, direct_ip)))
    }
}

/// Unwrap a JSON body, turning syntax/shape errors into a 400
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AccountResult<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        AccountError::Validation(AppError::bad_request(rejection.body_text()))
    })
}

/// Every part of a multipart request, split into text fields and files
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> AccountResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AccountError::InvalidUpload(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AccountError::InvalidUpload(e.body_text()))?;
                    form.files
                        .insert(name, UploadedFile::new(file_name, content_type, bytes));
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AccountError::InvalidUpload(e.body_text()))?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// Link fields present in the form, keyed by their wire names
    pub fn take_links(&mut self) -> Vec<(LinkKind, String)> {
        LinkKind::ALL
            .into_iter()
            .filter_map(|kind| self.fields.remove(&kind.to_string()).map(|v| (kind, v)))
            .collect()
    }
}
