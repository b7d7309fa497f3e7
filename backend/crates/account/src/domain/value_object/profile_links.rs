//! Profile Links Value Object
//!
//! The portfolio and social links shown on the public page. Every link is
//! optional; a present link must be an absolute http(s) URL.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use reqwest::Url;

const LINK_MAX_LENGTH: usize = 2048;

/// Which link a value belongs to. Displays as its form/JSON field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum LinkKind {
    #[display("portfolioURL")]
    Portfolio,
    #[display("githubURL")]
    Github,
    #[display("instagramURL")]
    Instagram,
    #[display("twitterURL")]
    Twitter,
    #[display("facebookURL")]
    Facebook,
    #[display("linkedInURL")]
    LinkedIn,
}

impl LinkKind {
    pub const ALL: [LinkKind; 6] = [
        LinkKind::Portfolio,
        LinkKind::Github,
        LinkKind::Instagram,
        LinkKind::Twitter,
        LinkKind::Facebook,
        LinkKind::LinkedIn,
    ];
}

/// Validate one link. Blank input means "no link".
pub fn parse_link(kind: LinkKind, raw: &str) -> AppResult<Option<String>> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.len() > LINK_MAX_LENGTH {
        return Err(AppError::bad_request(format!("{kind} is too long")));
    }

    let url = Url::parse(value).map_err(|_| {
        AppError::bad_request(format!("{kind} must be a valid URL"))
            .with_action("Include the scheme, e.g. https://")
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(AppError::bad_request(format!(
            "{kind} must be an http or https URL"
        )));
    }

    Ok(Some(value.to_string()))
}

/// All profile links of a user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileLinks {
    pub portfolio: Option<String>,
    pub github: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
}

impl ProfileLinks {
    pub fn get(&self, kind: LinkKind) -> Option<&str> {
        self.slot(kind).as_deref()
    }

    /// Validate and store a link; blank input clears it.
    pub fn set(&mut self, kind: LinkKind, raw: &str) -> AppResult<()> {
        *self.slot_mut(kind) = parse_link(kind, raw)?;
        Ok(())
    }

    /// Build from raw form values, validating every present link
    pub fn from_raw<'a>(
        values: impl IntoIterator<Item = (LinkKind, &'a str)>,
    ) -> AppResult<Self> {
        let mut links = Self::default();
        for (kind, raw) in values {
            links.set(kind, raw)?;
        }
        Ok(links)
    }

    fn slot(&self, kind: LinkKind) -> &Option<String> {
        match kind {
            LinkKind::Portfolio => &self.portfolio,
            LinkKind::Github => &self.github,
            LinkKind::Instagram => &self.instagram,
            LinkKind::Twitter => &self.twitter,
            LinkKind::Facebook => &self.facebook,
            LinkKind::LinkedIn => &self.linkedin,
        }
    }

    fn slot_mut(&mut self, kind: LinkKind) -> &mut Option<String> {
        match kind {
            LinkKind::Portfolio => &mut self.portfolio,
            LinkKind::Github => &mut self.github,
            LinkKind::Instagram => &mut self.instagram,
            LinkKind::Twitter => &mut self.twitter,
            LinkKind::Facebook => &mut self.facebook,
            LinkKind::LinkedIn => &mut self.linkedin,
        }
    }
}
