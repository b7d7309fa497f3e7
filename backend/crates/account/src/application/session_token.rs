//! Session Token
//!
//! Cookie value `<session_id>.<base64url(HMAC-SHA256(session_id))>`, and
//! the shared step that opens a session for a freshly authenticated user.

use kernel::id::{SessionId, UserId};
use platform::client::ClientInfo;
use platform::crypto::{constant_time_eq, from_base64_url, hmac_sha256, to_base64_url};

use crate::application::config::AccountConfig;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::{AccountError, AccountResult};

/// Sign a session ID for the cookie
pub fn sign_session_token(session_id: &SessionId, secret: &[u8; 32]) -> String {
    let id = session_id.to_string();
    let signature = hmac_sha256(secret, id.as_bytes());
    format!("{}.{}", id, to_base64_url(&signature))
}

/// Verify the signature and recover the session ID
pub fn parse_session_token(token: &str, secret: &[u8; 32]) -> AccountResult<SessionId> {
    let (id, signature_b64) = token
        .split_once('.')
        .ok_or(AccountError::SessionInvalid)?;

    let signature = from_base64_url(signature_b64).map_err(|_| AccountError::SessionInvalid)?;
    let expected = hmac_sha256(secret, id.as_bytes());
    if !constant_time_eq(&signature, &expected) {
        return Err(AccountError::SessionInvalid);
    }

    id.parse().map_err(|_| AccountError::SessionInvalid)
}

/// Persist a new session for `user_id` and return its signed token
pub(crate) async fn open_session<S>(
    session_repo: &S,
    config: &AccountConfig,
    user_id: UserId,
    client: &ClientInfo,
) -> AccountResult<String>
where
    S: SessionRepository,
{
    let session = Session::new(user_id, config.session_ttl_delta()?, client);
    session_repo.create(&session).await?;

    tracing::debug!(
        user_id = %session.user_id,
        session_id = %session.session_id,
        "Session opened"
    );

    Ok(sign_session_token(&session.session_id, &config.session_secret))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_sign_and_parse() {
        let id = SessionId::new();
        let token = sign_session_token(&id, &SECRET);
        assert!(token.starts_with(&id.to_string()));
        assert_eq!(parse_session_token(&token, &SECRET).unwrap(), id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign_session_token(&SessionId::new(), &SECRET);
        assert!(matches!(
            parse_session_token(&token, &[8u8; 32]),
            Err(AccountError::SessionInvalid)
        ));
    }

    #[test]
    fn test_tampered_id_rejected() {
        let token = sign_session_token(&SessionId::new(), &SECRET);
        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", SessionId::new(), signature);
        assert!(parse_session_token(&forged, &SECRET).is_err());
    }

    #[test]
    fn test_malformed_rejected() {
        for bad in ["", "no-dot", "a.b.c", ".", "not-a-uuid.AAAA", "x.!!!"] {
            assert!(parse_session_token(bad, &SECRET).is_err(), "{bad}");
        }
    }
}
