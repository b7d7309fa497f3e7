//! Session Entity
//!
//! Server-side login session. The cookie only carries a signed reference
//! to this row.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{SessionId, UserId};
use platform::client::ClientInfo;

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: SessionId,
    pub user_id: UserId,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Client IP (for logging)
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl Session {
    /// TTL is provided by the application layer (config).
    pub fn new(user_id: UserId, ttl: Duration, client: &ClientInfo) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::new(),
            user_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            client_ip: client.ip_string(),
            user_agent: client.user_agent.clone(),
            created_at: now,
            last_activity_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() >= self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    pub fn remaining_ms(&self) -> i64 {
        (self.expires_at_ms - Utc::now().timestamp_millis()).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let client = ClientInfo {
            ip: Some("203.0.113.9".parse().unwrap()),
            user_agent: Some("curl/8.0".to_string()),
        };
        let session = Session::new(UserId::new(), Duration::days(7), &client);

        assert!(!session.is_expired());
        assert_eq!(session.client_ip.as_deref(), Some("203.0.113.9"));
        assert!(session.remaining_ms() > Duration::days(6).num_milliseconds());
    }

    #[test]
    fn test_expiry() {
        let session = Session::new(UserId::new(), Duration::minutes(1), &ClientInfo::default());
        assert!(!session.is_expired_at(Utc::now()));
        assert!(session.is_expired_at(Utc::now() + Duration::minutes(2)));
    }
}
