//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{SessionId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    media_asset::MediaAsset,
    profile_links::ProfileLinks,
    profile_text::{AboutMe, FullName, Phone},
    user_password::UserPassword,
};
use crate::error::{AccountError, AccountResult};

const USER_COLUMNS: &str = r#"
    user_id,
    full_name,
    email,
    phone,
    about_me,
    password_hash,
    portfolio_url,
    github_url,
    instagram_url,
    twitter_url,
    facebook_url,
    linkedin_url,
    avatar_public_id,
    avatar_url,
    resume_public_id,
    resume_url,
    reset_password_token,
    reset_password_expire,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired sessions
    pub async fn cleanup_expired_sessions(&self) -> AccountResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }

    /// Drop reset tokens whose deadline has passed
    pub async fn clear_expired_reset_tokens(&self) -> AccountResult<u64> {
        let cleared = sqlx::query(
            r#"
            UPDATE users SET
                reset_password_token = NULL,
                reset_password_expire = NULL
            WHERE reset_password_expire IS NOT NULL
              AND reset_password_expire <= $1
            "#,
        )
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        tracing::info!(tokens_cleared = cleared, "Cleared expired reset tokens");

        Ok(cleared)
    }
}

fn select_users(filter: &str) -> String {
    format!("SELECT {USER_COLUMNS} FROM users WHERE {filter}")
}

/// Unique violation on `users.email` means the address is taken
fn map_user_write_error(err: sqlx::Error) -> AccountError {
    let is_unique_violation = err
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505");

    if is_unique_violation {
        AccountError::EmailTaken
    } else {
        AccountError::Database(err)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAccountRepository {
    async fn create(&self, user: &User) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                full_name,
                email,
                phone,
                about_me,
                password_hash,
                portfolio_url,
                github_url,
                instagram_url,
                twitter_url,
                facebook_url,
                linkedin_url,
                avatar_public_id,
                avatar_url,
                resume_public_id,
                resume_url,
                reset_password_token,
                reset_password_expire,
                created_at,
                updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
            )
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.full_name.as_str())
        .bind(user.email.as_str())
        .bind(user.phone.as_str())
        .bind(user.about_me.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.links.portfolio.as_deref())
        .bind(user.links.github.as_deref())
        .bind(user.links.instagram.as_deref())
        .bind(user.links.twitter.as_deref())
        .bind(user.links.facebook.as_deref())
        .bind(user.links.linkedin.as_deref())
        .bind(&user.avatar.public_id)
        .bind(&user.avatar.url)
        .bind(&user.resume.public_id)
        .bind(&user.resume.url)
        .bind(user.reset_password_token.as_deref())
        .bind(user.reset_password_expire)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_user_write_error)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
        let sql = select_users("user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        let sql = select_users("email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_by_reset_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> AccountResult<Option<User>> {
        let sql = select_users("reset_password_token = $1 AND reset_password_expire > $2");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(token_hash)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn update_profile(&self, user: &User) -> AccountResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                full_name = $2,
                email = $3,
                phone = $4,
                about_me = $5,
                portfolio_url = $6,
                github_url = $7,
                instagram_url = $8,
                twitter_url = $9,
                facebook_url = $10,
                linkedin_url = $11,
                avatar_public_id = $12,
                avatar_url = $13,
                resume_public_id = $14,
                resume_url = $15,
                updated_at = $16
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.full_name.as_str())
        .bind(user.email.as_str())
        .bind(user.phone.as_str())
        .bind(user.about_me.as_str())
        .bind(user.links.portfolio.as_deref())
        .bind(user.links.github.as_deref())
        .bind(user.links.instagram.as_deref())
        .bind(user.links.twitter.as_deref())
        .bind(user.links.facebook.as_deref())
        .bind(user.links.linkedin.as_deref())
        .bind(&user.avatar.public_id)
        .bind(&user.avatar.url)
        .bind(&user.resume.public_id)
        .bind(&user.resume.url)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_user_write_error)?;

        Ok(())
    }

    async fn update_password(&self, user: &User) -> AccountResult<()> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = $3 WHERE user_id = $1")
            .bind(user.user_id.as_uuid())
            .bind(user.password.as_phc_string())
            .bind(user.updated_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn save_reset_token(&self, user: &User) -> AccountResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                reset_password_token = $2,
                reset_password_expire = $3,
                updated_at = $4
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.reset_password_token.as_deref())
        .bind(user.reset_password_expire)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn clear_reset_token(&self, user_id: &UserId, token_hash: &str) -> AccountResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                reset_password_token = NULL,
                reset_password_expire = NULL
            WHERE user_id = $1 AND reset_password_token = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(token_hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn consume_reset_token(
        &self,
        token_hash: &str,
        password: &UserPassword,
        now: DateTime<Utc>,
    ) -> AccountResult<Option<User>> {
        let sql = format!(
            r#"
            UPDATE users SET
                password_hash = $2,
                reset_password_token = NULL,
                reset_password_expire = NULL,
                updated_at = $3
            WHERE reset_password_token = $1
              AND reset_password_expire > $3
            RETURNING {USER_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(token_hash)
            .bind(password.as_phc_string())
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAccountRepository {
    async fn create(&self, session: &Session) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                session_id,
                user_id,
                expires_at_ms,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.expires_at_ms)
        .bind(session.client_ip.as_deref())
        .bind(session.user_agent.as_deref())
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: &SessionId) -> AccountResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                expires_at_ms,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn update(&self, session: &Session) -> AccountResult<()> {
        sqlx::query(
            r#"
            UPDATE sessions SET
                expires_at_ms = $2,
                last_activity_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id.as_uuid())
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> AccountResult<()> {
        sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_all_for_user(
        &self,
        user_id: &UserId,
        except: Option<&SessionId>,
    ) -> AccountResult<u64> {
        let deleted = match except {
            Some(keep) => {
                sqlx::query("DELETE FROM sessions WHERE user_id = $1 AND session_id <> $2")
                    .bind(user_id.as_uuid())
                    .bind(keep.as_uuid())
                    .execute(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("DELETE FROM sessions WHERE user_id = $1")
                    .bind(user_id.as_uuid())
                    .execute(&self.pool)
                    .await?
            }
        }
        .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    full_name: String,
    email: String,
    phone: String,
    about_me: String,
    password_hash: String,
    portfolio_url: Option<String>,
    github_url: Option<String>,
    instagram_url: Option<String>,
    twitter_url: Option<String>,
    facebook_url: Option<String>,
    linkedin_url: Option<String>,
    avatar_public_id: String,
    avatar_url: String,
    resume_public_id: String,
    resume_url: String,
    reset_password_token: Option<String>,
    reset_password_expire: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AccountResult<User> {
        let password = UserPassword::from_phc_string(self.password_hash)?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            full_name: FullName::from_db(self.full_name),
            email: Email::from_db(self.email),
            phone: Phone::from_db(self.phone),
            about_me: AboutMe::from_db(self.about_me),
            password,
            links: ProfileLinks {
                portfolio: self.portfolio_url,
                github: self.github_url,
                instagram: self.instagram_url,
                twitter: self.twitter_url,
                facebook: self.facebook_url,
                linkedin: self.linkedin_url,
            },
            avatar: MediaAsset::new(self.avatar_public_id, self.avatar_url),
            resume: MediaAsset::new(self.resume_public_id, self.resume_url),
            reset_password_token: self.reset_password_token,
            reset_password_expire: self.reset_password_expire,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: Uuid,
    expires_at_ms: i64,
    client_ip: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: SessionId::from_uuid(self.session_id),
            user_id: UserId::from_uuid(self.user_id),
            expires_at_ms: self.expires_at_ms,
            client_ip: self.client_ip,
            user_agent: self.user_agent,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        }
    }
}
