use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::repo::{Role, User};
use crate::config::SessionConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Name of the HTTP-only session cookie.
pub const SESSION_COOKIE: &str = "techhub_session";

/// Session payload. The embedded role is a snapshot at issuance time;
/// admin authorization re-reads the current role from the store.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

/// Signing and verification keys plus cookie settings.
#[derive(Clone)]
pub struct SessionKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
    pub cookie_secure: bool,
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        let SessionConfig {
            secret,
            issuer,
            audience,
            ttl_hours,
            cookie_secure,
        } = state.config.session.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            ttl: Duration::from_secs((ttl_hours as u64) * 3600),
            cookie_secure,
        }
    }
}

impl SessionKeys {
    pub fn sign(&self, user: &User) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user.id, role = %user.role, "session signed");
        Ok(token)
    }

    /// Fails closed: tampered, expired and malformed tokens are all errors.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, "session verified");
        Ok(data.claims)
    }

    /// HTTP-only, strict same-site session cookie, path `/`.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.cookie_secure)
            .path("/")
            .max_age(TimeDuration::seconds(self.ttl.as_secs() as i64))
            .build()
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.cookie_secure)
            .path("/")
            .max_age(TimeDuration::ZERO)
            .build()
    }
}

/// Authenticated caller as asserted by the session cookie.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Extracts and validates the session cookie. Missing, expired and
/// tampered sessions are all treated identically as "no session".
pub struct CurrentUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = SessionKeys::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar
            .get(SESSION_COOKIE)
            .ok_or_else(|| ApiError::Authentication("Not authenticated".into()))?;

        let claims = match keys.verify(cookie.value()) {
            Ok(c) => c,
            Err(_) => {
                warn!("invalid or expired session cookie");
                return Err(ApiError::Authentication("Not authenticated".into()));
            }
        };

        Ok(CurrentUser(Identity {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn make_keys() -> SessionKeys {
        SessionKeys::from_ref(&AppState::fake())
    }

    fn make_user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            email: "ada@x.com".into(),
            password_hash: "hash".into(),
            role,
            is_verified: true,
            verification_token: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[tokio::test]
    async fn sign_and_verify_roundtrip() {
        let keys = make_keys();
        let user = make_user(Role::Admin);
        let token = keys.sign(&user).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, "ada@x.com");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
    }

    #[tokio::test]
    async fn verify_rejects_tampered_token() {
        let keys = make_keys();
        let token = keys.sign(&make_user(Role::User)).expect("sign");
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(keys.verify(&tampered).is_err());
    }

    #[tokio::test]
    async fn verify_rejects_wrong_secret() {
        let keys = make_keys();
        let other = SessionKeys {
            encoding: EncodingKey::from_secret(b"other-secret"),
            decoding: DecodingKey::from_secret(b"other-secret"),
            issuer: keys.issuer.clone(),
            audience: keys.audience.clone(),
            ttl: keys.ttl,
            cookie_secure: false,
        };
        let token = other.sign(&make_user(Role::User)).expect("sign");
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn verify_rejects_malformed_token() {
        let keys = make_keys();
        assert!(keys.verify("not-a-jwt").is_err());
    }

    #[tokio::test]
    async fn session_cookie_attributes() {
        let keys = make_keys();
        let cookie = keys.session_cookie("tok".into());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(TimeDuration::hours(24)));
    }

    #[tokio::test]
    async fn removal_cookie_expires_immediately() {
        let keys = make_keys();
        let cookie = keys.removal_cookie();
        assert_eq!(cookie.max_age(), Some(TimeDuration::ZERO));
        assert_eq!(cookie.value(), "");
    }
}
