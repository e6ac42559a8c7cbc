//! Client-side session context: a convenience holder of the current
//! identity for UI layers. Authorization is always enforced server-side;
//! this state is only a cache of the server-asserted identity.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::auth::repo::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
struct MeBody {
    authenticated: bool,
    user: Option<SessionUser>,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    user: LoginUser,
}

#[derive(Debug, Deserialize)]
struct LoginUser {
    id: Uuid,
    email: String,
    role: Role,
}

/// Current-user state over a cookie-keeping HTTP client. `loading` is true
/// until the first "who am I" check completes.
pub struct SessionContext {
    http: reqwest::Client,
    base_url: String,
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl SessionContext {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            user: None,
            loading: true,
        })
    }

    /// Re-run the "who am I" check; any failure clears the local identity.
    pub async fn refresh(&mut self) -> anyhow::Result<()> {
        let url = format!("{}/api/auth/me", self.base_url);
        let result = async {
            let res = self.http.get(&url).send().await.context("GET /api/auth/me")?;
            let body: MeBody = res.json().await.context("decode me response")?;
            Ok::<_, anyhow::Error>(body)
        }
        .await;

        self.user = match result {
            Ok(body) if body.authenticated => body.user,
            Ok(_) => None,
            Err(e) => {
                debug!(error = %e, "who-am-I check failed");
                None
            }
        };
        self.loading = false;
        Ok(())
    }

    /// Submit credentials; on success the session cookie is kept by the
    /// client and the identity is set locally.
    pub async fn login(&mut self, email: &str, password: &str) -> anyhow::Result<()> {
        let url = format!("{}/api/auth/login", self.base_url);
        let res = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .context("POST /api/auth/login")?;

        if !res.status().is_success() {
            anyhow::bail!("login failed with status {}", res.status());
        }

        let body: LoginBody = res.json().await.context("decode login response")?;
        self.user = Some(SessionUser {
            id: body.user.id,
            email: body.user.email,
            role: body.user.role,
        });
        self.loading = false;
        Ok(())
    }

    /// Terminate the server-side session and clear the local identity.
    pub async fn logout(&mut self) -> anyhow::Result<()> {
        let url = format!("{}/api/auth/logout", self.base_url);
        self.http
            .post(&url)
            .send()
            .await
            .context("POST /api/auth/logout")?;
        self.user = None;
        Ok(())
    }
}
