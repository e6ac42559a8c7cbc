use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_hours: i64,
    pub cookie_secure: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// When unset, outbound mail is disabled and accounts are created
    /// already-verified (development mode).
    pub api_key: Option<String>,
    pub from: String,
    pub app_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
    pub mail: MailConfig,
    /// Email address that is force-promoted to admin on every login.
    pub bootstrap_admin_email: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let session = SessionConfig {
            secret: std::env::var("SESSION_SECRET")?,
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "techhub".into()),
            audience: std::env::var("SESSION_AUDIENCE").unwrap_or_else(|_| "techhub-web".into()),
            ttl_hours: std::env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(24),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        };
        let mail = MailConfig {
            api_key: std::env::var("MAIL_API_KEY").ok().filter(|v| !v.is_empty()),
            from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "TechHub <noreply@techhub.local>".into()),
            app_base_url: std::env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
        };
        let bootstrap_admin_email = std::env::var("BOOTSTRAP_ADMIN_EMAIL")
            .ok()
            .filter(|v| !v.is_empty())
            .map(|v| v.trim().to_lowercase());
        Ok(Self {
            database_url,
            session,
            mail,
            bootstrap_admin_email,
        })
    }
}
