use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

/// Outbound email seam. The real client talks to a hosted email API;
/// `NoopMailer` stands in when no API key is configured.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_verification(&self, to: &str, verify_url: &str) -> anyhow::Result<()>;
}

pub struct ResendMailer {
    http: reqwest::Client,
    api_key: String,
    from: String,
}

impl ResendMailer {
    pub fn new(api_key: &str, from: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            from: from.to_string(),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_verification(&self, to: &str, verify_url: &str) -> anyhow::Result<()> {
        let body = json!({
            "from": self.from,
            "to": [to],
            "subject": "Verify your TechHub account",
            "html": format!(
                "<p>Welcome to TechHub!</p>\
                 <p>Click <a href=\"{verify_url}\">here</a> to verify your email address.</p>"
            ),
        });
        let res = self
            .http
            .post("https://api.resend.com/emails")
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("send verification email")?;
        if !res.status().is_success() {
            anyhow::bail!("email API returned {}", res.status());
        }
        Ok(())
    }
}

pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send_verification(&self, to: &str, verify_url: &str) -> anyhow::Result<()> {
        debug!(%to, %verify_url, "mail disabled, skipping verification email");
        Ok(())
    }
}
