use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("sign in rejected with HTTP {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("failed to decode auth response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppMetadata {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: uuid::Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub app_metadata: AppMetadata,
}

/// A signed-in user. Dropping the session is the only sign-out; nothing
/// is persisted locally.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: AuthUser,
}

impl Session {
    /// Admin capability comes from the `role` claim Supabase stamps
    /// into app metadata, which only the service role can write.
    pub fn is_admin(&self) -> bool {
        self.user.app_metadata.role.as_deref() == Some("admin")
    }
}

/// Password sign-in against the Supabase auth endpoint.
#[derive(Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    token_url: String,
    anon_key: String,
}

impl AuthClient {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            token_url: format!(
                "{}/auth/v1/token?grant_type=password",
                base_url.trim_end_matches('/')
            ),
            anon_key: anon_key.to_string(),
        }
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        debug!("signing in {email}");

        let response = self
            .client
            .post(&self.token_url)
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message: text,
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}
