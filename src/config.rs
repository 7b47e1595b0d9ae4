use std::time::Duration;

use crate::auth::AuthClient;
use crate::gateway::{Gateway, SupabaseClient};

/// Settings read once at startup. Missing Supabase credentials are not
/// fatal; the app runs with an unconfigured gateway and every remote
/// call reports that instead.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub razorpay_key_id: Option<String>,
    pub category_index_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            supabase_url: env_opt("SUPABASE_URL"),
            supabase_anon_key: env_opt("SUPABASE_ANON_KEY"),
            razorpay_key_id: env_opt("RAZORPAY_KEY_ID"),
            category_index_ttl: parse_duration_secs("TREK_CATEGORY_INDEX_TTL_SECS", 300),
        }
    }

    pub fn gateway(&self) -> Gateway<SupabaseClient> {
        match (&self.supabase_url, &self.supabase_anon_key) {
            (Some(url), Some(key)) => Gateway::configured(SupabaseClient::new(url, key)),
            _ => Gateway::Unconfigured,
        }
    }

    pub fn auth_client(&self) -> Option<AuthClient> {
        match (&self.supabase_url, &self.supabase_anon_key) {
            (Some(url), Some(key)) => Some(AuthClient::new(url, key)),
            _ => None,
        }
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_duration_secs(env_var: &str, default: u64) -> Duration {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}
