use crate::errors::{CompassError, CompassResult};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub anthropic_api_key: String,
    pub anthropic_base_url: String,
    pub narration_model: String,
    pub narration_max_tokens: u32,
    pub narration_timeout_secs: u64,
    pub server_port: u16,
    pub static_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> CompassResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so parsing can be
    /// exercised without touching the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CompassResult<Self> {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let narration_max_tokens = var_or("NARRATION_MAX_TOKENS", "1024")
            .parse::<u32>()
            .map_err(|e| CompassError::Config(format!("NARRATION_MAX_TOKENS: {e}")))?;

        let narration_timeout_secs = var_or("NARRATION_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|e| CompassError::Config(format!("NARRATION_TIMEOUT_SECS: {e}")))?;

        let server_port = var_or("SERVER_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| CompassError::Config(format!("SERVER_PORT: {e}")))?;

        let anthropic_api_key = lookup("ANTHROPIC_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CompassError::Config("missing env var: ANTHROPIC_API_KEY".into()))?;

        Ok(Self {
            anthropic_api_key,
            anthropic_base_url: var_or("ANTHROPIC_BASE_URL", "https://api.anthropic.com"),
            narration_model: var_or("NARRATION_MODEL", "claude-sonnet-4-20250514"),
            narration_max_tokens,
            narration_timeout_secs,
            server_port,
            static_dir: PathBuf::from(var_or("STATIC_DIR", "web/dist")),
        })
    }
}
