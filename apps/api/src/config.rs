use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub session_ttl_minutes: i64,
    pub session_sweep_seconds: u64,
    pub anthropic_api_key: Option<String>,
    pub enable_llm_suggestions: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            session_ttl_minutes: parse_env("SESSION_TTL_MINUTES", 60)?,
            session_sweep_seconds: parse_env("SESSION_SWEEP_SECONDS", 300)?,
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            enable_llm_suggestions: parse_env("ENABLE_LLM_SUGGESTIONS", false)?,
        })
    }

    /// The LLM backend is used only when enabled and a key is present.
    pub fn llm_api_key(&self) -> Option<&str> {
        if self.enable_llm_suggestions {
            self.anthropic_api_key.as_deref()
        } else {
            None
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(key: Option<&str>, enabled: bool) -> Config {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: 1024,
            session_ttl_minutes: 60,
            session_sweep_seconds: 300,
            anthropic_api_key: key.map(String::from),
            enable_llm_suggestions: enabled,
        }
    }

    #[test]
    fn test_llm_key_requires_flag_and_key() {
        assert_eq!(config(Some("sk"), true).llm_api_key(), Some("sk"));
        assert_eq!(config(Some("sk"), false).llm_api_key(), None);
        assert_eq!(config(None, true).llm_api_key(), None);
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let port: u16 = parse_env("SCREENER_TEST_SURELY_UNSET_VAR", 4242).unwrap();
        assert_eq!(port, 4242);
    }
}
