use anyhow::{Context, Result};

const DEFAULT_TOP_N: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_APPLICATION_BASE_URL: &str = "https://example.com/apply";

/// Application configuration loaded from environment variables.
/// Startup fails if `MATCHER_URL` is missing or a numeric variable does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub matcher_url: String,
    pub matcher_top_n: u32,
    pub matcher_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub application_base_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            matcher_url: require_env("MATCHER_URL")?,
            matcher_top_n: parse_env("MATCHER_TOP_N", DEFAULT_TOP_N)?,
            matcher_timeout_secs: parse_env("MATCHER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            application_base_url: std::env::var("APPLICATION_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_APPLICATION_BASE_URL.to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Upload ceiling rendered for user-facing messages, e.g. "10MB".
    pub fn max_upload_label(&self) -> String {
        const KB: usize = 1024;
        const MB: usize = 1024 * 1024;
        match self.max_upload_bytes {
            n if n >= MB && n % MB == 0 => format!("{}MB", n / MB),
            n if n >= MB => format!("{:.1}MB", n as f64 / MB as f64),
            n if n >= KB => format!("{}KB", n / KB),
            n => format!("{n} bytes"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            matcher_url: "http://localhost:8000/match".to_string(),
            matcher_top_n: DEFAULT_TOP_N,
            matcher_timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            application_base_url: DEFAULT_APPLICATION_BASE_URL.to_string(),
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
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
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_upload_label_is_ten_megabytes() {
        assert_eq!(Config::default().max_upload_label(), "10MB");
    }

    #[test]
    fn test_fractional_upload_label() {
        let config = Config {
            max_upload_bytes: 1536 * 1024,
            ..Config::default()
        };
        assert_eq!(config.max_upload_label(), "1.5MB");
    }

    #[test]
    fn test_small_upload_labels() {
        let kb = Config {
            max_upload_bytes: 512 * 1024,
            ..Config::default()
        };
        assert_eq!(kb.max_upload_label(), "512KB");
        let bytes = Config {
            max_upload_bytes: 64,
            ..Config::default()
        };
        assert_eq!(bytes.max_upload_label(), "64 bytes");
    }

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let value: u32 = parse_env("MATCHER_API_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }
}
