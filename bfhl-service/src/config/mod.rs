use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Placeholder address echoed when `OFFICIAL_EMAIL` is not set.
pub const DEFAULT_OFFICIAL_EMAIL: &str = "test@chitkara.edu.in";

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 10;
const DEFAULT_AI_MAX_CONCURRENCY: usize = 16;

#[derive(Debug, Clone)]
pub struct BfhlConfig {
    pub common: core_config::Config,
    pub official_email: String,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// Empty when unset; calls then fail and answer `"Error"`.
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Upper bound on in-flight outbound calls.
    pub max_concurrency: usize,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout_secs: DEFAULT_GEMINI_TIMEOUT_SECS,
            max_concurrency: DEFAULT_AI_MAX_CONCURRENCY,
        }
    }
}

impl BfhlConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(BfhlConfig {
            common: common_config,
            official_email: get_env("OFFICIAL_EMAIL", Some(DEFAULT_OFFICIAL_EMAIL), is_prod)?,
            gemini: GeminiSettings {
                api_key: get_env("GEMINI_API_KEY", Some(""), is_prod)?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), is_prod)?,
                model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL), is_prod)?,
                timeout_secs: parse_env(
                    "GEMINI_TIMEOUT_SECS",
                    DEFAULT_GEMINI_TIMEOUT_SECS,
                    is_prod,
                )?,
                max_concurrency: parse_env(
                    "AI_MAX_CONCURRENCY",
                    DEFAULT_AI_MAX_CONCURRENCY,
                    is_prod,
                )?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_env<T>(key: &str, default: T, is_prod: bool) -> Result<T, AppError>
where
    T: std::str::FromStr + ToString,
    T::Err: std::fmt::Display,
{
    get_env(key, Some(&default.to_string()), is_prod)?
        .parse()
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!("{} is invalid: {}", key, e)))
}
