use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// JSON bodies above this are rejected with 413.
pub const DEFAULT_JSON_BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

/// Per-file upload cap.
pub const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub limits: LimitsConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct LimitsConfig {
    pub json_body_bytes: usize,
    pub upload_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct StaticFilesConfig {
    pub dir: PathBuf,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            json_body_bytes: DEFAULT_JSON_BODY_LIMIT_BYTES,
            upload_bytes: DEFAULT_UPLOAD_LIMIT_BYTES,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from the environment.
    ///
    /// Fails when no API credential is set; the process must not start
    /// without one.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let api_key = get_env("GEMINI_API_KEY", None)
            .or_else(|_| get_env("GOOGLE_API_KEY", None))
            .map_err(|_| {
                AppError::ConfigError(anyhow::anyhow!(
                    "GEMINI_API_KEY is required but not set"
                ))
            })?;

        Ok(GatewayConfig {
            common,
            gemini: GeminiSettings {
                api_key: Secret::new(api_key),
                model: get_env("GEMINI_MODEL", Some(DEFAULT_MODEL))?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_API_BASE))?,
                timeout_secs: parse_env("GEMINI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            },
            limits: LimitsConfig {
                json_body_bytes: parse_env(
                    "JSON_BODY_LIMIT_BYTES",
                    DEFAULT_JSON_BODY_LIMIT_BYTES,
                )?,
                upload_bytes: parse_env("UPLOAD_LIMIT_BYTES", DEFAULT_UPLOAD_LIMIT_BYTES)?,
            },
            static_files: StaticFilesConfig {
                dir: PathBuf::from(get_env("STATIC_DIR", Some("public"))?),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Ok(val.trim().to_string()),
        _ => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr + ToString,
    T::Err: std::fmt::Display,
{
    parse_value(key, &get_env(key, Some(&default.to_string()))?)
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_accepts_numbers() {
        let limit: usize = parse_value("UPLOAD_LIMIT_BYTES", "1024").unwrap();
        assert_eq!(limit, 1024);
    }

    #[test]
    fn parse_value_rejects_garbage() {
        let err = parse_value::<u64>("GEMINI_TIMEOUT_SECS", "soon").unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("GEMINI_TIMEOUT_SECS"));
    }

    #[test]
    fn unset_variable_without_default_is_an_error() {
        let err = get_env("GENAI_GATEWAY_TEST_SURELY_UNSET", None).unwrap_err();
        assert!(err.to_string().contains("is required but not set"));
    }

    #[test]
    fn unset_variable_uses_default() {
        let value = get_env("GENAI_GATEWAY_TEST_SURELY_UNSET", Some("fallback")).unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn default_limits() {
        let limits = LimitsConfig::default();
        assert_eq!(limits.json_body_bytes, 2 * 1024 * 1024);
        assert_eq!(limits.upload_bytes, 10 * 1024 * 1024);
    }
}
