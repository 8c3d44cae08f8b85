use secrecy::Secret;
use service_core::config::{self as core_config, is_production, resolve};
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Default Gemini REST endpoint.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct UploadConfig {
    /// Optional request body cap. `None` leaves uploads unbounded.
    pub max_upload_bytes: Option<usize>,
}

impl OcrConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// `GEMINI_API_KEY` is mandatory in every environment; an empty value is
    /// treated as missing.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = is_production(lookup("ENVIRONMENT").as_deref());

        let api_key = resolve(
            "GEMINI_API_KEY",
            lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty()),
            None,
            is_prod,
        )?;

        let timeout_secs: u64 = resolve(
            "GEMINI_TIMEOUT_SECS",
            lookup("GEMINI_TIMEOUT_SECS"),
            Some(&DEFAULT_GEMINI_TIMEOUT_SECS.to_string()),
            is_prod,
        )?
        .parse()
        .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("GEMINI_TIMEOUT_SECS is invalid: {}", e))
        })?;

        let max_upload_bytes = lookup("OCR_MAX_UPLOAD_BYTES")
            .map(|raw| {
                raw.parse::<usize>().map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!("OCR_MAX_UPLOAD_BYTES is invalid: {}", e))
                })
            })
            .transpose()?;

        Ok(OcrConfig {
            common,
            gemini: GeminiSettings {
                api_key: Secret::new(api_key),
                model: resolve(
                    "GEMINI_MODEL",
                    lookup("GEMINI_MODEL"),
                    Some(DEFAULT_GEMINI_MODEL),
                    is_prod,
                )?,
                api_base: resolve(
                    "GEMINI_API_BASE",
                    lookup("GEMINI_API_BASE"),
                    Some(DEFAULT_GEMINI_API_BASE),
                    is_prod,
                )?
                .trim_end_matches('/')
                .to_string(),
                timeout: Duration::from_secs(timeout_secs),
            },
            upload: UploadConfig { max_upload_bytes },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<OcrConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        OcrConfig::from_lookup(core_config::Config::default(), |key| vars.get(key).cloned())
    }

    #[test]
    fn applies_defaults_when_only_credential_is_set() {
        let config = load(&[("GEMINI_API_KEY", "test-key")]).unwrap();

        assert_eq!(config.gemini.api_key.expose_secret(), "test-key");
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.gemini.api_base, DEFAULT_GEMINI_API_BASE);
        assert_eq!(config.gemini.timeout, Duration::from_secs(120));
        assert_eq!(config.upload.max_upload_bytes, None);
        assert_eq!(config.common.port, 8080);
    }

    #[test]
    fn missing_credential_is_a_config_error() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let err = load(&[("GEMINI_API_KEY", "   ")]).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn overrides_are_honoured() {
        let config = load(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("GEMINI_API_BASE", "http://localhost:9999/"),
            ("GEMINI_TIMEOUT_SECS", "5"),
            ("OCR_MAX_UPLOAD_BYTES", "1048576"),
        ])
        .unwrap();

        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.api_base, "http://localhost:9999");
        assert_eq!(config.gemini.timeout, Duration::from_secs(5));
        assert_eq!(config.upload.max_upload_bytes, Some(1_048_576));
    }

    #[test]
    fn production_requires_every_setting() {
        let err = load(&[("ENVIRONMENT", "prod"), ("GEMINI_API_KEY", "k")]).unwrap_err();
        assert!(err.to_string().contains("required in production"));
    }

    #[test]
    fn rejects_non_numeric_upload_limit() {
        let err = load(&[("GEMINI_API_KEY", "k"), ("OCR_MAX_UPLOAD_BYTES", "lots")]).unwrap_err();
        assert!(err.to_string().contains("OCR_MAX_UPLOAD_BYTES"));
    }
}
