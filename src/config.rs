//! Service configuration loaded at startup.
//!
//! The only external knob the pipeline needs is the prediction service base
//! URL. The display locale rides along because every formatted output depends
//! on it. CLI flags take precedence over the environment (`.env` included).

use crate::domain::Locale;
use crate::error::AppError;

pub const ENV_API_URL: &str = "PANGAN_API_URL";
pub const ENV_LOCALE: &str = "PANGAN_LOCALE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL without a trailing slash (e.g. `http://127.0.0.1:5000`).
    pub base_url: String,
    pub locale: Locale,
}

impl ServiceConfig {
    /// Resolve from CLI overrides first, then the process environment.
    pub fn resolve(api_url: Option<String>, locale: Option<Locale>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::resolve_with(api_url, locale, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        api_url: Option<String>,
        locale: Option<Locale>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let raw_url = api_url
            .or_else(|| lookup(ENV_API_URL))
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                AppError::new(
                    2,
                    format!("Missing {ENV_API_URL} in environment (.env) and no --api-url given."),
                )
            })?;
        let base_url = normalize_base_url(&raw_url)?;

        let locale = match locale {
            Some(locale) => locale,
            None => match lookup(ENV_LOCALE) {
                Some(tag) if !tag.trim().is_empty() => Locale::from_tag(&tag).ok_or_else(|| {
                    AppError::new(2, format!("Unsupported {ENV_LOCALE} '{tag}' (expected id or en)."))
                })?,
                _ => Locale::default(),
            },
        };

        Ok(Self { base_url, locale })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| AppError::new(2, format!("Invalid service URL '{trimmed}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::new(
            2,
            format!("Service URL must be http or https (got: {trimmed})."),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_url_and_locale_from_env() {
        let cfg = ServiceConfig::resolve_with(
            None,
            None,
            env(&[(ENV_API_URL, "http://localhost:5000/"), (ENV_LOCALE, "en-US")]),
        )
        .unwrap();
        assert_eq!(cfg.base_url, "http://localhost:5000");
        assert_eq!(cfg.locale, Locale::En);
    }

    #[test]
    fn flags_override_env() {
        let cfg = ServiceConfig::resolve_with(
            Some("https://forecast.example.com".to_string()),
            Some(Locale::Id),
            env(&[(ENV_API_URL, "http://localhost:5000"), (ENV_LOCALE, "en")]),
        )
        .unwrap();
        assert_eq!(cfg.base_url, "https://forecast.example.com");
        assert_eq!(cfg.locale, Locale::Id);
    }

    #[test]
    fn missing_url_is_a_config_error() {
        let err = ServiceConfig::resolve_with(None, None, env(&[])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains(ENV_API_URL));
    }

    #[test]
    fn rejects_unknown_locale_and_scheme() {
        let err = ServiceConfig::resolve_with(
            None,
            None,
            env(&[(ENV_API_URL, "http://localhost:5000"), (ENV_LOCALE, "fr")]),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let err =
            ServiceConfig::resolve_with(Some("ftp://host".to_string()), None, env(&[])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn locale_defaults_to_indonesian() {
        let cfg =
            ServiceConfig::resolve_with(None, None, env(&[(ENV_API_URL, "http://h:1")])).unwrap();
        assert_eq!(cfg.locale, Locale::Id);
    }
}
