//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Role given to a bearer token configured without one.
const DEFAULT_TOKEN_ROLE: &str = "editor";

/// A static bearer token accepted on `/api/protected/*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken {
    pub token: String,
    pub role: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,

    /// Bearer tokens for the protected prefix, as `token:role` pairs
    /// (default: "mock-admin-token:admin,mock-editor-token:editor").
    pub api_tokens: Vec<BearerToken>,

    /// Install fixture data into empty collections (default: true).
    pub seed_data: bool,

    /// Upper bound for the `limit` query parameter (default: 100).
    pub max_page_limit: usize,

    /// Validate entry data against its content type (default: false).
    pub strict_entry_validation: bool,

    /// JSON snapshot loaded at startup and written on shutdown.
    /// When None, data lives only in memory.
    pub data_file: Option<PathBuf>,

    /// Initial site title (default: "MuseCMS").
    pub site_title: String,

    /// Per-request timeout in seconds (default: 30).
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            cors_allowed_origins: vec!["*".to_string()],
            api_tokens: parse_api_tokens("mock-admin-token:admin,mock-editor-token:editor"),
            seed_data: true,
            max_page_limit: 100,
            strict_entry_validation: false,
            data_file: None,
            site_title: "MuseCMS".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let port = env::var("PORT")
            .unwrap_or_else(|_| defaults.port.to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or(defaults.cors_allowed_origins);

        let api_tokens = env::var("API_TOKENS")
            .map(|v| parse_api_tokens(&v))
            .unwrap_or(defaults.api_tokens);

        let seed_data = match env::var("SEED_DATA") {
            Ok(v) => parse_bool("SEED_DATA", &v)?,
            Err(_) => defaults.seed_data,
        };

        let max_page_limit: usize = env::var("MAX_PAGE_LIMIT")
            .unwrap_or_else(|_| defaults.max_page_limit.to_string())
            .parse()
            .context("MAX_PAGE_LIMIT must be a positive integer")?;
        if max_page_limit == 0 {
            bail!("MAX_PAGE_LIMIT must be at least 1");
        }

        let strict_entry_validation = match env::var("STRICT_ENTRY_VALIDATION") {
            Ok(v) => parse_bool("STRICT_ENTRY_VALIDATION", &v)?,
            Err(_) => defaults.strict_entry_validation,
        };

        let data_file = env::var("DATA_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let site_title = env::var("SITE_TITLE").unwrap_or(defaults.site_title);

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| defaults.request_timeout_secs.to_string())
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be a valid u64")?;

        Ok(Self {
            port,
            cors_allowed_origins,
            api_tokens,
            seed_data,
            max_page_limit,
            strict_entry_validation,
            data_file,
            site_title,
            request_timeout_secs,
        })
    }

    /// Clamp a client-supplied page size to `[1, max_page_limit]`.
    pub fn clamp_limit(&self, limit: Option<usize>) -> Option<usize> {
        limit.map(|l| l.clamp(1, self.max_page_limit))
    }
}

/// Parse `token:role` pairs separated by commas. Blank entries are skipped.
pub fn parse_api_tokens(raw: &str) -> Vec<BearerToken> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| match pair.split_once(':') {
            Some((token, role)) if !role.trim().is_empty() => BearerToken {
                token: token.trim().to_string(),
                role: role.trim().to_string(),
            },
            Some((token, _)) => BearerToken {
                token: token.trim().to_string(),
                role: DEFAULT_TOKEN_ROLE.to_string(),
            },
            None => BearerToken {
                token: pair.to_string(),
                role: DEFAULT_TOKEN_ROLE.to_string(),
            },
        })
        .filter(|t| !t.token.is_empty())
        .collect()
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{name} must be a boolean, got '{other}'"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_tokens() {
        let tokens = parse_api_tokens(" a:admin , b , c: ,, :x");
        assert_eq!(
            tokens,
            vec![
                BearerToken {
                    token: "a".into(),
                    role: "admin".into()
                },
                BearerToken {
                    token: "b".into(),
                    role: "editor".into()
                },
                BearerToken {
                    token: "c".into(),
                    role: "editor".into()
                },
            ]
        );
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "TRUE").unwrap());
        assert!(!parse_bool("X", "off").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }

    #[test]
    fn test_default_has_mock_tokens() {
        let config = Config::default();
        assert_eq!(config.api_tokens.len(), 2);
        assert_eq!(config.api_tokens[0].role, "admin");
    }

    #[test]
    fn test_clamp_limit() {
        let config = Config {
            max_page_limit: 50,
            ..Config::default()
        };
        assert_eq!(config.clamp_limit(None), None);
        assert_eq!(config.clamp_limit(Some(0)), Some(1));
        assert_eq!(config.clamp_limit(Some(500)), Some(50));
        assert_eq!(config.clamp_limit(Some(20)), Some(20));
    }
}
