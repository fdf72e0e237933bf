/*
 * Responsibility
 * - 環境変数の読み込み (PORT, AUTH_TOKENS, タイムアウトなど)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    /// `(token, subject)` pairs accepted as bearer credentials.
    pub auth_tokens: Vec<(String, String)>,
    pub allow_anonymous: bool,

    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let auth_tokens = parse_tokens(&lookup("AUTH_TOKENS").unwrap_or_default())?;

        let allow_anonymous = match lookup("AUTH_ALLOW_ANONYMOUS") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid("AUTH_ALLOW_ANONYMOUS"))?,
            None => false,
        };

        // 誰も認証できないサーバーは起動させない
        if auth_tokens.is_empty() && !allow_anonymous {
            return Err(ConfigError::Missing("AUTH_TOKENS"));
        }

        let request_timeout = lookup("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let request_body_limit_bytes = lookup("REQUEST_BODY_LIMIT_BYTES")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        Ok(Self {
            addr,
            app_env,
            auth_tokens,
            allow_anonymous,
            request_timeout,
            request_body_limit_bytes,
        })
    }
}

/// Parses `token=subject,token=subject`. Blank entries are skipped.
fn parse_tokens(raw: &str) -> Result<Vec<(String, String)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (token, subject) = entry
                .split_once('=')
                .ok_or(ConfigError::Invalid("AUTH_TOKENS"))?;
            let (token, subject) = (token.trim(), subject.trim());
            if token.is_empty() || subject.is_empty() {
                return Err(ConfigError::Invalid("AUTH_TOKENS"));
            }
            Ok((token.to_string(), subject.to_string()))
        })
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_tokens_are_set() {
        let config = config_from(&[("AUTH_TOKENS", "secret=alice")]).expect("valid config");

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(!config.allow_anonymous);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.request_body_limit_bytes, 1024 * 1024);
    }

    #[test]
    fn tokens_are_parsed_into_pairs() {
        let config = config_from(&[("AUTH_TOKENS", " secret=alice, ,other = bob ")])
            .expect("valid config");

        assert_eq!(
            config.auth_tokens,
            vec![
                ("secret".to_string(), "alice".to_string()),
                ("other".to_string(), "bob".to_string()),
            ]
        );
    }

    #[test]
    fn malformed_token_entry_is_rejected() {
        for raw in ["secret", "=alice", "secret="] {
            let err = config_from(&[("AUTH_TOKENS", raw)]).expect_err(raw);
            assert_eq!(err, ConfigError::Invalid("AUTH_TOKENS"), "{raw}");
        }
    }

    #[test]
    fn no_tokens_without_anonymous_access_is_rejected() {
        let err = config_from(&[]).expect_err("nobody could authenticate");

        assert_eq!(err, ConfigError::Missing("AUTH_TOKENS"));
    }

    #[test]
    fn anonymous_only_server_is_allowed() {
        let config = config_from(&[("AUTH_ALLOW_ANONYMOUS", "true")]).expect("valid config");

        assert!(config.allow_anonymous);
        assert!(config.auth_tokens.is_empty());
    }

    #[test]
    fn unknown_anonymous_flag_is_rejected() {
        let err = config_from(&[("AUTH_TOKENS", "secret=alice"), ("AUTH_ALLOW_ANONYMOUS", "maybe")])
            .expect_err("invalid flag");

        assert_eq!(err, ConfigError::Invalid("AUTH_ALLOW_ANONYMOUS"));
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("AUTH_TOKENS", "secret=alice"),
            ("PORT", "8080"),
            ("APP_ENV", "Prod"),
            ("REQUEST_TIMEOUT_SECONDS", "5"),
            ("REQUEST_BODY_LIMIT_BYTES", "2048"),
        ])
        .expect("valid config");

        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.request_body_limit_bytes, 2048);
    }
}
