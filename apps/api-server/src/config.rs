//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use postboard_infra::{DatabaseConfig, JwtConfig};
use postboard_infra::auth::Algorithm;

/// Startup configuration errors. Any of these aborts the process.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("JWT_ALGORITHM must be HS256, HS384 or HS512, got {0:?}")]
    UnsupportedAlgorithm(String),
}

/// Longest accepted access-token lifetime (one year).
pub const MAX_TOKEN_MINUTES: i64 = 525_600;

/// Page sizes for `GET /posts`.
#[derive(Debug, Clone, Copy)]
pub struct PostsConfig {
    pub default_limit: u64,
    pub max_limit: u64,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            default_limit: 100,
            max_limit: 100,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub posts: PostsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let database = DatabaseConfig {
            url: required("DATABASE_URL")?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 1)?,
        };

        let algorithm = match lookup("JWT_ALGORITHM") {
            None => Algorithm::HS256,
            Some(raw) => match Algorithm::from_str(raw.trim()) {
                Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
                _ => return Err(ConfigError::UnsupportedAlgorithm(raw)),
            },
        };

        let expiration_minutes: i64 = parse_or(&lookup, "ACCESS_TOKEN_EXPIRE_MINUTES", 30)?;
        if !(1..=MAX_TOKEN_MINUTES).contains(&expiration_minutes) {
            return Err(ConfigError::Invalid {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                value: expiration_minutes.to_string(),
            });
        }

        let jwt = JwtConfig {
            secret: required("JWT_SECRET")?,
            algorithm,
            expiration_minutes,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "postboard-api".to_string()),
        };

        let defaults = PostsConfig::default();
        let max_limit = parse_or(&lookup, "POSTS_MAX_LIMIT", defaults.max_limit)?.max(1);
        let posts = PostsConfig {
            default_limit: parse_or(&lookup, "POSTS_DEFAULT_LIMIT", defaults.default_limit)?
                .clamp(1, max_limit),
            max_limit,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            database,
            jwt,
            posts,
        })
    }
}

/// Parse an optional variable, falling back to `default` only when it is unset.
fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("DATABASE_URL", "postgres://localhost/postboard"),
        ("JWT_SECRET", "s3cret"),
    ];

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(BASE)).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.jwt.algorithm, Algorithm::HS256);
        assert_eq!(config.jwt.expiration_minutes, 30);
        assert_eq!(config.posts.default_limit, 100);
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn test_missing_database_url() {
        let result = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")]));
        assert!(matches!(result, Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn test_missing_secret() {
        let result = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x")]));
        assert!(matches!(result, Err(ConfigError::Missing("JWT_SECRET"))));
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let mut pairs = BASE.to_vec();
        pairs.push(("PORT", "eighty"));

        let result = AppConfig::from_lookup(lookup_from(&pairs));
        assert!(matches!(result, Err(ConfigError::Invalid { key: "PORT", .. })));
    }

    #[test]
    fn test_asymmetric_algorithm_is_rejected() {
        let mut pairs = BASE.to_vec();
        pairs.push(("JWT_ALGORITHM", "RS256"));

        let result = AppConfig::from_lookup(lookup_from(&pairs));
        assert!(matches!(result, Err(ConfigError::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_custom_token_settings() {
        let mut pairs = BASE.to_vec();
        pairs.push(("JWT_ALGORITHM", "HS512"));
        pairs.push(("ACCESS_TOKEN_EXPIRE_MINUTES", "5"));

        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.jwt.algorithm, Algorithm::HS512);
        assert_eq!(config.jwt.expiration_minutes, 5);
    }

    #[test]
    fn test_non_positive_token_lifetime_is_rejected() {
        for value in ["0", "-5"] {
            let mut pairs = BASE.to_vec();
            pairs.push(("ACCESS_TOKEN_EXPIRE_MINUTES", value));

            let result = AppConfig::from_lookup(lookup_from(&pairs));
            assert!(matches!(
                result,
                Err(ConfigError::Invalid {
                    key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_oversized_token_lifetime_is_rejected() {
        for value in ["525601", "9223372036854775807"] {
            let mut pairs = BASE.to_vec();
            pairs.push(("ACCESS_TOKEN_EXPIRE_MINUTES", value));

            let result = AppConfig::from_lookup(lookup_from(&pairs));
            assert!(matches!(
                result,
                Err(ConfigError::Invalid {
                    key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                    ..
                })
            ));
        }

        let mut pairs = BASE.to_vec();
        pairs.push(("ACCESS_TOKEN_EXPIRE_MINUTES", "525600"));
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.jwt.expiration_minutes, MAX_TOKEN_MINUTES);
    }

    #[test]
    fn test_default_limit_is_clamped_to_max() {
        let mut pairs = BASE.to_vec();
        pairs.push(("POSTS_DEFAULT_LIMIT", "500"));
        pairs.push(("POSTS_MAX_LIMIT", "50"));

        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.posts.default_limit, 50);
        assert_eq!(config.posts.max_limit, 50);
    }
}
