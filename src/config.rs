use std::env;
use std::fs;
use std::str::FromStr;

use thiserror::Error;

use crate::validation::password::{CommonPasswords, PasswordPolicy, SIMILARITY_RANGE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} not set")]
    Missing(&'static str),
    #[error("environment variable {key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
    #[error("cannot read {key} file {path}: {source}")]
    Unreadable {
        key: &'static str,
        path: String,
        source: std::io::Error,
    },
}

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub db_max_connections: u32,
    pub token: TokenConfig,
    pub password: PasswordPolicy,
}

#[derive(Clone, Debug)]
pub struct TokenConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

impl EnvConfig {
    fn get_env<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(key).ok_or(ConfigError::Missing(key))
    }

    fn get_env_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
        T: FromStr,
    {
        match lookup(key) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value }),
            None => Ok(default),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(EnvConfig {
            port: Self::get_env_or(&lookup, "PORT", 8080)?,
            db_url: Self::get_env(&lookup, "DATABASE_URL")?,
            db_max_connections: Self::get_env_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            token: TokenConfig {
                secret: Self::get_env(&lookup, "JWT_SECRET")?,
                ttl_seconds: Self::get_env_or(&lookup, "JWT_TTL_SECONDS", 86_400)?,
            },
            password: Self::password_policy(&lookup)?,
        })
    }

    fn password_policy<F>(lookup: &F) -> Result<PasswordPolicy, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PasswordPolicy::default();

        let max_similarity =
            Self::get_env_or(lookup, "PASSWORD_MAX_SIMILARITY", defaults.max_similarity)?;
        // also rejects NaN and infinities
        if !SIMILARITY_RANGE.contains(&max_similarity) {
            return Err(ConfigError::Invalid {
                key: "PASSWORD_MAX_SIMILARITY",
                value: max_similarity.to_string(),
            });
        }

        let common_passwords = match lookup("PASSWORD_LIST_PATH") {
            Some(path) => {
                let list = fs::read_to_string(&path).map_err(|source| ConfigError::Unreadable {
                    key: "PASSWORD_LIST_PATH",
                    path,
                    source,
                })?;
                CommonPasswords::from_list(&list)
            }
            None => defaults.common_passwords,
        };

        Ok(PasswordPolicy {
            min_length: Self::get_env_or(lookup, "PASSWORD_MIN_LENGTH", defaults.min_length)?,
            max_similarity,
            common_passwords,
        })
    }
}
