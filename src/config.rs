use std::time::Duration;

use thiserror::Error;

use crate::data::models::ScheduleLimits;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Runtime configuration read from the environment (and `.env`).
///
/// | Env Var                   | Default               |
/// |---------------------------|-----------------------|
/// | `DATABASE_URL`            | `sqlite://review.db`  |
/// | `BIND_ADDR`               | `127.0.0.1:5000`      |
/// | `DB_POOL_SIZE`            | `8`                   |
/// | `DB_BUSY_TIMEOUT_MS`      | `5000`                |
/// | `SCHEDULE_TODAY_LIMIT`    | `10`                  |
/// | `SCHEDULE_UPCOMING_LIMIT` | `20`                  |
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub pool_size: u32,
    pub busy_timeout: Duration,
    pub schedule_limits: ScheduleLimits,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://review.db".into());
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1:5000".into());

        let pool_size = parse_var(&lookup, "DB_POOL_SIZE", 8u32, "a positive integer")?;
        let busy_timeout_ms = parse_var(&lookup, "DB_BUSY_TIMEOUT_MS", 5000u64, "milliseconds")?;
        let today = parse_var(&lookup, "SCHEDULE_TODAY_LIMIT", 10i64, "a positive integer")?;
        let upcoming = parse_var(&lookup, "SCHEDULE_UPCOMING_LIMIT", 20i64, "a positive integer")?;

        if pool_size == 0 {
            return Err(invalid("DB_POOL_SIZE", "a positive integer", pool_size));
        }
        if today < 1 {
            return Err(invalid("SCHEDULE_TODAY_LIMIT", "a positive integer", today));
        }
        if upcoming < 1 {
            return Err(invalid("SCHEDULE_UPCOMING_LIMIT", "a positive integer", upcoming));
        }

        Ok(Config {
            database_url: strip_sqlite_scheme(&database_url).to_string(),
            bind_addr,
            pool_size,
            busy_timeout: Duration::from_millis(busy_timeout_ms),
            schedule_limits: ScheduleLimits { today, upcoming },
        })
    }
}

fn parse_var<F, T>(
    lookup: &F,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => Ok(value),
            Err(_) => Err(ConfigError::Invalid {
                name,
                expected,
                value: raw,
            }),
        },
        None => Ok(default),
    }
}

fn invalid(name: &'static str, expected: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        name,
        expected,
        value: value.to_string(),
    }
}

// SQLite takes a plain path, so `sqlite://site.db` style URLs are accepted too.
fn strip_sqlite_scheme(url: &str) -> &str {
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url, "review.db");
        assert_eq!(config.bind_addr, "127.0.0.1:5000");
        assert_eq!(config.pool_size, 8);
        assert_eq!(config.busy_timeout, Duration::from_millis(5000));
        assert_eq!(config.schedule_limits, ScheduleLimits::default());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("DATABASE_URL", "/var/lib/review/review.db"),
            ("SCHEDULE_TODAY_LIMIT", "5"),
            ("DB_BUSY_TIMEOUT_MS", " 250 "),
        ])
        .unwrap();
        assert_eq!(config.database_url, "/var/lib/review/review.db");
        assert_eq!(config.schedule_limits.today, 5);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = config_from(&[("DB_POOL_SIZE", "lots")]).unwrap_err();
        assert!(err.to_string().contains("DB_POOL_SIZE"));

        assert!(config_from(&[("SCHEDULE_UPCOMING_LIMIT", "0")]).is_err());
    }
}
