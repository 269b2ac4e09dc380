//! Server Configuration
//!
//! Read from the environment once at startup. A `.env` file in the working
//! directory is loaded first.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::{AuthConfig, BootstrapConfig};

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_path: PathBuf,
    pub listen_addr: SocketAddr,
    pub bootstrap: BootstrapConfig,
    pub cookie_secure: bool,
    pub session_ttl: Duration,
    /// `None` disables the expired-session sweep
    pub session_sweep: Option<Duration>,
    /// Empty disables CORS
    pub frontend_origins: Vec<String>,
    pub password_pepper: Option<Vec<u8>>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset and empty values mean "use the default"
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = BootstrapConfig::default();

        let listen_addr = get("LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("LISTEN_ADDR must be a socket address such as 0.0.0.0:8080")?;

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(v) => parse_bool(&v).context("COOKIE_SECURE must be true or false")?,
            None => true,
        };

        let ttl_hours: u64 = match get("SESSION_TTL_HOURS") {
            Some(v) => v.parse().context("SESSION_TTL_HOURS must be a whole number")?,
            None => 48,
        };
        if ttl_hours == 0 {
            bail!("SESSION_TTL_HOURS must be greater than zero");
        }
        let Some(ttl_secs) = ttl_hours.checked_mul(3600) else {
            bail!("SESSION_TTL_HOURS is too large");
        };

        let sweep_secs: u64 = match get("SESSION_SWEEP_SECS") {
            Some(v) => v.parse().context("SESSION_SWEEP_SECS must be a whole number")?,
            None => 0,
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_path: get("DATABASE_PATH")
                .unwrap_or_else(|| "./doit.db".to_string())
                .into(),
            listen_addr,
            bootstrap: BootstrapConfig {
                user_name: get("FIRST_USER_USERNAME").unwrap_or(defaults.user_name),
                email: get("FIRST_USER_EMAIL").unwrap_or(defaults.email),
            },
            cookie_secure,
            session_ttl: Duration::from_secs(ttl_secs),
            session_sweep: (sweep_secs > 0).then(|| Duration::from_secs(sweep_secs)),
            frontend_origins,
            password_pepper: get("PASSWORD_PEPPER").map(String::into_bytes),
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            session_ttl: self.session_ttl,
            cookie_secure: self.cookie_secure,
            password_pepper: self.password_pepper.clone(),
            ..AuthConfig::default()
        }
    }
}

fn parse_bool(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("not a boolean: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.database_path, PathBuf::from("./doit.db"));
        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.bootstrap.user_name, "admin");
        assert!(config.cookie_secure);
        assert_eq!(config.session_ttl, Duration::from_secs(48 * 3600));
        assert!(config.session_sweep.is_none());
        assert!(config.frontend_origins.is_empty());

        let auth = config.auth_config();
        assert_eq!(auth.session_cookie_name, "ST");
        assert!(auth.cookie_secure);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("DATABASE_PATH", "/var/lib/doit/doit.db"),
            ("FIRST_USER_USERNAME", "root"),
            ("COOKIE_SECURE", "false"),
            ("SESSION_TTL_HOURS", "1"),
            ("SESSION_SWEEP_SECS", "300"),
            ("FRONTEND_ORIGINS", "http://localhost:3000, https://doit.example.com,"),
        ])
        .unwrap();

        assert_eq!(config.bootstrap.user_name, "root");
        assert_eq!(config.bootstrap.email, "admin@localhost");
        assert!(!config.cookie_secure);
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
        assert_eq!(config.session_sweep, Some(Duration::from_secs(300)));
        assert_eq!(
            config.frontend_origins,
            ["http://localhost:3000", "https://doit.example.com"]
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config(&[("LISTEN_ADDR", "nowhere")]).is_err());
        assert!(config(&[("COOKIE_SECURE", "maybe")]).is_err());
        assert!(config(&[("SESSION_TTL_HOURS", "0")]).is_err());
        assert!(config(&[("SESSION_SWEEP_SECS", "-5")]).is_err());
    }

    #[test]
    fn test_oversized_ttl_is_rejected() {
        let max = u64::MAX.to_string();
        let err = config(&[("SESSION_TTL_HOURS", max.as_str())]).unwrap_err();
        assert!(err.to_string().contains("too large"));

        let largest = (u64::MAX / 3600).to_string();
        assert!(config(&[("SESSION_TTL_HOURS", largest.as_str())]).is_ok());
    }
}
