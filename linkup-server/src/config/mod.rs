//! Server configuration module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use linkup::config::{ConfigBuilder, ConfigLoader, LinkupConfig};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Maximum request body size in bytes
    pub max_request_size: usize,

    /// JWT secret key for signing tokens
    pub jwt_secret: String,

    /// JWT token expiration time in hours
    pub jwt_expiration_hours: u64,

    /// Allow user signup
    pub allow_signup: bool,

    /// Library configuration file (storage, logging, relationships)
    pub config_file: Option<PathBuf>,

    /// Allowed browser origins; empty allows any
    pub cors_origins: Vec<String>,

    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            max_request_size: 2 * 1024 * 1024, // 2MB
            jwt_secret: "".to_string(),        // Generated at runtime if not provided
            jwt_expiration_hours: 24 * 30,     // 30 days
            allow_signup: true,
            config_file: None,
            cors_origins: Vec::new(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl ServerConfig {
    /// Load configuration from CLI arguments and environment variables
    /// CLI arguments take precedence over environment variables
    pub fn from_cli_and_env(cli_args: crate::cli::CliArgs) -> Result<Self> {
        Self::from_cli_and_lookup(cli_args, |key| env::var(key).ok())
    }

    /// Same as [`Self::from_cli_and_env`] with an explicit variable source
    pub fn from_cli_and_lookup<F>(cli_args: crate::cli::CliArgs, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = cli_args.port {
            config.port = port;
        } else if let Some(port) = lookup("LINKUP_PORT") {
            config.port = port.parse().context("LINKUP_PORT must be a port number")?;
        }

        if let Some(max_size) = cli_args.max_request_size {
            config.max_request_size = max_size;
        } else if let Some(max_size) = lookup("LINKUP_MAX_REQUEST_SIZE") {
            config.max_request_size = max_size
                .parse()
                .context("LINKUP_MAX_REQUEST_SIZE must be a byte count")?;
        }

        if let Some(jwt_secret) = cli_args.jwt_secret {
            config.jwt_secret = jwt_secret;
        } else if let Some(jwt_secret) = lookup("LINKUP_JWT_SECRET") {
            config.jwt_secret = jwt_secret;
        }
        if config.jwt_secret.is_empty() {
            config.jwt_secret = Self::generate_jwt_secret();
        }

        if let Some(exp_hours) = cli_args.jwt_expiration_hours {
            config.jwt_expiration_hours = exp_hours;
        } else if let Some(exp_hours) = lookup("LINKUP_JWT_EXPIRATION_HOURS") {
            config.jwt_expiration_hours = exp_hours
                .parse()
                .context("LINKUP_JWT_EXPIRATION_HOURS must be a number of hours")?;
        }

        if let Some(allow_signup) = cli_args.allow_signup {
            config.allow_signup = allow_signup;
        } else if let Some(allow_signup) = lookup("LINKUP_ALLOW_SIGNUP") {
            config.allow_signup = allow_signup.parse().unwrap_or(true);
        }

        if let Some(config_path) = cli_args.config_file {
            config.config_file = Some(config_path);
        } else if let Some(config_path) = lookup("LINKUP_CONFIG_FILE") {
            config.config_file = Some(PathBuf::from(config_path));
        }

        if let Some(origins) = cli_args.cors_origins {
            config.cors_origins = origins;
        } else if let Some(origins) = lookup("LINKUP_CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(config)
    }

    /// Generate a secure random JWT secret
    pub fn generate_jwt_secret() -> String {
        use rand::Rng;
        use rand::distr::Alphanumeric;
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect()
    }
}

/// Build the library configuration.
///
/// With a file, the file is read. Without one, persistent RocksDB storage
/// under the default data directory is used, or a remote SurrealDB when
/// `SURREALDB_URL` is set. `LINKUP_*` variables are applied on top either way.
pub fn load_network_config(config_file: Option<&Path>) -> Result<LinkupConfig> {
    match config_file {
        Some(path) => {
            let config = ConfigLoader::new()
                .load_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?
                .load_env()
                .extract()
                .with_context(|| format!("Invalid configuration in {}", path.display()))?;
            Ok(config)
        }
        None => {
            let defaults = ConfigBuilder::new()
                .with_default_storage()
                .with_remote_surrealdb_if_configured()
                .build()?;
            Ok(ConfigLoader::from_config(&defaults).load_env().extract()?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliArgs;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn cli_overrides_env_and_env_overrides_defaults() {
        let cli = CliArgs {
            port: Some(9000),
            ..Default::default()
        };
        let config = ServerConfig::from_cli_and_lookup(
            cli,
            lookup(&[
                ("LINKUP_PORT", "7000"),
                ("LINKUP_JWT_EXPIRATION_HOURS", "1"),
                ("LINKUP_ALLOW_SIGNUP", "false"),
                ("LINKUP_CORS_ORIGINS", "http://a.test, http://b.test,"),
            ]),
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.jwt_expiration_hours, 1);
        assert!(!config.allow_signup);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.jwt_secret.len(), 64);
    }

    #[test]
    fn malformed_numbers_are_errors() {
        let result = ServerConfig::from_cli_and_lookup(
            CliArgs::default(),
            lookup(&[("LINKUP_PORT", "not-a-port")]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn explicit_secret_is_kept() {
        let config = ServerConfig::from_cli_and_lookup(
            CliArgs::default(),
            lookup(&[("LINKUP_JWT_SECRET", "secret")]),
        )
        .unwrap();
        assert_eq!(config.jwt_secret, "secret");
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn network_config_is_read_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[storage]
backend = "memory"

[relationships]
accept_mode = "transactional"
"#
        )
        .unwrap();

        let config = load_network_config(Some(file.path())).unwrap();
        assert_eq!(
            config.relationships.accept_mode,
            linkup::config::AcceptMode::Transactional
        );
        assert!(load_network_config(Some(Path::new("/nonexistent/linkup.toml"))).is_err());
    }
}
