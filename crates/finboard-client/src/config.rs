use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::config_path;
use crate::{ClientError, ClientResult};

pub const RECOVERY_MODE_ENV_VAR: &str = "FINBOARD_RECOVERY_MODE";
pub const LOG_ENV_VAR: &str = "FINBOARD_LOG";

pub const DEFAULT_RATE_BASE_URL: &str = "https://economia.awesomeapi.com.br";
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

const MIN_HASH_COST: u32 = 4;
const MAX_HASH_COST: u32 = 31;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub currency: CurrencySection,
    pub auth: AuthSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurrencySection {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthSection {
    /// Accept the admin recovery password even when the stored hash differs.
    pub recovery_mode: bool,
    /// Also the initial password of the seeded `admin` account.
    pub recovery_password: String,
    /// bcrypt work factor for new password hashes.
    pub hash_cost: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub filter: String,
}

impl Default for CurrencySection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RATE_BASE_URL.to_string(),
            timeout_secs: 5,
        }
    }
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            recovery_mode: false,
            recovery_password: "1234".to_string(),
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

/// Reads `config.toml` from the finboard home. A missing file yields the
/// defaults; environment overrides are applied on top either way.
pub fn load(home: &Path) -> ClientResult<Config> {
    let path = config_path(home);
    let mut config = if path.exists() {
        let body = fs::read_to_string(&path)
            .map_err(|error| ClientError::config_invalid(&path, &error.to_string()))?;
        parse(&body).map_err(|detail| ClientError::config_invalid(&path, &detail))?
    } else {
        Config::default()
    };

    if let Some(value) = std::env::var_os(RECOVERY_MODE_ENV_VAR) {
        config.auth.recovery_mode = is_truthy(&value.to_string_lossy());
    }

    debug!(
        path = %path.display(),
        recovery_mode = config.auth.recovery_mode,
        "loaded configuration"
    );
    Ok(config)
}

pub fn parse(body: &str) -> Result<Config, String> {
    let config = toml::from_str::<Config>(body).map_err(|error| error.message().to_string())?;
    if config.currency.base_url.trim().is_empty() {
        return Err("`currency.base_url` must not be empty".to_string());
    }
    if config.currency.timeout_secs == 0 {
        return Err("`currency.timeout_secs` must be at least 1".to_string());
    }
    if !(MIN_HASH_COST..=MAX_HASH_COST).contains(&config.auth.hash_cost) {
        return Err(format!(
            "`auth.hash_cost` must be between {MIN_HASH_COST} and {MAX_HASH_COST}"
        ));
    }
    Ok(config)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
