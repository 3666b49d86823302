use std::sync::Once;

use finboard_client::config::{self, LOG_ENV_VAR};
use finboard_client::state::resolve_home;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "warn";

static TRACING_INIT: Once = Once::new();

/// Installs the stderr subscriber. `FINBOARD_LOG` wins over `[logging] filter`
/// in config.toml; an unreadable config falls back to `warn` and is reported
/// by the command itself.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let spec = std::env::var(LOG_ENV_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(configured_filter)
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());
        let filter = EnvFilter::try_new(&spec).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

fn configured_filter() -> Option<String> {
    let home = resolve_home(None).ok()?;
    config::load(&home).ok().map(|loaded| loaded.logging.filter)
}
