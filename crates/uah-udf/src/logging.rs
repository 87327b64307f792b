//! Structured logging for the shared object.
//!
//! The server owns the process, so the subscriber is installed at most once,
//! on the first `to_uah_init`, and only if no global subscriber exists yet.
//! Events go to stderr, which the server redirects into its error log.

use std::sync::Once;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{LogSettings, UdfConfig, DEFAULT_LOG_FILTER};

static INIT: Once = Once::new();

/// Loads the config and installs the subscriber, once per process.
pub fn init_once() {
    INIT.call_once(|| {
        let (config, load_error) = match UdfConfig::load(UdfConfig::env_path()) {
            Ok(config) => (config, None),
            Err(e) => (UdfConfig::default(), Some(e)),
        };

        let installed = install_subscriber(&config.log);

        // Reported after install so the warning is not lost
        if let Some(e) = load_error {
            warn!("Failed to load TO_UAH config: {}. Using defaults.", e);
        }
        if installed {
            info!(filter = %config.log.filter, "TO_UAH logging initialized");
        }
    });
}

/// Installs a stderr `fmt` subscriber. Returns false if one already exists.
fn install_subscriber(settings: &LogSettings) -> bool {
    let filter = EnvFilter::try_new(&settings.filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(settings.ansi)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_once_is_reentrant() {
        init_once();
        init_once();
        assert!(INIT.is_completed());
    }

    #[test]
    fn test_second_subscriber_is_refused() {
        init_once();
        assert!(!install_subscriber(&LogSettings::default()));
    }
}
