//! Startup configuration resolution.
//!
//! Order: config file (or defaults) → command-line overrides → validation.
//! Any failure here is fatal.

use std::path::Path;

use crate::config::{load_config, validate_config, ConfigError, GatewayConfig};

/// Values given on the command line, applied over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub rpc_url: Option<String>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}

pub fn resolve_config(path: Option<&Path>, overrides: Overrides) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    if let Some(rpc_url) = overrides.rpc_url {
        config.node.rpc_url = rpc_url;
    }
    if let Some(bind_address) = overrides.bind_address {
        config.listener.bind_address = bind_address;
    }
    if let Some(log_level) = overrides.log_level {
        config.observability.log_level = log_level;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let config = resolve_config(None, Overrides::default()).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides_applied() {
        let overrides = Overrides {
            rpc_url: Some("http://10.0.0.5:8545".into()),
            bind_address: Some("127.0.0.1:9000".into()),
            log_level: Some("debug".into()),
        };
        let config = resolve_config(None, overrides).unwrap();
        assert_eq!(config.node.rpc_url, "http://10.0.0.5:8545");
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_bad_override_is_rejected() {
        let overrides = Overrides {
            bind_address: Some("not-an-address".into()),
            ..Overrides::default()
        };
        assert!(matches!(
            resolve_config(None, overrides),
            Err(ConfigError::Validation(_))
        ));
    }
}
