use std::env;

use paedsrx_core::Severity;
use paedsrx_knowledge::config::StoreConfig;

/// Environment variable holding the severity used when a note states none.
pub const DEFAULT_SEVERITY_VAR: &str = "PAEDSRX_DEFAULT_SEVERITY";

/// Startup configuration for the agent.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub store: StoreConfig,
    pub default_severity: Severity,
}

impl AgentConfig {
    pub fn from_env() -> eyre::Result<Self> {
        let default_severity = match env::var(DEFAULT_SEVERITY_VAR) {
            Ok(raw) => raw
                .parse()
                .map_err(|e| eyre::eyre!("{DEFAULT_SEVERITY_VAR}: {e}"))?,
            Err(_) => Severity::default(),
        };
        Ok(AgentConfig {
            store: StoreConfig::from_env(),
            default_severity,
        })
    }
}
