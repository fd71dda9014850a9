//! Orchestrator configuration

use serde::{Deserialize, Serialize};

/// How the orchestrator writes task record updates
///
/// The update lock wait comes from the registry's `RegistryConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Await each store write before continuing
    #[serde(default = "default_wait_for_completion")]
    pub wait_for_completion: bool,
}

fn default_wait_for_completion() -> bool {
    true
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            wait_for_completion: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: OrchestratorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, OrchestratorConfig::default());
        assert!(config.wait_for_completion);
    }
}
