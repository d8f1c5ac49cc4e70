use anyhow::{Context, Result};
use std::path::Path;

use crate::sync::gateway::ContractState;

/// Deployer account of the default fixture.
pub const DEFAULT_OWNER: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

/// Address the default contract is "deployed" at.
pub const DEFAULT_CONTRACT: &str = "5FLSigC9HGRKVhB9FiEo4Y3koPsNmBmLJbpXg2mp1hXcS59Y";

/// State of a freshly deployed auction with the default constructor.
pub fn default_contract_state() -> Result<ContractState> {
    Ok(ContractState::new("Golden watch", DEFAULT_OWNER.parse()?))
}

/// Load contract state from a JSON file, or fall back to the default one.
pub fn load_contract_state(path: Option<&Path>) -> Result<ContractState> {
    let Some(path) = path else {
        log::info!("[FIXTURE] No fixture given, using default contract state");
        return default_contract_state();
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    let state: ContractState = serde_json::from_str(&raw)
        .with_context(|| format!("parsing fixture {}", path.display()))?;
    log::info!("[FIXTURE] Loaded contract state from {}", path.display());
    Ok(state)
}
