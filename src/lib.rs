use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod fixture;
pub mod sync;
pub mod view;

use crate::sync::gateway::InMemoryGateway;
use crate::sync::notify::NotificationSink;
use crate::sync::runtime::SyncController;
use crate::sync::types::{AccountId, ContractHandle, Session};

/// Builds a controller over an in-memory auction contract and applies the
/// initial session, which loads every field once.
pub async fn setup_controller(
    fixture: Option<&Path>,
    signer: Option<AccountId>,
    connected: bool,
    sink: Arc<dyn NotificationSink>,
) -> Result<SyncController<InMemoryGateway>> {
    let state = fixture::load_contract_state(fixture)?;
    let contract: AccountId = fixture::DEFAULT_CONTRACT.parse()?;

    let gateway = Arc::new(InMemoryGateway::new(state));
    let controller = SyncController::new(gateway, sink);
    controller
        .set_session(Session {
            connected,
            contract: Some(ContractHandle::new(contract)),
            signer,
        })
        .await;

    Ok(controller)
}
