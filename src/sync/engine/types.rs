use crate::sync::domain::{ActionRequest, ContractMethod, Field, FieldValue};
use crate::sync::error::{FetchError, GatewayError};
use crate::sync::types::{AccountId, ContractHandle, Notification, Session, TxReceipt};

#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// Wallet / connection / contract handle changed.
    SessionChanged(Session),
    /// Fetch the given fields (duplicates of in-flight fields are dropped).
    RefreshRequested(Vec<Field>),
    QueryResolved {
        field: Field,
        epoch: u64,
        outcome: Result<FieldValue, FetchError>,
    },
    /// The query was dropped before it completed; no result will follow.
    QueryAbandoned { field: Field, epoch: u64 },
    ActionRequested(ActionRequest),
    ActionResolved {
        method: ContractMethod,
        outcome: Result<TxReceipt, GatewayError>,
    },
    /// The submission was dropped before the gateway answered.
    ActionAbandoned { method: ContractMethod },
}

#[derive(Debug, Clone)]
pub enum EngineCommand {
    Query {
        field: Field,
        epoch: u64,
        contract: ContractHandle,
        caller: Option<AccountId>,
    },
    Submit {
        request: ActionRequest,
        contract: ContractHandle,
        signer: AccountId,
    },
    Notify(Notification),
    /// Clear the product-name form after a successful rename.
    ResetForm,
}

/// Per-invocation action lifecycle.
///
/// `Idle -> Validating -> (Rejected | Submitting) -> (Confirmed | Failed) -> Idle`.
/// Only `Idle` and `Submitting` survive between events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPhase {
    Idle,
    Validating,
    Rejected,
    Submitting(ContractMethod),
    Confirmed(ContractMethod),
    Failed(ContractMethod),
}
