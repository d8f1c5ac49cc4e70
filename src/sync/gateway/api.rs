use async_trait::async_trait;
use serde_json::Value;

use crate::sync::domain::{ActionRequest, ContractMethod};
use crate::sync::error::GatewayError;
use crate::sync::types::{AccountId, ContractHandle, TxReceipt};

/// Result of a contract dry run, before field decoding.
///
/// `is_error` is set when the message itself returned an error; in that case
/// `decoded_output` carries the human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    pub output: Value,
    pub is_error: bool,
    pub decoded_output: String,
}

impl RawOutput {
    pub fn ok(output: Value) -> Self {
        let decoded_output = output.to_string();
        Self {
            output,
            is_error: false,
            decoded_output,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            output: Value::Null,
            is_error: true,
            decoded_output: message.into(),
        }
    }
}

/// Chain access used by the controller.
///
/// Implementations own connection handling, signing and transaction
/// lifecycle reporting (pending / included / finalized toasts). Timeouts, if
/// any, are theirs too.
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// Read-only call. `caller` may be absent; queries do not need a signer.
    async fn query(
        &self,
        caller: Option<&AccountId>,
        contract: &ContractHandle,
        method: ContractMethod,
    ) -> Result<RawOutput, GatewayError>;

    /// Sign and submit, resolving once the transaction is included.
    async fn submit(
        &self,
        signer: &AccountId,
        contract: &ContractHandle,
        request: &ActionRequest,
    ) -> Result<TxReceipt, GatewayError>;
}
