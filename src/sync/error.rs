use thiserror::Error;

use crate::sync::domain::DecodeError;

/// Failure reported by the contract gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// RPC / network level failure.
    #[error("transport error: {0}")]
    Transport(String),
    /// The chain or signer refused the call (dispatch error, user cancelled
    /// signing, contract revert).
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("gateway not connected")]
    NotConnected,
}

/// Why a single field fetch produced no value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
