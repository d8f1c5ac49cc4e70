use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::sync::domain::DecodeError;

/// Native token amount, in the chain's smallest unit.
pub type Balance = u128;

/// An on-chain account (SS58 / base58 string form).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccountId {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DecodeError::Malformed("empty account id".into()));
        }
        bs58::decode(s)
            .into_vec()
            .map_err(|e| DecodeError::Malformed(format!("account id {:?}: {}", s, e)))?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for AccountId {
    type Error = DecodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AccountId> for String {
    fn from(a: AccountId) -> Self {
        a.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved contract instance. Two handles are the same contract iff their
/// addresses match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractHandle {
    pub address: AccountId,
}

impl ContractHandle {
    pub fn new(address: AccountId) -> Self {
        Self { address }
    }
}

/// What the wallet / chain connection currently provides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// A chain connection (API) is available.
    pub connected: bool,
    pub contract: Option<ContractHandle>,
    /// Active account with a usable signer.
    pub signer: Option<AccountId>,
}

impl Session {
    /// Fetches are possible: connection present and contract resolved.
    pub fn can_query(&self) -> bool {
        self.connected && self.contract.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A user-visible toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Inclusion receipt returned by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub block_hash: [u8; 32],
}

impl fmt::Display for TxReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.block_hash))
    }
}
