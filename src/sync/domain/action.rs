use std::fmt;

use serde_json::Value;

use crate::sync::domain::abi::{AbiError, ContractMethod, MethodKind};
use crate::sync::types::Balance;

/// Bid attached by the "Make a Bid" control.
pub const DEFAULT_BID: Balance = 200_000_000;

/// The contract refuses bids at or below this amount. Informational only.
pub const MINIMUM_BID: Balance = 100_000_000;

/// A user-level action on the auction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetProductName(String),
    Bid(Balance),
    Finalize,
    Reclaim,
}

impl Action {
    pub fn method(&self) -> ContractMethod {
        match self {
            Action::SetProductName(_) => ContractMethod::SetProductName,
            Action::Bid(_) => ContractMethod::BidProduct,
            Action::Finalize => ContractMethod::FinalizeProduct,
            Action::Reclaim => ContractMethod::TakeBackMoney,
        }
    }

    pub fn into_request(self) -> ActionRequest {
        let method = self.method();
        let (args, attached_funds) = match self {
            Action::SetProductName(name) => (vec![Value::String(name)], None),
            Action::Bid(amount) => (Vec::new(), Some(amount)),
            Action::Finalize | Action::Reclaim => (Vec::new(), None),
        };
        ActionRequest {
            method,
            args,
            attached_funds,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SetProductName(name) => write!(f, "set product name to {:?}", name),
            Action::Bid(amount) => write!(f, "bid {}", amount),
            Action::Finalize => f.write_str("finalize sale"),
            Action::Reclaim => f.write_str("take back money"),
        }
    }
}

/// A fully-formed submission, consumed once by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    method: ContractMethod,
    args: Vec<Value>,
    attached_funds: Option<Balance>,
}

impl ActionRequest {
    /// Checks the request against the method's shape.
    pub fn new(
        method: ContractMethod,
        args: Vec<Value>,
        attached_funds: Option<Balance>,
    ) -> Result<Self, AbiError> {
        if method.kind() != MethodKind::Transaction {
            return Err(AbiError::NotATransaction(method));
        }
        if args.len() != method.arity() {
            return Err(AbiError::Arity {
                method,
                expected: method.arity(),
                got: args.len(),
            });
        }
        match (method.is_payable(), attached_funds) {
            (false, Some(_)) => return Err(AbiError::UnexpectedFunds(method)),
            (true, None) => return Err(AbiError::MissingFunds(method)),
            _ => {}
        }
        Ok(Self {
            method,
            args,
            attached_funds,
        })
    }

    pub fn method(&self) -> ContractMethod {
        self.method
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn attached_funds(&self) -> Option<Balance> {
        self.attached_funds
    }
}
