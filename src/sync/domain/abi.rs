//! Typed view of the auction contract's message surface.
//!
//! The contract is reached by method-name strings; everything in this crate
//! goes through [`ContractMethod`] instead, so an unsupported name is
//! rejected when it is parsed rather than failing at call time.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// Read-only dry run, no signer needed.
    Query,
    /// State-mutating extrinsic, needs a signer.
    Transaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContractMethod {
    ProductName,
    GetCurrentBidder,
    GetCurrentBid,
    GetCurrentOwner,
    GetSoldStatus,
    SetProductName,
    BidProduct,
    FinalizeProduct,
    TakeBackMoney,
}

impl ContractMethod {
    pub const ALL: [ContractMethod; 9] = [
        ContractMethod::ProductName,
        ContractMethod::GetCurrentBidder,
        ContractMethod::GetCurrentBid,
        ContractMethod::GetCurrentOwner,
        ContractMethod::GetSoldStatus,
        ContractMethod::SetProductName,
        ContractMethod::BidProduct,
        ContractMethod::FinalizeProduct,
        ContractMethod::TakeBackMoney,
    ];

    /// Method name as exposed in the contract metadata.
    pub fn name(self) -> &'static str {
        match self {
            ContractMethod::ProductName => "productName",
            ContractMethod::GetCurrentBidder => "getCurrentBidder",
            ContractMethod::GetCurrentBid => "getCurrentBid",
            ContractMethod::GetCurrentOwner => "getCurrentOwner",
            ContractMethod::GetSoldStatus => "get_sold_status",
            ContractMethod::SetProductName => "setProductName",
            ContractMethod::BidProduct => "bidProduct",
            ContractMethod::FinalizeProduct => "finalize_product",
            ContractMethod::TakeBackMoney => "take_back_money",
        }
    }

    pub fn kind(self) -> MethodKind {
        match self {
            ContractMethod::ProductName
            | ContractMethod::GetCurrentBidder
            | ContractMethod::GetCurrentBid
            | ContractMethod::GetCurrentOwner
            | ContractMethod::GetSoldStatus => MethodKind::Query,
            ContractMethod::SetProductName
            | ContractMethod::BidProduct
            | ContractMethod::FinalizeProduct
            | ContractMethod::TakeBackMoney => MethodKind::Transaction,
        }
    }

    /// Whether the message accepts attached funds.
    pub fn is_payable(self) -> bool {
        matches!(self, ContractMethod::BidProduct)
    }

    /// Number of positional arguments.
    pub fn arity(self) -> usize {
        match self {
            ContractMethod::SetProductName => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for ContractMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContractMethod {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContractMethod::ALL
            .iter()
            .copied()
            .find(|m| m.name() == s)
            .ok_or_else(|| AbiError::UnknownMethod(s.to_string()))
    }
}

/// Invalid use of the contract surface, caught before any gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    #[error("unknown contract method `{0}`")]
    UnknownMethod(String),
    #[error("`{0}` is a query, not a transaction")]
    NotATransaction(ContractMethod),
    #[error("`{method}` takes {expected} argument(s), got {got}")]
    Arity {
        method: ContractMethod,
        expected: usize,
        got: usize,
    },
    #[error("`{0}` is not payable")]
    UnexpectedFunds(ContractMethod),
    #[error("`{0}` requires attached funds")]
    MissingFunds(ContractMethod),
}
