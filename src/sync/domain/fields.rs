//! Tracked contract attributes and how each one is fetched and decoded.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::sync::domain::abi::ContractMethod;
use crate::sync::types::{AccountId, Balance};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    ProductName,
    CurrentBidder,
    CurrentBid,
    CurrentOwner,
    SoldStatus,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::ProductName,
        Field::CurrentBidder,
        Field::CurrentBid,
        Field::CurrentOwner,
        Field::SoldStatus,
    ];

    /// Fields behind the "update bid status" control.
    pub const AUCTION_STATUS: [Field; 4] = [
        Field::CurrentBid,
        Field::CurrentBidder,
        Field::CurrentOwner,
        Field::SoldStatus,
    ];

    pub fn descriptor(self) -> &'static FieldDescriptor {
        // FIELDS is ordered like the enum.
        &FIELDS[self as usize]
    }

    pub fn method(self) -> ContractMethod {
        self.descriptor().method
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().key)
    }
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Account(AccountId),
    Amount(Balance),
    Flag(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Account(a) => write!(f, "{}", a),
            FieldValue::Amount(n) => write!(f, "{}", n),
            FieldValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The dry run reported an error; carries the decoded message.
    #[error("contract returned an error: {0}")]
    Contract(String),
    #[error("expected {expected}, got {got}")]
    UnexpectedType { expected: &'static str, got: String },
    #[error("malformed value: {0}")]
    Malformed(String),
}

pub type DecodeFn = fn(&Value) -> Result<FieldValue, DecodeError>;

pub struct FieldDescriptor {
    pub field: Field,
    /// Short identifier used in logs and notifications.
    pub key: &'static str,
    /// Human label for the dashboard.
    pub label: &'static str,
    pub method: ContractMethod,
    pub decode: DecodeFn,
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("field", &self.field)
            .field("method", &self.method)
            .finish()
    }
}

pub static FIELDS: [FieldDescriptor; 5] = [
    FieldDescriptor {
        field: Field::ProductName,
        key: "productName",
        label: "Product Name",
        method: ContractMethod::ProductName,
        decode: decode_text,
    },
    FieldDescriptor {
        field: Field::CurrentBidder,
        key: "currentBidder",
        label: "Current Bidder",
        method: ContractMethod::GetCurrentBidder,
        decode: decode_account,
    },
    FieldDescriptor {
        field: Field::CurrentBid,
        key: "currentBid",
        label: "Current Bid",
        method: ContractMethod::GetCurrentBid,
        decode: decode_amount,
    },
    FieldDescriptor {
        field: Field::CurrentOwner,
        key: "currentOwner",
        label: "Current Owner",
        method: ContractMethod::GetCurrentOwner,
        decode: decode_account,
    },
    FieldDescriptor {
        field: Field::SoldStatus,
        key: "soldStatus",
        label: "Auction Status",
        method: ContractMethod::GetSoldStatus,
        decode: decode_flag,
    },
];

fn type_name(v: &Value) -> String {
    match v {
        Value::Null => "null".into(),
        Value::Bool(_) => "bool".into(),
        Value::Number(_) => "number".into(),
        Value::String(_) => "string".into(),
        Value::Array(_) => "array".into(),
        Value::Object(_) => "object".into(),
    }
}

fn decode_text(v: &Value) -> Result<FieldValue, DecodeError> {
    match v {
        Value::String(s) => Ok(FieldValue::Text(s.clone())),
        other => Err(DecodeError::UnexpectedType {
            expected: "string",
            got: type_name(other),
        }),
    }
}

fn decode_account(v: &Value) -> Result<FieldValue, DecodeError> {
    match v {
        Value::String(s) => Ok(FieldValue::Account(s.parse()?)),
        other => Err(DecodeError::UnexpectedType {
            expected: "account id",
            got: type_name(other),
        }),
    }
}

/// Balances arrive either as plain numbers or as human-formatted strings
/// ("200,000,000").
fn decode_amount(v: &Value) -> Result<FieldValue, DecodeError> {
    let amount = match v {
        // u128 values past u64::MAX only survive as their exact digits
        Value::Number(n) => n
            .as_u64()
            .map(Balance::from)
            .or_else(|| parse_grouped(&n.to_string())),
        Value::String(s) => parse_grouped(s),
        other => {
            return Err(DecodeError::UnexpectedType {
                expected: "balance",
                got: type_name(other),
            })
        }
    };
    amount
        .map(FieldValue::Amount)
        .ok_or_else(|| DecodeError::Malformed(format!("balance {}", v)))
}

/// Plain digits, or thousands grouped with a single `,` or `_` separator.
fn parse_grouped(s: &str) -> Option<Balance> {
    let digits = match s.chars().find(|c| *c == ',' || *c == '_') {
        None => s.to_string(),
        Some(sep) => {
            let mut groups = s.split(sep);
            let head = groups.next()?;
            if head.is_empty() || head.len() > 3 {
                return None;
            }
            let mut digits = head.to_string();
            for group in groups {
                if group.len() != 3 {
                    return None;
                }
                digits.push_str(group);
            }
            digits
        }
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn decode_flag(v: &Value) -> Result<FieldValue, DecodeError> {
    match v {
        Value::Bool(b) => Ok(FieldValue::Flag(*b)),
        other => Err(DecodeError::UnexpectedType {
            expected: "bool",
            got: type_name(other),
        }),
    }
}
