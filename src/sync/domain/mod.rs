//! Contract-facing domain types: the typed ABI, tracked fields and the
//! read model.

pub mod abi;
pub mod action;
pub mod fields;
pub mod read_model;

#[cfg(test)]
mod tests;

pub use abi::{AbiError, ContractMethod, MethodKind};
pub use action::{Action, ActionRequest, DEFAULT_BID, MINIMUM_BID};
pub use fields::{DecodeError, Field, FieldDescriptor, FieldValue, FIELDS};
pub use read_model::{FieldState, ReadModel};
