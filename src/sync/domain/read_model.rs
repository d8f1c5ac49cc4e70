use std::collections::BTreeMap;

use crate::sync::domain::fields::{Field, FieldValue};
use crate::sync::types::{AccountId, Balance};

/// One tracked attribute: last decoded value plus a loading flag.
///
/// While `loading` is set the previous value is kept (stale while
/// revalidating). A failed fetch clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: Option<FieldValue>,
    pub loading: bool,
}

/// Client-side mirror of the contract's exposed attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadModel {
    fields: BTreeMap<Field, FieldState>,
}

impl Default for ReadModel {
    fn default() -> Self {
        Self {
            fields: Field::ALL
                .iter()
                .map(|f| (*f, FieldState::default()))
                .collect(),
        }
    }
}

impl ReadModel {
    pub fn get(&self, field: Field) -> &FieldState {
        // every field is inserted in Default and never removed
        &self.fields[&field]
    }

    pub(crate) fn get_mut(&mut self, field: Field) -> &mut FieldState {
        self.fields.entry(field).or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldState)> {
        self.fields.iter().map(|(f, s)| (*f, s))
    }

    pub fn any_loading(&self) -> bool {
        self.fields.values().any(|s| s.loading)
    }

    pub fn product_name(&self) -> Option<&str> {
        match &self.get(Field::ProductName).value {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn current_bidder(&self) -> Option<&AccountId> {
        self.account(Field::CurrentBidder)
    }

    pub fn current_owner(&self) -> Option<&AccountId> {
        self.account(Field::CurrentOwner)
    }

    pub fn current_bid(&self) -> Option<Balance> {
        match self.get(Field::CurrentBid).value {
            Some(FieldValue::Amount(n)) => Some(n),
            _ => None,
        }
    }

    pub fn sold_status(&self) -> Option<bool> {
        match self.get(Field::SoldStatus).value {
            Some(FieldValue::Flag(b)) => Some(b),
            _ => None,
        }
    }

    fn account(&self, field: Field) -> Option<&AccountId> {
        match &self.get(field).value {
            Some(FieldValue::Account(a)) => Some(a),
            _ => None,
        }
    }
}
