//! Text rendering of the dashboard from a controller snapshot.

use std::fmt;

use crate::sync::domain::{Field, FieldValue, MINIMUM_BID};
use crate::sync::runtime::Snapshot;

pub const LOADING: &str = "Loading…";
pub const RUNNING: &str = "Running";
pub const AUCTION_END: &str = "Auction End";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub rows: Vec<Row>,
    /// Bid / rename / finalize / reclaim / refresh buttons.
    pub controls_enabled: bool,
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let ready = snapshot.session.can_query();
        let rows = snapshot
            .read_model
            .iter()
            .map(|(field, state)| {
                let text = match field {
                    // rendered from the flag alone; unknown counts as running
                    Field::SoldStatus => match state.value {
                        Some(FieldValue::Flag(true)) => AUCTION_END.to_string(),
                        _ => RUNNING.to_string(),
                    },
                    _ if state.loading || !ready => LOADING.to_string(),
                    // failed fields render empty
                    _ => state.value.as_ref().map(|v| v.to_string()).unwrap_or_default(),
                };
                Row {
                    label: field.label(),
                    text,
                }
            })
            .collect();

        Self {
            rows,
            controls_enabled: !snapshot.action_in_flight,
        }
    }

    pub fn row(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.text.as_str())
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-----------------------------------")?;
        for row in &self.rows {
            writeln!(f, "{:<16}  {}", format!("{}:", row.label), row.text)?;
        }
        writeln!(f, "{:<16}  {}", "Minimum Bid:", MINIMUM_BID)?;
        write!(f, "-----------------------------------")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::domain::{FieldState, ReadModel};
    use crate::sync::types::{ContractHandle, Session};

    fn snapshot(model: ReadModel, with_contract: bool, busy: bool) -> Snapshot {
        let contract = "5FLSigC9HGRKVhB9FiEo4Y3koPsNmBmLJbpXg2mp1hXcS59Y"
            .parse()
            .map(ContractHandle::new)
            .ok()
            .filter(|_| with_contract);
        Snapshot {
            read_model: model,
            session: Session {
                connected: true,
                contract,
                signer: None,
            },
            action_in_flight: busy,
        }
    }

    #[test]
    fn loading_and_missing_contract_show_placeholder() {
        let mut model = ReadModel::default();
        model.get_mut(Field::ProductName).loading = true;

        let view = DashboardView::from_snapshot(&snapshot(model.clone(), true, false));
        assert_eq!(view.row("Product Name"), Some(LOADING));
        assert_eq!(view.row("Current Bid"), Some(""));

        let view = DashboardView::from_snapshot(&snapshot(model, false, false));
        assert_eq!(view.row("Current Bid"), Some(LOADING));
    }

    #[test]
    fn values_and_auction_status() {
        let mut model = ReadModel::default();
        *model.get_mut(Field::ProductName) = FieldState {
            value: Some(FieldValue::Text("Golden watch".into())),
            loading: false,
        };
        let view = DashboardView::from_snapshot(&snapshot(model.clone(), true, false));
        assert_eq!(view.row("Product Name"), Some("Golden watch"));
        assert_eq!(view.row("Auction Status"), Some(RUNNING));
        assert!(view.controls_enabled);

        model.get_mut(Field::SoldStatus).value = Some(FieldValue::Flag(true));
        let view = DashboardView::from_snapshot(&snapshot(model, true, true));
        assert_eq!(view.row("Auction Status"), Some(AUCTION_END));
        assert!(!view.controls_enabled);
        assert!(view.to_string().contains("Auction End"));
    }
}
