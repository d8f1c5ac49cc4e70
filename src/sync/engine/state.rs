use std::collections::BTreeSet;

use crate::sync::domain::{Field, ReadModel};
use crate::sync::engine::types::ActionPhase;
use crate::sync::types::Session;

#[derive(Debug)]
pub struct EngineState {
    pub session: Session,

    /// Bumped whenever the queried contract changes; completions from an
    /// older epoch are discarded.
    pub epoch: u64,

    pub read_model: ReadModel,

    /// Fields with a query outstanding in the current epoch.
    pub in_flight: BTreeSet<Field>,

    pub action: ActionPhase,
}
