//! Contract view-sync decision engine.
//!
//! This module implements the **Functional Core** of the dashboard logic.
//! It acts as a pure state machine:
//! - **Input**: `EngineEvent` (session changes, refresh requests, gateway results).
//! - **Output**: `Vec<EngineCommand>` (side effects to be executed by the controller).
//!
//! # Architecture guarantees
//! * **No Network**: This module never talks to the chain.
//! * **No Async**: All functions are synchronous and cheap.
//! * **Deterministic**: Given the same initial state and sequence of events, the output is always identical.
//!
//! The engine is the only writer of the read model and of the per-field
//! in-flight set. At most one query per field is outstanding within an epoch,
//! so two completions for the same field can never race.

pub mod state;
mod logic;
pub mod types;


pub use crate::sync::engine::types::{ActionPhase, EngineCommand, EngineEvent};
pub use logic::{fetch_failed_message, NOT_CONNECTED_MESSAGE};

use std::collections::BTreeSet;

use crate::sync::domain::{Field, ReadModel};
use crate::sync::types::Session;

use state::EngineState;

#[derive(Debug)]
pub struct SyncEngine {
    state: EngineState,
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncEngine {
    /// Creates an engine with an empty read model and no session.
    pub fn new() -> Self {
        Self {
            state: EngineState {
                session: Session::default(),
                epoch: 0,
                read_model: ReadModel::default(),
                in_flight: BTreeSet::new(),
                action: ActionPhase::Idle,
            },
        }
    }

    /// The main event handler.
    ///
    /// Consumes an event and returns a list of commands that the controller must execute.
    pub fn handle_event(&mut self, event: EngineEvent) -> Vec<EngineCommand> {
        match event {
            EngineEvent::SessionChanged(session) => logic::on_session_changed(&mut self.state, session),
            EngineEvent::RefreshRequested(fields) => logic::on_refresh(&mut self.state, &fields),
            EngineEvent::QueryResolved {
                field,
                epoch,
                outcome,
            } => logic::on_query_resolved(&mut self.state, field, epoch, outcome),
            EngineEvent::QueryAbandoned { field, epoch } => {
                logic::on_query_abandoned(&mut self.state, field, epoch)
            }
            EngineEvent::ActionRequested(request) => {
                logic::on_action_requested(&mut self.state, request)
            }
            EngineEvent::ActionResolved { method, outcome } => {
                logic::on_action_resolved(&mut self.state, method, outcome)
            }
            EngineEvent::ActionAbandoned { method } => {
                logic::on_action_abandoned(&mut self.state, method)
            }
        }
    }

    pub fn read_model(&self) -> &ReadModel {
        &self.state.read_model
    }

    pub fn session(&self) -> &Session {
        &self.state.session
    }

    pub fn action_phase(&self) -> ActionPhase {
        self.state.action
    }

    /// True while a submission is outstanding; all action controls are disabled.
    pub fn action_in_flight(&self) -> bool {
        self.state.action != ActionPhase::Idle
    }

    pub fn is_in_flight(&self, field: Field) -> bool {
        self.state.in_flight.contains(&field)
    }

    pub fn epoch(&self) -> u64 {
        self.state.epoch
    }
}
