use crate::sync::domain::{ActionRequest, ContractMethod, Field, FieldState, FieldValue, ReadModel};
use crate::sync::engine::state::EngineState;
use crate::sync::engine::types::{ActionPhase, EngineCommand};
use crate::sync::error::{FetchError, GatewayError};
use crate::sync::types::{ContractHandle, Notification, Session, TxReceipt};

pub const NOT_CONNECTED_MESSAGE: &str = "Wallet is not connected. Try again…";

pub fn fetch_failed_message(field: Field) -> String {
    format!("Error while fetching {}. Try again…", field)
}

/// The contract we can query right now, if any.
fn query_target(session: &Session) -> Option<&ContractHandle> {
    if session.connected {
        session.contract.as_ref()
    } else {
        None
    }
}

fn set_phase(state: &mut EngineState, to: ActionPhase) {
    log::debug!("[ENGINE] action {:?} -> {:?}", state.action, to);
    state.action = to;
}

pub fn on_session_changed(state: &mut EngineState, session: Session) -> Vec<EngineCommand> {
    let before = query_target(&state.session).cloned();
    let after = query_target(&session).cloned();
    state.session = session;

    if before == after {
        log::trace!("[ENGINE] session changed, query target unchanged");
        return Vec::new();
    }

    state.epoch += 1;
    state.in_flight.clear();
    state.read_model = ReadModel::default();

    match after {
        Some(contract) => {
            log::info!(
                "[ENGINE] contract {} ready (epoch {}), refreshing all fields",
                contract.address,
                state.epoch
            );
            on_refresh(state, &Field::ALL)
        }
        None => {
            log::info!("[ENGINE] contract unavailable (epoch {}), read model cleared", state.epoch);
            Vec::new()
        }
    }
}

pub fn on_refresh(state: &mut EngineState, fields: &[Field]) -> Vec<EngineCommand> {
    let contract = match query_target(&state.session) {
        Some(c) => c.clone(),
        None => {
            log::debug!("[ENGINE] refresh ignored: not connected");
            return Vec::new();
        }
    };

    let mut cmds = Vec::new();
    for &field in fields {
        if !state.in_flight.insert(field) {
            log::debug!("[ENGINE] {} already in flight, dropping refresh", field);
            continue;
        }
        // keep the previous value while revalidating
        state.read_model.get_mut(field).loading = true;
        cmds.push(EngineCommand::Query {
            field,
            epoch: state.epoch,
            contract: contract.clone(),
            caller: state.session.signer.clone(),
        });
    }
    cmds
}

pub fn on_query_resolved(
    state: &mut EngineState,
    field: Field,
    epoch: u64,
    outcome: Result<FieldValue, FetchError>,
) -> Vec<EngineCommand> {
    if epoch != state.epoch {
        log::debug!(
            "[ENGINE] discarding {} result from epoch {} (now {})",
            field,
            epoch,
            state.epoch
        );
        return Vec::new();
    }
    if !state.in_flight.remove(&field) {
        log::warn!("[ENGINE] unsolicited result for {}", field);
        return Vec::new();
    }

    let slot = state.read_model.get_mut(field);
    match outcome {
        Ok(value) => {
            log::trace!("[ENGINE] {} = {}", field, value);
            *slot = FieldState {
                value: Some(value),
                loading: false,
            };
            Vec::new()
        }
        Err(e) => {
            log::error!("[ENGINE] fetching {} failed: {}", field, e);
            *slot = FieldState::default();
            vec![EngineCommand::Notify(Notification::error(fetch_failed_message(field)))]
        }
    }
}

/// Releases the field without touching its last known value, so the next
/// refresh is not dropped.
pub fn on_query_abandoned(state: &mut EngineState, field: Field, epoch: u64) -> Vec<EngineCommand> {
    if epoch != state.epoch || !state.in_flight.remove(&field) {
        return Vec::new();
    }
    log::warn!("[ENGINE] {} query abandoned, releasing field", field);
    state.read_model.get_mut(field).loading = false;
    Vec::new()
}

pub fn on_action_requested(state: &mut EngineState, request: ActionRequest) -> Vec<EngineCommand> {
    if state.action != ActionPhase::Idle {
        log::warn!(
            "[ENGINE] {} ignored: {:?} still in progress",
            request.method(),
            state.action
        );
        return Vec::new();
    }

    set_phase(state, ActionPhase::Validating);

    let target = match (&state.session.signer, query_target(&state.session)) {
        (Some(signer), Some(contract)) => Some((signer.clone(), contract.clone())),
        _ => None,
    };
    let Some((signer, contract)) = target else {
        set_phase(state, ActionPhase::Rejected);
        set_phase(state, ActionPhase::Idle);
        return vec![EngineCommand::Notify(Notification::error(NOT_CONNECTED_MESSAGE))];
    };

    set_phase(state, ActionPhase::Submitting(request.method()));
    vec![EngineCommand::Submit {
        request,
        contract,
        signer,
    }]
}

pub fn on_action_resolved(
    state: &mut EngineState,
    method: ContractMethod,
    outcome: Result<TxReceipt, GatewayError>,
) -> Vec<EngineCommand> {
    if state.action != ActionPhase::Submitting(method) {
        log::warn!(
            "[ENGINE] unexpected completion of {} while {:?}",
            method,
            state.action
        );
        return Vec::new();
    }

    let mut cmds = Vec::new();
    match outcome {
        Ok(receipt) => {
            log::info!("[ENGINE] {} included in {}", method, receipt);
            set_phase(state, ActionPhase::Confirmed(method));
            if method == ContractMethod::SetProductName {
                cmds.push(EngineCommand::ResetForm);
            }
        }
        Err(e) => {
            // No toast here: the transaction layer reports its own failures.
            log::error!("[ENGINE] {} failed: {}", method, e);
            set_phase(state, ActionPhase::Failed(method));
        }
    }

    set_phase(state, ActionPhase::Idle);
    cmds.extend(on_refresh(state, &Field::ALL));
    cmds
}

/// The caller went away mid-submission. The chain state is unknown, so the
/// phase returns to `Idle` without a refresh; the next one picks it up.
pub fn on_action_abandoned(state: &mut EngineState, method: ContractMethod) -> Vec<EngineCommand> {
    if state.action != ActionPhase::Submitting(method) {
        return Vec::new();
    }
    log::warn!("[ENGINE] {} abandoned before completion", method);
    set_phase(state, ActionPhase::Idle);
    Vec::new()
}
