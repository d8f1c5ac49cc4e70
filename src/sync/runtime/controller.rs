use crate::sync::domain::{Action, ActionRequest, Field, ReadModel};
use crate::sync::engine::{EngineCommand, EngineEvent, SyncEngine};
use crate::sync::error::{FetchError, GatewayError};
use crate::sync::gateway::{decode_output, ContractGateway};
use crate::sync::notify::NotificationSink;
use crate::sync::types::{AccountId, ContractHandle, Session, TxReceipt};

use futures::future::join_all;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub read_model: ReadModel,
    pub session: Session,
    /// All action controls are disabled while set.
    pub action_in_flight: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Local guard failed (no signer / contract / connection); nothing was sent.
    Rejected,
    /// Another action was still being submitted; nothing was sent.
    Busy,
    Confirmed(TxReceipt),
    Failed(GatewayError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    pub outcome: ActionOutcome,
    /// The caller should clear its rename form.
    pub reset_form: bool,
}

impl ActionReport {
    fn without_submit(outcome: ActionOutcome) -> Self {
        Self {
            outcome,
            reset_form: false,
        }
    }
}

/// What a batch of engine commands asked for beyond queries and toasts.
#[derive(Default)]
struct Executed<'a> {
    notified: usize,
    reset_form: bool,
    submit: Option<PendingSubmit<'a>>,
}

struct PendingSubmit<'a> {
    request: ActionRequest,
    contract: ContractHandle,
    signer: AccountId,
    guard: AbandonGuard<'a>,
}

/// Feeds `on_drop` into the engine unless disarmed first.
///
/// Every query and submission the engine hands out is paired with one of
/// these, so a caller dropping its future mid-await still releases the
/// field or the action phase.
struct AbandonGuard<'a> {
    engine: &'a Mutex<SyncEngine>,
    on_drop: Option<EngineEvent>,
}

impl<'a> AbandonGuard<'a> {
    fn new(engine: &'a Mutex<SyncEngine>, on_drop: EngineEvent) -> Self {
        Self {
            engine,
            on_drop: Some(on_drop),
        }
    }

    fn disarm(mut self) {
        self.on_drop = None;
    }
}

impl Drop for AbandonGuard<'_> {
    fn drop(&mut self) {
        if let Some(event) = self.on_drop.take() {
            log::debug!("[CONTROLLER] dropped before completion: {:?}", event);
            let cmds = lock(self.engine).handle_event(event);
            if !cmds.is_empty() {
                log::error!("[CONTROLLER] unexpected commands after abandon: {:?}", cmds);
            }
        }
    }
}

fn lock(engine: &Mutex<SyncEngine>) -> MutexGuard<'_, SyncEngine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

/// **SyncController**
///
/// The imperative shell around [`SyncEngine`]. It has three responsibilities:
/// 1. **Drive the engine** by feeding it session changes, user requests and gateway results.
/// 2. **Execute side effects** the engine emits: queries, submissions, toasts.
/// 3. **Expose a snapshot** of the read model for rendering.
///
/// All entry points are `&self` and may be awaited concurrently on one task
/// (e.g. with `join!`). The engine lock is never held across an await.
/// No entry point returns an error: failures end in the log or a toast.
pub struct SyncController<G> {
    engine: Mutex<SyncEngine>,
    gateway: Arc<G>,
    sink: Arc<dyn NotificationSink>,

    /// Start time for logging relative timestamps.
    t0: Instant,
}

impl<G: ContractGateway> SyncController<G> {
    pub fn new(gateway: Arc<G>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            engine: Mutex::new(SyncEngine::new()),
            gateway,
            sink,
            t0: Instant::now(),
        }
    }

    /// Apply a new wallet/contract session. Fetches everything once when the
    /// contract becomes available or changes identity.
    pub async fn set_session(&self, session: Session) {
        self.info(&format!(
            "session: connected={} contract={:?} signer={:?}",
            session.connected,
            session.contract.as_ref().map(|c| c.address.to_string()),
            session.signer.as_ref().map(|s| s.to_string()),
        ));
        let cmds = self.dispatch(EngineEvent::SessionChanged(session));
        self.execute(cmds).await;
    }

    /// Re-fetch one field. A no-op while that field is already in flight.
    pub async fn refresh_field(&self, field: Field) {
        self.refresh(vec![field]).await;
    }

    pub async fn refresh_all(&self) {
        self.refresh(Field::ALL.to_vec()).await;
    }

    /// Bid, bidder, owner and sold status; the product name is left alone.
    pub async fn refresh_auction_status(&self) {
        self.refresh(Field::AUCTION_STATUS.to_vec()).await;
    }

    async fn refresh(&self, fields: Vec<Field>) {
        let cmds = self.dispatch(EngineEvent::RefreshRequested(fields));
        self.execute(cmds).await;
    }

    pub async fn perform(&self, action: Action) -> ActionReport {
        self.info(&format!("perform: {}", action));
        self.perform_request(action.into_request()).await
    }

    /// Submit `request` if the session allows it, then re-sync every field
    /// whatever the outcome.
    pub async fn perform_request(&self, request: ActionRequest) -> ActionReport {
        let method = request.method();
        let cmds = self.dispatch(EngineEvent::ActionRequested(request));
        let executed = self.execute(cmds).await;

        let Some(PendingSubmit {
            request,
            contract,
            signer,
            guard,
        }) = executed.submit
        else {
            let outcome = if executed.notified > 0 {
                ActionOutcome::Rejected
            } else {
                ActionOutcome::Busy
            };
            self.debug(&format!("{} not submitted: {:?}", method, outcome));
            return ActionReport::without_submit(outcome);
        };

        self.debug(&format!("submitting {} as {}", method, signer));
        let outcome = self.gateway.submit(&signer, &contract, &request).await;
        guard.disarm();
        let report = match &outcome {
            Ok(receipt) => ActionOutcome::Confirmed(receipt.clone()),
            Err(e) => ActionOutcome::Failed(e.clone()),
        };

        let cmds = self.dispatch(EngineEvent::ActionResolved { method, outcome });
        let executed = self.execute(cmds).await;

        ActionReport {
            outcome: report,
            reset_form: executed.reset_form,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let engine = self.engine();
        Snapshot {
            read_model: engine.read_model().clone(),
            session: engine.session().clone(),
            action_in_flight: engine.action_in_flight(),
        }
    }

    /// Feeds an event into the engine and returns the commands it emitted.
    fn dispatch(&self, event: EngineEvent) -> Vec<EngineCommand> {
        self.trace(&format!("engine.handle_event({:?})", event));
        self.engine().handle_event(event)
    }

    /// Runs queries concurrently and fires toasts; reports the rest.
    async fn execute(&self, cmds: Vec<EngineCommand>) -> Executed<'_> {
        let mut executed = Executed::default();
        let mut fetches = Vec::new();

        for cmd in cmds {
            self.trace(&format!("cmd: {:?}", cmd));
            match cmd {
                EngineCommand::Query {
                    field,
                    epoch,
                    contract,
                    caller,
                } => {
                    // armed before the fetch is first polled
                    let guard =
                        AbandonGuard::new(&self.engine, EngineEvent::QueryAbandoned { field, epoch });
                    fetches.push(self.fetch(guard, field, epoch, contract, caller));
                }
                EngineCommand::Notify(n) => {
                    executed.notified += 1;
                    self.sink.notify(n);
                }
                EngineCommand::ResetForm => executed.reset_form = true,
                EngineCommand::Submit {
                    request,
                    contract,
                    signer,
                } => {
                    let guard = AbandonGuard::new(
                        &self.engine,
                        EngineEvent::ActionAbandoned {
                            method: request.method(),
                        },
                    );
                    executed.submit = Some(PendingSubmit {
                        request,
                        contract,
                        signer,
                        guard,
                    });
                }
            }
        }

        join_all(fetches).await;
        executed
    }

    async fn fetch(
        &self,
        guard: AbandonGuard<'_>,
        field: Field,
        epoch: u64,
        contract: ContractHandle,
        caller: Option<AccountId>,
    ) {
        let outcome = match self.gateway.query(caller.as_ref(), &contract, field.method()).await {
            Ok(raw) => decode_output(&raw, field).map_err(FetchError::from),
            Err(e) => Err(FetchError::from(e)),
        };
        guard.disarm();

        for cmd in self.dispatch(EngineEvent::QueryResolved { field, epoch, outcome }) {
            match cmd {
                EngineCommand::Notify(n) => self.sink.notify(n),
                other => log::error!("[CONTROLLER] unexpected command after query: {:?}", other),
            }
        }
    }

    fn engine(&self) -> MutexGuard<'_, SyncEngine> {
        lock(&self.engine)
    }

    fn t(&self) -> u128 {
        self.t0.elapsed().as_micros()
    }

    fn info(&self, msg: &str) {
        log::info!("[CONTROLLER] {:>8}us: {}", self.t(), msg);
    }

    fn debug(&self, msg: &str) {
        log::debug!("[CONTROLLER] {:>8}us: {}", self.t(), msg);
    }

    fn trace(&self, msg: &str) {
        log::trace!("[CONTROLLER] {:>8}us: {}", self.t(), msg);
    }
}

// Helper methods for testing interaction
#[cfg(test)]
impl<G> SyncController<G> {
    pub fn gateway_ref(&self) -> &G {
        &self.gateway
    }

    pub fn engine_ref(&self) -> MutexGuard<'_, SyncEngine> {
        lock(&self.engine)
    }
}
