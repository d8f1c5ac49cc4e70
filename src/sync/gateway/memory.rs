use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::sync::domain::{ActionRequest, ContractMethod, DEFAULT_BID, MINIMUM_BID};
use crate::sync::error::GatewayError;
use crate::sync::gateway::api::{ContractGateway, RawOutput};
use crate::sync::types::{AccountId, Balance, ContractHandle, TxReceipt};

/// Plain contract state, as loaded from a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractState {
    pub product_name: String,
    pub current_owner: AccountId,
    pub current_bidder: AccountId,
    pub current_bid: Balance,
    #[serde(default)]
    pub sold: bool,
}

impl ContractState {
    /// Freshly deployed auction: owner is also the placeholder bidder.
    pub fn new(product_name: impl Into<String>, owner: AccountId) -> Self {
        Self {
            product_name: product_name.into(),
            current_bidder: owner.clone(),
            current_owner: owner,
            current_bid: MINIMUM_BID,
            sold: false,
        }
    }
}

struct MemoryState {
    contract: ContractState,
    /// Canned outputs taking precedence over `contract`.
    overrides: HashMap<ContractMethod, Result<RawOutput, GatewayError>>,
    submit_failures: VecDeque<GatewayError>,
    queries: Vec<ContractMethod>,
    submissions: Vec<ActionRequest>,
    blocks: u64,
}

/// Pure in-memory gateway for tests and offline use.
///
/// Submissions apply their obvious effect to the stored state without
/// checking any auction rule, so a follow-up query observes the change.
/// Every call yields once before answering, so concurrent callers on one
/// task interleave like they would against a real node.
pub struct InMemoryGateway {
    state: Mutex<MemoryState>,
}

impl InMemoryGateway {
    pub fn new(contract: ContractState) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                contract,
                overrides: HashMap::new(),
                submit_failures: VecDeque::new(),
                queries: Vec::new(),
                submissions: Vec::new(),
                blocks: 0,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Answer `method` with `output` until cleared.
    pub fn set_output(&self, method: ContractMethod, output: RawOutput) {
        self.state().overrides.insert(method, Ok(output));
    }

    /// Fail every `method` query with `error` until cleared.
    pub fn fail_query(&self, method: ContractMethod, error: GatewayError) {
        self.state().overrides.insert(method, Err(error));
    }

    pub fn clear_override(&self, method: ContractMethod) {
        self.state().overrides.remove(&method);
    }

    /// Fail the next submission with `error`.
    pub fn fail_next_submit(&self, error: GatewayError) {
        self.state().submit_failures.push_back(error);
    }

    pub fn contract_state(&self) -> ContractState {
        self.state().contract.clone()
    }

    /// Every query method seen so far, in call order.
    pub fn queries(&self) -> Vec<ContractMethod> {
        self.state().queries.clone()
    }

    pub fn query_count(&self, method: ContractMethod) -> usize {
        self.state().queries.iter().filter(|m| **m == method).count()
    }

    pub fn submissions(&self) -> Vec<ActionRequest> {
        self.state().submissions.clone()
    }
}

fn read(contract: &ContractState, method: ContractMethod) -> Option<Value> {
    let v = match method {
        ContractMethod::ProductName => json!(contract.product_name),
        ContractMethod::GetCurrentBidder => json!(contract.current_bidder),
        ContractMethod::GetCurrentBid => json!(contract.current_bid.to_string()),
        ContractMethod::GetCurrentOwner => json!(contract.current_owner),
        ContractMethod::GetSoldStatus => json!(contract.sold),
        _ => return None,
    };
    Some(v)
}

fn apply(
    contract: &mut ContractState,
    signer: &AccountId,
    request: &ActionRequest,
) -> Result<(), GatewayError> {
    match request.method() {
        ContractMethod::SetProductName => {
            if let Some(Value::String(name)) = request.args().first() {
                contract.product_name = name.clone();
            }
        }
        ContractMethod::BidProduct => {
            let funds = request.attached_funds().unwrap_or(DEFAULT_BID);
            contract.current_bid = contract
                .current_bid
                .checked_add(funds)
                .ok_or_else(|| GatewayError::Rejected("bid overflows the balance type".into()))?;
            contract.current_bidder = signer.clone();
        }
        ContractMethod::FinalizeProduct => {
            contract.sold = true;
            contract.current_owner = contract.current_bidder.clone();
        }
        // refunds move funds only; nothing the dashboard shows
        ContractMethod::TakeBackMoney => {}
        _ => {}
    }
    Ok(())
}

#[async_trait]
impl ContractGateway for InMemoryGateway {
    async fn query(
        &self,
        _caller: Option<&AccountId>,
        _contract: &ContractHandle,
        method: ContractMethod,
    ) -> Result<RawOutput, GatewayError> {
        self.state().queries.push(method);
        tokio::task::yield_now().await;

        let s = self.state();
        if let Some(canned) = s.overrides.get(&method) {
            log::debug!("[GATEWAY] {} -> canned {:?}", method, canned);
            return canned.clone();
        }
        match read(&s.contract, method) {
            Some(v) => Ok(RawOutput::ok(v)),
            None => Err(GatewayError::Rejected(format!("{} is not a query", method))),
        }
    }

    async fn submit(
        &self,
        signer: &AccountId,
        _contract: &ContractHandle,
        request: &ActionRequest,
    ) -> Result<TxReceipt, GatewayError> {
        self.state().submissions.push(request.clone());
        tokio::task::yield_now().await;

        let mut s = self.state();
        if let Some(e) = s.submit_failures.pop_front() {
            log::debug!("[GATEWAY] {} -> failing with {}", request.method(), e);
            return Err(e);
        }
        apply(&mut s.contract, signer, request)?;
        s.blocks += 1;

        let mut block_hash = [0u8; 32];
        block_hash[24..].copy_from_slice(&s.blocks.to_be_bytes());
        log::info!("[GATEWAY] {} included in block #{}", request.method(), s.blocks);
        Ok(TxReceipt { block_hash })
    }
}
