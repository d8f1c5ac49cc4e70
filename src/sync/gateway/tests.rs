#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::sync::domain::{Action, ContractMethod, DecodeError, Field, FieldValue};
    use crate::sync::error::GatewayError;
    use crate::sync::gateway::{decode_output, ContractGateway, ContractState, InMemoryGateway, RawOutput};
    use crate::sync::types::{AccountId, ContractHandle};

    const OWNER: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    const BIDDER: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";
    const CONTRACT: &str = "5FLSigC9HGRKVhB9FiEo4Y3koPsNmBmLJbpXg2mp1hXcS59Y";

    fn account(s: &str) -> AccountId {
        s.parse().unwrap()
    }

    fn gateway() -> InMemoryGateway {
        InMemoryGateway::new(ContractState::new("Golden watch", account(OWNER)))
    }

    fn handle() -> ContractHandle {
        ContractHandle::new(account(CONTRACT))
    }

    #[test]
    fn error_output_is_a_contract_decode_error() {
        let raw = RawOutput::error("Bad arguments");
        assert_eq!(
            decode_output(&raw, Field::ProductName),
            Err(DecodeError::Contract("Bad arguments".into()))
        );
    }

    #[test]
    fn ok_output_goes_through_field_decoder() {
        let raw = RawOutput::ok(json!("100,000,000"));
        assert_eq!(
            decode_output(&raw, Field::CurrentBid),
            Ok(FieldValue::Amount(100_000_000))
        );
    }

    #[tokio::test]
    async fn queries_are_recorded_and_decodable() {
        let gw = gateway();
        for field in Field::ALL {
            let raw = gw.query(None, &handle(), field.method()).await.unwrap();
            assert!(decode_output(&raw, field).is_ok(), "{} should decode", field);
        }
        assert_eq!(gw.queries().len(), 5);
        assert_eq!(gw.query_count(ContractMethod::GetSoldStatus), 1);
    }

    #[tokio::test]
    async fn transaction_methods_cannot_be_queried() {
        let gw = gateway();
        let r = gw.query(None, &handle(), ContractMethod::BidProduct).await;
        assert!(matches!(r, Err(GatewayError::Rejected(_))));
    }

    #[tokio::test]
    async fn overrides_win_until_cleared() {
        let gw = gateway();
        gw.fail_query(ContractMethod::ProductName, GatewayError::Transport("down".into()));
        assert!(gw.query(None, &handle(), ContractMethod::ProductName).await.is_err());

        gw.clear_override(ContractMethod::ProductName);
        let raw = gw.query(None, &handle(), ContractMethod::ProductName).await.unwrap();
        assert_eq!(raw.output, json!("Golden watch"));
    }

    #[tokio::test]
    async fn submissions_mutate_state() {
        let gw = gateway();
        let bidder = account(BIDDER);

        gw.submit(&bidder, &handle(), &Action::Bid(200_000_000).into_request())
            .await
            .unwrap();
        let s = gw.contract_state();
        assert_eq!(s.current_bid, 300_000_000);
        assert_eq!(s.current_bidder, bidder);

        gw.submit(&account(OWNER), &handle(), &Action::Finalize.into_request())
            .await
            .unwrap();
        let s = gw.contract_state();
        assert!(s.sold);
        assert_eq!(s.current_owner, bidder);
        assert_eq!(gw.submissions().len(), 2);
    }

    #[tokio::test]
    async fn scripted_submit_failure_leaves_state_alone() {
        let gw = gateway();
        gw.fail_next_submit(GatewayError::Rejected("signing cancelled".into()));

        let r = gw
            .submit(&account(OWNER), &handle(), &Action::SetProductName("Widget".into()).into_request())
            .await;
        assert_eq!(r, Err(GatewayError::Rejected("signing cancelled".into())));
        assert_eq!(gw.contract_state().product_name, "Golden watch");

        // only the next one fails
        let r = gw
            .submit(&account(OWNER), &handle(), &Action::SetProductName("Widget".into()).into_request())
            .await;
        assert!(r.is_ok());
        assert_eq!(gw.contract_state().product_name, "Widget");
    }

    #[tokio::test]
    async fn overflowing_bid_is_rejected() {
        let mut state = ContractState::new("Golden watch", account(OWNER));
        state.current_bid = u128::MAX - 1;
        let gw = InMemoryGateway::new(state);

        let r = gw
            .submit(&account(BIDDER), &handle(), &Action::Bid(2).into_request())
            .await;
        assert!(matches!(r, Err(GatewayError::Rejected(_))));
        let s = gw.contract_state();
        assert_eq!(s.current_bid, u128::MAX - 1);
        assert_eq!(s.current_bidder, account(OWNER));

        // the first block still goes to the next successful submission
        let receipt = gw
            .submit(&account(BIDDER), &handle(), &Action::Reclaim.into_request())
            .await
            .unwrap();
        assert_eq!(receipt.block_hash[31], 1);
    }

    #[test]
    fn contract_state_reads_from_json() {
        let s: ContractState = serde_json::from_value(json!({
            "product_name": "Vase",
            "current_owner": OWNER,
            "current_bidder": BIDDER,
            "current_bid": 150000000u64
        }))
        .unwrap();
        assert!(!s.sold);
        assert_eq!(s.current_bidder, account(BIDDER));
    }
}
