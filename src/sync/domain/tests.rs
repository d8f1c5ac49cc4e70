#![cfg(test)]
use serde_json::json;

use crate::sync::domain::*;
use crate::sync::types::AccountId;

const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

#[test]
fn method_names_round_trip_through_from_str() {
    for m in ContractMethod::ALL {
        assert_eq!(m.name().parse::<ContractMethod>().unwrap(), m);
    }
}

#[test]
fn greeter_method_names_are_rejected() {
    // Only the auction surface is supported.
    for name in ["setMessage", "reverseMessage", "greet"] {
        assert_eq!(
            name.parse::<ContractMethod>(),
            Err(AbiError::UnknownMethod(name.to_string()))
        );
    }
}

#[test]
fn descriptor_table_matches_field_order() {
    for f in Field::ALL {
        assert_eq!(f.descriptor().field, f);
        assert_eq!(f.method().kind(), MethodKind::Query);
    }
    assert_eq!(Field::SoldStatus.method().name(), "get_sold_status");
    assert_eq!(Field::ProductName.to_string(), "productName");
}

#[test]
fn every_action_builds_a_valid_request() {
    let actions = vec![
        Action::SetProductName("Widget".into()),
        Action::Bid(DEFAULT_BID),
        Action::Finalize,
        Action::Reclaim,
    ];
    for action in actions {
        let req = action.into_request();
        let rebuilt = ActionRequest::new(req.method(), req.args().to_vec(), req.attached_funds());
        assert_eq!(rebuilt, Ok(req));
    }
}

#[test]
fn request_shape_is_checked() {
    assert_eq!(
        ActionRequest::new(ContractMethod::ProductName, vec![], None),
        Err(AbiError::NotATransaction(ContractMethod::ProductName))
    );
    assert_eq!(
        ActionRequest::new(ContractMethod::SetProductName, vec![], None),
        Err(AbiError::Arity {
            method: ContractMethod::SetProductName,
            expected: 1,
            got: 0
        })
    );
    assert_eq!(
        ActionRequest::new(ContractMethod::FinalizeProduct, vec![], Some(1)),
        Err(AbiError::UnexpectedFunds(ContractMethod::FinalizeProduct))
    );
    assert_eq!(
        ActionRequest::new(ContractMethod::BidProduct, vec![], None),
        Err(AbiError::MissingFunds(ContractMethod::BidProduct))
    );
}

#[test]
fn bid_request_carries_funds() {
    let req = Action::Bid(200_000_000).into_request();
    assert_eq!(req.method().name(), "bidProduct");
    assert_eq!(req.attached_funds(), Some(200_000_000));
    assert!(req.args().is_empty());
}

#[test]
fn decoders_accept_chain_shapes() {
    let decode = |f: Field, v| (f.descriptor().decode)(&v);

    assert_eq!(
        decode(Field::ProductName, json!("Golden watch")),
        Ok(FieldValue::Text("Golden watch".into()))
    );
    assert_eq!(
        decode(Field::CurrentBid, json!("200,000,000")),
        Ok(FieldValue::Amount(200_000_000))
    );
    assert_eq!(
        decode(Field::CurrentBid, json!(100000000u64)),
        Ok(FieldValue::Amount(100_000_000))
    );
    assert_eq!(
        decode(Field::CurrentBid, json!("1_000")),
        Ok(FieldValue::Amount(1_000))
    );
    assert_eq!(
        decode(Field::CurrentBid, json!(u128::MAX)),
        Ok(FieldValue::Amount(u128::MAX))
    );
    assert_eq!(decode(Field::SoldStatus, json!(true)), Ok(FieldValue::Flag(true)));
    assert_eq!(
        decode(Field::CurrentOwner, json!(ALICE)),
        Ok(FieldValue::Account(ALICE.parse().unwrap()))
    );
}

#[test]
fn decoders_reject_garbled_values() {
    let decode = |f: Field, v| (f.descriptor().decode)(&v);

    assert!(decode(Field::ProductName, json!(42)).is_err());
    assert!(decode(Field::CurrentBid, json!("12ab")).is_err());
    assert!(decode(Field::CurrentBid, json!(-5)).is_err());
    assert!(decode(Field::CurrentBid, json!(1.5)).is_err());
    // separators only between complete thousands groups
    for garbled in ["1,,0__0", "1,0", ",100", "100,", "1,000_000", "1000,000", "+100", " 100"] {
        assert!(decode(Field::CurrentBid, json!(garbled)).is_err(), "{:?} decoded", garbled);
    }
    assert!(decode(Field::SoldStatus, json!("true")).is_err());
    // '0' and 'l' are outside the base58 alphabet
    assert!(decode(Field::CurrentBidder, json!("0xdeadbeef")).is_err());
    assert!(decode(Field::CurrentBidder, json!("")).is_err());
    assert!(decode(Field::CurrentBidder, json!(format!(" {} ", ALICE))).is_err());
}

#[test]
fn read_model_starts_empty_and_idle() {
    let model = ReadModel::default();
    assert_eq!(model.iter().count(), 5);
    assert!(!model.any_loading());
    assert_eq!(model.product_name(), None);
    assert_eq!(model.sold_status(), None);
}

#[test]
fn read_model_typed_accessors() {
    let mut model = ReadModel::default();
    let alice: AccountId = ALICE.parse().unwrap();
    model.get_mut(Field::CurrentBidder).value = Some(FieldValue::Account(alice.clone()));
    model.get_mut(Field::CurrentBid).value = Some(FieldValue::Amount(7));

    assert_eq!(model.current_bidder(), Some(&alice));
    assert_eq!(model.current_bid(), Some(7));
    assert_eq!(model.current_owner(), None);
}
