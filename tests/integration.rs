//! Integration tests for the billcheap-rs library.
//!
//! These tests exercise the public API end to end: normalization feeding
//! classification, selection fallbacks, auto-detect reconciliation, and
//! the full flow over a stub catalog source.

use async_trait::async_trait;
use billcheap_rs::classify::{classify_amount, AmountCurrency};
use billcheap_rs::flow::{TopUpFlow, TopUpOutcome, TopUpRequest};
use billcheap_rs::normalize::{normalize_operator, SUGGESTED_AMOUNT_COUNT};
use billcheap_rs::resolve::{resolve_auto_detected, AutoDetectResolution};
use billcheap_rs::select::{select_airtime_provider, select_mobile_data_provider};
use billcheap_rs::sources::{CatalogOptions, CatalogSource};
use billcheap_rs::types::{
    BillKind, Country, DenominationType, Operator, SelectionRequest,
};
use billcheap_rs::Result;
use std::collections::HashMap;

const USDC: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";

fn operator(id: i64, name: &str, iso: &str, destination_currency: &str) -> Operator {
    Operator {
        id,
        operator_id: None,
        name: name.to_string(),
        bundle: false,
        data: false,
        pin: false,
        denomination_type: DenominationType::Range,
        sender_currency_code: "NGN".to_string(),
        sender_currency_symbol: "₦".to_string(),
        destination_currency_code: destination_currency.to_string(),
        destination_currency_symbol: String::new(),
        country: Country {
            iso_name: iso.to_string(),
            name: iso.to_string(),
        },
        status: None,
        min_amount: Some(50.0),
        max_amount: Some(100000.0),
        local_min_amount: Some(5.0),
        local_max_amount: Some(1000.0),
        most_popular_amount: None,
        most_popular_local_amount: None,
        fixed_amounts: vec![],
        fixed_amounts_descriptions: HashMap::new(),
        local_fixed_amounts: vec![],
        local_fixed_amounts_descriptions: HashMap::new(),
        suggested_amounts: vec![],
        logo_urls: vec![],
        fx: None,
    }
}

fn fixed_operator(id: i64, name: &str, iso: &str, destination_currency: &str) -> Operator {
    let mut op = operator(id, name, iso, destination_currency);
    op.denomination_type = DenominationType::Fixed;
    op.min_amount = None;
    op.max_amount = None;
    op.fixed_amounts = vec![1000.0, 2000.0];
    op.local_fixed_amounts = vec![50.0, 100.0];
    op.local_fixed_amounts_descriptions =
        HashMap::from([("50".to_string(), "1GB Data Bundle".to_string())]);
    op.most_popular_local_amount = Some(50.0);
    op
}

#[test]
fn test_normalized_fixed_foreign_operator_uses_local_price_list() {
    let op = fixed_operator(1, "Vodacom South Africa", "ZA", "ZAR");
    let normalized = normalize_operator(&op, "NGN");

    assert_eq!(normalized.fixed_amounts, op.local_fixed_amounts);
    assert_eq!(
        normalized.fixed_amounts_descriptions,
        op.local_fixed_amounts_descriptions
    );
}

#[test]
fn test_normalization_is_noop_for_home_currency() {
    let op = operator(1, "MTN Nigeria", "NG", "NGN");
    assert_eq!(normalize_operator(&op, "NGN"), op);
}

#[test]
fn test_normalized_suggestions_classify_as_local() {
    // Amounts generated from the local band must be accepted as local.
    let op = operator(2, "Vodacom South Africa", "ZA", "ZAR");
    let normalized = normalize_operator(&op, "NGN");

    assert_eq!(normalized.suggested_amounts.len(), SUGGESTED_AMOUNT_COUNT);
    for &amount in &normalized.suggested_amounts {
        assert_eq!(classify_amount(&op, amount, true), AmountCurrency::Local);
    }
}

#[test]
fn test_airtime_selection_exact_scenario() {
    let catalog = vec![
        operator(1, "MTN Nigeria", "NG", "NGN"),
        operator(2, "Airtel Nigeria", "NG", "NGN"),
    ];
    let result = select_airtime_provider(&SelectionRequest {
        operators: catalog,
        provider_name: "MTN".to_string(),
        iso_code: "NG".to_string(),
        pin: None,
    });

    assert_eq!(result.selected.len(), 1);
    assert_eq!(result.selected[0].name, "MTN Nigeria");
}

#[test]
fn test_airtime_fallback_returns_country_slice() {
    let catalog = vec![
        operator(1, "MTN Nigeria", "NG", "NGN"),
        operator(2, "Airtel Nigeria", "NG", "NGN"),
    ];
    let named = select_airtime_provider(&SelectionRequest {
        operators: catalog.clone(),
        provider_name: "Glo".to_string(),
        iso_code: "NG".to_string(),
        pin: None,
    });
    let unfiltered = select_airtime_provider(&SelectionRequest {
        operators: catalog,
        provider_name: String::new(),
        iso_code: "NG".to_string(),
        pin: None,
    });

    let named_ids: Vec<i64> = named.selected.iter().map(|op| op.id).collect();
    let all_ids: Vec<i64> = unfiltered.selected.iter().map(|op| op.id).collect();
    assert_eq!(named_ids, all_ids);
    assert_eq!(named_ids, vec![1, 2]);
}

#[test]
fn test_selection_never_returns_wrong_product_family() {
    let mut data_op = fixed_operator(3, "MTN Data", "NG", "NGN");
    data_op.data = true;
    let mut bundle_op = operator(4, "MTN Bundles", "NG", "NGN");
    bundle_op.bundle = true;

    let catalog = vec![
        operator(1, "MTN Nigeria", "NG", "NGN"),
        data_op,
        bundle_op,
    ];

    let airtime = select_airtime_provider(&SelectionRequest {
        operators: catalog.clone(),
        provider_name: "MTN".to_string(),
        iso_code: "NG".to_string(),
        pin: None,
    });
    assert!(airtime.selected.iter().all(|op| !op.data && !op.bundle));

    let data = select_mobile_data_provider(&SelectionRequest {
        operators: catalog,
        provider_name: "MTN".to_string(),
        iso_code: "NG".to_string(),
        pin: None,
    });
    assert!(data
        .selected
        .iter()
        .all(|op| op.data && op.denomination_type == DenominationType::Fixed));
}

#[test]
fn test_fixed_classification_scenarios() {
    let op = fixed_operator(1, "Vodacom South Africa", "ZA", "ZAR");

    // A local fixed amount on a foreign transaction classifies local.
    assert_eq!(classify_amount(&op, 50.0, true), AmountCurrency::Local);
    // A primary-band fixed amount on a home transaction classifies foreign.
    assert_eq!(classify_amount(&op, 1000.0, false), AmountCurrency::Foreign);
}

#[test]
fn test_auto_detect_mismatch_scenario() {
    let catalog = vec![
        operator(1, "MTN Nigeria", "NG", "NGN"),
        operator(2, "Airtel Nigeria", "NG", "NGN"),
    ];
    let detected = operator(2, "Airtel Nigeria", "NG", "NGN");

    match resolve_auto_detected(
        &detected,
        catalog,
        "MTN",
        "NG",
        BillKind::Airtime,
        None,
        "+2348012345678",
    ) {
        AutoDetectResolution::Mismatch { operators, message } => {
            assert!(operators.iter().all(|op| op.name.contains("Airtel")));
            assert!(message.contains("mismatch"));
        }
        AutoDetectResolution::Confirmed { .. } => panic!("expected mismatch"),
    }
}

struct StubSource {
    catalog: Vec<Operator>,
    detected: Operator,
}

#[async_trait]
impl CatalogSource for StubSource {
    async fn fetch_country_catalog(
        &self,
        _iso_code: &str,
        _options: &CatalogOptions,
    ) -> Result<Vec<Operator>> {
        Ok(self.catalog.clone())
    }

    async fn auto_detect_operator(&self, _phone_number: &str, _iso_code: &str) -> Result<Operator> {
        Ok(self.detected.clone())
    }
}

#[tokio::test]
async fn test_flow_produces_order_for_valid_home_top_up() {
    let flow = TopUpFlow::new(StubSource {
        catalog: vec![
            operator(1, "MTN Nigeria", "NG", "NGN"),
            operator(2, "Airtel Nigeria", "NG", "NGN"),
        ],
        detected: operator(1, "MTN Nigeria", "NG", "NGN"),
    });

    let outcome = flow
        .process_top_up(&TopUpRequest {
            provider_name: "MTN".to_string(),
            provider_id: None,
            iso_code: "NG".to_string(),
            phone_number: "+2348012345678".to_string(),
            amount: Some(2000.0),
            bill_kind: BillKind::Airtime,
            pin: None,
            token_address: USDC.to_string(),
        })
        .await
        .unwrap();

    match outcome {
        TopUpOutcome::Ready(order) => {
            assert_eq!(order.operator_id, 1);
            assert!(!order.use_local_amount);
            assert_eq!(order.recipient_phone.number, "+2348012345678");
        }
        other => panic!("expected Ready, got {:?}", other),
    }
}

#[tokio::test]
async fn test_flow_foreign_top_up_pays_local_amount() {
    let flow = TopUpFlow::new(StubSource {
        catalog: vec![operator(7, "Vodacom South Africa", "ZA", "ZAR")],
        detected: operator(7, "Vodacom South Africa", "ZA", "ZAR"),
    });

    let outcome = flow
        .process_top_up(&TopUpRequest {
            provider_name: "Vodacom".to_string(),
            provider_id: None,
            iso_code: "ZA".to_string(),
            phone_number: "+27821234567".to_string(),
            amount: Some(200.0),
            bill_kind: BillKind::Airtime,
            pin: None,
            token_address: USDC.to_string(),
        })
        .await
        .unwrap();

    match outcome {
        TopUpOutcome::Ready(order) => {
            assert_eq!(order.operator_id, 7);
            assert!(order.use_local_amount);
        }
        other => panic!("expected Ready, got {:?}", other),
    }
}

#[tokio::test]
async fn test_flow_stops_on_operator_mismatch() {
    let flow = TopUpFlow::new(StubSource {
        catalog: vec![
            operator(1, "MTN Nigeria", "NG", "NGN"),
            operator(2, "Airtel Nigeria", "NG", "NGN"),
        ],
        detected: operator(2, "Airtel Nigeria", "NG", "NGN"),
    });

    let outcome = flow
        .process_top_up(&TopUpRequest {
            provider_name: "MTN".to_string(),
            provider_id: None,
            iso_code: "NG".to_string(),
            phone_number: "+2348012345678".to_string(),
            amount: Some(2000.0),
            bill_kind: BillKind::Airtime,
            pin: None,
            token_address: USDC.to_string(),
        })
        .await
        .unwrap();

    assert!(matches!(outcome, TopUpOutcome::OperatorMismatch { .. }));
}

#[tokio::test]
async fn test_flow_rejects_out_of_band_amount() {
    let flow = TopUpFlow::new(StubSource {
        catalog: vec![operator(1, "MTN Nigeria", "NG", "NGN")],
        detected: operator(1, "MTN Nigeria", "NG", "NGN"),
    });

    let outcome = flow
        .process_top_up(&TopUpRequest {
            provider_name: "MTN".to_string(),
            provider_id: None,
            iso_code: "NG".to_string(),
            phone_number: "+2348012345678".to_string(),
            amount: Some(5.0),
            bill_kind: BillKind::Airtime,
            pin: None,
            token_address: USDC.to_string(),
        })
        .await
        .unwrap();

    assert!(matches!(outcome, TopUpOutcome::AmountMismatch { .. }));
}
