//! # billcheap-rs
//!
//! Provider selection and currency resolution for crypto-paid airtime,
//! mobile-data, and utility bill payments.
//!
//! Top-up aggregators expose heterogeneous operator catalogs: fixed
//! voucher lists next to open min/max ranges, prices quoted in the payer's
//! home currency next to destination-country currency, pin vouchers next
//! to pin-less top-up. This crate turns such a catalog into a validated
//! order: it normalizes pricing into the authoritative band, narrows
//! candidates by country, bill kind, and provider-name fragment,
//! reconciles the user's choice against phone-number auto-detection, and
//! checks that the requested amount is consistent with the stated currency
//! frame before any money moves.
//!
//! ## Features
//!
//! - **Catalog model**: operator records with dual local/foreign pricing
//!   bands, plus utility billers with their own duality
//! - **Normalization**: pure, copy-returning rewrite of foreign-currency
//!   pricing so downstream logic reads one set of amount fields
//! - **Selection**: airtime and mobile-data predicates with graceful
//!   fallback to the full country slice when a name matches nothing
//! - **Auto-detect resolution**: phone-prefix detection overrides
//!   free-text provider names, redirecting mismatches instead of paying
//!   the wrong operator
//! - **Flow engine**: one entry point from raw request to billing-ready
//!   order, with expected conditions as explicit outcome variants
//! - **Aggregator client**: OAuth client-credentials auth with cached
//!   per-audience tokens, catalog/auto-detect/biller endpoints
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use billcheap_rs::flow::{TopUpFlow, TopUpOutcome, TopUpRequest};
//! use billcheap_rs::sources::reloadly::{ReloadlyClient, ReloadlyConfig};
//! use billcheap_rs::types::BillKind;
//!
//! # async fn example() -> billcheap_rs::Result<()> {
//! let client = ReloadlyClient::new(
//!     ReloadlyConfig::new("client-id", "client-secret").with_sandbox(true),
//! );
//! let flow = TopUpFlow::new(client);
//!
//! let outcome = flow
//!     .process_top_up(&TopUpRequest {
//!         provider_name: "MTN".to_string(),
//!         provider_id: None,
//!         iso_code: "NG".to_string(),
//!         phone_number: "+2348012345678".to_string(),
//!         amount: Some(1000.0),
//!         bill_kind: BillKind::Airtime,
//!         pin: None,
//!         token_address: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913".to_string(),
//!     })
//!     .await?;
//!
//! match outcome {
//!     TopUpOutcome::Ready(order) => println!("order: {:?}", order),
//!     TopUpOutcome::OperatorMismatch { message, .. } => println!("{}", message),
//!     other => println!("stopped: {:?}", other),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! 1. **Fetch**: a catalog snapshot for the country is pulled from the
//!    aggregator (the [`sources::CatalogSource`] seam)
//! 2. **Normalize**: entries whose destination currency is not the home
//!    currency get their displayed pricing rewritten from the local band
//! 3. **Resolve**: the phone number's auto-detected operator is checked
//!    against the requested name; a disagreement redirects the user
//! 4. **Select**: candidates are narrowed by bill kind, country, pricing
//!    shape, and name fragment, falling back to the full country slice
//! 5. **Classify**: the requested amount is tested against the surviving
//!    candidates' bands; inconsistent amounts stop the flow
//! 6. **Order**: the winning operator, amount frame, and a fresh payment
//!    reference are handed to the billing layer
//!
//! Selection and classification are synchronous, pure computations over
//! in-memory snapshots; only the catalog source suspends. Two concurrent
//! flows may observe different snapshots, and that is fine: nothing here
//! persists or locks.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod classify;
pub mod errors;
pub mod flow;
pub mod normalize;
pub mod resolve;
pub mod select;
pub mod sources;
pub mod types;
pub mod utility;
pub mod utils;

// Re-export commonly used items
pub use classify::{classify_amount, matches_payment_frame, AmountCurrency};
pub use errors::{BillcheapError, Result};
pub use flow::{FlowConfig, TopUpFlow, TopUpOutcome, TopUpRequest};
pub use normalize::normalize_operator;
pub use resolve::{resolve_auto_detected, AutoDetectResolution};
pub use select::select_providers;
pub use types::{
    BillKind, DenominationType, Operator, OperatorStatus, SelectionRequest, SelectionResult,
    TopUpOrder, DEFAULT_HOME_CURRENCY, DEFAULT_HOME_ISO,
};
