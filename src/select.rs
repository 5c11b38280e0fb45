//! Provider selection over a catalog snapshot.
//!
//! Selection narrows a catalog by bill kind, country, pricing shape, and a
//! user-supplied name fragment. Catalog names are inconsistent, so a name
//! filter that matches nothing degrades to the full country/type slice
//! rather than reporting zero results.

use crate::types::{BillKind, DenominationType, Operator, SelectionRequest, SelectionResult};
use crate::utils::first_token;

/// Selects providers for the given bill kind.
pub fn select_providers(request: &SelectionRequest, kind: BillKind) -> SelectionResult {
    match kind {
        BillKind::Airtime => select_airtime_provider(request),
        BillKind::MobileData => select_mobile_data_provider(request),
    }
}

/// Selects airtime providers: voice-only entries whose pricing shape
/// matches their pin flag (pin vouchers are FIXED, pin-less top-up is
/// RANGE), for the requested country, filtered by name fragment.
pub fn select_airtime_provider(request: &SelectionRequest) -> SelectionResult {
    select_with(request, airtime_predicate)
}

/// Selects mobile-data providers: data entries, always FIXED (bundles are
/// discretely priced), for the requested country, filtered by name
/// fragment.
pub fn select_mobile_data_provider(request: &SelectionRequest) -> SelectionResult {
    select_with(request, mobile_data_predicate)
}

fn airtime_predicate(op: &Operator) -> bool {
    !op.data
        && !op.bundle
        && if op.pin {
            op.denomination_type == DenominationType::Fixed
        } else {
            op.denomination_type == DenominationType::Range
        }
}

fn mobile_data_predicate(op: &Operator) -> bool {
    op.data && op.denomination_type == DenominationType::Fixed
}

fn select_with(request: &SelectionRequest, predicate: fn(&Operator) -> bool) -> SelectionResult {
    let token = first_token(&request.provider_name).to_lowercase();

    let selected: Vec<Operator> = request
        .operators
        .iter()
        .filter(|op| predicate(op) && in_country(op, &request.iso_code))
        .filter(|op| op.name.to_lowercase().contains(&token))
        .cloned()
        .collect();

    #[cfg(feature = "tracing")]
    tracing::debug!("Found {} matching provider(s)", selected.len());

    if selected.is_empty() {
        // Fall back to every matching provider for the country.
        return SelectionResult {
            selected: request
                .operators
                .iter()
                .filter(|op| predicate(op) && in_country(op, &request.iso_code))
                .cloned()
                .collect(),
        };
    }

    SelectionResult { selected }
}

fn in_country(op: &Operator, iso_code: &str) -> bool {
    op.country.iso_name.eq_ignore_ascii_case(iso_code)
}
