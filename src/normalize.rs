//! Pricing normalization for foreign-currency operators.
//!
//! Catalog entries carry two pricing bands. Downstream display and
//! selection logic only ever reads the primary band, so operators whose
//! destination currency is not the home currency get their primary fields
//! rewritten from the `local_*` band here. The `local_*` fields themselves
//! are never touched, which keeps the rewrite safe to apply more than once.

use crate::types::{DenominationType, Operator};
use crate::utils::unique_random_amounts;

/// Number of suggested amounts regenerated for RANGE operators.
pub const SUGGESTED_AMOUNT_COUNT: usize = 8;

/// Suggested top-up ladder used for home-country operators when the
/// catalog's own suggestions are replaced.
pub fn fallback_suggested_amounts() -> Vec<f64> {
    vec![500.0, 1000.0, 2000.0, 5000.0, 10000.0, 20000.0]
}

/// Rewrites an operator's primary pricing fields to the destination-currency
/// band when its destination currency differs from `home_currency`.
///
/// Home-currency operators are returned unchanged. The input is never
/// mutated; a new value is returned so cached catalog snapshots shared
/// across callers stay pristine.
///
/// For RANGE operators the suggested amounts are regenerated as
/// [`SUGGESTED_AMOUNT_COUNT`] unique values drawn from the local band, and
/// the most-popular amount becomes the seventh generated value.
pub fn normalize_operator(operator: &Operator, home_currency: &str) -> Operator {
    if operator.is_home_currency(home_currency) {
        return operator.clone();
    }

    let mut op = operator.clone();
    match op.denomination_type {
        DenominationType::Range => {
            op.min_amount = op.local_min_amount;
            op.max_amount = op.local_max_amount;
            op.suggested_amounts = unique_random_amounts(
                op.local_min_amount.unwrap_or(0.0),
                op.local_max_amount.unwrap_or(0.0),
                SUGGESTED_AMOUNT_COUNT,
            );
            op.most_popular_amount = op.suggested_amounts.get(6).copied();
        }
        DenominationType::Fixed => {
            op.most_popular_amount = op.most_popular_local_amount;
            op.fixed_amounts = op.local_fixed_amounts.clone();
            op.fixed_amounts_descriptions = op.local_fixed_amounts_descriptions.clone();
        }
    }
    op
}

/// Regenerates the suggested amounts of a home-country RANGE operator from
/// its own primary band.
///
/// Catalog feeds ship stale or empty suggestions for home-country
/// operators; fresh ones are drawn from `[min_amount, max_amount]`.
/// Operators from other countries, and FIXED operators, pass through
/// unchanged.
pub fn refresh_home_suggestions(operator: &Operator, home_iso: &str) -> Operator {
    if !operator.country.iso_name.eq_ignore_ascii_case(home_iso)
        || operator.denomination_type != DenominationType::Range
    {
        return operator.clone();
    }

    let mut op = operator.clone();
    op.suggested_amounts = unique_random_amounts(
        op.min_amount.unwrap_or(0.0),
        op.max_amount.unwrap_or(0.0),
        SUGGESTED_AMOUNT_COUNT,
    );
    op
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Country, DenominationType, Operator};
    use std::collections::HashMap;

    fn base_operator() -> Operator {
        Operator {
            id: 1,
            operator_id: None,
            name: "Vodacom South Africa".to_string(),
            bundle: false,
            data: false,
            pin: false,
            denomination_type: DenominationType::Range,
            sender_currency_code: "NGN".to_string(),
            sender_currency_symbol: "₦".to_string(),
            destination_currency_code: "ZAR".to_string(),
            destination_currency_symbol: "R".to_string(),
            country: Country {
                iso_name: "ZA".to_string(),
                name: "South Africa".to_string(),
            },
            status: None,
            min_amount: Some(1000.0),
            max_amount: Some(50000.0),
            local_min_amount: Some(5.0),
            local_max_amount: Some(1000.0),
            most_popular_amount: Some(2000.0),
            most_popular_local_amount: Some(50.0),
            fixed_amounts: vec![1000.0, 2000.0],
            fixed_amounts_descriptions: HashMap::new(),
            local_fixed_amounts: vec![12.0, 29.0],
            local_fixed_amounts_descriptions: HashMap::from([(
                "12".to_string(),
                "1GB Data Bundle".to_string(),
            )]),
            suggested_amounts: vec![1000.0, 5000.0],
            logo_urls: vec![],
            fx: None,
        }
    }

    #[test]
    fn test_range_operator_rewritten_to_local_band() {
        let op = base_operator();
        let normalized = normalize_operator(&op, "NGN");

        assert_eq!(normalized.min_amount, Some(5.0));
        assert_eq!(normalized.max_amount, Some(1000.0));
        assert_eq!(normalized.suggested_amounts.len(), SUGGESTED_AMOUNT_COUNT);
        assert!(normalized
            .suggested_amounts
            .iter()
            .all(|&a| (5.0..=1000.0).contains(&a)));
        assert_eq!(
            normalized.most_popular_amount,
            normalized.suggested_amounts.get(6).copied()
        );
        // Input untouched.
        assert_eq!(op.min_amount, Some(1000.0));
        assert_eq!(op.suggested_amounts, vec![1000.0, 5000.0]);
    }

    #[test]
    fn test_fixed_operator_rewritten_to_local_band() {
        let mut op = base_operator();
        op.denomination_type = DenominationType::Fixed;

        let normalized = normalize_operator(&op, "NGN");

        assert_eq!(normalized.fixed_amounts, op.local_fixed_amounts);
        assert_eq!(
            normalized.fixed_amounts_descriptions,
            op.local_fixed_amounts_descriptions
        );
        assert_eq!(normalized.most_popular_amount, Some(50.0));
    }

    #[test]
    fn test_home_currency_operator_unchanged() {
        let mut op = base_operator();
        op.destination_currency_code = "NGN".to_string();

        assert_eq!(normalize_operator(&op, "NGN"), op);
        // Case-insensitive on both sides.
        assert_eq!(normalize_operator(&op, "ngn"), op);
    }

    #[test]
    fn test_normalization_is_stable_on_reapplication() {
        let mut op = base_operator();
        op.denomination_type = DenominationType::Fixed;

        let once = normalize_operator(&op, "NGN");
        let twice = normalize_operator(&once, "NGN");
        // The local band is never mutated, so re-deriving from it is a
        // fixed point for FIXED operators.
        assert_eq!(once, twice);
    }

    #[test]
    fn test_refresh_home_suggestions() {
        let mut op = base_operator();
        op.country.iso_name = "NG".to_string();
        op.destination_currency_code = "NGN".to_string();

        let refreshed = refresh_home_suggestions(&op, "NG");
        assert_eq!(refreshed.suggested_amounts.len(), SUGGESTED_AMOUNT_COUNT);
        assert!(refreshed
            .suggested_amounts
            .iter()
            .all(|&a| (1000.0..=50000.0).contains(&a)));

        // Foreign operators pass through.
        let foreign = base_operator();
        assert_eq!(refresh_home_suggestions(&foreign, "NG"), foreign);
    }

    #[test]
    fn test_fallback_ladder() {
        let ladder = fallback_suggested_amounts();
        assert_eq!(ladder.first(), Some(&500.0));
        assert_eq!(ladder.last(), Some(&20000.0));
    }
}
