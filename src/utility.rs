//! Utility billers: electricity, water, TV, and internet bill payment.
//!
//! Billers live in a separate aggregator API family from telecom
//! operators and carry their own local/international amount duality, so
//! they keep a distinct model here rather than being folded into
//! [`crate::types::Operator`].

use crate::classify::AmountCurrency;
use crate::types::{DenominationType, FxRate};
use crate::utils::first_token;
use serde::{Deserialize, Serialize};

/// Category of utility bill a biller settles.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilityKind {
    /// Electricity supply.
    #[serde(rename = "ELECTRICITY_BILL_PAYMENT")]
    Electricity,
    /// Water supply.
    #[serde(rename = "WATER_BILL_PAYMENT")]
    Water,
    /// Cable/satellite TV subscription.
    #[serde(rename = "TV_BILL_PAYMENT")]
    Tv,
    /// Internet service subscription.
    #[serde(rename = "INTERNET_BILL_PAYMENT")]
    Internet,
}

/// Billing relationship the subscriber has with the biller.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceKind {
    /// Pay-before-use metering.
    Prepaid,
    /// Billed after consumption.
    Postpaid,
}

/// A utility biller as returned by the aggregator.
///
/// The `local_*` transaction fields are denominated in the biller's own
/// country currency; the `international_*` fields serve cross-border
/// payers. Which side is supported is flagged explicitly per biller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UtilityBiller {
    /// Aggregator-assigned numeric id.
    pub id: i64,
    /// Display name (e.g. "Ikeja Electric").
    pub name: String,
    /// Two-letter ISO code of the biller's country.
    pub country_code: String,
    /// Display name of the biller's country.
    #[serde(default)]
    pub country_name: String,
    /// Bill category.
    #[serde(rename = "type")]
    pub kind: UtilityKind,
    /// Prepaid or postpaid service.
    pub service_type: ServiceKind,
    /// Pricing shape of the biller's products.
    pub denomination_type: DenominationType,
    /// Whether amounts in the biller's country currency are accepted.
    #[serde(default)]
    pub local_amount_supported: bool,
    /// Currency of the local transaction band.
    #[serde(default)]
    pub local_transaction_currency_code: String,
    /// Lower bound of the local band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_local_transaction_amount: Option<f64>,
    /// Upper bound of the local band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_local_transaction_amount: Option<f64>,
    /// Flat fee charged on local transactions.
    #[serde(default)]
    pub local_transaction_fee: f64,
    /// Currency of [`UtilityBiller::local_transaction_fee`].
    #[serde(default)]
    pub local_transaction_fee_currency_code: String,
    /// Percentage fee charged on local transactions.
    #[serde(default)]
    pub local_transaction_fee_percentage: f64,
    /// Whether cross-border amounts are accepted.
    #[serde(default)]
    pub international_amount_supported: bool,
    /// Currency of the international transaction band.
    #[serde(default)]
    pub international_transaction_currency_code: String,
    /// Lower bound of the international band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_international_transaction_amount: Option<f64>,
    /// Upper bound of the international band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_international_transaction_amount: Option<f64>,
    /// Flat fee charged on international transactions.
    #[serde(default)]
    pub international_transaction_fee: f64,
    /// Currency of [`UtilityBiller::international_transaction_fee`].
    #[serde(default)]
    pub international_transaction_fee_currency_code: String,
    /// Percentage fee charged on international transactions.
    #[serde(default)]
    pub international_transaction_fee_percentage: f64,
    /// Discrete local price list (FIXED billers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_fixed_amounts: Option<Vec<f64>>,
    /// Discrete international price list (FIXED billers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub international_fixed_amounts: Option<Vec<f64>>,
    /// Whether the biller requires an invoice/reference number.
    #[serde(default)]
    pub requires_invoice: bool,
    /// Biller logo URLs.
    #[serde(default)]
    pub logo_urls: Vec<String>,
    /// Exchange rate attached by the aggregator, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fx: Option<FxRate>,
}

/// Filter for a biller selection pass.
#[derive(Debug, Clone, Default)]
pub struct BillerQuery {
    /// Biller name fragment; only the first whitespace-delimited token is
    /// matched.
    pub name: String,
    /// Two-letter country ISO code.
    pub iso_code: String,
    /// Restrict to one bill category.
    pub kind: Option<UtilityKind>,
    /// Restrict to prepaid or postpaid billers.
    pub service: Option<ServiceKind>,
}

/// Selects billers matching the query.
///
/// Name filtering degrades to the full country/category slice when the
/// fragment matches nothing, the same way telecom selection does.
pub fn select_billers(billers: &[UtilityBiller], query: &BillerQuery) -> Vec<UtilityBiller> {
    let token = first_token(&query.name).to_lowercase();

    let slice = |b: &UtilityBiller| {
        b.country_code.eq_ignore_ascii_case(&query.iso_code)
            && query.kind.map_or(true, |k| b.kind == k)
            && query.service.map_or(true, |s| b.service_type == s)
    };

    let selected: Vec<UtilityBiller> = billers
        .iter()
        .filter(|b| slice(b))
        .filter(|b| b.name.to_lowercase().contains(&token))
        .cloned()
        .collect();

    if selected.is_empty() {
        return billers.iter().filter(|b| slice(b)).cloned().collect();
    }
    selected
}

/// Classifies `amount` against a biller's local and international bands.
///
/// Same contract as [`crate::classify::classify_amount`]: total over any
/// finite amount, classifying by exclusion when the amount matches neither
/// band.
pub fn classify_utility_amount(
    biller: &UtilityBiller,
    amount: f64,
    is_foreign_tx: bool,
) -> AmountCurrency {
    match biller.denomination_type {
        DenominationType::Fixed => {
            let local = biller.local_fixed_amounts.as_deref().unwrap_or(&[]);
            let international = biller.international_fixed_amounts.as_deref().unwrap_or(&[]);
            if is_foreign_tx {
                if local.contains(&amount) {
                    AmountCurrency::Local
                } else {
                    AmountCurrency::Foreign
                }
            } else if international.contains(&amount) {
                AmountCurrency::Foreign
            } else {
                AmountCurrency::Local
            }
        }
        DenominationType::Range => {
            if is_foreign_tx {
                let lo = biller.min_local_transaction_amount.unwrap_or(0.0);
                let hi = biller.max_local_transaction_amount.unwrap_or(0.0);
                if amount >= lo && amount <= hi {
                    AmountCurrency::Local
                } else {
                    AmountCurrency::Foreign
                }
            } else {
                let lo = biller.min_international_transaction_amount.unwrap_or(0.0);
                let hi = biller.max_international_transaction_amount.unwrap_or(0.0);
                if amount >= lo && amount <= hi {
                    AmountCurrency::Foreign
                } else {
                    AmountCurrency::Local
                }
            }
        }
    }
}
