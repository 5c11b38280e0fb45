//! Core type definitions for the bill-payment catalog.
//!
//! This module contains the data structures exchanged with the top-up
//! aggregator: operators and their pricing bands, selection requests and
//! results, and the order handed to the billing layer once a top-up has
//! been validated.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default home currency code. Operators whose destination currency equals
/// this code price their products directly in the payer's home currency.
pub const DEFAULT_HOME_CURRENCY: &str = "NGN";

/// Default home country ISO code, paired with [`DEFAULT_HOME_CURRENCY`].
pub const DEFAULT_HOME_ISO: &str = "NG";

/// How an operator prices its products.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum DenominationType {
    /// Only a discrete list of amounts is sold.
    Fixed,
    /// Any amount between a minimum and maximum is valid.
    Range,
}

/// Whether an operator is currently accepting top-ups.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperatorStatus {
    /// Accepting transactions.
    Active,
    /// Temporarily or permanently disabled by the aggregator.
    Inactive,
}

/// The kind of telecom bill being paid.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillKind {
    /// Voice/airtime top-up.
    Airtime,
    /// Mobile data bundle.
    MobileData,
}

/// Country an operator serves.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// Two-letter ISO code (e.g. "NG", "ZA").
    pub iso_name: String,
    /// Display name (e.g. "Nigeria").
    pub name: String,
}

/// Exchange rate attached to an operator by the aggregator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FxRate {
    /// Units of destination currency per unit of sender currency.
    pub rate: f64,
    /// Currency the rate converts into.
    pub currency_code: String,
}

/// A telecom top-up operator as returned by the aggregator's catalog.
///
/// Every operator carries two pricing bands: the primary band
/// (`min_amount`/`max_amount`/`fixed_amounts`/…) expressed in the payer's
/// currency frame, and the `local_*` band expressed in the destination
/// country's currency. Exactly one of the two is authoritative for a given
/// operator, determined by whether `destination_currency_code` equals the
/// home currency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    /// Aggregator-assigned numeric id.
    pub id: i64,
    /// Underlying network operator id, when distinct from `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<i64>,
    /// Display name (e.g. "MTN Nigeria").
    pub name: String,
    /// True when this entry is a bundled product rather than plain credit.
    #[serde(default)]
    pub bundle: bool,
    /// True when this entry serves mobile data rather than voice/airtime.
    #[serde(default)]
    pub data: bool,
    /// True when the product is redeemed with a pin voucher.
    #[serde(default)]
    pub pin: bool,
    /// Pricing shape of the operator's products.
    pub denomination_type: DenominationType,
    /// Currency the payer is billed in.
    pub sender_currency_code: String,
    /// Symbol for [`Operator::sender_currency_code`].
    #[serde(default)]
    pub sender_currency_symbol: String,
    /// Currency the recipient's account is credited in.
    pub destination_currency_code: String,
    /// Symbol for [`Operator::destination_currency_code`].
    #[serde(default)]
    pub destination_currency_symbol: String,
    /// Country the operator serves.
    pub country: Country,
    /// Whether the operator is currently accepting transactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OperatorStatus>,
    /// Lower bound of the primary band (RANGE operators).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    /// Upper bound of the primary band (RANGE operators).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
    /// Lower bound of the destination-currency band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_min_amount: Option<f64>,
    /// Upper bound of the destination-currency band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_max_amount: Option<f64>,
    /// Most commonly purchased amount in the primary band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_popular_amount: Option<f64>,
    /// Most commonly purchased amount in the destination-currency band.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_popular_local_amount: Option<f64>,
    /// Discrete price list of the primary band (FIXED operators).
    #[serde(default)]
    pub fixed_amounts: Vec<f64>,
    /// Product descriptions keyed by amount, for the primary price list.
    #[serde(default)]
    pub fixed_amounts_descriptions: HashMap<String, String>,
    /// Discrete price list of the destination-currency band.
    #[serde(default)]
    pub local_fixed_amounts: Vec<f64>,
    /// Product descriptions keyed by amount, for the destination-currency list.
    #[serde(default)]
    pub local_fixed_amounts_descriptions: HashMap<String, String>,
    /// Suggested top-up amounts shown to the user (RANGE operators).
    #[serde(default)]
    pub suggested_amounts: Vec<f64>,
    /// Operator logo URLs.
    #[serde(default)]
    pub logo_urls: Vec<String>,
    /// Exchange rate attached by the aggregator, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fx: Option<FxRate>,
}

impl Operator {
    /// Whether this operator credits the recipient in the given home
    /// currency (case-insensitive).
    pub fn is_home_currency(&self, home_currency: &str) -> bool {
        self.destination_currency_code
            .eq_ignore_ascii_case(home_currency)
    }
}

/// Inputs for a provider selection pass.
#[derive(Debug, Clone)]
pub struct SelectionRequest {
    /// Catalog snapshot to select from.
    pub operators: Vec<Operator>,
    /// User-supplied provider name; only the first whitespace-delimited
    /// token is matched.
    pub provider_name: String,
    /// Two-letter country ISO code.
    pub iso_code: String,
    /// Whether the caller asked for pin-based products. Influences which
    /// catalog options are fetched; the per-operator `pin` flag drives the
    /// selection predicate itself.
    pub pin: Option<bool>,
}

/// Result of a provider selection pass.
///
/// Ordering follows the catalog; callers must not assume a ranking. The
/// list is empty only when the country/type slice itself is empty.
#[derive(Debug, Clone, Default)]
pub struct SelectionResult {
    /// Operators that survived the selection predicates.
    pub selected: Vec<Operator>,
}

/// Phone number receiving a top-up.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhoneRecipient {
    /// Two-letter ISO code of the number's country.
    pub country_code: String,
    /// Number in international format.
    pub number: String,
}

/// A validated top-up order, ready for the billing/gateway layer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopUpOrder {
    /// Selected operator's aggregator id.
    pub operator_id: i64,
    /// Amount to credit, in the frame resolved by classification.
    pub amount: f64,
    /// True when `amount` is denominated in the destination currency.
    pub use_local_amount: bool,
    /// Unique reference attached to the transaction end to end.
    pub custom_identifier: String,
    /// Recipient of the top-up.
    pub recipient_phone: PhoneRecipient,
}

/// Paginated envelope used by the aggregator's list endpoints.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    /// The page's records.
    pub content: Vec<T>,
    /// Total records across all pages.
    #[serde(default)]
    pub total_elements: u64,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u64,
    /// Whether this is the final page.
    #[serde(default)]
    pub last: bool,
}
