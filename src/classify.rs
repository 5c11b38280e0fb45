//! Amount classification against an operator's pricing bands.
//!
//! Callers state which currency frame they believe an amount is in via
//! `is_foreign_tx`; the classifier answers which band the amount actually
//! falls in, so mismatched amounts are rejected before a transaction is
//! constructed.

use crate::types::{DenominationType, Operator};

/// Which of an operator's two pricing bands an amount belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountCurrency {
    /// The destination-country currency band.
    Local,
    /// The cross-border payer band.
    Foreign,
}

/// Classifies `amount` against `operator`'s pricing bands.
///
/// Total over any finite amount: an amount that matches neither band is
/// classified into the opposite band by exclusion, mirroring the
/// aggregator-facing acceptance behavior.
pub fn classify_amount(operator: &Operator, amount: f64, is_foreign_tx: bool) -> AmountCurrency {
    match operator.denomination_type {
        DenominationType::Fixed => {
            if is_foreign_tx {
                if operator.local_fixed_amounts.contains(&amount) {
                    AmountCurrency::Local
                } else {
                    AmountCurrency::Foreign
                }
            } else if operator.fixed_amounts.contains(&amount) {
                AmountCurrency::Foreign
            } else {
                AmountCurrency::Local
            }
        }
        DenominationType::Range => {
            if is_foreign_tx {
                let lo = operator.local_min_amount.unwrap_or(0.0);
                let hi = operator.local_max_amount.unwrap_or(0.0);
                if amount >= lo && amount <= hi {
                    AmountCurrency::Local
                } else {
                    AmountCurrency::Foreign
                }
            } else {
                let lo = operator.min_amount.unwrap_or(0.0);
                let hi = operator.max_amount.unwrap_or(0.0);
                if amount >= lo && amount <= hi {
                    AmountCurrency::Foreign
                } else {
                    AmountCurrency::Local
                }
            }
        }
    }
}

/// Whether `amount` is consistent with the caller's stated transaction
/// direction: foreign transactions must land in the local band, home
/// transactions in the foreign band.
pub fn matches_payment_frame(operator: &Operator, amount: f64, is_foreign_tx: bool) -> bool {
    let expected = if is_foreign_tx {
        AmountCurrency::Local
    } else {
        AmountCurrency::Foreign
    };
    classify_amount(operator, amount, is_foreign_tx) == expected
}
