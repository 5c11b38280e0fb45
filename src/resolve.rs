//! Reconciliation of an auto-detected operator with the user's request.
//!
//! Operator detection by phone prefix is more reliable than free-text
//! provider names, so the detected operator acts as a validation gate: a
//! disagreement redirects the user to the detected operator's plans
//! instead of proceeding to a transaction.

use crate::select::select_providers;
use crate::types::{BillKind, Operator, SelectionRequest};
use crate::utils::first_token;

/// Outcome of reconciling an auto-detected operator against the
/// user-supplied provider name.
#[derive(Debug, Clone)]
pub enum AutoDetectResolution {
    /// Names agree; selection continues with the (possibly extended)
    /// candidate list.
    Confirmed {
        /// Working candidate set, with the detected operator appended when
        /// it was not already present.
        operators: Vec<Operator>,
    },
    /// The detected operator does not match the requested name. Selection
    /// was re-run with the detected name; no transaction should proceed.
    Mismatch {
        /// Candidates matching the phone number's actual operator.
        operators: Vec<Operator>,
        /// Informational redirect for the user.
        message: String,
    },
}

/// Reconciles the auto-detected operator for `phone_number` with the
/// user's `requested_name`.
///
/// On mismatch the selector is re-run using the detected operator's name
/// so the user is offered plans that actually match their number. On
/// agreement the detected operator is guaranteed a place in the candidate
/// set even when the broader name filter did not surface it.
pub fn resolve_auto_detected(
    detected: &Operator,
    operators: Vec<Operator>,
    requested_name: &str,
    iso_code: &str,
    kind: BillKind,
    pin: Option<bool>,
    phone_number: &str,
) -> AutoDetectResolution {
    let token = first_token(requested_name).to_lowercase();

    if !detected.name.to_lowercase().contains(&token) {
        let request = SelectionRequest {
            operators,
            provider_name: first_token(&detected.name).to_string(),
            iso_code: iso_code.to_string(),
            pin,
        };
        let result = select_providers(&request, kind);
        return AutoDetectResolution::Mismatch {
            operators: result.selected,
            message: format!(
                "Phone number and operator mismatch: {} is served by {}. \
                 Choose a plan from that provider instead.",
                phone_number, detected.name
            ),
        };
    }

    let mut operators = operators;
    if !operators.iter().any(|op| op.id == detected.id) {
        operators.push(detected.clone());
    }
    AutoDetectResolution::Confirmed { operators }
}
