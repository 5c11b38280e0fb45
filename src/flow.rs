//! Top-up flow engine.
//!
//! Composes the catalog source with normalization, auto-detect
//! resolution, selection, and amount classification, and emits either a
//! validated [`TopUpOrder`] or the user-correctable condition that stopped
//! the flow. Expected conditions are outcome variants; only collaborator
//! faults and malformed token addresses surface as errors.

use crate::classify::{classify_amount, matches_payment_frame, AmountCurrency};
use crate::errors::Result;
use crate::normalize::{fallback_suggested_amounts, normalize_operator, refresh_home_suggestions};
use crate::resolve::{resolve_auto_detected, AutoDetectResolution};
use crate::select::select_providers;
use crate::sources::{CatalogOptions, CatalogSource};
use crate::types::{
    BillKind, Operator, PhoneRecipient, SelectionRequest, TopUpOrder, DEFAULT_HOME_CURRENCY,
    DEFAULT_HOME_ISO,
};
use crate::utils::{first_token, generate_reference, parse_token_address};

/// Currency and country context the flow operates in.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Home currency code; operators crediting this currency use their
    /// primary pricing band as-is.
    pub home_currency: String,
    /// Home country ISO code; requests for other countries are treated as
    /// foreign transactions.
    pub home_iso: String,
}

impl FlowConfig {
    /// Creates a configuration with the default home market.
    pub fn new() -> Self {
        Self {
            home_currency: DEFAULT_HOME_CURRENCY.to_string(),
            home_iso: DEFAULT_HOME_ISO.to_string(),
        }
    }

    /// Sets the home currency code.
    pub fn with_home_currency(mut self, code: impl Into<String>) -> Self {
        self.home_currency = code.into();
        self
    }

    /// Sets the home country ISO code.
    pub fn with_home_iso(mut self, iso: impl Into<String>) -> Self {
        self.home_iso = iso.into();
        self
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Inputs for a top-up attempt.
#[derive(Debug, Clone)]
pub struct TopUpRequest {
    /// User-supplied provider name; may be empty.
    pub provider_name: String,
    /// Operator id the user already settled on, when known.
    pub provider_id: Option<i64>,
    /// Two-letter country ISO code of the recipient.
    pub iso_code: String,
    /// Recipient phone number in international format.
    pub phone_number: String,
    /// Amount to top up, in the currency frame implied by the country.
    pub amount: Option<f64>,
    /// Airtime or mobile data.
    pub bill_kind: BillKind,
    /// Whether pin-based voucher products were requested.
    pub pin: Option<bool>,
    /// ERC-20 contract address of the payment token.
    pub token_address: String,
}

/// Result of a catalog lookup for display purposes.
#[derive(Debug, Clone)]
pub enum CatalogLookup {
    /// Operators available for the request, possibly narrowed by name.
    Operators(Vec<Operator>),
    /// The request is missing data; ask the user before fetching.
    NeedsInput {
        /// Clarifying question for the user.
        prompt: String,
    },
}

/// Terminal state of a top-up attempt.
#[derive(Debug, Clone)]
pub enum TopUpOutcome {
    /// Every gate passed; hand the order to the billing layer.
    Ready(TopUpOrder),
    /// The phone number's operator disagrees with the requested name.
    OperatorMismatch {
        /// Plans matching the number's actual operator.
        operators: Vec<Operator>,
        /// Informational redirect for the user.
        message: String,
    },
    /// The country/type slice is empty, even after fallback.
    NoProviders,
    /// No candidate accepts the amount in the stated currency frame.
    AmountMismatch {
        /// The rejected amount.
        amount: f64,
    },
    /// The operator the order is pinned to is not among the candidates
    /// accepting the amount.
    ProviderNotFound,
    /// The request is missing data; ask the user.
    NeedsInput {
        /// Clarifying question for the user.
        prompt: String,
    },
}

/// Orchestrates catalog fetches and the selection pipeline for top-ups.
pub struct TopUpFlow<S> {
    source: S,
    config: FlowConfig,
}

impl<S: CatalogSource> TopUpFlow<S> {
    /// Creates a flow over a catalog source with the default home market.
    pub fn new(source: S) -> Self {
        Self {
            source,
            config: FlowConfig::new(),
        }
    }

    /// Replaces the flow configuration.
    pub fn with_config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    fn is_foreign(&self, iso_code: &str) -> bool {
        !iso_code.eq_ignore_ascii_case(&self.config.home_iso)
    }

    fn catalog_options(&self, request: &TopUpRequest) -> CatalogOptions {
        let is_data = request.bill_kind == BillKind::MobileData;
        CatalogOptions {
            suggested_amounts_map: true,
            suggested_amounts: true,
            include_pin: self.is_foreign(&request.iso_code) || request.pin.unwrap_or(false),
            data_only: is_data,
            include_data: is_data,
        }
    }

    /// Fetches the country catalog and rewrites every entry into its
    /// authoritative pricing band.
    async fn load_catalog(&self, request: &TopUpRequest) -> Result<Vec<Operator>> {
        let raw = self
            .source
            .fetch_country_catalog(&request.iso_code.to_uppercase(), &self.catalog_options(request))
            .await?;

        Ok(raw
            .iter()
            .map(|op| {
                let op = refresh_home_suggestions(op, &self.config.home_iso);
                normalize_operator(&op, &self.config.home_currency)
            })
            .collect())
    }

    /// Lists operators for the request, narrowed by the provider-name
    /// fragment when it matches anything.
    pub async fn find_operators(&self, request: &TopUpRequest) -> Result<CatalogLookup> {
        let token = first_token(&request.provider_name).to_lowercase();
        if request.iso_code.is_empty() {
            return Ok(CatalogLookup::NeedsInput {
                prompt: country_prompt(&token),
            });
        }

        let operators = self.load_catalog(request).await?;
        let named: Vec<Operator> = operators
            .iter()
            .filter(|op| op.name.to_lowercase().contains(&token))
            .cloned()
            .collect();

        if named.is_empty() {
            Ok(CatalogLookup::Operators(operators))
        } else {
            Ok(CatalogLookup::Operators(named))
        }
    }

    /// Runs the full validation pipeline and produces a top-up order when
    /// every gate passes.
    pub async fn process_top_up(&self, request: &TopUpRequest) -> Result<TopUpOutcome> {
        let token = first_token(&request.provider_name).to_lowercase();
        if request.iso_code.is_empty() {
            return Ok(TopUpOutcome::NeedsInput {
                prompt: country_prompt(&token),
            });
        }
        if token.is_empty() {
            return Ok(TopUpOutcome::NeedsInput {
                prompt: "Which service provider should receive the top-up?".to_string(),
            });
        }

        let Some(amount) = request.amount else {
            return Ok(TopUpOutcome::NeedsInput {
                prompt: "An amount and phone number are required for a top-up.".to_string(),
            });
        };
        if request.phone_number.is_empty() {
            return Ok(TopUpOutcome::NeedsInput {
                prompt: "An amount and phone number are required for a top-up.".to_string(),
            });
        }

        let is_foreign = self.is_foreign(&request.iso_code);
        let operators = self.load_catalog(request).await?;
        if operators.is_empty() {
            return Ok(TopUpOutcome::NoProviders);
        }

        let detected = self
            .source
            .auto_detect_operator(&request.phone_number, &request.iso_code.to_uppercase())
            .await?;
        let mut detected = normalize_operator(&detected, &self.config.home_currency);
        if !is_foreign && !detected.suggested_amounts.is_empty() {
            detected.suggested_amounts = fallback_suggested_amounts();
        }

        // Detection by phone prefix beats the free-text name, so the
        // detected operator becomes the one the order is pinned to for
        // airtime.
        let provider_id = match request.bill_kind {
            BillKind::Airtime => Some(detected.id),
            BillKind::MobileData => request.provider_id,
        };

        let operators = match resolve_auto_detected(
            &detected,
            operators,
            &request.provider_name,
            &request.iso_code,
            request.bill_kind,
            request.pin,
            &request.phone_number,
        ) {
            AutoDetectResolution::Mismatch { operators, message } => {
                return Ok(TopUpOutcome::OperatorMismatch { operators, message });
            }
            AutoDetectResolution::Confirmed { operators } => operators,
        };

        let selection = select_providers(
            &SelectionRequest {
                operators,
                provider_name: token.clone(),
                iso_code: request.iso_code.clone(),
                pin: request.pin,
            },
            request.bill_kind,
        );
        if selection.selected.is_empty() {
            return Ok(TopUpOutcome::NoProviders);
        }

        let valid: Vec<Operator> = selection
            .selected
            .into_iter()
            .filter(|op| matches_payment_frame(op, amount, is_foreign))
            .collect();
        if valid.is_empty() {
            return Ok(TopUpOutcome::AmountMismatch { amount });
        }

        // The order is pinned to the detected (airtime) or user-chosen
        // (data) operator; paying a substitute is never acceptable.
        let Some(best) = valid.iter().find(|op| Some(op.id) == provider_id) else {
            return Ok(TopUpOutcome::ProviderNotFound);
        };

        parse_token_address(&request.token_address)?;

        let classification = classify_amount(best, amount, is_foreign);
        let order = TopUpOrder {
            operator_id: best.id,
            amount,
            use_local_amount: classification == AmountCurrency::Local,
            custom_identifier: generate_reference(),
            recipient_phone: PhoneRecipient {
                country_code: request.iso_code.to_uppercase(),
                number: request.phone_number.clone(),
            },
        };

        #[cfg(feature = "tracing")]
        tracing::debug!("Validated top-up order: {:?}", order);

        Ok(TopUpOutcome::Ready(order))
    }
}

fn country_prompt(token: &str) -> String {
    if token.is_empty() {
        "Which country should I look for service providers in?".to_string()
    } else {
        format!("Which country are {} service providers in?", token)
    }
}
