//! Reloadly-backed catalog source.
//!
//! Thin HTTP wrapper over the aggregator's top-up and utility APIs:
//! OAuth client-credentials authentication per API family, cached bearer
//! tokens with an expiry buffer, and the catalog/auto-detect/biller
//! endpoints the selection engine consumes.

use crate::errors::{BillcheapError, Result};
use crate::sources::{CatalogOptions, CatalogSource};
use crate::types::{Operator, Paginated};
use crate::utility::UtilityBiller;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

/// Seconds before nominal expiry at which a token is considered stale.
const TOKEN_EXPIRY_BUFFER_SECS: i64 = 3 * 60;

/// API family a token is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    /// Airtime and mobile-data top-ups.
    Topups,
    /// Utility bill payments.
    Utilities,
}

impl Audience {
    fn slug(&self) -> &'static str {
        match self {
            Audience::Topups => "topups",
            Audience::Utilities => "utilities",
        }
    }

    fn subdomain(&self, sandbox: bool) -> String {
        if sandbox {
            format!("{}-sandbox", self.slug())
        } else {
            self.slug().to_string()
        }
    }

    fn accept_header(&self) -> String {
        format!("application/com.reloadly.{}-v1+json", self.slug())
    }
}

/// Configuration for the aggregator client.
#[derive(Clone)]
pub struct ReloadlyConfig {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// API hostname (e.g. "reloadly.com").
    pub host: String,
    /// Target the sandbox API families.
    pub sandbox: bool,
    /// HTTP client to use for requests.
    pub http_client: Client,
}

impl ReloadlyConfig {
    /// Creates a new configuration for the production API.
    ///
    /// # Arguments
    ///
    /// * `client_id` - OAuth client id
    /// * `client_secret` - OAuth client secret
    ///
    /// # Examples
    ///
    /// ```
    /// use billcheap_rs::sources::reloadly::ReloadlyConfig;
    ///
    /// let config = ReloadlyConfig::new("my-client-id", "my-client-secret")
    ///     .with_sandbox(true);
    /// ```
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            host: "reloadly.com".to_string(),
            sandbox: false,
            http_client: Client::new(),
        }
    }

    /// Sets a custom API hostname.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Targets the sandbox API families.
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Sets a custom HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(TOKEN_EXPIRY_BUFFER_SECS) > now
    }
}

/// Aggregator account balance.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    /// Remaining prepaid balance.
    pub balance: f64,
    /// Currency of the balance.
    pub currency_code: String,
    /// Display name of the currency.
    #[serde(default)]
    pub currency_name: String,
}

/// Client for the aggregator's top-up and utility APIs.
#[derive(Clone)]
pub struct ReloadlyClient {
    config: ReloadlyConfig,
    tokens: Arc<tokio::sync::RwLock<HashMap<Audience, CachedToken>>>,
}

impl ReloadlyClient {
    /// Creates a new client from a configuration.
    pub fn new(config: ReloadlyConfig) -> Self {
        Self {
            config,
            tokens: Arc::new(tokio::sync::RwLock::new(HashMap::new())),
        }
    }

    fn base_url(&self, audience: Audience) -> Result<Url> {
        let url = format!(
            "https://{}.{}",
            audience.subdomain(self.config.sandbox),
            self.config.host
        );
        Ok(Url::parse(&url)?)
    }

    fn auth_url(&self) -> Result<Url> {
        Ok(Url::parse(&format!(
            "https://auth.{}/oauth/token",
            self.config.host
        ))?)
    }

    /// Returns a valid bearer token for the audience, reusing the cached
    /// one while it is fresh.
    async fn ensure_token(&self, audience: Audience) -> Result<String> {
        {
            let tokens = self.tokens.read().await;
            if let Some(cached) = tokens.get(&audience) {
                if cached.is_fresh(Utc::now()) {
                    return Ok(cached.access_token.clone());
                }
            }
        }
        self.authenticate(audience).await
    }

    async fn authenticate(&self, audience: Audience) -> Result<String> {
        let audience_url = self.base_url(audience)?;
        let body = json!({
            "client_id": self.config.client_id,
            "client_secret": self.config.client_secret,
            "grant_type": "client_credentials",
            "audience": audience_url.as_str().trim_end_matches('/'),
        });

        let response = self
            .config
            .http_client
            .post(self.auth_url()?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BillcheapError::Auth(format!(
                "token endpoint returned {}",
                status
            )));
        }

        let token: TokenResponse = response.json().await?;
        let cached = CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
        };

        let mut tokens = self.tokens.write().await;
        tokens.insert(audience, cached);
        Ok(token.access_token)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        audience: Audience,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let token = self.ensure_token(audience).await?;
        let url = self.base_url(audience)?.join(path)?;

        let response = self
            .config
            .http_client
            .get(url)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, audience.accept_header())
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(BillcheapError::Auth(
                "aggregator rejected the access token".to_string(),
            ));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BillcheapError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Fetches every operator serving a country.
    pub async fn operators_by_country(
        &self,
        iso_code: &str,
        options: &CatalogOptions,
    ) -> Result<Vec<Operator>> {
        let path = format!("operators/countries/{}", iso_code.to_uppercase());
        let query = [
            (
                "suggestedAmountsMap",
                options.suggested_amounts_map.to_string(),
            ),
            ("suggestedAmounts", options.suggested_amounts.to_string()),
            ("includePin", options.include_pin.to_string()),
            ("dataOnly", options.data_only.to_string()),
            ("includeData", options.include_data.to_string()),
        ];
        self.get_json(Audience::Topups, &path, &query).await
    }

    /// Detects the most likely operator for a phone number.
    pub async fn auto_detect(&self, phone_number: &str, iso_code: &str) -> Result<Operator> {
        if phone_number.is_empty() {
            return Err(BillcheapError::MissingField("phone_number".to_string()));
        }
        if iso_code.is_empty() {
            return Err(BillcheapError::MissingField("iso_code".to_string()));
        }

        let path = format!(
            "operators/auto-detect/phone/{}/countries/{}",
            phone_number,
            iso_code.to_uppercase()
        );
        let query = [
            ("suggestedAmountsMap", "true".to_string()),
            ("suggestedAmounts", "true".to_string()),
            ("includePin", "true".to_string()),
        ];
        self.get_json(Audience::Topups, &path, &query).await
    }

    /// Fetches utility billers, optionally filtered by country, category,
    /// and service type. Empty filter values are not sent.
    pub async fn billers(
        &self,
        iso_code: Option<&str>,
        kind: Option<&str>,
        service_type: Option<&str>,
    ) -> Result<Vec<UtilityBiller>> {
        let mut query: Vec<(&str, String)> = vec![("size", "100".to_string())];
        if let Some(iso) = iso_code.filter(|s| !s.is_empty()) {
            query.push(("countryISOCode", iso.to_uppercase()));
        }
        if let Some(kind) = kind.filter(|s| !s.is_empty()) {
            query.push(("type", kind.to_string()));
        }
        if let Some(service) = service_type.filter(|s| !s.is_empty()) {
            query.push(("serviceType", service.to_string()));
        }

        let page: Paginated<UtilityBiller> = self
            .get_json(Audience::Utilities, "billers", &query)
            .await?;
        Ok(page.content)
    }

    /// Fetches the aggregator account balance.
    pub async fn account_balance(&self) -> Result<AccountBalance> {
        self.get_json(Audience::Topups, "accounts/balance", &[])
            .await
    }
}

#[async_trait]
impl CatalogSource for ReloadlyClient {
    async fn fetch_country_catalog(
        &self,
        iso_code: &str,
        options: &CatalogOptions,
    ) -> Result<Vec<Operator>> {
        self.operators_by_country(iso_code, options).await
    }

    async fn auto_detect_operator(&self, phone_number: &str, iso_code: &str) -> Result<Operator> {
        self.auto_detect(phone_number, iso_code).await
    }
}
