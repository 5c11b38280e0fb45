//! Catalog source implementations.
//!
//! This module contains the trait definition for catalog sources and the
//! concrete aggregator-backed implementation. The core selection and
//! classification logic only ever sees this seam, so tests and alternative
//! backends can substitute their own snapshots.

pub mod reloadly;

use crate::errors::Result;
use crate::types::Operator;
use async_trait::async_trait;

/// Options controlling which operator attributes a catalog fetch includes.
#[derive(Debug, Clone, Copy)]
pub struct CatalogOptions {
    /// Include the suggested-amounts description map.
    pub suggested_amounts_map: bool,
    /// Include suggested amounts.
    pub suggested_amounts: bool,
    /// Include pin-based voucher products.
    pub include_pin: bool,
    /// Restrict the catalog to data products.
    pub data_only: bool,
    /// Include data products alongside airtime.
    pub include_data: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            suggested_amounts_map: true,
            suggested_amounts: true,
            include_pin: false,
            data_only: false,
            include_data: false,
        }
    }
}

/// Trait for fetching operator catalogs.
///
/// Implementations perform the network I/O; each call returns a snapshot
/// with no cross-call consistency guarantee. Retry and timeout policy
/// belongs to the implementation, never to callers.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns every operator serving the given country.
    ///
    /// # Arguments
    ///
    /// * `iso_code` - Two-letter country ISO code
    /// * `options` - Attribute and product-family filters for the fetch
    async fn fetch_country_catalog(
        &self,
        iso_code: &str,
        options: &CatalogOptions,
    ) -> Result<Vec<Operator>>;

    /// Returns the single most likely operator for a phone number.
    ///
    /// # Arguments
    ///
    /// * `phone_number` - Number in international format
    /// * `iso_code` - Two-letter country ISO code of the number
    async fn auto_detect_operator(&self, phone_number: &str, iso_code: &str) -> Result<Operator>;
}
