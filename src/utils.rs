//! Utility functions shared across the selection and flow modules.

use crate::errors::{BillcheapError, Result};
use ethers::types::Address;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Returns the first whitespace-delimited token of a provider name,
/// or the empty string when there is none.
///
/// Catalog names are inconsistent ("MTN Nigeria" vs "MTN"), so matching is
/// always done on the leading token only.
///
/// # Examples
///
/// ```
/// use billcheap_rs::utils::first_token;
///
/// assert_eq!(first_token("MTN Nigeria"), "MTN");
/// assert_eq!(first_token("  Glo  "), "Glo");
/// assert_eq!(first_token(""), "");
/// ```
pub fn first_token(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or("")
}

/// Generates `count` unique integers uniformly drawn from the inclusive
/// range `[min, max]`, sorted ascending, returned as `f64` amounts.
///
/// When the range holds fewer than `count` integers, every integer in the
/// range is returned instead.
///
/// # Examples
///
/// ```
/// use billcheap_rs::utils::unique_random_amounts;
///
/// let amounts = unique_random_amounts(50.0, 100000.0, 8);
/// assert_eq!(amounts.len(), 8);
/// assert!(amounts.windows(2).all(|w| w[0] < w[1]));
/// assert!(amounts.iter().all(|&a| (50.0..=100000.0).contains(&a)));
///
/// // Range narrower than the requested count degrades to the full range.
/// assert_eq!(unique_random_amounts(1.0, 3.0, 8), vec![1.0, 2.0, 3.0]);
/// ```
pub fn unique_random_amounts(min: f64, max: f64, count: usize) -> Vec<f64> {
    use rand::Rng;

    let lo = min.ceil() as i64;
    let hi = max.floor() as i64;
    if hi < lo {
        return Vec::new();
    }

    let span = (hi - lo + 1) as usize;
    if span <= count {
        return (lo..=hi).map(|v| v as f64).collect();
    }

    let mut picked = BTreeSet::new();
    let mut rng = rand::thread_rng();
    while picked.len() < count {
        picked.insert(rng.gen_range(lo..=hi));
    }
    picked.into_iter().map(|v| v as f64).collect()
}

/// Generates a 16-character hex reference for a bill transaction.
///
/// # Examples
///
/// ```
/// use billcheap_rs::utils::generate_reference;
///
/// let reference = generate_reference();
/// assert_eq!(reference.len(), 16);
/// assert!(reference.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn generate_reference() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let bytes: [u8; 8] = rng.gen();
    hex::encode(bytes)
}

/// Validates and parses an ERC-20 token contract address.
///
/// # Arguments
///
/// * `addr` - The address string to validate (with or without 0x prefix)
///
/// # Examples
///
/// ```
/// use billcheap_rs::utils::parse_token_address;
///
/// let addr = parse_token_address("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");
/// assert!(addr.is_ok());
/// assert!(parse_token_address("not-an-address").is_err());
/// ```
pub fn parse_token_address(addr: &str) -> Result<Address> {
    Address::from_str(addr).map_err(|e| BillcheapError::InvalidAddress(format!("{}: {}", addr, e)))
}
