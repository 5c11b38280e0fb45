//! Walkthrough of the top-up pipeline against the sandbox aggregator.
//!
//! Requires `RELOADLY_CLIENT_ID` and `RELOADLY_CLIENT_SECRET` in the
//! environment (or a `.env` file).
//!
//! Run with: `cargo run --example topup`

use anyhow::Context;
use billcheap_rs::flow::{CatalogLookup, TopUpFlow, TopUpOutcome, TopUpRequest};
use billcheap_rs::sources::reloadly::{ReloadlyClient, ReloadlyConfig};
use billcheap_rs::types::BillKind;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let client_id =
        std::env::var("RELOADLY_CLIENT_ID").context("RELOADLY_CLIENT_ID is not set")?;
    let client_secret =
        std::env::var("RELOADLY_CLIENT_SECRET").context("RELOADLY_CLIENT_SECRET is not set")?;

    let client = ReloadlyClient::new(
        ReloadlyConfig::new(client_id, client_secret).with_sandbox(true),
    );
    let flow = TopUpFlow::new(client);

    let request = TopUpRequest {
        provider_name: "MTN".to_string(),
        provider_id: None,
        iso_code: "NG".to_string(),
        phone_number: "+2348012345678".to_string(),
        amount: Some(1000.0),
        bill_kind: BillKind::Airtime,
        pin: None,
        token_address: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913".to_string(),
    };

    match flow.find_operators(&request).await? {
        CatalogLookup::Operators(operators) => {
            println!("{} candidate operator(s):", operators.len());
            for op in &operators {
                println!(
                    "  [{}] {} ({} {:?})",
                    op.id, op.name, op.destination_currency_code, op.denomination_type
                );
            }
        }
        CatalogLookup::NeedsInput { prompt } => {
            println!("{}", prompt);
            return Ok(());
        }
    }

    match flow.process_top_up(&request).await? {
        TopUpOutcome::Ready(order) => {
            println!("validated order: {}", serde_json::to_string_pretty(&order)?);
        }
        TopUpOutcome::OperatorMismatch { operators, message } => {
            println!("{}", message);
            for op in operators {
                println!("  [{}] {}", op.id, op.name);
            }
        }
        TopUpOutcome::NoProviders => println!("no providers available"),
        TopUpOutcome::AmountMismatch { amount } => {
            println!("no providers accept an amount of {}", amount);
        }
        TopUpOutcome::ProviderNotFound => {
            println!("the detected operator does not accept that amount");
        }
        TopUpOutcome::NeedsInput { prompt } => println!("{}", prompt),
    }

    Ok(())
}
