//! Resolves a natural-language scenario through an OpenAI-compatible
//! endpoint and runs the resulting modifications through a forecast session.
//!
//! Requires OPENAI_API_KEY in the environment (or a .env file).
//! Run with: cargo run --example resolver_session --features resolver-client

use anyhow::{Context, Result};
use chrono::NaiveDate;
use scenario_forecaster::*;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;

    let start = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
    let actuals = generate_actuals(start, 24, 7, &GeneratorProfile::default());
    let mut session = ForecastSession::new(actuals)?;

    let resolver = IntentResolver::new(api_key);
    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "hire two cooks and use cheaper packaging".to_string());

    println!("Resolving: \"{}\"", query);
    let response = resolver
        .resolve(&query, session.chart_of_accounts(), &[])
        .await?;

    match response {
        ResolverResponse::Question(question) => {
            println!("Clarification needed: {}", question);
        }
        ResolverResponse::Modification(requests) => {
            for request in requests {
                let modification = request.into_modification()?;
                println!("Applying: {}", modification.description);
                if !modification.explanation.is_empty() {
                    println!("  reasoning: {}", modification.explanation);
                }
                session.add_modification(modification)?;
            }

            let forecast = session.run()?;
            let summary = summarize(&forecast);
            println!(
                "12-month scenario: revenue {:.0}, gross profit {:.0}, net income {:.0}",
                summary.total_revenue, summary.total_gross_profit, summary.total_net_income
            );
        }
    }

    Ok(())
}
