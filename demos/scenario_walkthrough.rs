//! Walks through a full forecast session without any network access:
//! generate two years of actuals, derive a baseline, apply a couple of
//! scenario modifications, and print the resulting 12-month forecast.
//!
//! Run with: cargo run --example scenario_walkthrough

use anyhow::Result;
use chrono::NaiveDate;
use scenario_forecaster::*;

fn main() -> Result<()> {
    let start = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
    let actuals = generate_actuals(start, 24, 7, &GeneratorProfile::default());

    let mut session = ForecastSession::new(actuals)?;

    let assumptions = session.assumptions();
    println!("Baseline assumptions (trailing 12 months):");
    println!(
        "  revenue slopes: inStore {:+.0}/mo, delivery {:+.0}/mo, catering {:+.0}/mo",
        assumptions.growth.in_store, assumptions.growth.delivery, assumptions.growth.catering
    );
    println!(
        "  cost ratios: food {:.1}%, beverages {:.1}%, wages {:.1}%",
        assumptions.ratios.food * 100.0,
        assumptions.ratios.beverages * 100.0,
        assumptions.ratios.wages * 100.0
    );
    println!(
        "  fixed costs: salaries {:.0}, rent {:.0}, utilities {:.0}",
        assumptions.fixed.salaries, assumptions.fixed.rent, assumptions.fixed.utilities
    );
    println!();

    let baseline = session.run()?;
    let baseline_summary = summarize(&baseline);

    // The scenario: cheaper packaging plus two new cooks.
    let cheaper_packaging = ModificationRequest {
        kind: ModificationKind::Percentage,
        category: "cogs".to_string(),
        item: "packaging".to_string(),
        value: -15.0,
        start_date: None,
        explanation: Some("Supplier switch typically saves 10-20%".to_string()),
    };
    let hire_cooks = ModificationRequest {
        kind: ModificationKind::Fixed,
        category: "expenses.labor".to_string(),
        item: "wages".to_string(),
        value: 10000.0,
        start_date: None,
        explanation: Some("Two cooks at the average monthly wage".to_string()),
    };

    session.add_modification(cheaper_packaging.into_modification()?)?;
    session.add_modification(hire_cooks.into_modification()?)?;

    for modification in session.scenario().modifications() {
        println!("Modification: {}", modification.description);
        println!(
            "  adjustable between {:.0} and {:.0} (step {:.0})",
            modification.parameter.min, modification.parameter.max, modification.parameter.step
        );
    }
    println!();

    let forecast = session.run()?;

    println!(
        "{:<12} {:>12} {:>12} {:>12} {:>12}",
        "Month", "Revenue", "GrossProfit", "OpIncome", "NetIncome"
    );
    for statement in &forecast {
        println!(
            "{:<12} {:>12.0} {:>12.0} {:>12.0} {:>12.0}",
            statement.date.format("%Y-%m").to_string(),
            statement.revenue.total,
            statement.gross_profit,
            statement.operating_income,
            statement.net_income
        );
    }
    println!();

    let scenario_summary = summarize(&forecast);
    println!(
        "Net income over 12 months: baseline {:.0} -> scenario {:.0} ({:+.0})",
        baseline_summary.total_net_income,
        scenario_summary.total_net_income,
        scenario_summary.total_net_income - baseline_summary.total_net_income
    );

    Ok(())
}
