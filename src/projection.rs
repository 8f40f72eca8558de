use log::debug;
use serde::{Deserialize, Serialize};

use crate::baseline::BaselineAssumptions;
use crate::error::{ForecastError, Result};
use crate::modification::Scenario;
use crate::statement::{PeriodStatement, Revenue};
use crate::utils::advance_month_end;

/// Number of forward periods every projection produces.
pub const FORECAST_HORIZON: usize = 12;

/// Projects the statement forward twelve months from the last actual period.
///
/// Each period is built strictly in sequence:
/// 1. advance the date one month;
/// 2. step each revenue line additively by its growth slope, starting from
///    the previous period's pre-modification revenue (the carry-forward base
///    deliberately excludes scenario effects so a reapplied percentage
///    modification holds its level instead of compounding);
/// 3. derive ratio-driven cost leaves from the new total revenue and
///    fixed-cost leaves from the assumption averages;
/// 4. apply the scenario's modifications in insertion order;
/// 5. recompute every derived total.
///
/// Pure and deterministic: identical inputs yield identical output.
pub fn project(
    actuals: &[PeriodStatement],
    assumptions: &BaselineAssumptions,
    scenario: &Scenario,
) -> Result<Vec<PeriodStatement>> {
    let seed = actuals.last().ok_or(ForecastError::EmptySeries)?;

    debug!(
        "Projecting {} periods from {} with {} active modification(s)",
        FORECAST_HORIZON,
        seed.date,
        scenario.len()
    );

    let mut carry = Revenue {
        in_store: seed.revenue.in_store,
        delivery: seed.revenue.delivery,
        catering: seed.revenue.catering,
        total: 0.0,
    };

    let mut forecast = Vec::with_capacity(FORECAST_HORIZON);

    for i in 1..=FORECAST_HORIZON {
        let date = advance_month_end(seed.date, i as u32);
        let mut baseline = PeriodStatement::empty(date);

        baseline.revenue.in_store = carry.in_store + assumptions.growth.in_store;
        baseline.revenue.delivery = carry.delivery + assumptions.growth.delivery;
        baseline.revenue.catering = carry.catering + assumptions.growth.catering;

        let revenue_total =
            baseline.revenue.in_store + baseline.revenue.delivery + baseline.revenue.catering;

        baseline.cogs.food = assumptions.ratios.food * revenue_total;
        baseline.cogs.beverages = assumptions.ratios.beverages * revenue_total;
        baseline.cogs.packaging = assumptions.ratios.packaging * revenue_total;
        baseline.expenses.labor.wages = assumptions.ratios.wages * revenue_total;
        baseline.expenses.marketing = assumptions.ratios.marketing * revenue_total;
        baseline.expenses.g_and_a.pos_fees = assumptions.ratios.pos_fees * revenue_total;
        baseline.expenses.g_and_a.delivery_commissions =
            assumptions.ratios.delivery_commissions * revenue_total;

        baseline.expenses.labor.salaries = assumptions.fixed.salaries;
        baseline.expenses.rent_and_utilities.rent = assumptions.fixed.rent;
        baseline.expenses.rent_and_utilities.utilities = assumptions.fixed.utilities;
        baseline.expenses.g_and_a.insurance = assumptions.fixed.insurance;
        baseline.expenses.g_and_a.repairs = assumptions.fixed.repairs;

        // Carry forward the pre-modification revenue for the next iteration.
        carry = baseline.revenue.clone();

        let modified = scenario.apply_all(&baseline, date);
        forecast.push(modified.recompute_totals());
    }

    Ok(forecast)
}

/// Aggregate view of a forecast series for summary cards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub total_revenue: f64,
    pub total_gross_profit: f64,
    pub total_net_income: f64,
}

pub fn summarize(forecast: &[PeriodStatement]) -> ForecastSummary {
    forecast.iter().fold(ForecastSummary::default(), |mut acc, s| {
        acc.total_revenue += s.revenue.total;
        acc.total_gross_profit += s.gross_profit;
        acc.total_net_income += s.net_income;
        acc
    })
}
