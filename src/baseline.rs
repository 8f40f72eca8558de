use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};
use crate::statement::PeriodStatement;

/// Additive monthly growth step for each revenue line, from an OLS fit of
/// the line's value against period index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrowthSlopes {
    pub in_store: f64,
    pub delivery: f64,
    pub catering: f64,
}

/// Cost categories modelled as a fraction of total revenue.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRatios {
    pub food: f64,
    pub beverages: f64,
    pub packaging: f64,
    pub wages: f64,
    pub marketing: f64,
    pub pos_fees: f64,
    pub delivery_commissions: f64,
}

/// Cost categories modelled as a flat monthly amount (window average).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FixedCosts {
    pub salaries: f64,
    pub rent: f64,
    pub utilities: f64,
    pub insurance: f64,
    pub repairs: f64,
}

/// Forward-looking assumptions derived once from a trailing window of
/// actuals when a forecast session starts. May be edited by the user before
/// the projection runs; never mutated by the engine itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaselineAssumptions {
    pub growth: GrowthSlopes,
    pub ratios: RevenueRatios,
    pub fixed: FixedCosts,
}

/// Ordinary least-squares slope of `values` against index 0..n-1.
/// Returns 0.0 for fewer than two points, where a slope is undefined.
fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }

    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n_f;

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        covariance += dx * (y - mean_y);
        variance += dx * dx;
    }

    if variance == 0.0 {
        0.0
    } else {
        covariance / variance
    }
}

/// Ratio of a category's windowed sum to the windowed revenue sum, 0.0 when
/// the window produced no revenue.
fn revenue_ratio(window: &[PeriodStatement], category: impl Fn(&PeriodStatement) -> f64) -> f64 {
    let revenue_sum: f64 = window.iter().map(|s| s.revenue.total).sum();
    if revenue_sum == 0.0 {
        return 0.0;
    }
    let category_sum: f64 = window.iter().map(&category).sum();
    category_sum / revenue_sum
}

fn average(window: &[PeriodStatement], category: impl Fn(&PeriodStatement) -> f64) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    window.iter().map(&category).sum::<f64>() / window.len() as f64
}

/// Derives baseline assumptions from a trailing window of actuals.
///
/// Deterministic given the same window. Fails with `InsufficientHistory`
/// when fewer than 2 periods are supplied; callers that want the degraded
/// zero-slope mode must opt in by padding their own assumptions, not by
/// silently falling back.
pub fn derive_baseline(window: &[PeriodStatement]) -> Result<BaselineAssumptions> {
    if window.len() < 2 {
        return Err(ForecastError::InsufficientHistory {
            available: window.len(),
        });
    }

    let in_store: Vec<f64> = window.iter().map(|s| s.revenue.in_store).collect();
    let delivery: Vec<f64> = window.iter().map(|s| s.revenue.delivery).collect();
    let catering: Vec<f64> = window.iter().map(|s| s.revenue.catering).collect();

    Ok(BaselineAssumptions {
        growth: GrowthSlopes {
            in_store: ols_slope(&in_store),
            delivery: ols_slope(&delivery),
            catering: ols_slope(&catering),
        },
        ratios: RevenueRatios {
            food: revenue_ratio(window, |s| s.cogs.food),
            beverages: revenue_ratio(window, |s| s.cogs.beverages),
            packaging: revenue_ratio(window, |s| s.cogs.packaging),
            wages: revenue_ratio(window, |s| s.expenses.labor.wages),
            marketing: revenue_ratio(window, |s| s.expenses.marketing),
            pos_fees: revenue_ratio(window, |s| s.expenses.g_and_a.pos_fees),
            delivery_commissions: revenue_ratio(window, |s| {
                s.expenses.g_and_a.delivery_commissions
            }),
        },
        fixed: FixedCosts {
            salaries: average(window, |s| s.expenses.labor.salaries),
            rent: average(window, |s| s.expenses.rent_and_utilities.rent),
            utilities: average(window, |s| s.expenses.rent_and_utilities.utilities),
            insurance: average(window, |s| s.expenses.g_and_a.insurance),
            repairs: average(window, |s| s.expenses.g_and_a.repairs),
        },
    })
}
