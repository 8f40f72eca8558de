use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Flat corporate tax rate applied to positive operating income.
pub const TAX_RATE: f64 = 0.25;

/// Tolerance used when checking the derived-total equalities.
pub const CONSISTENCY_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Revenue {
    pub in_store: f64,
    pub delivery: f64,
    pub catering: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cogs {
    pub food: f64,
    pub beverages: f64,
    pub packaging: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Labor {
    pub wages: f64,
    pub salaries: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentAndUtilities {
    pub rent: f64,
    pub utilities: f64,
    pub total: f64,
}

/// General & administrative costs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GAndA {
    pub pos_fees: f64,
    pub delivery_commissions: f64,
    pub insurance: f64,
    pub repairs: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expenses {
    pub labor: Labor,
    pub marketing: f64,
    pub rent_and_utilities: RentAndUtilities,
    pub g_and_a: GAndA,
    pub total: f64,
}

/// One calendar month's full income-statement snapshot.
///
/// Every `total` field plus `gross_profit`, `operating_income` and
/// `net_income` is derived, never set independently. After mutating any leaf
/// value, call [`PeriodStatement::recompute_totals`] before handing the
/// statement to anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStatement {
    /// Month-end date identifying the period.
    pub date: NaiveDate,
    pub revenue: Revenue,
    pub cogs: Cogs,
    pub gross_profit: f64,
    pub expenses: Expenses,
    pub operating_income: f64,
    pub net_income: f64,
}

impl PeriodStatement {
    /// A statement with every monetary field zeroed, dated `date`.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            revenue: Revenue::default(),
            cogs: Cogs::default(),
            gross_profit: 0.0,
            expenses: Expenses::default(),
            operating_income: 0.0,
            net_income: 0.0,
        }
    }

    /// Rewrites every derived field bottom-up from the current leaf values.
    ///
    /// Pure and idempotent: the date and all leaf fields are carried over
    /// untouched, only totals/subtotals and the income lines change. This is
    /// the single source of arithmetic consistency for the whole crate.
    pub fn recompute_totals(&self) -> PeriodStatement {
        let mut s = self.clone();

        s.revenue.total = s.revenue.in_store + s.revenue.delivery + s.revenue.catering;
        s.cogs.total = s.cogs.food + s.cogs.beverages + s.cogs.packaging;
        s.gross_profit = s.revenue.total - s.cogs.total;

        s.expenses.labor.total = s.expenses.labor.wages + s.expenses.labor.salaries;
        s.expenses.rent_and_utilities.total =
            s.expenses.rent_and_utilities.rent + s.expenses.rent_and_utilities.utilities;
        s.expenses.g_and_a.total = s.expenses.g_and_a.pos_fees
            + s.expenses.g_and_a.delivery_commissions
            + s.expenses.g_and_a.insurance
            + s.expenses.g_and_a.repairs;
        s.expenses.total = s.expenses.labor.total
            + s.expenses.marketing
            + s.expenses.rent_and_utilities.total
            + s.expenses.g_and_a.total;

        s.operating_income = s.gross_profit - s.expenses.total;
        let taxes = if s.operating_income > 0.0 {
            s.operating_income * TAX_RATE
        } else {
            0.0
        };
        s.net_income = s.operating_income - taxes;

        s
    }

    /// Verifies every derived-total equality within [`CONSISTENCY_TOLERANCE`].
    pub fn check_consistency(&self) -> Result<()> {
        let recomputed = self.recompute_totals();

        let checks: [(&str, f64, f64); 8] = [
            ("revenue.total", self.revenue.total, recomputed.revenue.total),
            ("cogs.total", self.cogs.total, recomputed.cogs.total),
            ("grossProfit", self.gross_profit, recomputed.gross_profit),
            (
                "expenses.labor.total",
                self.expenses.labor.total,
                recomputed.expenses.labor.total,
            ),
            (
                "expenses.rentAndUtilities.total",
                self.expenses.rent_and_utilities.total,
                recomputed.expenses.rent_and_utilities.total,
            ),
            (
                "expenses.gAndA.total",
                self.expenses.g_and_a.total,
                recomputed.expenses.g_and_a.total,
            ),
            (
                "expenses.total",
                self.expenses.total,
                recomputed.expenses.total,
            ),
            (
                "operatingIncome",
                self.operating_income,
                recomputed.operating_income,
            ),
        ];

        for (field, actual, expected) in checks {
            if (actual - expected).abs() > CONSISTENCY_TOLERANCE {
                return Err(ForecastError::InconsistentStatement {
                    date: self.date,
                    details: format!("{} is {}, expected {}", field, actual, expected),
                });
            }
        }

        if (self.net_income - recomputed.net_income).abs() > CONSISTENCY_TOLERANCE {
            return Err(ForecastError::InconsistentStatement {
                date: self.date,
                details: format!(
                    "netIncome is {}, expected {}",
                    self.net_income, recomputed.net_income
                ),
            });
        }

        Ok(())
    }
}
