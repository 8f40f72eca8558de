use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};
use crate::statement::PeriodStatement;

/// A mutable leaf field of the period statement, identified by a
/// (category, item) pair.
///
/// The set is closed: any pair outside this enumeration is rejected with
/// `TargetNotFound` when the target is constructed, so a projection run can
/// never fail partway through on an unknown path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Target {
    RevenueInStore,
    RevenueDelivery,
    RevenueCatering,
    CogsFood,
    CogsBeverages,
    CogsPackaging,
    LaborWages,
    LaborSalaries,
    Rent,
    Utilities,
    PosFees,
    DeliveryCommissions,
    Insurance,
    Repairs,
    Marketing,
}

impl Target {
    pub const ALL: [Target; 15] = [
        Target::RevenueInStore,
        Target::RevenueDelivery,
        Target::RevenueCatering,
        Target::CogsFood,
        Target::CogsBeverages,
        Target::CogsPackaging,
        Target::LaborWages,
        Target::LaborSalaries,
        Target::Rent,
        Target::Utilities,
        Target::PosFees,
        Target::DeliveryCommissions,
        Target::Insurance,
        Target::Repairs,
        Target::Marketing,
    ];

    /// Resolves a (category, item) pair against the statement schema.
    pub fn resolve(category: &str, item: &str) -> Result<Target> {
        let found = Target::ALL
            .iter()
            .find(|t| t.category() == category && t.item() == item);

        found.copied().ok_or_else(|| ForecastError::TargetNotFound {
            category: category.to_string(),
            item: item.to_string(),
        })
    }

    pub fn category(&self) -> &'static str {
        match self {
            Target::RevenueInStore | Target::RevenueDelivery | Target::RevenueCatering => "revenue",
            Target::CogsFood | Target::CogsBeverages | Target::CogsPackaging => "cogs",
            Target::LaborWages | Target::LaborSalaries => "expenses.labor",
            Target::Rent | Target::Utilities => "expenses.rentAndUtilities",
            Target::PosFees
            | Target::DeliveryCommissions
            | Target::Insurance
            | Target::Repairs => "expenses.gAndA",
            Target::Marketing => "expenses",
        }
    }

    pub fn item(&self) -> &'static str {
        match self {
            Target::RevenueInStore => "inStore",
            Target::RevenueDelivery => "delivery",
            Target::RevenueCatering => "catering",
            Target::CogsFood => "food",
            Target::CogsBeverages => "beverages",
            Target::CogsPackaging => "packaging",
            Target::LaborWages => "wages",
            Target::LaborSalaries => "salaries",
            Target::Rent => "rent",
            Target::Utilities => "utilities",
            Target::PosFees => "posFees",
            Target::DeliveryCommissions => "deliveryCommissions",
            Target::Insurance => "insurance",
            Target::Repairs => "repairs",
            Target::Marketing => "marketing",
        }
    }

    pub fn value(&self, statement: &PeriodStatement) -> f64 {
        match self {
            Target::RevenueInStore => statement.revenue.in_store,
            Target::RevenueDelivery => statement.revenue.delivery,
            Target::RevenueCatering => statement.revenue.catering,
            Target::CogsFood => statement.cogs.food,
            Target::CogsBeverages => statement.cogs.beverages,
            Target::CogsPackaging => statement.cogs.packaging,
            Target::LaborWages => statement.expenses.labor.wages,
            Target::LaborSalaries => statement.expenses.labor.salaries,
            Target::Rent => statement.expenses.rent_and_utilities.rent,
            Target::Utilities => statement.expenses.rent_and_utilities.utilities,
            Target::PosFees => statement.expenses.g_and_a.pos_fees,
            Target::DeliveryCommissions => statement.expenses.g_and_a.delivery_commissions,
            Target::Insurance => statement.expenses.g_and_a.insurance,
            Target::Repairs => statement.expenses.g_and_a.repairs,
            Target::Marketing => statement.expenses.marketing,
        }
    }

    /// Returns a copy of `statement` with this leaf set to `value`.
    /// Derived totals are left stale; the caller recomputes them afterwards.
    pub fn with_value(&self, statement: &PeriodStatement, value: f64) -> PeriodStatement {
        let mut s = statement.clone();
        match self {
            Target::RevenueInStore => s.revenue.in_store = value,
            Target::RevenueDelivery => s.revenue.delivery = value,
            Target::RevenueCatering => s.revenue.catering = value,
            Target::CogsFood => s.cogs.food = value,
            Target::CogsBeverages => s.cogs.beverages = value,
            Target::CogsPackaging => s.cogs.packaging = value,
            Target::LaborWages => s.expenses.labor.wages = value,
            Target::LaborSalaries => s.expenses.labor.salaries = value,
            Target::Rent => s.expenses.rent_and_utilities.rent = value,
            Target::Utilities => s.expenses.rent_and_utilities.utilities = value,
            Target::PosFees => s.expenses.g_and_a.pos_fees = value,
            Target::DeliveryCommissions => s.expenses.g_and_a.delivery_commissions = value,
            Target::Insurance => s.expenses.g_and_a.insurance = value,
            Target::Repairs => s.expenses.g_and_a.repairs = value,
            Target::Marketing => s.expenses.marketing = value,
        }
        s
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AccountEntry {
    pub category: String,
    pub item: String,
}

/// Read-only enumeration of the valid (category, item) pairs, grouped the way
/// the statement nests them. Supplied to the intent resolver so it can name
/// targets, and used by the registry to validate incoming modifications.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChartOfAccounts {
    pub revenue: Vec<AccountEntry>,
    pub cogs: Vec<AccountEntry>,
    pub expenses: Vec<AccountEntry>,
}

impl ChartOfAccounts {
    /// The chart for the standard statement schema, built from [`Target::ALL`].
    pub fn standard() -> Self {
        let mut revenue = Vec::new();
        let mut cogs = Vec::new();
        let mut expenses = Vec::new();

        for target in Target::ALL {
            let entry = AccountEntry {
                category: target.category().to_string(),
                item: target.item().to_string(),
            };
            match target.category() {
                "revenue" => revenue.push(entry),
                "cogs" => cogs.push(entry),
                _ => expenses.push(entry),
            }
        }

        Self {
            revenue,
            cogs,
            expenses,
        }
    }

    pub fn contains(&self, category: &str, item: &str) -> bool {
        Target::resolve(category, item).is_ok()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Markdown rendering for embedding into a resolver prompt.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str("# Chart of Accounts\n\n");

        output.push_str("## Revenue\n\n");
        for entry in &self.revenue {
            output.push_str(&format!("- ({}, {})\n", entry.category, entry.item));
        }
        output.push('\n');

        output.push_str("## Cost of Goods Sold\n\n");
        for entry in &self.cogs {
            output.push_str(&format!("- ({}, {})\n", entry.category, entry.item));
        }
        output.push('\n');

        output.push_str("## Operating Expenses\n\n");
        for entry in &self.expenses {
            output.push_str(&format!("- ({}, {})\n", entry.category, entry.item));
        }
        output.push('\n');

        output
    }

    pub fn total_accounts(&self) -> usize {
        self.revenue.len() + self.cogs.len() + self.expenses.len()
    }
}
