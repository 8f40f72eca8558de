//! # Scenario Forecaster
//!
//! A library for projecting a small business's monthly financial statements
//! twelve months forward, with scenario modifications ("hire two cooks",
//! "use cheaper packaging") expressed as typed, bounded operations.
//!
//! ## Core Concepts
//!
//! - **Period Statement**: one month's structured income statement. Every
//!   subtotal is derived; `recompute_totals` is the single source of
//!   arithmetic consistency.
//! - **Baseline Assumptions**: growth slopes, revenue ratios and fixed-cost
//!   averages derived from a trailing window of actuals.
//! - **Modification**: a percentage or fixed-amount change targeting one
//!   statement leaf, bounded for interactive adjustment.
//! - **Projection**: a strictly sequential, deterministic 12-month forward
//!   walk that reapplies the active scenario each period.
//! - **Intent Resolver**: an external collaborator (optionally the bundled
//!   LLM client behind the `resolver-client` feature) that turns free text
//!   into modification requests or clarifying questions.
//!
//! ## Example
//!
//! ```rust
//! use scenario_forecaster::*;
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
//! let actuals = generate_actuals(start, 24, 7, &GeneratorProfile::default());
//!
//! let mut session = ForecastSession::new(actuals).unwrap();
//!
//! let request = ModificationRequest {
//!     kind: ModificationKind::Percentage,
//!     category: "cogs".to_string(),
//!     item: "packaging".to_string(),
//!     value: -15.0,
//!     start_date: None,
//!     explanation: None,
//! };
//! session.add_modification(request.into_modification().unwrap()).unwrap();
//!
//! let forecast = session.run().unwrap();
//! assert_eq!(forecast.len(), 12);
//! ```

pub mod baseline;
pub mod chart_of_accounts;
pub mod error;
pub mod generator;
pub mod modification;
pub mod projection;
pub mod resolver;
pub mod series;
pub mod statement;
pub mod utils;

pub use baseline::{derive_baseline, BaselineAssumptions, FixedCosts, GrowthSlopes, RevenueRatios};
pub use chart_of_accounts::{AccountEntry, ChartOfAccounts, Target};
pub use error::{ForecastError, Result};
pub use generator::{generate_actuals, GeneratorProfile};
pub use modification::{Modification, ModificationKind, Parameter, ParameterUnit, Scenario};
pub use projection::{project, summarize, ForecastSummary, FORECAST_HORIZON};
pub use resolver::{ChatMessage, ModificationRequest, ResolverResponse};
pub use series::{trailing_window, validate_actuals};
pub use statement::{PeriodStatement, CONSISTENCY_TOLERANCE, TAX_RATE};

#[cfg(feature = "resolver-client")]
pub use resolver::IntentResolver;

use log::{debug, info};
use uuid::Uuid;

/// How many trailing actual periods feed the baseline derivation.
pub const BASELINE_WINDOW: usize = 12;

/// One forecast session: the actuals window, the derived (and user-editable)
/// baseline assumptions, and the active scenario.
///
/// This is the explicit data-provider object handed to whichever component
/// needs it; there is no ambient dataset. Each `run()` is a pure function of
/// the session's current state, so concurrent runs over separate sessions
/// never interfere.
pub struct ForecastSession {
    actuals: Vec<PeriodStatement>,
    assumptions: BaselineAssumptions,
    scenario: Scenario,
    chart: ChartOfAccounts,
}

impl ForecastSession {
    /// Validates the supplied actuals and derives baseline assumptions from
    /// the trailing [`BASELINE_WINDOW`] periods.
    pub fn new(actuals: Vec<PeriodStatement>) -> Result<Self> {
        validate_actuals(&actuals)?;

        let window = trailing_window(&actuals, BASELINE_WINDOW);
        let assumptions = derive_baseline(window)?;

        info!(
            "Forecast session opened: {} actual period(s), baseline derived from trailing {}",
            actuals.len(),
            window.len()
        );

        Ok(Self {
            actuals,
            assumptions,
            scenario: Scenario::new(),
            chart: ChartOfAccounts::standard(),
        })
    }

    pub fn actuals(&self) -> &[PeriodStatement] {
        &self.actuals
    }

    pub fn chart_of_accounts(&self) -> &ChartOfAccounts {
        &self.chart
    }

    pub fn assumptions(&self) -> &BaselineAssumptions {
        &self.assumptions
    }

    /// Replaces the baseline assumptions wholesale (user edits before a run).
    pub fn set_assumptions(&mut self, assumptions: BaselineAssumptions) {
        self.assumptions = assumptions;
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn add_modification(&mut self, modification: Modification) -> Result<()> {
        debug!(
            "Adding modification {} targeting ({}, {})",
            modification.id,
            modification.target.category(),
            modification.target.item()
        );
        self.scenario.add(modification)
    }

    pub fn update_modification_value(&mut self, id: Uuid, value: f64) -> Result<()> {
        self.scenario.update_value(id, value)
    }

    pub fn remove_modification(&mut self, id: Uuid) {
        self.scenario.remove(id);
    }

    pub fn clear_scenario(&mut self) {
        self.scenario.clear();
    }

    /// Runs the projection over the current assumptions and scenario.
    pub fn run(&self) -> Result<Vec<PeriodStatement>> {
        let forecast = project(&self.actuals, &self.assumptions, &self.scenario)?;
        info!(
            "Projection complete: {} forecast period(s), {} modification(s) applied",
            forecast.len(),
            self.scenario.len()
        );
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::last_day_of_month;

    fn session() -> ForecastSession {
        let start = last_day_of_month(2024, 6);
        let actuals = generate_actuals(start, 24, 11, &GeneratorProfile::default());
        ForecastSession::new(actuals).unwrap()
    }

    #[test]
    fn test_session_end_to_end() {
        let mut session = session();

        let request = ModificationRequest {
            kind: ModificationKind::Percentage,
            category: "cogs".to_string(),
            item: "packaging".to_string(),
            value: -15.0,
            start_date: None,
            explanation: None,
        };
        session
            .add_modification(request.into_modification().unwrap())
            .unwrap();

        let forecast = session.run().unwrap();
        assert_eq!(forecast.len(), FORECAST_HORIZON);
        for statement in &forecast {
            statement.check_consistency().unwrap();
        }
    }

    #[test]
    fn test_session_rejects_short_history() {
        let start = last_day_of_month(2025, 5);
        let actuals = generate_actuals(start, 1, 3, &GeneratorProfile::default());
        let result = ForecastSession::new(actuals);
        assert!(matches!(
            result,
            Err(ForecastError::InsufficientHistory { available: 1 })
        ));
    }

    #[test]
    fn test_clear_scenario_restores_baseline() {
        let mut session = session();
        let baseline = session.run().unwrap();

        let request = ModificationRequest {
            kind: ModificationKind::Fixed,
            category: "expenses.labor".to_string(),
            item: "wages".to_string(),
            value: 5000.0,
            start_date: None,
            explanation: None,
        };
        session
            .add_modification(request.into_modification().unwrap())
            .unwrap();
        let modified = session.run().unwrap();
        assert_ne!(baseline, modified);

        session.clear_scenario();
        assert_eq!(session.run().unwrap(), baseline);
    }

    #[test]
    fn test_user_edited_assumptions() {
        let mut session = session();
        let mut assumptions = session.assumptions().clone();
        assumptions.growth.in_store = 0.0;
        assumptions.growth.delivery = 0.0;
        assumptions.growth.catering = 0.0;
        session.set_assumptions(assumptions);

        let forecast = session.run().unwrap();
        let first = &forecast[0];
        let last = &forecast[11];
        assert!((first.revenue.total - last.revenue.total).abs() < 1e-6);
    }
}
