use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::statement::PeriodStatement;
use crate::utils::advance_month_end;

/// Shape parameters for the synthetic actuals generator. Defaults model a
/// quick-service restaurant: revenue split across in-store/delivery/catering,
/// consumable COGS proportional to revenue, and slowly escalating fixed costs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorProfile {
    pub base_revenue: f64,
    /// Multiplicative month-over-month revenue drift (e.g. 1.006).
    pub monthly_growth: f64,
    /// Standard deviation of the per-month revenue fluctuation.
    pub noise_factor: f64,
    pub in_store_share: f64,
    pub delivery_share: f64,
    pub catering_share: f64,
    pub food_ratio: f64,
    pub beverages_ratio: f64,
    pub packaging_ratio: f64,
    pub wages_ratio: f64,
    pub marketing_ratio: f64,
    pub pos_fees_ratio: f64,
    /// Commission charged on delivery revenue only.
    pub delivery_commission_rate: f64,
    pub base_salaries: f64,
    pub annual_salary_raise: f64,
    pub base_rent: f64,
    pub annual_rent_increase: f64,
    pub base_utilities: f64,
    pub insurance: f64,
    pub base_repairs: f64,
}

impl Default for GeneratorProfile {
    fn default() -> Self {
        Self {
            base_revenue: 60000.0,
            monthly_growth: 1.006,
            noise_factor: 0.03,
            in_store_share: 0.60,
            delivery_share: 0.35,
            catering_share: 0.05,
            food_ratio: 0.25,
            beverages_ratio: 0.08,
            packaging_ratio: 0.02,
            wages_ratio: 0.22,
            marketing_ratio: 0.03,
            pos_fees_ratio: 0.01,
            delivery_commission_rate: 0.15,
            base_salaries: 8000.0,
            annual_salary_raise: 1.03,
            base_rent: 5000.0,
            annual_rent_increase: 1.02,
            base_utilities: 1500.0,
            insurance: 1000.0,
            base_repairs: 500.0,
        }
    }
}

/// Generates `months` consecutive actual statements starting at the month of
/// `start`, using a seeded RNG so test fixtures are reproducible.
///
/// Randomness is confined to this generator; the projection engine itself is
/// fully deterministic.
pub fn generate_actuals(
    start: NaiveDate,
    months: usize,
    seed: u64,
    profile: &GeneratorProfile,
) -> Vec<PeriodStatement> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, profile.noise_factor).unwrap();
    let first = advance_month_end(start, 0);

    let mut actuals = Vec::with_capacity(months);

    for i in 0..months {
        let date = advance_month_end(first, i as u32);
        let years_elapsed = (date.year() - first.year()) as f64;

        let drift = profile.monthly_growth.powi(i as i32);
        let fluctuation = 1.0 + noise.sample(&mut rng);
        let revenue_total = profile.base_revenue * drift * fluctuation;

        let mut s = PeriodStatement::empty(date);
        s.revenue.in_store = revenue_total * profile.in_store_share;
        s.revenue.delivery = revenue_total * profile.delivery_share;
        s.revenue.catering = revenue_total * profile.catering_share;

        s.cogs.food = revenue_total * profile.food_ratio;
        s.cogs.beverages = revenue_total * profile.beverages_ratio;
        s.cogs.packaging = revenue_total * profile.packaging_ratio;

        s.expenses.labor.wages = revenue_total * profile.wages_ratio;
        s.expenses.labor.salaries =
            profile.base_salaries * profile.annual_salary_raise.powf(years_elapsed);
        s.expenses.marketing = revenue_total * profile.marketing_ratio;
        s.expenses.rent_and_utilities.rent =
            profile.base_rent * profile.annual_rent_increase.powf(years_elapsed);
        s.expenses.rent_and_utilities.utilities =
            profile.base_utilities + rng.gen_range(0.0..500.0);
        s.expenses.g_and_a.pos_fees = revenue_total * profile.pos_fees_ratio;
        s.expenses.g_and_a.delivery_commissions =
            s.revenue.delivery * profile.delivery_commission_rate;
        s.expenses.g_and_a.insurance = profile.insurance;
        s.expenses.g_and_a.repairs = profile.base_repairs + rng.gen_range(0.0..1000.0);

        actuals.push(s.recompute_totals());
    }

    actuals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::validate_actuals;
    use crate::utils::last_day_of_month;

    #[test]
    fn test_generated_series_is_valid() {
        let start = last_day_of_month(2024, 6);
        let actuals = generate_actuals(start, 24, 7, &GeneratorProfile::default());
        assert_eq!(actuals.len(), 24);
        validate_actuals(&actuals).unwrap();
        assert_eq!(actuals[0].date, start);
        assert_eq!(actuals[23].date, last_day_of_month(2026, 5));
    }

    #[test]
    fn test_seed_reproducibility() {
        let start = last_day_of_month(2024, 1);
        let profile = GeneratorProfile::default();
        let a = generate_actuals(start, 12, 42, &profile);
        let b = generate_actuals(start, 12, 42, &profile);
        assert_eq!(a, b);

        let c = generate_actuals(start, 12, 43, &profile);
        assert_ne!(a, c);
    }

    #[test]
    fn test_revenue_mix_and_ratios() {
        let start = last_day_of_month(2024, 1);
        let profile = GeneratorProfile::default();
        let actuals = generate_actuals(start, 6, 1, &profile);

        for s in &actuals {
            let mix = s.revenue.in_store / s.revenue.total;
            assert!((mix - profile.in_store_share).abs() < 1e-9);
            let food = s.cogs.food / s.revenue.total;
            assert!((food - profile.food_ratio).abs() < 1e-9);
            let commission = s.expenses.g_and_a.delivery_commissions / s.revenue.delivery;
            assert!((commission - profile.delivery_commission_rate).abs() < 1e-9);
        }
    }
}
