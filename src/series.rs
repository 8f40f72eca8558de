use crate::error::{ForecastError, Result};
use crate::statement::PeriodStatement;
use crate::utils::next_month_end;

/// Validates an externally supplied actuals series: non-empty, strictly
/// consecutive calendar months, and every statement arithmetically
/// consistent. Duplicated months fail the contiguity check.
pub fn validate_actuals(actuals: &[PeriodStatement]) -> Result<()> {
    let first = actuals.first().ok_or(ForecastError::EmptySeries)?;
    first.check_consistency()?;

    let mut expected = next_month_end(first.date);
    for statement in &actuals[1..] {
        if statement.date != expected {
            return Err(ForecastError::NonContiguousSeries {
                expected,
                found: statement.date,
            });
        }
        statement.check_consistency()?;
        expected = next_month_end(statement.date);
    }

    Ok(())
}

/// Returns the trailing window of up to `window` periods, most recent last.
pub fn trailing_window(actuals: &[PeriodStatement], window: usize) -> &[PeriodStatement] {
    let start = actuals.len().saturating_sub(window);
    &actuals[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::PeriodStatement;
    use crate::utils::last_day_of_month;

    fn consistent_month(year: i32, month: u32, revenue: f64) -> PeriodStatement {
        let mut s = PeriodStatement::empty(last_day_of_month(year, month));
        s.revenue.in_store = revenue;
        s.recompute_totals()
    }

    #[test]
    fn test_valid_series() {
        let series = vec![
            consistent_month(2024, 11, 1000.0),
            consistent_month(2024, 12, 1100.0),
            consistent_month(2025, 1, 1200.0),
        ];
        assert!(validate_actuals(&series).is_ok());
    }

    #[test]
    fn test_empty_series() {
        assert!(matches!(
            validate_actuals(&[]),
            Err(ForecastError::EmptySeries)
        ));
    }

    #[test]
    fn test_gap_detected() {
        let series = vec![
            consistent_month(2024, 11, 1000.0),
            consistent_month(2025, 1, 1200.0),
        ];
        let err = validate_actuals(&series).unwrap_err();
        assert!(matches!(err, ForecastError::NonContiguousSeries { .. }));
    }

    #[test]
    fn test_duplicate_month_detected() {
        let series = vec![
            consistent_month(2024, 11, 1000.0),
            consistent_month(2024, 11, 1000.0),
        ];
        assert!(validate_actuals(&series).is_err());
    }

    #[test]
    fn test_inconsistent_statement_detected() {
        let mut bad = consistent_month(2024, 11, 1000.0);
        bad.gross_profit += 5.0;
        let err = validate_actuals(&[bad]).unwrap_err();
        assert!(matches!(err, ForecastError::InconsistentStatement { .. }));
    }

    #[test]
    fn test_trailing_window() {
        let series: Vec<_> = (1..=15)
            .map(|m| consistent_month(2024 + (m - 1) / 12, ((m - 1) % 12 + 1) as u32, 100.0))
            .collect();
        assert_eq!(trailing_window(&series, 12).len(), 12);
        assert_eq!(trailing_window(&series, 20).len(), 15);
        assert_eq!(
            trailing_window(&series, 12)[0].date,
            series[3].date
        );
    }
}
