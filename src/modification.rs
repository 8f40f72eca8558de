use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chart_of_accounts::Target;
use crate::error::{ForecastError, Result};
use crate::statement::PeriodStatement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ModificationKind {
    /// Percent change applied to the leaf: `leaf * (1 + value / 100)`.
    Percentage,
    /// Absolute monthly delta added to the leaf: `leaf + value`.
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ParameterUnit {
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "$")]
    Currency,
}

/// A bounded, adjustable numeric value. The bounds drive the interactive
/// slider in the presentation layer; the engine only ever reads `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Parameter {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub unit: ParameterUnit,
}

impl Parameter {
    pub fn validate(&self) -> Result<()> {
        if self.value < self.min || self.value > self.max {
            return Err(ForecastError::InvalidParameterRange {
                value: self.value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// A single approved scenario operation targeting one statement leaf.
///
/// `description` and `explanation` are purely informational; the arithmetic
/// uses only `kind`, `target`, `parameter.value` and `start_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Modification {
    pub id: Uuid,
    pub kind: ModificationKind,
    pub target: Target,
    pub parameter: Parameter,
    pub description: String,
    pub explanation: String,
    /// First month-end the modification applies to. Absent means "from the
    /// first forecast period onward".
    pub start_date: Option<NaiveDate>,
}

impl Modification {
    pub fn new(
        kind: ModificationKind,
        target: Target,
        parameter: Parameter,
        description: impl Into<String>,
        explanation: impl Into<String>,
        start_date: Option<NaiveDate>,
    ) -> Result<Self> {
        parameter.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            target,
            parameter,
            description: description.into(),
            explanation: explanation.into(),
            start_date,
        })
    }

    /// Applies this modification to one period, returning the updated copy.
    ///
    /// A `start_date` after `period_date` makes this a no-op. Derived totals
    /// are NOT recomputed here; callers run `recompute_totals` once after
    /// applying the whole scenario.
    pub fn apply(&self, statement: &PeriodStatement, period_date: NaiveDate) -> PeriodStatement {
        if let Some(start) = self.start_date {
            if start > period_date {
                return statement.clone();
            }
        }

        let leaf = self.target.value(statement);
        let new_leaf = match self.kind {
            ModificationKind::Percentage => leaf * (1.0 + self.parameter.value / 100.0),
            ModificationKind::Fixed => leaf + self.parameter.value,
        };
        self.target.with_value(statement, new_leaf)
    }
}

/// The active scenario: an insertion-ordered set of modifications.
///
/// Order matters when several modifications hit the same leaf, since each
/// operates on the output of the previous one. Parameter ranges are enforced
/// at insert/update time, never at apply time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    modifications: Vec<Modification>,
}

impl Scenario {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, modification: Modification) -> Result<()> {
        modification.parameter.validate()?;
        self.modifications.push(modification);
        Ok(())
    }

    /// Adjusts the parameter value of the modification with `id`, keeping it
    /// inside its declared bounds.
    pub fn update_value(&mut self, id: Uuid, value: f64) -> Result<()> {
        for modification in &mut self.modifications {
            if modification.id == id {
                let candidate = Parameter {
                    value,
                    ..modification.parameter.clone()
                };
                candidate.validate()?;
                modification.parameter = candidate;
                return Ok(());
            }
        }
        Err(ForecastError::UnknownModification(id))
    }

    pub fn remove(&mut self, id: Uuid) {
        self.modifications.retain(|m| m.id != id);
    }

    pub fn clear(&mut self) {
        self.modifications.clear();
    }

    pub fn modifications(&self) -> &[Modification] {
        &self.modifications
    }

    pub fn len(&self) -> usize {
        self.modifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modifications.is_empty()
    }

    /// Applies every active modification in insertion order. Totals are left
    /// stale for the caller to recompute.
    pub fn apply_all(
        &self,
        statement: &PeriodStatement,
        period_date: NaiveDate,
    ) -> PeriodStatement {
        let mut current = statement.clone();
        for modification in &self.modifications {
            current = modification.apply(&current, period_date);
        }
        current
    }
}
