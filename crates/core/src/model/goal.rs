use serde::Serialize;

use crate::model::counter::LedgerError;

/// Target attendance percentage, shared by every subject in a record.
///
/// Always finite and within `(0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Goal(f64);

impl Goal {
    pub const DEFAULT_PERCENT: f64 = 75.0;

    /// Creates a goal from a percentage.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidGoal` unless `0 < percent <= 100`.
    pub fn new(percent: f64) -> Result<Self, LedgerError> {
        if !percent.is_finite() || percent <= 0.0 || percent > 100.0 {
            return Err(LedgerError::InvalidGoal(percent));
        }
        Ok(Self(percent))
    }

    #[must_use]
    pub fn percent(&self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn fraction(&self) -> f64 {
        self.0 / 100.0
    }

    /// True when the goal is perfect attendance.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.0 >= 100.0
    }
}

impl Default for Goal {
    fn default() -> Self {
        Self(Self::DEFAULT_PERCENT)
    }
}
