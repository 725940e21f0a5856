use serde::Serialize;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum LedgerError {
    #[error("attended ({attended}) and total ({total}) must satisfy 0 <= attended <= total")]
    InvalidEdit { attended: i64, total: i64 },

    #[error("goal must be within (0, 100], got {0}")]
    InvalidGoal(f64),
}

//
// ─── COUNTER ───────────────────────────────────────────────────────────────────
//

/// Attended/held class counts for one subject.
///
/// `attended <= total` holds for every value of this type: increments keep it
/// by construction and manual edits are checked before they are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubjectCounter {
    attended: u32,
    total: u32,
}

impl SubjectCounter {
    /// Creates a counter from explicit counts.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidEdit` if `attended > total`.
    pub fn new(attended: u32, total: u32) -> Result<Self, LedgerError> {
        if attended > total {
            return Err(LedgerError::InvalidEdit {
                attended: i64::from(attended),
                total: i64::from(total),
            });
        }
        Ok(Self { attended, total })
    }

    /// Rebuilds a counter from stored counts, clamping `attended` down to
    /// `total` when a hand-edited file broke the ordering.
    #[must_use]
    pub fn from_persisted(attended: u32, total: u32) -> Self {
        Self {
            attended: attended.min(total),
            total,
        }
    }

    #[must_use]
    pub fn attended(&self) -> u32 {
        self.attended
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn missed(&self) -> u32 {
        self.total - self.attended
    }

    /// A class was held and attended.
    pub fn record_attended(&mut self) {
        if self.total == u32::MAX {
            return;
        }
        self.attended += 1;
        self.total += 1;
    }

    /// A class was held and missed.
    pub fn record_missed(&mut self) {
        self.total = self.total.saturating_add(1);
    }

    /// Overwrite both counts at once.
    ///
    /// Inputs are signed so that negative user entry can be reported rather
    /// than silently wrapped. On error the counter is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidEdit` if either value is negative, does not
    /// fit a `u32`, or `attended > total`.
    pub fn apply_manual_edit(&mut self, attended: i64, total: i64) -> Result<(), LedgerError> {
        let invalid = LedgerError::InvalidEdit { attended, total };
        if attended < 0 || total < 0 || attended > total {
            return Err(invalid);
        }
        let attended = u32::try_from(attended).map_err(|_| invalid.clone())?;
        let total = u32::try_from(total).map_err(|_| invalid)?;
        self.attended = attended;
        self.total = total;
        Ok(())
    }
}
