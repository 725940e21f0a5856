use thiserror::Error;

/// Problems with raw text typed into a form, caught before the ledger sees it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputError {
    #[error("please enter valid integers")]
    NotAnInteger,
    #[error("goal must be a number between 1 and 100")]
    GoalOutOfRange,
}

/// Parse a class count. Sign is kept so the ledger can reject negatives.
///
/// # Errors
///
/// Returns `InputError::NotAnInteger` if the text is not an integer.
pub fn parse_count(raw: &str) -> Result<i64, InputError> {
    raw.trim().parse().map_err(|_| InputError::NotAnInteger)
}

/// Parse a goal percentage typed by the user, accepted from 1 to 100.
///
/// # Errors
///
/// Returns `InputError::GoalOutOfRange` if the text is not a number in range.
pub fn parse_goal(raw: &str) -> Result<f64, InputError> {
    let value: f64 = raw
        .trim()
        .trim_end_matches('%')
        .trim()
        .parse()
        .map_err(|_| InputError::GoalOutOfRange)?;
    if !(1.0..=100.0).contains(&value) {
        return Err(InputError::GoalOutOfRange);
    }
    Ok(value)
}
