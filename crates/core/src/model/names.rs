use serde::Serialize;
use std::fmt;

use crate::model::record::RecordError;

/// Name of the student the bundled single-student mode records against.
pub const DEFAULT_STUDENT_NAME: &str = "Default Student";

/// Unique key of a student within a record.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StudentName(String);

impl StudentName {
    /// Creates a student name from user input.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::EmptyStudentName` if the name is blank.
    pub fn new(raw: impl Into<String>) -> Result<Self, RecordError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RecordError::EmptyStudentName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Wraps a key read back from storage verbatim.
    #[must_use]
    pub fn from_persisted(raw: String) -> Self {
        Self(raw)
    }

    /// The owner used when only one student is tracked.
    #[must_use]
    pub fn default_student() -> Self {
        Self(DEFAULT_STUDENT_NAME.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique key of a subject within one student.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SubjectName(String);

impl SubjectName {
    /// Creates a subject name from user input.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::EmptySubjectName` if the name is blank.
    pub fn new(raw: impl Into<String>) -> Result<Self, RecordError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RecordError::EmptySubjectName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn from_persisted(raw: String) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StudentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StudentName({:?})", self.0)
    }
}

impl fmt::Debug for SubjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubjectName({:?})", self.0)
    }
}

impl fmt::Display for StudentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SubjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StudentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SubjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
