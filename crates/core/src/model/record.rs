use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::counter::SubjectCounter;
use crate::model::goal::Goal;
use crate::model::names::{StudentName, SubjectName};
use crate::projection::{Summary, summarize};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    #[error("student name cannot be empty")]
    EmptyStudentName,

    #[error("a student named {0:?} already exists")]
    DuplicateStudentName(String),

    #[error("subject name cannot be empty")]
    EmptySubjectName,

    #[error("subject {0:?} already exists for this student")]
    DuplicateSubjectName(String),

    #[error("at least one student must remain")]
    LastStudentDeletion,

    #[error("unknown student {0:?}")]
    UnknownStudent(String),

    #[error("unknown subject {0:?}")]
    UnknownSubject(String),
}

//
// ─── STUDENT ───────────────────────────────────────────────────────────────────
//

/// Free-form student attributes such as class or roll number.
///
/// Opaque to the ledger; carried through storage unchanged.
pub type StudentInfo = BTreeMap<String, String>;

/// Build a `StudentInfo` from optional class/roll entries, dropping blanks.
#[must_use]
pub fn student_info(class: Option<&str>, roll: Option<&str>) -> StudentInfo {
    let mut info = StudentInfo::new();
    for (key, value) in [("class", class), ("roll", roll)] {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            info.insert(key.to_owned(), value.to_owned());
        }
    }
    info
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentRecord {
    info: StudentInfo,
    subjects: BTreeMap<SubjectName, SubjectCounter>,
}

impl StudentRecord {
    #[must_use]
    pub fn new(info: StudentInfo) -> Self {
        Self {
            info,
            subjects: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn from_persisted(
        info: StudentInfo,
        subjects: BTreeMap<SubjectName, SubjectCounter>,
    ) -> Self {
        Self { info, subjects }
    }

    #[must_use]
    pub fn info(&self) -> &StudentInfo {
        &self.info
    }

    #[must_use]
    pub fn subjects(&self) -> &BTreeMap<SubjectName, SubjectCounter> {
        &self.subjects
    }

    #[must_use]
    pub fn subject(&self, name: &SubjectName) -> Option<&SubjectCounter> {
        self.subjects.get(name)
    }

    /// Mutable access for ledger operations.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::UnknownSubject` if the subject does not exist.
    pub fn subject_mut(&mut self, name: &SubjectName) -> Result<&mut SubjectCounter, RecordError> {
        self.subjects
            .get_mut(name)
            .ok_or_else(|| RecordError::UnknownSubject(name.as_str().to_owned()))
    }

    /// Subjects ordered case-insensitively, the order they are listed in.
    #[must_use]
    pub fn sorted_subjects(&self) -> Vec<(&SubjectName, &SubjectCounter)> {
        let mut subjects: Vec<_> = self.subjects.iter().collect();
        subjects.sort_by_cached_key(|(name, _)| name.as_str().to_lowercase());
        subjects
    }

    /// Start tracking a subject at 0/0.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::DuplicateSubjectName` if it is already tracked.
    pub fn add_subject(&mut self, name: SubjectName) -> Result<(), RecordError> {
        if self.subjects.contains_key(&name) {
            return Err(RecordError::DuplicateSubjectName(name.as_str().to_owned()));
        }
        self.subjects.insert(name, SubjectCounter::default());
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `RecordError::UnknownSubject` if the subject does not exist.
    pub fn remove_subject(&mut self, name: &SubjectName) -> Result<SubjectCounter, RecordError> {
        self.subjects
            .remove(name)
            .ok_or_else(|| RecordError::UnknownSubject(name.as_str().to_owned()))
    }

    #[must_use]
    pub fn summary(&self, goal: Goal) -> Summary {
        summarize(self.subjects.values(), goal)
    }
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// Root of everything that is persisted: students and the shared goal.
///
/// A record always holds at least one student.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    students: BTreeMap<StudentName, StudentRecord>,
    goal: Goal,
}

impl Record {
    /// Assemble a record from stored parts, seeding the default student when
    /// none survived.
    #[must_use]
    pub fn from_persisted(students: BTreeMap<StudentName, StudentRecord>, goal: Goal) -> Self {
        let mut record = Self { students, goal };
        if record.students.is_empty() {
            record
                .students
                .insert(StudentName::default_student(), StudentRecord::default());
        }
        record
    }

    #[must_use]
    pub fn students(&self) -> &BTreeMap<StudentName, StudentRecord> {
        &self.students
    }

    #[must_use]
    pub fn student_names(&self) -> Vec<StudentName> {
        self.students.keys().cloned().collect()
    }

    /// The student selected when nothing else is.
    #[must_use]
    pub fn first_student(&self) -> Option<&StudentName> {
        self.students.keys().next()
    }

    #[must_use]
    pub fn student(&self, name: &StudentName) -> Option<&StudentRecord> {
        self.students.get(name)
    }

    /// # Errors
    ///
    /// Returns `RecordError::UnknownStudent` if the student does not exist.
    pub fn student_mut(&mut self, name: &StudentName) -> Result<&mut StudentRecord, RecordError> {
        self.students
            .get_mut(name)
            .ok_or_else(|| RecordError::UnknownStudent(name.as_str().to_owned()))
    }

    /// # Errors
    ///
    /// Returns `RecordError::DuplicateStudentName` if the name is taken.
    pub fn add_student(&mut self, name: StudentName, info: StudentInfo) -> Result<(), RecordError> {
        if self.students.contains_key(&name) {
            return Err(RecordError::DuplicateStudentName(name.as_str().to_owned()));
        }
        self.students.insert(name, StudentRecord::new(info));
        Ok(())
    }

    /// Remove a student and all their subjects.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::LastStudentDeletion` when `name` is the only
    /// student left, or `RecordError::UnknownStudent` if it does not exist.
    pub fn remove_student(&mut self, name: &StudentName) -> Result<StudentRecord, RecordError> {
        if !self.students.contains_key(name) {
            return Err(RecordError::UnknownStudent(name.as_str().to_owned()));
        }
        if self.students.len() <= 1 {
            return Err(RecordError::LastStudentDeletion);
        }
        self.students
            .remove(name)
            .ok_or_else(|| RecordError::UnknownStudent(name.as_str().to_owned()))
    }

    #[must_use]
    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn set_goal(&mut self, goal: Goal) {
        self.goal = goal;
    }

    /// Discard everything and return to the freshly seeded state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::from_persisted(BTreeMap::new(), Goal::default())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
