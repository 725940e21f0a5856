use std::sync::Arc;

use attendance_core::Summary;
use attendance_core::model::{
    Goal, Record, RecordError, StudentInfo, StudentName, SubjectCounter, SubjectName,
};
use storage::repository::RecordRepository;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::LedgerServiceError;

/// Single mutation boundary for attendance data.
///
/// Holds the one in-memory `Record` and writes all of it back after every
/// accepted change. Operations are scoped by owner (a `StudentName`); callers
/// tracking a single student pass `StudentName::default_student()`.
pub struct LedgerService {
    record: Mutex<Record>,
    repo: Arc<dyn RecordRepository>,
}

impl LedgerService {
    /// Load the stored record and take ownership of it.
    pub async fn open(repo: Arc<dyn RecordRepository>) -> Self {
        let record = repo.load().await;
        Self {
            record: Mutex::new(record),
            repo,
        }
    }

    /// A copy of the current record for rendering.
    pub async fn snapshot(&self) -> Record {
        self.record.lock().await.clone()
    }

    pub async fn students(&self) -> Vec<StudentName> {
        self.record.lock().await.student_names()
    }

    /// # Errors
    ///
    /// Returns `RecordError::EmptyStudentName` / `DuplicateStudentName` on
    /// rejection, or `Storage` if the change could not be saved.
    pub async fn add_student(
        &self,
        name: &str,
        info: StudentInfo,
    ) -> Result<StudentName, LedgerServiceError> {
        let name = StudentName::new(name).map_err(reject)?;
        self.commit("add_student", |record| {
            record.add_student(name.clone(), info)?;
            Ok(name)
        })
        .await
    }

    /// Delete a student and return the student to select next.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::LastStudentDeletion` when `name` is the only
    /// student, `UnknownStudent` if missing, or `Storage` on write failure.
    pub async fn delete_student(
        &self,
        name: &StudentName,
    ) -> Result<StudentName, LedgerServiceError> {
        self.commit("delete_student", |record| {
            record.remove_student(name)?;
            record
                .first_student()
                .cloned()
                .ok_or(LedgerServiceError::Record(RecordError::LastStudentDeletion))
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `RecordError::EmptySubjectName` / `DuplicateSubjectName` /
    /// `UnknownStudent` on rejection, or `Storage` on write failure.
    pub async fn add_subject(
        &self,
        owner: &StudentName,
        name: &str,
    ) -> Result<SubjectName, LedgerServiceError> {
        let name = SubjectName::new(name).map_err(reject)?;
        self.commit("add_subject", |record| {
            record.student_mut(owner)?.add_subject(name.clone())?;
            Ok(name)
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `UnknownStudent` / `UnknownSubject` on rejection, or `Storage`
    /// on write failure.
    pub async fn delete_subject(
        &self,
        owner: &StudentName,
        subject: &SubjectName,
    ) -> Result<(), LedgerServiceError> {
        self.commit("delete_subject", |record| {
            record.student_mut(owner)?.remove_subject(subject)?;
            Ok(())
        })
        .await
    }

    /// Count a held-and-attended class.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStudent` / `UnknownSubject` on rejection, or `Storage`
    /// on write failure.
    pub async fn mark_attended(
        &self,
        owner: &StudentName,
        subject: &SubjectName,
    ) -> Result<SubjectCounter, LedgerServiceError> {
        self.commit("mark_attended", |record| {
            let counter = record.student_mut(owner)?.subject_mut(subject)?;
            counter.record_attended();
            Ok(*counter)
        })
        .await
    }

    /// Count a held-and-missed class.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStudent` / `UnknownSubject` on rejection, or `Storage`
    /// on write failure.
    pub async fn mark_missed(
        &self,
        owner: &StudentName,
        subject: &SubjectName,
    ) -> Result<SubjectCounter, LedgerServiceError> {
        self.commit("mark_missed", |record| {
            let counter = record.student_mut(owner)?.subject_mut(subject)?;
            counter.record_missed();
            Ok(*counter)
        })
        .await
    }

    /// Overwrite a subject's counts.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidEdit` unless `0 <= attended <= total`,
    /// `UnknownStudent` / `UnknownSubject` if missing, or `Storage` on write
    /// failure.
    pub async fn edit_counts(
        &self,
        owner: &StudentName,
        subject: &SubjectName,
        attended: i64,
        total: i64,
    ) -> Result<SubjectCounter, LedgerServiceError> {
        self.commit("edit_counts", |record| {
            let counter = record.student_mut(owner)?.subject_mut(subject)?;
            counter.apply_manual_edit(attended, total)?;
            Ok(*counter)
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `LedgerError::InvalidGoal` unless `0 < percent <= 100`, or
    /// `Storage` on write failure.
    pub async fn set_goal(&self, percent: f64) -> Result<Goal, LedgerServiceError> {
        let goal = Goal::new(percent).map_err(reject)?;
        self.commit("set_goal", |record| {
            record.set_goal(goal);
            Ok(goal)
        })
        .await
    }

    /// Discard all students and subjects and restore defaults.
    ///
    /// # Errors
    ///
    /// Returns `Storage` on write failure.
    pub async fn reset_all(&self) -> Result<(), LedgerServiceError> {
        self.commit("reset_all", |record| {
            record.reset();
            Ok(())
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `RecordError::UnknownStudent` if `owner` does not exist.
    pub async fn summary(&self, owner: &StudentName) -> Result<Summary, LedgerServiceError> {
        let record = self.record.lock().await;
        let student = record
            .student(owner)
            .ok_or_else(|| RecordError::UnknownStudent(owner.as_str().to_owned()))?;
        Ok(student.summary(record.goal()))
    }

    /// Apply `op` to a copy of the record; on success install the copy and
    /// write it out. A rejected `op` leaves the record untouched. A failed
    /// write keeps the installed copy, which stays authoritative in memory.
    async fn commit<T>(
        &self,
        action: &'static str,
        op: impl FnOnce(&mut Record) -> Result<T, LedgerServiceError>,
    ) -> Result<T, LedgerServiceError> {
        let mut guard = self.record.lock().await;
        let mut next = guard.clone();
        let value = op(&mut next).map_err(|err| {
            info!(action, error = %err, "ledger change rejected");
            err
        })?;
        *guard = next;
        self.repo.save(&guard).await?;
        debug!(action, "ledger change saved");
        Ok(value)
    }
}

fn reject<E: Into<LedgerServiceError>>(err: E) -> LedgerServiceError {
    let err = err.into();
    info!(error = %err, "ledger input rejected");
    err
}
