//! Commands the views issue against the ledger.
//!
//! Views build a `LedgerCommand`, hand it to `run_command`, and render the
//! returned outcome or error. Keeping this off the component tree lets the
//! command flow be tested without a renderer.

use attendance_core::model::{Goal, StudentInfo, StudentName, SubjectCounter, SubjectName};
use services::{LedgerService, LedgerServiceError};
use tracing::warn;

#[derive(Clone, Debug, PartialEq)]
pub enum LedgerCommand {
    AddStudent {
        name: String,
        info: StudentInfo,
    },
    DeleteStudent(StudentName),
    AddSubject {
        owner: StudentName,
        name: String,
    },
    DeleteSubject {
        owner: StudentName,
        subject: SubjectName,
    },
    Attend {
        owner: StudentName,
        subject: SubjectName,
    },
    Miss {
        owner: StudentName,
        subject: SubjectName,
    },
    Edit {
        owner: StudentName,
        subject: SubjectName,
        attended: i64,
        total: i64,
    },
    SetGoal(f64),
    ResetAll,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CommandOutcome {
    StudentAdded(StudentName),
    StudentDeleted { next: StudentName },
    SubjectAdded(SubjectName),
    SubjectDeleted(SubjectName),
    CountsChanged(SubjectCounter),
    GoalSet(Goal),
    Reset,
}

/// Apply a command and report what changed.
///
/// # Errors
///
/// Propagates the ledger's rejection or write failure unchanged.
pub async fn run_command(
    ledger: &LedgerService,
    command: LedgerCommand,
) -> Result<CommandOutcome, LedgerServiceError> {
    match command {
        LedgerCommand::AddStudent { name, info } => ledger
            .add_student(&name, info)
            .await
            .map(CommandOutcome::StudentAdded),
        LedgerCommand::DeleteStudent(name) => ledger
            .delete_student(&name)
            .await
            .map(|next| CommandOutcome::StudentDeleted { next }),
        LedgerCommand::AddSubject { owner, name } => ledger
            .add_subject(&owner, &name)
            .await
            .map(CommandOutcome::SubjectAdded),
        LedgerCommand::DeleteSubject { owner, subject } => {
            ledger.delete_subject(&owner, &subject).await?;
            Ok(CommandOutcome::SubjectDeleted(subject))
        }
        LedgerCommand::Attend { owner, subject } => ledger
            .mark_attended(&owner, &subject)
            .await
            .map(CommandOutcome::CountsChanged),
        LedgerCommand::Miss { owner, subject } => ledger
            .mark_missed(&owner, &subject)
            .await
            .map(CommandOutcome::CountsChanged),
        LedgerCommand::Edit {
            owner,
            subject,
            attended,
            total,
        } => ledger
            .edit_counts(&owner, &subject, attended, total)
            .await
            .map(CommandOutcome::CountsChanged),
        LedgerCommand::SetGoal(percent) => {
            ledger.set_goal(percent).await.map(CommandOutcome::GoalSet)
        }
        LedgerCommand::ResetAll => {
            ledger.reset_all().await?;
            Ok(CommandOutcome::Reset)
        }
    }
}

/// Outcome of a command whose change reached memory but not disk.
///
/// Only meaningful after a storage failure; a rejected command changed
/// nothing and has no outcome.
pub async fn outcome_in_memory(
    ledger: &LedgerService,
    command: &LedgerCommand,
) -> Option<CommandOutcome> {
    let record = ledger.snapshot().await;
    match command {
        LedgerCommand::AddStudent { name, .. } => {
            let name = StudentName::new(name.as_str()).ok()?;
            record.student(&name)?;
            Some(CommandOutcome::StudentAdded(name))
        }
        LedgerCommand::DeleteStudent(_) => record
            .first_student()
            .cloned()
            .map(|next| CommandOutcome::StudentDeleted { next }),
        LedgerCommand::AddSubject { owner, name } => {
            let name = SubjectName::new(name.as_str()).ok()?;
            record.student(owner)?.subject(&name)?;
            Some(CommandOutcome::SubjectAdded(name))
        }
        LedgerCommand::DeleteSubject { subject, .. } => {
            Some(CommandOutcome::SubjectDeleted(subject.clone()))
        }
        LedgerCommand::Attend { owner, subject }
        | LedgerCommand::Miss { owner, subject }
        | LedgerCommand::Edit { owner, subject, .. } => record
            .student(owner)?
            .subject(subject)
            .copied()
            .map(CommandOutcome::CountsChanged),
        LedgerCommand::SetGoal(_) => Some(CommandOutcome::GoalSet(record.goal())),
        LedgerCommand::ResetAll => Some(CommandOutcome::Reset),
    }
}

/// Message shown inline when a command fails.
#[must_use]
pub fn error_message(err: &LedgerServiceError) -> String {
    if err.is_rejection() {
        return sentence(&err.to_string());
    }
    warn!(error = %err, "change kept in memory but not saved");
    format!("Could not save data: {err}.")
}

fn sentence(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use attendance_core::model::{Record, RecordError};
    use storage::repository::{InMemoryRepository, RecordRepository, StorageError};

    async fn ledger() -> LedgerService {
        LedgerService::open(Arc::new(InMemoryRepository::new())).await
    }

    #[tokio::test]
    async fn subject_commands_flow_through_the_ledger() {
        let ledger = ledger().await;
        let owner = StudentName::default_student();

        let outcome = run_command(
            &ledger,
            LedgerCommand::AddSubject {
                owner: owner.clone(),
                name: " Math ".to_string(),
            },
        )
        .await
        .unwrap();
        let math = SubjectName::new("Math").unwrap();
        assert_eq!(outcome, CommandOutcome::SubjectAdded(math.clone()));

        run_command(
            &ledger,
            LedgerCommand::Attend {
                owner: owner.clone(),
                subject: math.clone(),
            },
        )
        .await
        .unwrap();
        let outcome = run_command(
            &ledger,
            LedgerCommand::Miss {
                owner: owner.clone(),
                subject: math.clone(),
            },
        )
        .await
        .unwrap();
        assert_eq!(
            outcome,
            CommandOutcome::CountsChanged(SubjectCounter::new(1, 2).unwrap())
        );

        let outcome = run_command(
            &ledger,
            LedgerCommand::DeleteSubject {
                owner: owner.clone(),
                subject: math.clone(),
            },
        )
        .await
        .unwrap();
        assert_eq!(outcome, CommandOutcome::SubjectDeleted(math));
        assert!(ledger.snapshot().await.student(&owner).unwrap().subjects().is_empty());
    }

    #[tokio::test]
    async fn deleting_a_student_reports_the_next_selection() {
        let ledger = ledger().await;
        let outcome = run_command(
            &ledger,
            LedgerCommand::AddStudent {
                name: "Asha".to_string(),
                info: StudentInfo::new(),
            },
        )
        .await
        .unwrap();
        let asha = StudentName::new("Asha").unwrap();
        assert_eq!(outcome, CommandOutcome::StudentAdded(asha.clone()));

        let outcome = run_command(
            &ledger,
            LedgerCommand::DeleteStudent(StudentName::default_student()),
        )
        .await
        .unwrap();
        assert_eq!(outcome, CommandOutcome::StudentDeleted { next: asha });
    }

    #[tokio::test]
    async fn rejected_edit_yields_readable_message() {
        let ledger = ledger().await;
        let owner = StudentName::default_student();
        let math = ledger.add_subject(&owner, "Math").await.unwrap();

        let err = run_command(
            &ledger,
            LedgerCommand::Edit {
                owner,
                subject: math,
                attended: 5,
                total: 4,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(
            error_message(&err),
            "Attended (5) and total (4) must satisfy 0 <= attended <= total."
        );
    }

    #[tokio::test]
    async fn goal_and_reset_commands() {
        let ledger = ledger().await;
        let outcome = run_command(&ledger, LedgerCommand::SetGoal(90.0)).await.unwrap();
        assert_eq!(outcome, CommandOutcome::GoalSet(Goal::new(90.0).unwrap()));

        let outcome = run_command(&ledger, LedgerCommand::ResetAll).await.unwrap();
        assert_eq!(outcome, CommandOutcome::Reset);
        assert_eq!(ledger.snapshot().await, Record::default());
    }

    struct UnwritableRepo;

    #[async_trait::async_trait]
    impl RecordRepository for UnwritableRepo {
        async fn load(&self) -> Record {
            Record::default()
        }

        async fn save(&self, _record: &Record) -> Result<(), StorageError> {
            Err(StorageError::Internal("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn unsaved_changes_still_report_their_outcome() {
        let ledger = LedgerService::open(Arc::new(UnwritableRepo)).await;
        let owner = StudentName::default_student();

        let add_student = LedgerCommand::AddStudent {
            name: " Asha ".to_string(),
            info: StudentInfo::new(),
        };
        let err = run_command(&ledger, add_student.clone()).await.unwrap_err();
        assert!(!err.is_rejection());
        assert_eq!(
            outcome_in_memory(&ledger, &add_student).await,
            Some(CommandOutcome::StudentAdded(StudentName::new("Asha").unwrap()))
        );

        let add_subject = LedgerCommand::AddSubject {
            owner: owner.clone(),
            name: "Math".to_string(),
        };
        run_command(&ledger, add_subject.clone()).await.unwrap_err();
        let math = SubjectName::new("Math").unwrap();
        assert_eq!(
            outcome_in_memory(&ledger, &add_subject).await,
            Some(CommandOutcome::SubjectAdded(math.clone()))
        );

        let attend = LedgerCommand::Attend {
            owner: owner.clone(),
            subject: math,
        };
        run_command(&ledger, attend.clone()).await.unwrap_err();
        assert_eq!(
            outcome_in_memory(&ledger, &attend).await,
            Some(CommandOutcome::CountsChanged(SubjectCounter::new(1, 1).unwrap()))
        );

        let delete = LedgerCommand::DeleteStudent(owner);
        run_command(&ledger, delete.clone()).await.unwrap_err();
        assert_eq!(
            outcome_in_memory(&ledger, &delete).await,
            Some(CommandOutcome::StudentDeleted {
                next: StudentName::new("Asha").unwrap()
            })
        );
    }

    #[test]
    fn messages_are_sentences() {
        let err = LedgerServiceError::Record(RecordError::LastStudentDeletion);
        assert_eq!(error_message(&err), "At least one student must remain.");
    }
}
