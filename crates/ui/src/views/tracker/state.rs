use std::sync::Arc;

use attendance_core::model::{Record, StudentName, SubjectCounter, SubjectName};
use dioxus::prelude::*;
use services::LedgerService;

use crate::actions::CommandOutcome;
use crate::vm::{resolve_owner, resolve_subject};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentForm {
    pub name: String,
    pub class: String,
    pub roll: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditForm {
    pub owner: StudentName,
    pub subject: SubjectName,
    pub attended: String,
    pub total: String,
}

impl EditForm {
    #[must_use]
    pub fn prefilled(owner: StudentName, subject: SubjectName, counter: SubjectCounter) -> Self {
        Self {
            owner,
            subject,
            attended: counter.attended().to_string(),
            total: counter.total().to_string(),
        }
    }
}

/// A destructive action waiting for the user to confirm it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PendingConfirm {
    DeleteStudent(StudentName),
    DeleteSubject {
        owner: StudentName,
        subject: SubjectName,
    },
}

impl PendingConfirm {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::DeleteStudent(_) => "Delete student?",
            Self::DeleteSubject { .. } => "Delete subject?",
        }
    }

    #[must_use]
    pub fn body(&self) -> String {
        match self {
            Self::DeleteStudent(name) => {
                format!("Delete {name} and all of their subjects?")
            }
            Self::DeleteSubject { subject, .. } => {
                format!("Delete {subject} and its attendance counts?")
            }
        }
    }
}

pub type RecordResource = Resource<Record>;

/// Presentation state for the tracker page. Every field is a `Copy` handle.
#[derive(Clone, Copy)]
pub struct TrackerState {
    pub record: RecordResource,
    pub selected_student: Signal<Option<StudentName>>,
    pub selected_subject: Signal<Option<SubjectName>>,
    pub new_subject: Signal<String>,
    pub student_form: Signal<StudentForm>,
    pub edit_form: Signal<Option<EditForm>>,
    pub pending: Signal<Option<PendingConfirm>>,
    pub message: Signal<Option<String>>,
}

pub fn use_tracker_state(ledger: &Arc<LedgerService>) -> TrackerState {
    let selected_student = use_signal(|| None::<StudentName>);
    let selected_subject = use_signal(|| None::<SubjectName>);
    let new_subject = use_signal(String::new);
    let student_form = use_signal(StudentForm::default);
    let edit_form = use_signal(|| None::<EditForm>);
    let pending = use_signal(|| None::<PendingConfirm>);
    let message = use_signal(|| None::<String>);

    let ledger_for_resource = Arc::clone(ledger);
    let record = use_resource(move || {
        let ledger = Arc::clone(&ledger_for_resource);
        async move { ledger.snapshot().await }
    });

    TrackerState {
        record,
        selected_student,
        selected_subject,
        new_subject,
        student_form,
        edit_form,
        pending,
        message,
    }
}

impl TrackerState {
    /// Latest loaded record, if the resource has resolved.
    #[must_use]
    pub fn loaded_record(&self) -> Option<Record> {
        self.record.value().read().as_ref().cloned()
    }

    /// Owner and subject the toolbar acts on, resolved against `record`.
    #[must_use]
    pub fn selection(&self, record: &Record) -> (StudentName, Option<SubjectName>) {
        let owner = resolve_owner(record, (self.selected_student)());
        let subject = resolve_subject(record, &owner, (self.selected_subject)());
        (owner, subject)
    }

    pub fn select_student(&self, name: StudentName) {
        let mut selected_student = self.selected_student;
        let mut selected_subject = self.selected_subject;
        let mut edit_form = self.edit_form;
        selected_student.set(Some(name));
        selected_subject.set(None);
        edit_form.set(None);
    }

    pub fn set_message(&self, text: impl Into<String>) {
        let mut message = self.message;
        message.set(Some(text.into()));
    }

    pub fn clear_message(&self) {
        let mut message = self.message;
        message.set(None);
    }

    /// Fold a successful command back into selection and form state.
    pub fn apply_outcome(&self, outcome: &CommandOutcome) {
        let mut selected_subject = self.selected_subject;
        let mut edit_form = self.edit_form;
        match outcome {
            CommandOutcome::StudentAdded(name) => {
                let mut student_form = self.student_form;
                student_form.set(StudentForm::default());
                self.select_student(name.clone());
            }
            CommandOutcome::StudentDeleted { next } => self.select_student(next.clone()),
            CommandOutcome::SubjectAdded(name) => {
                let mut new_subject = self.new_subject;
                new_subject.set(String::new());
                selected_subject.set(Some(name.clone()));
            }
            CommandOutcome::SubjectDeleted(name) => {
                if selected_subject().as_ref() == Some(name) {
                    selected_subject.set(None);
                }
                edit_form.set(None);
            }
            CommandOutcome::CountsChanged(_) => edit_form.set(None),
            CommandOutcome::GoalSet(_) | CommandOutcome::Reset => {}
        }
    }

    pub fn reload(&self) {
        let mut record = self.record;
        record.restart();
    }
}
