use std::sync::Arc;

use attendance_core::model::{Record, StudentName, SubjectName, student_info};
use dioxus::prelude::*;
use services::LedgerService;

use crate::actions::{LedgerCommand, error_message, outcome_in_memory, run_command};
use crate::vm::parse_count;

use super::intent::TrackerIntent;
use super::state::{EditForm, PendingConfirm, TrackerState};

const SELECT_SUBJECT_FIRST: &str = "Please select a subject first.";
const KEEP_ONE_STUDENT: &str = "At least one student must remain.";

pub fn use_tracker_dispatcher(
    state: TrackerState,
    ledger: &Arc<LedgerService>,
) -> Callback<TrackerIntent> {
    let ledger = Arc::clone(ledger);
    use_callback(move |intent: TrackerIntent| dispatch_intent(intent, state, &ledger))
}

fn dispatch_intent(intent: TrackerIntent, state: TrackerState, ledger: &Arc<LedgerService>) {
    let Some(record) = state.loaded_record() else {
        return;
    };
    let (owner, subject) = state.selection(&record);

    match intent {
        TrackerIntent::SelectStudent(name) => {
            state.clear_message();
            state.select_student(name);
        }
        TrackerIntent::SelectSubject(name) => {
            let mut selected_subject = state.selected_subject;
            selected_subject.set(Some(name));
        }
        TrackerIntent::AddStudent => {
            let form = (state.student_form)();
            let info = student_info(Some(&form.class), Some(&form.roll));
            submit(
                state,
                ledger,
                LedgerCommand::AddStudent {
                    name: form.name,
                    info,
                },
            );
        }
        TrackerIntent::RequestDeleteStudent => {
            if record.students().len() <= 1 {
                state.set_message(KEEP_ONE_STUDENT);
                return;
            }
            let mut pending = state.pending;
            pending.set(Some(PendingConfirm::DeleteStudent(owner)));
        }
        TrackerIntent::AddSubject => {
            let name = (state.new_subject)();
            submit(state, ledger, LedgerCommand::AddSubject { owner, name });
        }
        TrackerIntent::RequestDeleteSubject => {
            let Some(subject) = require_subject(state, subject) else {
                return;
            };
            let mut pending = state.pending;
            pending.set(Some(PendingConfirm::DeleteSubject { owner, subject }));
        }
        TrackerIntent::ConfirmPending => {
            let mut pending = state.pending;
            let Some(confirmed) = pending() else {
                return;
            };
            pending.set(None);
            let command = match confirmed {
                PendingConfirm::DeleteStudent(name) => LedgerCommand::DeleteStudent(name),
                PendingConfirm::DeleteSubject { owner, subject } => {
                    LedgerCommand::DeleteSubject { owner, subject }
                }
            };
            submit(state, ledger, command);
        }
        TrackerIntent::CancelPending => {
            let mut pending = state.pending;
            pending.set(None);
        }
        TrackerIntent::Attend => {
            if let Some(subject) = require_subject(state, subject) {
                submit(state, ledger, LedgerCommand::Attend { owner, subject });
            }
        }
        TrackerIntent::Miss => {
            if let Some(subject) = require_subject(state, subject) {
                submit(state, ledger, LedgerCommand::Miss { owner, subject });
            }
        }
        TrackerIntent::QuickAttend(subject) => {
            select_subject(state, &subject);
            submit(state, ledger, LedgerCommand::Attend { owner, subject });
        }
        TrackerIntent::QuickMiss(subject) => {
            select_subject(state, &subject);
            submit(state, ledger, LedgerCommand::Miss { owner, subject });
        }
        TrackerIntent::OpenEdit => {
            let Some(subject) = require_subject(state, subject) else {
                return;
            };
            open_edit(state, &record, owner, subject);
        }
        TrackerIntent::SaveEdit => {
            let Some(form) = (state.edit_form)() else {
                return;
            };
            let counts = parse_count(&form.attended).and_then(|attended| {
                parse_count(&form.total).map(|total| (attended, total))
            });
            match counts {
                Ok((attended, total)) => submit(
                    state,
                    ledger,
                    LedgerCommand::Edit {
                        owner: form.owner,
                        subject: form.subject,
                        attended,
                        total,
                    },
                ),
                Err(_) => state.set_message("Please enter valid integers."),
            }
        }
        TrackerIntent::CloseEdit => {
            let mut edit_form = state.edit_form;
            edit_form.set(None);
        }
    }
}

fn require_subject(state: TrackerState, subject: Option<SubjectName>) -> Option<SubjectName> {
    if subject.is_none() {
        state.set_message(SELECT_SUBJECT_FIRST);
    }
    subject
}

fn select_subject(state: TrackerState, subject: &SubjectName) {
    let mut selected_subject = state.selected_subject;
    selected_subject.set(Some(subject.clone()));
}

fn open_edit(state: TrackerState, record: &Record, owner: StudentName, subject: SubjectName) {
    let counter = record
        .student(&owner)
        .and_then(|student| student.subject(&subject))
        .copied()
        .unwrap_or_default();
    let mut edit_form = state.edit_form;
    edit_form.set(Some(EditForm::prefilled(owner, subject, counter)));
}

fn submit(state: TrackerState, ledger: &Arc<LedgerService>, command: LedgerCommand) {
    let ledger = Arc::clone(ledger);
    spawn(async move {
        match run_command(&ledger, command.clone()).await {
            Ok(outcome) => {
                state.clear_message();
                state.apply_outcome(&outcome);
            }
            Err(err) if err.is_rejection() => state.set_message(error_message(&err)),
            Err(err) => {
                // The change is live in memory even though the save failed.
                if let Some(outcome) = outcome_in_memory(&ledger, &command).await {
                    state.apply_outcome(&outcome);
                }
                state.set_message(error_message(&err));
            }
        }
        state.reload();
    });
}
