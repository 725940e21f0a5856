use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewState, view_state_from_resource};
use crate::vm::{goal_label, map_subject_cards, summary_line};

use super::components::{
    ActionRow, AddSubjectRow, ConfirmModal, EditPanel, StudentBar, SubjectCard, SummaryFooter,
};
use super::dispatch::use_tracker_dispatcher;
use super::intent::TrackerIntent;
use super::state::{EditForm, StudentForm, use_tracker_state};

#[component]
pub fn TrackerView() -> Element {
    let ctx = use_context::<AppContext>();
    let ledger = ctx.ledger();
    let state = use_tracker_state(&ledger);
    let dispatch = use_tracker_dispatcher(state, &ledger);

    let mut student_form = state.student_form;
    let mut new_subject = state.new_subject;
    let mut edit_form = state.edit_form;
    let on_form_change = use_callback(move |form: StudentForm| student_form.set(form));
    let on_subject_change = use_callback(move |value: String| new_subject.set(value));
    let on_edit_change = use_callback(move |form: EditForm| edit_form.set(Some(form)));

    let record = match view_state_from_resource(&state.record) {
        ViewState::Ready(record) => record,
        ViewState::Idle | ViewState::Loading => {
            return rsx! {
                div { class: "page",
                    p { "Loading..." }
                }
            };
        }
    };

    let (owner, selected_subject) = state.selection(&record);
    let Some(student) = record.student(&owner) else {
        return rsx! {
            div { class: "page",
                p { class: "error", "No students found." }
            }
        };
    };
    let cards = map_subject_cards(student, record.goal());
    let footer = summary_line(&owner, student, record.goal());
    let goal = goal_label(record.goal());
    let students = record.student_names();

    let message = (state.message)();
    let pending = (state.pending)();
    let editing = (state.edit_form)();

    rsx! {
        div { class: "page tracker",
            header { class: "tracker-header",
                h2 { "Attendance Tracker" }
                span { class: "goal-label", "{goal}" }
            }

            StudentBar {
                students,
                current: owner.clone(),
                form: student_form(),
                on_select: move |name| dispatch.call(TrackerIntent::SelectStudent(name)),
                on_form_change,
                on_add: move |()| dispatch.call(TrackerIntent::AddStudent),
                on_delete: move |()| dispatch.call(TrackerIntent::RequestDeleteStudent),
            }

            AddSubjectRow {
                value: new_subject(),
                on_change: on_subject_change,
                on_add: move |()| dispatch.call(TrackerIntent::AddSubject),
            }

            if let Some(text) = message {
                p { class: "error inline-message", "{text}" }
            }

            if cards.is_empty() {
                p { class: "empty", "No subjects yet. Add one above." }
            } else {
                div { class: "subject-grid",
                    for card in cards {
                        SubjectCard {
                            key: "{card.name}",
                            selected: selected_subject.as_ref() == Some(&card.name),
                            card: card.clone(),
                            on_select: move |name| dispatch.call(TrackerIntent::SelectSubject(name)),
                            on_attend: move |name| dispatch.call(TrackerIntent::QuickAttend(name)),
                            on_miss: move |name| dispatch.call(TrackerIntent::QuickMiss(name)),
                        }
                    }
                }
            }

            ActionRow {
                on_attend: move |()| dispatch.call(TrackerIntent::Attend),
                on_miss: move |()| dispatch.call(TrackerIntent::Miss),
                on_edit: move |()| dispatch.call(TrackerIntent::OpenEdit),
                on_delete: move |()| dispatch.call(TrackerIntent::RequestDeleteSubject),
            }

            SummaryFooter { line: footer }

            if let Some(form) = editing {
                EditPanel {
                    form,
                    on_change: on_edit_change,
                    on_save: move |()| dispatch.call(TrackerIntent::SaveEdit),
                    on_close: move |()| dispatch.call(TrackerIntent::CloseEdit),
                }
            }

            if let Some(pending) = pending {
                ConfirmModal {
                    pending,
                    on_cancel: move |()| dispatch.call(TrackerIntent::CancelPending),
                    on_confirm: move |()| dispatch.call(TrackerIntent::ConfirmPending),
                }
            }
        }
    }
}
