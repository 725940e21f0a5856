use attendance_core::model::{StudentName, SubjectName};
use dioxus::prelude::*;

use crate::vm::SubjectCardVm;

use super::state::{EditForm, PendingConfirm, StudentForm};

// ─── Student bar ─────────────────────────────────────────────────────────────

#[component]
pub fn StudentBar(
    students: Vec<StudentName>,
    current: StudentName,
    form: StudentForm,
    on_select: Callback<StudentName>,
    on_form_change: Callback<StudentForm>,
    on_add: Callback<()>,
    on_delete: Callback<()>,
) -> Element {
    let name_form = form.clone();
    let class_form = form.clone();
    let roll_form = form.clone();
    rsx! {
        section { class: "student-bar",
            label { class: "student-select",
                "Student "
                select {
                    value: "{current}",
                    onchange: move |evt| on_select.call(StudentName::from_persisted(evt.value())),
                    for student in students {
                        option {
                            key: "{student}",
                            value: "{student}",
                            selected: student == current,
                            "{student}"
                        }
                    }
                }
            }
            button {
                class: "btn btn-danger",
                r#type: "button",
                onclick: move |_| on_delete.call(()),
                "Delete Student"
            }
            div { class: "student-form",
                input {
                    placeholder: "New student name",
                    value: "{form.name}",
                    oninput: move |evt| {
                        on_form_change.call(StudentForm { name: evt.value(), ..name_form.clone() })
                    },
                }
                input {
                    placeholder: "Class (optional)",
                    value: "{form.class}",
                    oninput: move |evt| {
                        on_form_change.call(StudentForm { class: evt.value(), ..class_form.clone() })
                    },
                }
                input {
                    placeholder: "Roll (optional)",
                    value: "{form.roll}",
                    oninput: move |evt| {
                        on_form_change.call(StudentForm { roll: evt.value(), ..roll_form.clone() })
                    },
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_add.call(()),
                    "Add Student"
                }
            }
        }
    }
}

// ─── Subjects ────────────────────────────────────────────────────────────────

#[component]
pub fn SubjectCard(
    card: SubjectCardVm,
    selected: bool,
    on_select: Callback<SubjectName>,
    on_attend: Callback<SubjectName>,
    on_miss: Callback<SubjectName>,
) -> Element {
    let class = if selected {
        "subject-card selected"
    } else {
        "subject-card"
    };
    let tone = card.tone.class_name();
    let select_name = card.name.clone();
    let attend_name = card.name.clone();
    let miss_name = card.name.clone();
    rsx! {
        div {
            class: "{class}",
            onclick: move |_| on_select.call(select_name.clone()),
            div { class: "subject-card-head",
                h3 { class: "subject-name", "{card.name}" }
                span { class: "subject-percent", "{card.percent_label}" }
            }
            p { class: "subject-stats", "Attended {card.stats_label}" }
            p { class: "subject-status {tone}", "{card.status}" }
            div { class: "subject-quick",
                button {
                    class: "btn btn-quick btn-attend",
                    r#type: "button",
                    title: "Attended",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        on_attend.call(attend_name.clone());
                    },
                    "✓"
                }
                button {
                    class: "btn btn-quick btn-miss",
                    r#type: "button",
                    title: "Missed",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        on_miss.call(miss_name.clone());
                    },
                    "✗"
                }
            }
        }
    }
}

#[component]
pub fn AddSubjectRow(value: String, on_change: Callback<String>, on_add: Callback<()>) -> Element {
    rsx! {
        div { class: "add-subject",
            input {
                placeholder: "New subject",
                value: "{value}",
                oninput: move |evt| on_change.call(evt.value()),
                onkeydown: move |evt: KeyboardEvent| {
                    if evt.key() == Key::Enter {
                        on_add.call(());
                    }
                },
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_add.call(()),
                "Add Subject"
            }
        }
    }
}

#[component]
pub fn ActionRow(
    on_attend: Callback<()>,
    on_miss: Callback<()>,
    on_edit: Callback<()>,
    on_delete: Callback<()>,
) -> Element {
    rsx! {
        div { class: "action-row",
            button {
                class: "btn btn-attend",
                r#type: "button",
                onclick: move |_| on_attend.call(()),
                "Attended"
            }
            button {
                class: "btn btn-miss",
                r#type: "button",
                onclick: move |_| on_miss.call(()),
                "Missed"
            }
            button {
                class: "btn",
                r#type: "button",
                onclick: move |_| on_edit.call(()),
                "Edit Counts"
            }
            button {
                class: "btn btn-danger",
                r#type: "button",
                onclick: move |_| on_delete.call(()),
                "Delete Subject"
            }
        }
    }
}

// ─── Overlays ────────────────────────────────────────────────────────────────

#[component]
pub fn EditPanel(
    form: EditForm,
    on_change: Callback<EditForm>,
    on_save: Callback<()>,
    on_close: Callback<()>,
) -> Element {
    let attended_form = form.clone();
    let total_form = form.clone();
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal edit-panel",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "Edit {form.subject}" }
                label { class: "field",
                    "Attended"
                    input {
                        r#type: "number",
                        value: "{form.attended}",
                        oninput: move |evt| {
                            on_change.call(EditForm { attended: evt.value(), ..attended_form.clone() })
                        },
                    }
                }
                label { class: "field",
                    "Total"
                    input {
                        r#type: "number",
                        value: "{form.total}",
                        oninput: move |evt| {
                            on_change.call(EditForm { total: evt.value(), ..total_form.clone() })
                        },
                    }
                }
                div { class: "modal-actions",
                    button {
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_save.call(()),
                        "Save"
                    }
                }
            }
        }
    }
}

#[component]
pub fn ConfirmModal(
    pending: PendingConfirm,
    on_cancel: Callback<()>,
    on_confirm: Callback<()>,
) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_cancel.call(()),
            div {
                class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "{pending.title()}" }
                p { class: "modal-body", "{pending.body()}" }
                div { class: "modal-actions",
                    button {
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        onclick: move |_| on_confirm.call(()),
                        "Delete"
                    }
                }
            }
        }
    }
}

#[component]
pub fn SummaryFooter(line: String) -> Element {
    rsx! {
        footer { class: "summary-footer", "{line}" }
    }
}
