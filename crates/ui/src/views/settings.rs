use std::sync::Arc;

use dioxus::prelude::*;

use crate::actions::{CommandOutcome, LedgerCommand, error_message, run_command};
use crate::context::AppContext;
use crate::views::{ViewState, view_state_from_resource};
use crate::vm::{goal_label, parse_goal};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SaveState {
    Idle,
    Saving,
    Saved,
}

#[component]
pub fn SettingsView() -> Element {
    let ctx = use_context::<AppContext>();
    let ledger = ctx.ledger();
    let ledger_for_resource = Arc::clone(&ledger);
    let data_path = ctx
        .data_path()
        .map_or_else(|| "(in memory)".to_string(), |path| path.display().to_string());

    let mut goal_input = use_signal(String::new);
    let mut message = use_signal(|| None::<String>);
    let mut save_state = use_signal(|| SaveState::Idle);
    let mut show_reset_modal = use_signal(|| false);

    let mut resource = use_resource(move || {
        let ledger = Arc::clone(&ledger_for_resource);
        async move { ledger.snapshot().await.goal() }
    });
    let state = view_state_from_resource(&resource);

    let submit = {
        let ledger = Arc::clone(&ledger);
        use_callback(move |command: LedgerCommand| {
            let ledger = Arc::clone(&ledger);
            spawn(async move {
                save_state.set(SaveState::Saving);
                match run_command(&ledger, command).await {
                    Ok(outcome) => {
                        let text = match outcome {
                            CommandOutcome::GoalSet(goal) => {
                                goal_input.set(String::new());
                                format!("{} saved.", goal_label(goal))
                            }
                            _ => "All data reset.".to_string(),
                        };
                        message.set(Some(text));
                        save_state.set(SaveState::Saved);
                    }
                    Err(err) => {
                        message.set(Some(error_message(&err)));
                        save_state.set(SaveState::Idle);
                    }
                }
                resource.restart();
            });
        })
    };

    let on_set_goal = use_callback(move |()| match parse_goal(&goal_input.read()) {
        Ok(percent) => submit.call(LedgerCommand::SetGoal(percent)),
        Err(_) => message.set(Some("Goal must be a number between 1 and 100.".to_string())),
    });

    let current_goal = match state {
        ViewState::Ready(goal) => goal_label(goal),
        ViewState::Idle | ViewState::Loading => "Loading...".to_string(),
    };
    let busy = save_state() == SaveState::Saving;

    rsx! {
        div { class: "page settings",
            h2 { "Settings" }

            section { class: "settings-section",
                h3 { "Attendance goal" }
                p { class: "goal-label", "{current_goal}" }
                div { class: "goal-form",
                    input {
                        r#type: "number",
                        min: "1",
                        max: "100",
                        placeholder: "Goal % (1-100)",
                        value: "{goal_input}",
                        oninput: move |evt| goal_input.set(evt.value()),
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: busy,
                        onclick: move |_| on_set_goal.call(()),
                        "Set Goal"
                    }
                }
            }

            section { class: "settings-section",
                h3 { "Data" }
                p { class: "data-path", "Data file: {data_path}" }
                button {
                    class: "btn btn-danger",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| show_reset_modal.set(true),
                    "Reset All"
                }
            }

            if let Some(text) = message() {
                p { class: "inline-message", "{text}" }
            }

            if show_reset_modal() {
                div {
                    class: "modal-overlay",
                    onclick: move |_| show_reset_modal.set(false),
                    div {
                        class: "modal",
                        onclick: move |evt| evt.stop_propagation(),
                        h3 { class: "modal-title", "Reset all data?" }
                        p { class: "modal-body",
                            "This removes every student and subject and restores the default goal."
                        }
                        div { class: "modal-actions",
                            button {
                                class: "btn",
                                r#type: "button",
                                onclick: move |_| show_reset_modal.set(false),
                                "Cancel"
                            }
                            button {
                                class: "btn btn-danger",
                                r#type: "button",
                                onclick: move |_| {
                                    show_reset_modal.set(false);
                                    submit.call(LedgerCommand::ResetAll);
                                },
                                "Reset"
                            }
                        }
                    }
                }
            }
        }
    }
}
