use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{SettingsView, TrackerView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", TrackerView)] Tracker {},
        #[route("/settings", SettingsView)] Settings {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Attendance" }
            ul {
                li { Link { to: Route::Tracker {}, "Tracker" } }
                li { Link { to: Route::Settings {}, "Settings" } }
            }
        }
    }
}
