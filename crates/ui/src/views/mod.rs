mod settings;
mod state;
mod tracker;

pub use settings::SettingsView;
pub use state::{ViewState, view_state_from_resource};
pub use tracker::TrackerView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
