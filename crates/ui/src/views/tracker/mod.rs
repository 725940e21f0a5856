mod components;
mod dispatch;
mod intent;
#[cfg(test)]
mod intent_smoke;
pub(crate) mod state;
mod view;

pub use view::TrackerView;
