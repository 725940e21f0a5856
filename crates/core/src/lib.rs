#![forbid(unsafe_code)]

pub mod model;
pub mod projection;

pub use projection::{Projection, Summary, percentage, project, summarize};
