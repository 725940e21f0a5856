mod input;
mod subject_vm;
mod summary_vm;

pub use input::{InputError, parse_count, parse_goal};
pub use subject_vm::{
    StatusTone, SubjectCardVm, format_percent, map_subject_cards, status_label,
};
pub use summary_vm::{goal_label, resolve_owner, resolve_subject, summary_line};
