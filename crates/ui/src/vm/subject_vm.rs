use attendance_core::model::{Goal, StudentRecord, SubjectName};
use attendance_core::{Projection, percentage, project};

/// Colour hint for a subject's status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Safe,
    Danger,
}

impl StatusTone {
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Neutral => "status-neutral",
            Self::Safe => "status-safe",
            Self::Danger => "status-danger",
        }
    }
}

/// UI-ready representation of one subject card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectCardVm {
    pub name: SubjectName,
    pub status: String,
    pub tone: StatusTone,
    pub stats_label: String,
    pub percent_label: String,
}

#[must_use]
pub fn status_label(projection: Projection) -> (String, StatusTone) {
    match projection {
        Projection::NoData => ("No classes held yet.".to_string(), StatusTone::Neutral),
        Projection::Safe { can_miss } => (
            format!("Safe. You can miss {can_miss} class(es)."),
            StatusTone::Safe,
        ),
        Projection::Danger { must_attend_next } => (
            format!("Danger! Attend next {must_attend_next} class(es)."),
            StatusTone::Danger,
        ),
        Projection::Unreachable => (
            "Danger! Attend every remaining class.".to_string(),
            StatusTone::Danger,
        ),
    }
}

#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Cards for every subject of a student, sorted case-insensitively.
#[must_use]
pub fn map_subject_cards(student: &StudentRecord, goal: Goal) -> Vec<SubjectCardVm> {
    student
        .sorted_subjects()
        .into_iter()
        .map(|(name, counter)| {
            let (status, tone) = status_label(project(counter, goal));
            SubjectCardVm {
                name: name.clone(),
                status,
                tone,
                stats_label: format!("{} / {}", counter.attended(), counter.total()),
                percent_label: format_percent(percentage(counter)),
            }
        })
        .collect()
}
