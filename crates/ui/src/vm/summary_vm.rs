use attendance_core::model::{Goal, Record, StudentName, StudentRecord, SubjectName};

use super::subject_vm::format_percent;

/// Footer line describing a student's overall attendance.
#[must_use]
pub fn summary_line(name: &StudentName, student: &StudentRecord, goal: Goal) -> String {
    let summary = student.summary(goal);
    let mut info = String::new();
    if let Some(class) = student.info().get("class").filter(|v| !v.is_empty()) {
        info.push_str(&format!(" Class: {class}"));
    }
    if let Some(roll) = student.info().get("roll").filter(|v| !v.is_empty()) {
        info.push_str(&format!("  Roll: {roll}"));
    }
    format!(
        "Student: {name}{info}    Subjects: {}    Overall: {}/{} ({})    At-risk: {}",
        summary.subjects,
        summary.attended,
        summary.total,
        format_percent(summary.percentage),
        summary.at_risk,
    )
}

#[must_use]
pub fn goal_label(goal: Goal) -> String {
    format!("Goal: {:.0}%", goal.percent())
}

/// The student to show: the selection if it still exists, else the first.
#[must_use]
pub fn resolve_owner(record: &Record, selected: Option<StudentName>) -> StudentName {
    selected
        .filter(|name| record.student(name).is_some())
        .or_else(|| record.first_student().cloned())
        .unwrap_or_else(StudentName::default_student)
}

/// The selected subject, dropped when the owner no longer has it.
#[must_use]
pub fn resolve_subject(
    record: &Record,
    owner: &StudentName,
    selected: Option<SubjectName>,
) -> Option<SubjectName> {
    let student = record.student(owner)?;
    selected.filter(|name| student.subject(name).is_some())
}
