use attendance_core::model::{Record, StudentInfo, StudentName, SubjectName, student_info};

use super::test_harness::{ViewKind, setup_view_harness};

fn record_with_subjects() -> Record {
    let mut record = Record::default();
    let owner = StudentName::default_student();
    let student = record.student_mut(&owner).unwrap();
    for (name, attended, total) in [("Physics", 30, 40), ("Chemistry", 20, 40)] {
        let subject = SubjectName::new(name).unwrap();
        student.add_subject(subject.clone()).unwrap();
        student
            .subject_mut(&subject)
            .unwrap()
            .apply_manual_edit(attended, total)
            .unwrap();
    }
    record
}

#[tokio::test(flavor = "current_thread")]
async fn tracker_view_smoke_renders_cards_and_summary() {
    let mut harness = setup_view_harness(ViewKind::Tracker, record_with_subjects()).await;
    harness.settle().await;
    let html = harness.render();

    for expected in [
        "Physics",
        "Chemistry",
        "Safe. You can miss 0 class(es).",
        "Danger! Attend next 40 class(es).",
        "75.00%",
        "Goal: 75%",
        "Overall: 50/80 (62.50%)",
        "At-risk: 1",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn tracker_view_smoke_renders_empty_placeholder() {
    let mut harness = setup_view_harness(ViewKind::Tracker, Record::default()).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("No subjects yet"), "missing placeholder in {html}");
    assert!(html.contains("Default Student"), "missing student in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn tracker_view_smoke_shows_first_student_with_info() {
    let mut record = Record::default();
    let asha = StudentName::new("Asha").unwrap();
    record
        .add_student(asha.clone(), student_info(Some("10-B"), Some("14")))
        .unwrap();
    record
        .add_student(StudentName::new("Zed").unwrap(), StudentInfo::new())
        .unwrap();

    let mut harness = setup_view_harness(ViewKind::Tracker, record).await;
    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("Student: Asha Class: 10-B  Roll: 14"),
        "missing summary for first student in {html}"
    );
    assert!(html.contains("Zed"), "missing student option in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn tracker_view_renders_counts_after_marking() {
    let harness = setup_view_harness(ViewKind::Tracker, record_with_subjects()).await;
    let owner = StudentName::default_student();
    let physics = SubjectName::new("Physics").unwrap();
    for _ in 0..4 {
        harness.ledger.mark_attended(&owner, &physics).await.unwrap();
    }

    let snapshot = harness.ledger.snapshot().await;
    let mut reopened = setup_view_harness(ViewKind::Tracker, snapshot).await;
    reopened.settle().await;
    let html = reopened.render();
    assert!(html.contains("34 / 44"), "missing updated counts in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn settings_view_smoke_renders_goal_and_reset() {
    let mut record = Record::default();
    record.set_goal(attendance_core::model::Goal::new(80.0).unwrap());

    let mut harness = setup_view_harness(ViewKind::Settings, record).await;
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Goal: 80%"), "missing goal in {html}");
    assert!(html.contains("Reset All"), "missing reset button in {html}");
    assert!(html.contains("(in memory)"), "missing data path in {html}");
}
