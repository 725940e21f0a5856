use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use attendance_core::model::{Record, StudentInfo, StudentName, SubjectCounter, SubjectName};
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::LedgerService;
use storage::repository::{InMemoryRepository, RecordRepository, StorageError};

use super::dispatch::use_tracker_dispatcher;
use super::intent::TrackerIntent;
use super::state::{PendingConfirm, TrackerState, use_tracker_state};

#[derive(Clone, Default)]
struct HarnessHandles {
    dispatch: Rc<RefCell<Option<Callback<TrackerIntent>>>>,
    state: Rc<RefCell<Option<TrackerState>>>,
}

impl HarnessHandles {
    fn dispatch(&self) -> Callback<TrackerIntent> {
        (*self.dispatch.borrow()).expect("dispatch registered")
    }

    fn state(&self) -> TrackerState {
        (*self.state.borrow()).expect("state registered")
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    ledger: Arc<LedgerService>,
    handles: HarnessHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HarnessProps {}

#[component]
fn TrackerIntentHarness(props: HarnessProps) -> Element {
    let state = use_tracker_state(&props.ledger);
    let dispatch = use_tracker_dispatcher(state, &props.ledger);
    let mut registered = use_signal(|| false);
    if !registered() {
        registered.set(true);
        *props.handles.dispatch.borrow_mut() = Some(dispatch);
        *props.handles.state.borrow_mut() = Some(state);
    }
    rsx! { div {} }
}

#[component]
fn TrackerRouterHarness(props: HarnessProps) -> Element {
    use_context_provider(|| props);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let props = use_context::<HarnessProps>();
    rsx! {
        TrackerIntentHarness {
            ledger: Arc::clone(&props.ledger),
            handles: props.handles.clone(),
        }
    }
}

struct Harness {
    dom: VirtualDom,
    ledger: Arc<LedgerService>,
    dispatch: Callback<TrackerIntent>,
    state: TrackerState,
}

impl Harness {
    async fn start(repo: Arc<dyn RecordRepository>) -> Self {
        let ledger = Arc::new(LedgerService::open(repo).await);
        let handles = HarnessHandles::default();
        let mut dom = VirtualDom::new_with_props(
            TrackerRouterHarness,
            HarnessProps {
                ledger: Arc::clone(&ledger),
                handles: handles.clone(),
            },
        );
        dom.rebuild_in_place();
        drive_dom(&mut dom);

        let mut harness = Self {
            dom,
            ledger,
            dispatch: handles.dispatch(),
            state: handles.state(),
        };
        harness.settle().await;
        harness
    }

    async fn with_record(record: Record) -> Self {
        Self::start(Arc::new(InMemoryRepository::with_record(record))).await
    }

    /// Let spawned commands finish and the record resource reload.
    async fn settle(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            drive_dom(&mut self.dom);
        }
    }

    async fn send(&mut self, intent: TrackerIntent) {
        let dispatch = self.dispatch;
        self.dom.in_runtime(|| dispatch.call(intent));
        self.settle().await;
    }

    fn read<T>(&self, f: impl FnOnce(TrackerState) -> T) -> T {
        let state = self.state;
        self.dom.in_runtime(|| f(state))
    }

    fn message(&self) -> Option<String> {
        self.read(|state| (state.message)())
    }

    fn selected_subject(&self) -> Option<SubjectName> {
        self.read(|state| (state.selected_subject)())
    }
}

fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

fn subject(name: &str) -> SubjectName {
    SubjectName::new(name).unwrap()
}

fn student(name: &str) -> StudentName {
    StudentName::new(name).unwrap()
}

fn record_with_subjects(names: &[&str]) -> Record {
    let mut record = Record::default();
    let owner = StudentName::default_student();
    let entry = record.student_mut(&owner).unwrap();
    for name in names {
        entry.add_subject(subject(name)).unwrap();
    }
    record
}

fn two_student_record() -> Record {
    let mut record = record_with_subjects(&[]);
    record.add_student(student("Asha"), StudentInfo::new()).unwrap();
    record
        .student_mut(&student("Asha"))
        .unwrap()
        .add_subject(subject("Math"))
        .unwrap();
    record
}

struct UnwritableRepo;

#[async_trait::async_trait]
impl RecordRepository for UnwritableRepo {
    async fn load(&self) -> Record {
        Record::default()
    }

    async fn save(&self, _record: &Record) -> Result<(), StorageError> {
        Err(StorageError::Internal("disk full".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn selecting_a_student_clears_subject_and_edit_form() {
    let mut harness = Harness::with_record(two_student_record()).await;

    harness.send(TrackerIntent::SelectSubject(subject("Math"))).await;
    harness.send(TrackerIntent::OpenEdit).await;
    assert!(harness.read(|state| (state.edit_form)()).is_some());

    harness
        .send(TrackerIntent::SelectStudent(StudentName::default_student()))
        .await;
    assert_eq!(
        harness.read(|state| (state.selected_student)()),
        Some(StudentName::default_student())
    );
    assert_eq!(harness.selected_subject(), None);
    assert!(harness.read(|state| (state.edit_form)()).is_none());
}

#[tokio::test(flavor = "current_thread")]
async fn subject_actions_without_a_selection_ask_for_one() {
    let record = record_with_subjects(&["Physics"]);
    let mut harness = Harness::with_record(record.clone()).await;

    for intent in [
        TrackerIntent::Attend,
        TrackerIntent::Miss,
        TrackerIntent::OpenEdit,
        TrackerIntent::RequestDeleteSubject,
    ] {
        harness.read(|state| state.clear_message());
        harness.send(intent).await;
        assert_eq!(
            harness.message().as_deref(),
            Some("Please select a subject first.")
        );
    }

    assert!(harness.read(|state| (state.pending)()).is_none());
    assert!(harness.read(|state| (state.edit_form)()).is_none());
    assert_eq!(harness.ledger.snapshot().await, record);
}

#[tokio::test(flavor = "current_thread")]
async fn non_numeric_edit_is_refused() {
    let mut harness = Harness::with_record(record_with_subjects(&["Physics"])).await;

    harness.send(TrackerIntent::SelectSubject(subject("Physics"))).await;
    harness.send(TrackerIntent::OpenEdit).await;
    harness.read(|state| {
        let mut edit_form = state.edit_form;
        edit_form.with_mut(|form| {
            if let Some(form) = form {
                form.attended = "three".to_string();
                form.total = "4".to_string();
            }
        });
    });
    harness.send(TrackerIntent::SaveEdit).await;

    assert_eq!(
        harness.message().as_deref(),
        Some("Please enter valid integers.")
    );
    assert!(harness.read(|state| (state.edit_form)()).is_some());
    let snapshot = harness.ledger.snapshot().await;
    let counter = snapshot
        .student(&StudentName::default_student())
        .and_then(|entry| entry.subject(&subject("Physics")))
        .copied();
    assert_eq!(counter, Some(SubjectCounter::default()));
}

#[tokio::test(flavor = "current_thread")]
async fn quick_marks_select_the_card_they_act_on() {
    let mut harness =
        Harness::with_record(record_with_subjects(&["Chemistry", "Physics"])).await;
    let owner = StudentName::default_student();

    harness.send(TrackerIntent::QuickAttend(subject("Physics"))).await;
    assert_eq!(harness.selected_subject(), Some(subject("Physics")));

    harness.send(TrackerIntent::QuickMiss(subject("Chemistry"))).await;
    assert_eq!(harness.selected_subject(), Some(subject("Chemistry")));

    let snapshot = harness.ledger.snapshot().await;
    let entry = snapshot.student(&owner).unwrap();
    assert_eq!(
        entry.subject(&subject("Physics")).copied(),
        Some(SubjectCounter::new(1, 1).unwrap())
    );
    assert_eq!(
        entry.subject(&subject("Chemistry")).copied(),
        Some(SubjectCounter::new(0, 1).unwrap())
    );
}

#[tokio::test(flavor = "current_thread")]
async fn confirmed_student_delete_selects_the_next_student() {
    let mut harness = Harness::with_record(two_student_record()).await;

    harness.send(TrackerIntent::SelectStudent(student("Asha"))).await;
    harness.send(TrackerIntent::RequestDeleteStudent).await;
    assert_eq!(
        harness.read(|state| (state.pending)()),
        Some(PendingConfirm::DeleteStudent(student("Asha")))
    );

    harness.send(TrackerIntent::ConfirmPending).await;
    assert!(harness.read(|state| (state.pending)()).is_none());
    assert_eq!(
        harness.read(|state| (state.selected_student)()),
        Some(StudentName::default_student())
    );
    assert_eq!(
        harness.ledger.students().await,
        vec![StudentName::default_student()]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn sole_student_delete_warns_without_prompting() {
    let record = record_with_subjects(&["Physics"]);
    let mut harness = Harness::with_record(record.clone()).await;

    harness.send(TrackerIntent::RequestDeleteStudent).await;

    assert_eq!(
        harness.message().as_deref(),
        Some("At least one student must remain.")
    );
    assert!(harness.read(|state| (state.pending)()).is_none());
    assert_eq!(harness.ledger.snapshot().await, record);
}

#[tokio::test(flavor = "current_thread")]
async fn unsaved_subject_is_still_selected() {
    let mut harness = Harness::start(Arc::new(UnwritableRepo)).await;

    harness.read(|state| {
        let mut new_subject = state.new_subject;
        new_subject.set("Biology".to_string());
    });
    harness.send(TrackerIntent::AddSubject).await;

    assert_eq!(harness.selected_subject(), Some(subject("Biology")));
    assert!(harness.read(|state| (state.new_subject)()).is_empty());
    let message = harness.message().unwrap_or_default();
    assert!(
        message.starts_with("Could not save data:"),
        "unexpected message {message}"
    );
}
