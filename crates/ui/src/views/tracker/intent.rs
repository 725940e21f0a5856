use attendance_core::model::{StudentName, SubjectName};

#[derive(Clone, Debug, PartialEq)]
pub enum TrackerIntent {
    SelectStudent(StudentName),
    SelectSubject(SubjectName),
    AddStudent,
    RequestDeleteStudent,
    AddSubject,
    RequestDeleteSubject,
    ConfirmPending,
    CancelPending,
    Attend,
    Miss,
    QuickAttend(SubjectName),
    QuickMiss(SubjectName),
    OpenEdit,
    SaveEdit,
    CloseEdit,
}
