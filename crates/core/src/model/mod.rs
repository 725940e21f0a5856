mod counter;
mod goal;
mod names;
mod record;

pub use counter::{LedgerError, SubjectCounter};
pub use goal::Goal;
pub use names::{DEFAULT_STUDENT_NAME, StudentName, SubjectName};
pub use record::{Record, RecordError, StudentInfo, StudentRecord, student_info};
