use std::collections::BTreeMap;

use attendance_core::model::{
    Goal, Record, StudentInfo, StudentName, StudentRecord, SubjectCounter, SubjectName,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::repository::StorageError;

//
// ─── WRITE SIDE ────────────────────────────────────────────────────────────────
//

#[derive(Serialize)]
struct RecordDoc<'a> {
    students: BTreeMap<&'a StudentName, StudentDoc<'a>>,
    settings: SettingsDoc,
}

#[derive(Serialize)]
struct StudentDoc<'a> {
    info: &'a StudentInfo,
    subjects: &'a BTreeMap<SubjectName, SubjectCounter>,
}

#[derive(Serialize)]
struct SettingsDoc {
    goal: Goal,
}

/// Render a record as the current on-disk document, indented by four spaces.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if serialization fails.
pub fn encode(record: &Record) -> Result<String, StorageError> {
    let doc = RecordDoc {
        students: record
            .students()
            .iter()
            .map(|(name, student)| {
                (
                    name,
                    StudentDoc {
                        info: student.info(),
                        subjects: student.subjects(),
                    },
                )
            })
            .collect(),
        settings: SettingsDoc {
            goal: record.goal(),
        },
    };

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| StorageError::Serialization(e.to_string()))
}

//
// ─── READ SIDE ─────────────────────────────────────────────────────────────────
//

/// Which layout a stored document turned out to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceShape {
    /// Has a `students` mapping.
    Current,
    /// Pre multi-student layout: top-level `subjects`, no `students`.
    Legacy,
    /// Valid JSON object with neither `students` nor `subjects`.
    Unrecognized,
    /// Not JSON, or not a JSON object.
    Corrupt,
}

/// Result of decoding a stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub record: Record,
    pub shape: SourceShape,
    /// Number of values that were missing or malformed and got defaulted.
    pub repairs: usize,
}

/// Decode a stored document into a valid `Record`.
///
/// Never fails. Malformed entries are repaired one by one so that a broken
/// student or subject does not take its siblings down with it.
#[must_use]
pub fn decode(text: &str) -> Decoded {
    let Ok(Value::Object(root)) = serde_json::from_str::<Value>(text) else {
        return Decoded {
            record: Record::default(),
            shape: SourceShape::Corrupt,
            repairs: 0,
        };
    };

    let mut repairs = 0;
    let goal = read_goal(root.get("settings"), &mut repairs);

    let (students, shape) = match (root.get("students"), root.get("subjects")) {
        (Some(students), _) => (read_students(students, &mut repairs), SourceShape::Current),
        (None, Some(subjects)) => {
            let student = StudentRecord::from_persisted(
                StudentInfo::new(),
                read_subjects(Some(subjects), &mut repairs),
            );
            let students = BTreeMap::from([(StudentName::default_student(), student)]);
            (students, SourceShape::Legacy)
        }
        (None, None) => (BTreeMap::new(), SourceShape::Unrecognized),
    };

    Decoded {
        record: Record::from_persisted(students, goal),
        shape,
        repairs,
    }
}

fn read_goal(settings: Option<&Value>, repairs: &mut usize) -> Goal {
    let goal = settings
        .and_then(Value::as_object)
        .and_then(|settings| settings.get("goal"))
        .and_then(Value::as_f64)
        .and_then(|percent| Goal::new(percent).ok());
    goal.unwrap_or_else(|| {
        *repairs += 1;
        Goal::default()
    })
}

fn read_students(value: &Value, repairs: &mut usize) -> BTreeMap<StudentName, StudentRecord> {
    let Some(entries) = value.as_object() else {
        *repairs += 1;
        return BTreeMap::new();
    };

    entries
        .iter()
        .map(|(name, entry)| {
            (
                StudentName::from_persisted(name.clone()),
                read_student(entry, repairs),
            )
        })
        .collect()
}

fn read_student(value: &Value, repairs: &mut usize) -> StudentRecord {
    let Some(entry) = value.as_object() else {
        *repairs += 1;
        return StudentRecord::default();
    };
    let info = read_info(entry, repairs);
    let subjects = read_subjects(entry.get("subjects"), repairs);
    StudentRecord::from_persisted(info, subjects)
}

fn read_info(entry: &Map<String, Value>, repairs: &mut usize) -> StudentInfo {
    let Some(fields) = entry.get("info").and_then(Value::as_object) else {
        *repairs += 1;
        return StudentInfo::new();
    };

    let mut info = StudentInfo::new();
    for (key, value) in fields {
        let text = match value {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                *repairs += 1;
                continue;
            }
        };
        info.insert(key.clone(), text);
    }
    info
}

fn read_subjects(
    value: Option<&Value>,
    repairs: &mut usize,
) -> BTreeMap<SubjectName, SubjectCounter> {
    let Some(entries) = value.and_then(Value::as_object) else {
        *repairs += 1;
        return BTreeMap::new();
    };

    entries
        .iter()
        .map(|(name, counter)| {
            (
                SubjectName::from_persisted(name.clone()),
                read_counter(counter, repairs),
            )
        })
        .collect()
}

fn read_counter(value: &Value, repairs: &mut usize) -> SubjectCounter {
    let Some(fields) = value.as_object() else {
        *repairs += 1;
        return SubjectCounter::default();
    };
    let attended = read_count(fields.get("attended"), repairs);
    let total = read_count(fields.get("total"), repairs);
    if attended > total {
        *repairs += 1;
    }
    SubjectCounter::from_persisted(attended, total)
}

/// Whole numbers written as floats (`4.0`) are accepted; counts above
/// `u32::MAX` saturate rather than reset.
fn read_count(value: Option<&Value>, repairs: &mut usize) -> u32 {
    let whole = match value {
        Some(Value::Number(number)) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && *float >= 0.0)
                .map(|float| float as u64)
        }),
        _ => None,
    };
    match whole {
        Some(count) => u32::try_from(count).unwrap_or_else(|_| {
            *repairs += 1;
            u32::MAX
        }),
        None => {
            *repairs += 1;
            0
        }
    }
}
