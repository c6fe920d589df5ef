//! Record normalizer: raw import row → canonical [`Student`].
//!
//! Pure transform. Malformed or missing fields degrade to sentinel values;
//! a bad row never aborts the batch.

use tracing::{debug, info};

use super::columns;
use crate::models::{ClassId, Gender, RawRow, Student, StudentId};

/// Name used when every name column is blank.
pub const UNNAMED: &str = "이름없음";

const MALE_TOKENS: &[&str] = &["남", "남성", "남자", "m", "male", "boy", "man"];
const FEMALE_TOKENS: &[&str] = &["여", "여성", "여자", "f", "female", "girl", "woman"];
const MALE_LEAD: char = '남';
const FEMALE_LEAD: char = '여';

/// Normalizes a gender cell.
///
/// The value is trimmed, lowercased, and stripped of all whitespace, then
/// matched against the synonym sets. Values containing both polarity
/// markers are ambiguous and map to `Unknown`; values matching neither set
/// fall back to their leading character.
///
/// ```
/// use u_roster::exchange::normalize_gender;
/// use u_roster::models::Gender;
///
/// assert_eq!(normalize_gender(" Male "), Gender::Male);
/// assert_eq!(normalize_gender("여학생"), Gender::Female);
/// assert_eq!(normalize_gender("남/여"), Gender::Unknown);
/// assert_eq!(normalize_gender(""), Gender::Unknown);
/// ```
pub fn normalize_gender(raw: &str) -> Gender {
    let cleaned: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if MALE_TOKENS.contains(&cleaned.as_str()) {
        return Gender::Male;
    }
    if FEMALE_TOKENS.contains(&cleaned.as_str()) {
        return Gender::Female;
    }
    if cleaned.contains(MALE_LEAD) && cleaned.contains(FEMALE_LEAD) {
        return Gender::Unknown;
    }
    if cleaned.starts_with(MALE_LEAD) {
        Gender::Male
    } else if cleaned.starts_with(FEMALE_LEAD) {
        Gender::Female
    } else {
        Gender::Unknown
    }
}

/// Parses an assigned-class hint from the first run of ASCII digits.
///
/// `"3반"` → `Some(3)`, `"2-1"` → `Some(2)`, `"미정"` → `None`.
/// Values that overflow a class id are treated as absent.
pub fn parse_class_hint(raw: &str) -> Option<ClassId> {
    let digits: String = raw
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// A normalized row plus the class hint it carried, if any.
#[derive(Debug, Clone)]
pub struct NormalizedRow {
    pub student: Student,
    pub class_hint: Option<ClassId>,
}

/// Converts one raw row into a student.
///
/// `index` becomes the student's stable id.
pub fn normalize_row(index: usize, row: &RawRow) -> NormalizedRow {
    let name = row
        .first_non_empty(columns::NAME)
        .unwrap_or(UNNAMED)
        .to_string();
    let gender_text = row.first_non_empty(columns::GENDER).unwrap_or("").to_string();
    let field = |cols: &[&str]| row.first_non_empty(cols).unwrap_or("").to_string();

    let class_hint = row
        .first_non_empty(columns::ASSIGNED_CLASS)
        .and_then(parse_class_hint);
    let manual = row.first_non_empty(columns::MANUAL_MOVE).is_some();

    let mut student = Student::new(StudentId(index), name)
        .with_gender(normalize_gender(&gender_text))
        .with_group(field(columns::GROUP_ID))
        .with_note(field(columns::NOTE));
    student.gender_text = gender_text;
    student.prior_class = field(columns::PRIOR_CLASS);
    student.prior_grade = field(columns::PRIOR_GRADE);
    student.prior_number = field(columns::PRIOR_NUMBER);
    student.birth = field(columns::BIRTH);
    student.initial_class = class_hint;
    student.is_manually_moved = manual;
    student.original = row.clone();

    if student.name == UNNAMED || student.gender == Gender::Unknown {
        debug!(row = index, name = %student.name, gender = %student.gender_text, "row degraded to sentinel");
    }

    NormalizedRow {
        student,
        class_hint,
    }
}

/// Normalizes a batch of rows, assigning ids from row order.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<NormalizedRow> {
    let normalized: Vec<NormalizedRow> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| normalize_row(i, row))
        .collect();
    info!(
        rows = normalized.len(),
        hinted = normalized.iter().filter(|r| r.class_hint.is_some()).count(),
        "rows normalized"
    );
    normalized
}
