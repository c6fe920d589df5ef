//! Header synonyms accepted on import and headers written on export.
//!
//! Import lists are tried in order; the first non-blank value wins.

pub const NAME: &[&str] = &["성명", "이름", "name", "Name"];
pub const GENDER: &[&str] = &["성별", "gender", "Gender"];
pub const PRIOR_CLASS: &[&str] = &["반"];
pub const PRIOR_GRADE: &[&str] = &["학년"];
pub const PRIOR_NUMBER: &[&str] = &["번호"];
pub const NOTE: &[&str] = &["비고"];
pub const BIRTH: &[&str] = &["생년월일"];
pub const GROUP_ID: &[&str] = &["그룹ID", "그룹id", "GroupID"];
pub const ASSIGNED_CLASS: &[&str] = &["배정반", "배정 반", "배정", "신반"];
pub const MANUAL_MOVE: &[&str] = &["수동이동여부", "수동 이동 여부", "수동이동"];

// Export headers.
pub const OUT_ASSIGNED_CLASS: &str = "배정반";
pub const OUT_NAME: &str = "성명";
pub const OUT_GENDER: &str = "성별";
pub const OUT_NOTE: &str = "비고";
pub const OUT_GROUP_ID: &str = "그룹ID";
pub const OUT_MANUAL_MOVE: &str = "수동이동여부";
