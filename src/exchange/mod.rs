//! Import/export row contract.
//!
//! Rows come in as [`RawRow`](crate::models::RawRow)s from any sheet
//! reader, are normalized into students, and go back out as rows with the
//! placement columns overwritten. File formats are outside the engine; a
//! thin CSV adapter is provided in [`csv_io`].

pub mod columns;
pub mod csv_io;
mod export;
mod normalize;

pub use export::{export_rows, format_class};
pub use normalize::{
    normalize_gender, normalize_row, normalize_rows, parse_class_hint, NormalizedRow, UNNAMED,
};
