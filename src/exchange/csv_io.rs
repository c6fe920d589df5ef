//! CSV adapter for [`RawRow`] batches.
//!
//! Header row becomes column names; every cell is read as text. Writing
//! emits the union of all row columns in first-seen order.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::RawRow;

/// Reads rows from CSV with a header line.
///
/// Short records are accepted; missing trailing cells are simply absent.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.trim_start_matches('\u{feff}'), v))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Reads rows from a CSV file.
pub fn read_rows_from_path(path: impl AsRef<Path>) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path)?;
    read_rows(file)
}

/// Writes rows as CSV. Cells absent from a row are written empty.
pub fn write_rows<W: Write>(rows: &[RawRow], writer: W) -> Result<()> {
    let mut headers: Vec<&str> = Vec::new();
    for row in rows {
        for col in row.columns() {
            if !headers.contains(&col) {
                headers.push(col);
            }
        }
    }

    let mut wtr = csv::Writer::from_writer(writer);
    if !headers.is_empty() {
        wtr.write_record(&headers)?;
    }
    for row in rows {
        wtr.write_record(headers.iter().map(|h| row.get(h).unwrap_or("")))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes rows to a CSV file, replacing it.
pub fn write_rows_to_path(rows: &[RawRow], path: impl AsRef<Path>) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_rows(rows, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_rows() {
        let data = "\u{feff}성명,성별,그룹ID\n김,남,G1\n이,여\n";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("성명"), Some("김"));
        assert_eq!(rows[0].get("그룹ID"), Some("G1"));
        assert_eq!(rows[1].get("그룹ID"), None);
    }

    #[test]
    fn test_write_rows_union_headers() {
        let rows = vec![
            RawRow::new().with("a", "1").with("b", "2"),
            RawRow::new().with("a", "3").with("c", "x,y"),
        ];
        let mut out = Vec::new();
        write_rows(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "a,b,c\n1,2,\n3,,\"x,y\"\n");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        let rows = vec![RawRow::new().with("성명", "박").with("배정반", "2반")];
        write_rows_to_path(&rows, &path).unwrap();
        assert_eq!(read_rows_from_path(&path).unwrap(), rows);
    }
}
