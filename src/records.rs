// 📄 Record Reader - delimited files → rows
// Header row is always discarded; any bad row aborts the read

use crate::error::SlcspError;
use anyhow::Result;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Minimum fields in a geography row: zipcode,state,county_code,name,rate_area
pub const GEOGRAPHY_FIELDS: usize = 5;

/// Minimum fields in a plan row: plan_id,state,metal_level,rate,rate_area
pub const PLAN_FIELDS: usize = 5;

/// Minimum fields in a requested-codes row: zipcode[,rate]
pub const REQUEST_FIELDS: usize = 1;

// ============================================================================
// ROW
// ============================================================================

/// One data row plus where it came from
#[derive(Debug, Clone)]
pub struct Row {
    /// 1-based line in the source file (header is line 1)
    pub line: u64,
    record: StringRecord,
}

impl Row {
    pub fn new(line: u64, record: StringRecord) -> Self {
        Row { line, record }
    }

    /// Field at a 0-based column
    pub fn field(&self, index: usize) -> &str {
        self.record.get(index).unwrap_or("")
    }
}

// ============================================================================
// READERS
// ============================================================================

/// Read every data row of a CSV file
pub fn read_records(path: &Path, min_fields: usize) -> Result<Vec<Row>> {
    let file = File::open(path).map_err(|source| SlcspError::Open {
        path: path.display().to_string(),
        source,
    })?;

    read_records_from(file, &path.display().to_string(), min_fields)
}

/// Read every data row from any reader; `source_name` is only used in errors
pub fn read_records_from<R: Read>(
    reader: R,
    source_name: &str,
    min_fields: usize,
) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut rows = Vec::new();

    for (index, result) in reader.records().enumerate() {
        // +2 because: 1-indexed + header row
        // csv positions undercount lines in CRLF files, so count rows instead
        let line = index as u64 + 2;
        let record = result.map_err(|err| csv_error(err, source_name, line))?;

        if record.len() < min_fields {
            return Err(SlcspError::MalformedRow {
                source_name: source_name.to_string(),
                line,
                expected: min_fields,
                found: record.len(),
            }
            .into());
        }

        rows.push(Row::new(line, record));
    }

    log::debug!("Read {} rows from {}", rows.len(), source_name);

    Ok(rows)
}

fn csv_error(err: csv::Error, source_name: &str, line: u64) -> SlcspError {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => SlcspError::FieldCount {
            source_name: source_name.to_string(),
            line,
            expected: *expected_len as usize,
            found: *len as usize,
        },
        _ => SlcspError::Csv {
            source_name: source_name.to_string(),
            line,
            message: err.to_string(),
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_discarded() {
        let data = "zipcode,rate\n64148,\n67118,\n";
        let rows = read_records_from(data.as_bytes(), "slcsp.csv", REQUEST_FIELDS).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field(0), "64148");
        assert_eq!(rows[1].field(0), "67118");
    }

    #[test]
    fn test_line_numbers_count_header() {
        let data = "zipcode,rate\n64148,\n67118,\n";
        let rows = read_records_from(data.as_bytes(), "slcsp.csv", REQUEST_FIELDS).unwrap();

        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn test_empty_input_has_no_rows() {
        let rows = read_records_from("".as_bytes(), "empty.csv", REQUEST_FIELDS).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_crlf_line_numbers_count_header() {
        let data = "zipcode,rate\r\n64148,\r\n67118,\r\n40813,\r\n";
        let rows = read_records_from(data.as_bytes(), "slcsp.csv", REQUEST_FIELDS).unwrap();

        let lines: Vec<u64> = rows.iter().map(|row| row.line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
    }

    #[test]
    fn test_unequal_row_is_field_count_error() {
        let data = "zipcode,state,county_code,name,rate_area\n36749,AL,01001,Autauga,11\n36703,AL\n";
        let err = read_records_from(data.as_bytes(), "zips.csv", GEOGRAPHY_FIELDS).unwrap_err();

        match err.downcast_ref::<SlcspError>() {
            Some(SlcspError::FieldCount { line, found, .. }) => {
                assert_eq!(*line, 3);
                assert_eq!(*found, 2);
            }
            other => panic!("expected FieldCount, got {:?}", other),
        }
    }

    #[test]
    fn test_crlf_unequal_row_names_its_line() {
        let data = "zipcode,state,county_code,name,rate_area\r\n36749,AL,01001,Autauga,11\r\n36703,AL\r\n";
        let err = read_records_from(data.as_bytes(), "zips.csv", GEOGRAPHY_FIELDS).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SlcspError>(),
            Some(SlcspError::FieldCount { line: 3, .. })
        ));
    }

    #[test]
    fn test_long_row_reports_exact_count() {
        let data = "zipcode,rate\n64148,\n67118,,extra\n";
        let err = read_records_from(data.as_bytes(), "slcsp.csv", REQUEST_FIELDS).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Wrong field count at line 3 in slcsp.csv: expected 2 fields, found 3"
        );
    }

    #[test]
    fn test_short_layout_is_malformed() {
        let data = "zipcode,state\n36749,AL\n";
        let err = read_records_from(data.as_bytes(), "zips.csv", GEOGRAPHY_FIELDS).unwrap_err();

        let typed = err.downcast_ref::<SlcspError>().unwrap();
        assert!(matches!(typed, SlcspError::MalformedRow { expected: 5, found: 2, .. }));
        assert!(err.to_string().contains("zips.csv"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read_records(Path::new("does/not/exist.csv"), REQUEST_FIELDS).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SlcspError>(),
            Some(SlcspError::Open { .. })
        ));
        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}
