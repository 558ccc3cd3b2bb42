//! Decoding one dump row into raw fields plus the JSON record payload.

use crate::error::{HarnessError, Result};
use serde_json::Value;

/// Zero-based index of the JSON record payload in a dump row.
const RECORD_FIELD: usize = 4;

/// Default field delimiter of dump files.
pub const DEFAULT_DELIMITER: char = '\t';

/// One decoded dump row.
///
/// Transient: a row exists for a single loop iteration and is never
/// retained across iterations.
#[derive(Debug, Clone)]
pub struct DumpRow {
    /// Raw delimited fields, in order
    pub fields: Vec<String>,
    /// Parsed JSON record from field index 4
    pub record: Value,
}

/// Splits a raw line on `delimiter` and parses field index 4 as JSON.
///
/// A missing record field or invalid JSON is an error here and propagates
/// to the driver; a malformed dump is not partially recoverable by this
/// component.
pub fn decode_row(line: &str, delimiter: char) -> Result<DumpRow> {
    let fields: Vec<String> = line.split(delimiter).map(str::to_string).collect();
    let raw = fields
        .get(RECORD_FIELD)
        .ok_or(HarnessError::MissingRecordField {
            found: fields.len(),
        })?;
    let record = serde_json::from_str(raw)?;
    Ok(DumpRow { fields, record })
}
