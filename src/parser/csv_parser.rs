use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, warn};

use crate::models::{columns, Record};
use crate::parser::ParseError;

/// Parses complete CSV text into records, in input order.
///
/// The first line is the header row. Rows are zipped positionally with the headers, so a
/// short row yields empty trailing fields and a long row loses its surplus cells. Quoted
/// fields are honoured and blank lines are skipped.
pub fn parse_str(text: &str) -> Result<Vec<Record>, ParseError> {
    parse_reader(text.trim_end().as_bytes())
}

pub fn parse_path(path: &Path) -> Result<Vec<Record>, ParseError> {
    let file = File::open(path)?;

    parse_reader(BufReader::new(file))
}

pub fn parse_reader<R: Read>(input: R) -> Result<Vec<Record>, ParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers: Arc<[String]> = reader.headers()?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(String::is_empty) {
        debug!("CSV input has no header row, nothing to parse");
        return Ok(Vec::new());
    }

    warn_on_missing_columns(&headers);

    let mut records = Vec::new();

    for result in reader.records() {
        let row = result?;

        //NOTE: Only a line with nothing but whitespace is blank, `,,` is a record of empty cells
        if row.len() <= 1 && row.iter().all(str::is_empty) {
            continue;
        }

        if row.len() != headers.len() {
            //NOTE: Rows are never rejected, a missing comma shifts every later column of that row
            debug!("Row at line {} has {} values for {} columns", row.position().map_or(0, |position| position.line()), row.len(), headers.len());
        }

        records.push(Record::new(headers.clone(), row.iter().map(str::to_string).collect()));
    }

    debug!("Parsed {} records with {} columns", records.len(), headers.len());

    Ok(records)
}

fn warn_on_missing_columns(headers: &[String]) {
    let missing: Vec<&str> = columns::EXPECTED.iter()
        .copied()
        .filter(|expected| !headers.iter().any(|header| header == expected))
        .collect();

    if !missing.is_empty() {
        warn!("CSV header is missing expected columns: {}", missing.join(", "));
    }
}
