use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::error::LoadError;
use super::model::{MISSING_SENTINEL, Reading, Table};

const COLUMNS: [&str; 3] = ["angle", "time", "speed"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a motion log from `path`.
///
/// Row layout, no header:
/// ```text
/// angle_degrees,time_seconds,speed_mps
/// ```
/// Each field is a decimal number or the literal `NA`. The file handle is
/// released before this returns.
pub fn load(path: &Path) -> Result<Table, LoadError> {
    let file = File::open(path)?;
    let table = parse_table(file)?;
    log::debug!(
        "Loaded {} rows ({} complete) from {}",
        table.len(),
        table.rows.iter().filter(|r| r.is_complete()).count(),
        path.display()
    );
    Ok(table)
}

/// Parse a motion log from any reader.
///
/// Fields are split on commas only: quote characters are kept verbatim and
/// surrounding whitespace is trimmed. Blank lines are skipped.
pub fn parse_table<R: Read>(reader: R) -> Result<Table, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while rdr.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(parse_record(&record, line)?);
    }

    Ok(Table::from_rows(rows))
}

// ---------------------------------------------------------------------------
// Row helpers
// ---------------------------------------------------------------------------

fn parse_record(record: &StringRecord, line: u64) -> Result<Reading, LoadError> {
    if record.len() != COLUMNS.len() {
        return Err(LoadError::FieldCount {
            line,
            found: record.len(),
        });
    }

    let field = |i: usize| parse_field(&record[i], line, COLUMNS[i]);
    Ok(Reading {
        angle: field(0)?,
        time: field(1)?,
        speed: field(2)?,
    })
}

/// `Ok(None)` for the sentinel, `Ok(Some(v))` for a number.
fn parse_field(raw: &str, line: u64, column: &'static str) -> Result<Option<f64>, LoadError> {
    if raw == MISSING_SENTINEL {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| LoadError::Parse {
            line,
            column,
            value: raw.to_string(),
        })
}
