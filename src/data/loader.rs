use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Metric, SurveyError, SurveyRow, SurveyTable};

const BOM: char = '\u{feff}';

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the survey export from a CSV file.
///
/// The first line is a header and is ignored: columns are assigned
/// positionally as question id, summary, then the four metrics in
/// canonical order. A leading UTF-8 byte-order mark is accepted.
pub fn load_survey(path: &Path) -> Result<SurveyTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening survey file {}", path.display()))?;
    load_survey_from_reader(file).with_context(|| format!("loading {}", path.display()))
}

/// Load an auxiliary text file verbatim (minus a leading BOM).
pub fn load_text(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading text file {}", path.display()))?;
    Ok(strip_bom(&text).to_string())
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse survey CSV content from any reader.
pub fn load_survey_from_reader<R: Read>(mut reader: R) -> Result<SurveyTable> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .context("survey data is not valid UTF-8")?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(strip_bom(&text).as_bytes());

    let mut rows = Vec::new();

    for (row_no, result) in csv_reader.records().enumerate() {
        let row = row_no + 1;
        let record = result.with_context(|| format!("CSV row {row}"))?;

        // Spreadsheet exports pad the sheet with rows of bare commas.
        if record.iter().all(|field| field.trim().is_empty()) {
            log::debug!("Skipping blank CSV row {row}");
            continue;
        }

        if record.len() < 6 {
            return Err(SurveyError::MissingColumns {
                row,
                found: record.len(),
            }
            .into());
        }

        let mut values = [f64::NAN; 4];
        for metric in Metric::ALL {
            let cell = record.get(2 + metric.index()).unwrap_or("");
            values[metric.index()] = parse_metric(cell, row, metric)?;
        }

        rows.push(SurveyRow {
            id: record.get(0).unwrap_or("").trim().to_string(),
            summary: record.get(1).unwrap_or("").trim().to_string(),
            values,
        });
    }

    let table = SurveyTable::from_rows(rows)?;
    log::debug!("Parsed {} survey rows", table.len());
    Ok(table)
}

/// Empty cells are missing values; anything else must parse as a number.
fn parse_metric(cell: &str, row: usize, metric: Metric) -> Result<f64, SurveyError> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>().map_err(|_| SurveyError::InvalidNumber {
        row,
        column: metric.label(),
        value: cell.to_string(),
    })
}

fn strip_bom(s: &str) -> &str {
    s.strip_prefix(BOM).unwrap_or(s)
}
