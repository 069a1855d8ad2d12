use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{RawRow, RawTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a two-column spectrum table from a `.csv` file: header row,
/// column 0 energy loss, column 1 intensity.
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let source_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("spectrum")
        .to_string();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            read_csv(file, &source_name)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one row per sample.
/// Column names are taken from the header, never assumed. Extra columns
/// are ignored; a missing or non-numeric cell is kept as `None` so that
/// sanitization decides what to drop.
pub fn read_csv<R: Read>(input: R, source_name: &str) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    if headers.len() < 2 {
        bail!(
            "{source_name}: expected at least two columns (energy, intensity), found {}",
            headers.len()
        );
    }
    let energy_column = headers.get(0).unwrap_or("").trim().to_string();
    let intensity_column = headers.get(1).unwrap_or("").trim().to_string();

    let mut rows = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("{source_name}: CSV row {row}"))?;
        rows.push(RawRow {
            row,
            energy: parse_cell(record.get(0)),
            intensity: parse_cell(record.get(1)),
        });
    }

    if rows.is_empty() {
        bail!("{source_name}: no data rows found");
    }

    log::debug!(
        "read {} rows from {source_name} (columns '{energy_column}', '{intensity_column}')",
        rows.len()
    );

    Ok(RawTable {
        source_name: source_name.to_string(),
        energy_column,
        intensity_column,
        rows,
    })
}

fn parse_cell(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|s| s.trim().parse::<f64>().ok())
}
