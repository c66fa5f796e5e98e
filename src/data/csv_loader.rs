//! CSV file -> `BarTable`. Cells stay text; `BarTable::to_series` does the parsing.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::DF;
use crate::models::{BarTable, Column};

/// Reads a headed CSV file into a text-column table. Rows shorter than the header
/// are padded with empty cells, which later fail to parse and are dropped.
pub fn load_bar_table<P: AsRef<Path>>(path: P) -> Result<BarTable> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for (line, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("{}: record {}", path.display(), line + 1))?;
        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(record.get(idx).unwrap_or_default().to_string());
        }
    }

    if DF.log_loader {
        log::info!(
            "Loaded {} rows x {} columns from {}",
            columns.first().map(Vec::len).unwrap_or(0),
            headers.len(),
            path.display()
        );
    }

    let mut table = BarTable::new();
    for (name, values) in headers.iter().zip(columns) {
        table.insert(name, Column::Text(values));
    }
    Ok(table)
}
