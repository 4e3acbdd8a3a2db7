use crate::models::CombinedDataset;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix cells that a spreadsheet would evaluate as a formula.
fn guard_cell(s: &str) -> String {
    if s.starts_with(['=', '+', '-', '@']) {
        format!("'{}", s)
    } else {
        s.to_string()
    }
}

/// Save a combined dataset as tidy CSV: one row per country and year with at
/// least one value. Missing values are written as empty cells.
pub fn save_csv<P: AsRef<Path>>(dataset: &CombinedDataset, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(["country", "year", "gdp", "fertility"])?;
    for (code, series) in &dataset.countries {
        for year in &dataset.years {
            let key = year.to_string();
            let gdp = series.gdp.get(&key);
            let fertility = series.fertility.get(&key);
            if gdp.is_none() && fertility.is_none() {
                continue;
            }
            wtr.serialize((guard_cell(code), year, gdp, fertility))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Save a combined dataset as pretty JSON (same shape as the `/data` body).
pub fn save_json<P: AsRef<Path>>(dataset: &CombinedDataset, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(dataset)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
