use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{CountryRow, CountryTable, SalaryRow, SalaryTable, StatusTable};
use super::sheet::{HeaderedSheet, read_sheet};

// ---------------------------------------------------------------------------
// Sheet layouts
// ---------------------------------------------------------------------------

/// Title rows above the salary header (table 49).
pub const SALARY_SKIP_ROWS: usize = 3;
/// The status sheet (table 17) starts with its header.
pub const STATUS_SKIP_ROWS: usize = 0;
/// Title rows above the country header (table 25).
pub const COUNTRY_SKIP_ROWS: usize = 3;
/// Sub-header rows between the country header and the ranking.
pub const COUNTRY_DROP_ROWS: usize = 2;

pub const YEAR_COLUMN: &str = "Year";

// ---------------------------------------------------------------------------
// Graph I
// ---------------------------------------------------------------------------

/// Load median salaries: `Field` followed by one column per employment sector.
///
/// Columns are taken by position, whatever the sheet calls them. Rows without
/// a field name (notes, blank spacer rows) are skipped.
pub fn load_salaries(path: &Path) -> Result<SalaryTable> {
    let sheet = read_sheet(path)?.with_header(SALARY_SKIP_ROWS)?;
    let table = salaries_from_sheet(&sheet)
        .with_context(|| format!("parsing salary table {}", path.display()))?;
    log::info!("Loaded {} salary rows from {}", table.len(), path.display());
    if table.is_empty() {
        log::warn!("Salary table {} has no field rows", path.display());
    }
    Ok(table)
}

fn salaries_from_sheet(sheet: &HeaderedSheet) -> Result<SalaryTable> {
    if sheet.header.len() < 6 {
        bail!(
            "expected 6 columns (Field + 5 employment sectors), found {}",
            sheet.header.len()
        );
    }

    let rows = (0..sheet.len())
        .filter(|&r| !sheet.cell(r, 0).is_empty())
        .map(|r| SalaryRow {
            field: sheet.cell(r, 0).to_string(),
            salaries: std::array::from_fn(|c| sheet.cell(r, c + 1).as_f64()),
        })
        .collect();

    Ok(SalaryTable { rows })
}

// ---------------------------------------------------------------------------
// Graph II
// ---------------------------------------------------------------------------

/// Load recipient counts indexed by `Year`.
///
/// The table ends at the first row whose `Year` is not an integer, which is
/// where the footnotes of the published sheet begin.
pub fn load_status(path: &Path) -> Result<StatusTable> {
    let sheet = read_sheet(path)?.with_header(STATUS_SKIP_ROWS)?;
    let table = status_from_sheet(&sheet)
        .with_context(|| format!("parsing status table {}", path.display()))?;
    log::info!(
        "Loaded {} years x {} status columns from {}",
        table.len(),
        table.columns.len(),
        path.display()
    );
    Ok(table)
}

fn status_from_sheet(sheet: &HeaderedSheet) -> Result<StatusTable> {
    let year_idx = sheet
        .column_index(YEAR_COLUMN)
        .context("status sheet missing 'Year' column")?;

    let n_rows = (0..sheet.len())
        .take_while(|&r| sheet.cell(r, year_idx).as_i64().is_some())
        .count();
    if n_rows == 0 {
        bail!("status sheet has no year rows");
    }

    let mut years = Vec::with_capacity(n_rows);
    for r in 0..n_rows {
        let year = sheet.cell(r, year_idx).as_i64().unwrap_or_default();
        let year =
            i32::try_from(year).with_context(|| format!("Row {r}: year {year} out of range"))?;
        years.push(year);
    }

    let (columns, values): (Vec<String>, Vec<Vec<Option<f64>>>) = sheet
        .header
        .iter()
        .enumerate()
        .filter(|(c, _)| *c != year_idx)
        .map(|(c, name)| {
            let column = (0..n_rows).map(|r| sheet.cell(r, c).as_f64()).collect();
            (name.clone(), column)
        })
        .unzip();

    Ok(StatusTable {
        years,
        columns,
        values,
    })
}

// ---------------------------------------------------------------------------
// Graph III
// ---------------------------------------------------------------------------

/// Load the country ranking: `country`, `rank`, `recipients` by position.
///
/// The first [`COUNTRY_DROP_ROWS`] rows under the header are sub-headers and
/// are dropped; the ranking ends at the first row without an integer rank.
pub fn load_countries(path: &Path) -> Result<CountryTable> {
    let sheet = read_sheet(path)?.with_header(COUNTRY_SKIP_ROWS)?;
    let table = countries_from_sheet(&sheet)
        .with_context(|| format!("parsing country table {}", path.display()))?;
    log::info!("Loaded {} countries from {}", table.len(), path.display());
    if table.is_empty() {
        log::warn!("Country table {} has no ranked rows", path.display());
    }
    Ok(table)
}

fn countries_from_sheet(sheet: &HeaderedSheet) -> Result<CountryTable> {
    if sheet.header.len() < 3 {
        bail!(
            "expected 3 columns (country, rank, recipients), found {}",
            sheet.header.len()
        );
    }

    let rows = (COUNTRY_DROP_ROWS..sheet.len())
        .map_while(|r| {
            let rank = sheet.cell(r, 1).as_i64()?;
            Some(CountryRow {
                country: sheet.cell(r, 0).to_string(),
                rank,
                recipients: sheet.cell(r, 2).as_f64(),
            })
        })
        .collect();

    Ok(CountryTable { rows })
}
