use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};

use super::model::Cell;

// ---------------------------------------------------------------------------
// RawSheet – every row of the first worksheet, untyped
// ---------------------------------------------------------------------------

/// The cells of one worksheet, row by row, starting at the top of the sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub rows: Vec<Vec<Cell>>,
}

/// A sheet split into a header row and the data rows below it.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderedSheet {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawSheet {
    /// Skip `skip_rows` rows, use the next non-blank row as header and keep
    /// the non-blank rows after it as data.
    ///
    /// Duplicate header names get `.1`, `.2`, … suffixes and blank headers
    /// become `Unnamed: <index>`, the naming dataframe tools use for Excel
    /// sheets with repeated sub-headers.
    pub fn with_header(self, skip_rows: usize) -> Result<HeaderedSheet> {
        let mut rows = self
            .rows
            .into_iter()
            .skip(skip_rows)
            .filter(|row| !row.iter().all(Cell::is_empty));

        let Some(header_row) = rows.next() else {
            bail!("sheet has no header row after skipping {skip_rows} rows");
        };

        Ok(HeaderedSheet {
            header: mangle_header(&header_row),
            rows: rows.collect(),
        })
    }
}

impl HeaderedSheet {
    /// Cell at (`row`, `col`); short rows read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&Cell::Empty)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

fn mangle_header(row: &[Cell]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    row.iter()
        .enumerate()
        .map(|(i, cell)| {
            let base = if cell.is_empty() {
                format!("Unnamed: {i}")
            } else {
                cell.to_string()
            };
            let mut name = base.clone();
            let mut n = 1;
            while seen.contains(&name) {
                name = format!("{base}.{n}");
                n += 1;
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read the first worksheet of a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.ods` – workbook, first sheet
/// * `.csv` – headerless export of a sheet, one line per sheet row
pub fn read_sheet(path: &Path) -> Result<RawSheet> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let sheet = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => read_workbook(path),
        "csv" => read_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("reading {}", path.display()))?;

    log::debug!("{}: {} raw rows", path.display(), sheet.rows.len());
    Ok(sheet)
}

// ---------------------------------------------------------------------------
// Workbook reader
// ---------------------------------------------------------------------------

fn read_workbook(path: &Path) -> Result<RawSheet> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no worksheets")?
        .context("reading first worksheet")?;

    // The range starts at the first used cell; pad back to A1 so row
    // offsets count from the top of the sheet.
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; col_offset];
        cells.extend(row.iter().map(data_to_cell));
        rows.push(cells);
    }

    Ok(RawSheet { rows })
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Integer(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::String(s) => Cell::String(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::String(s.clone()),
        _ => Cell::Empty,
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: no header handling at all, every record is one sheet row and
/// records may differ in length.
fn read_csv(path: &Path) -> Result<RawSheet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(RawSheet { rows })
}

fn guess_cell_type(s: &str) -> Cell {
    if s.trim().is_empty() {
        return Cell::Empty;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Cell::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Cell::Float(f);
    }
    if s == "true" || s == "false" {
        return Cell::Bool(s == "true");
    }
    Cell::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::String(s.to_string())
    }

    #[test]
    fn duplicate_headers_get_numbered_suffixes() {
        let header = mangle_header(&[
            text("Year"),
            text("All fields"),
            text("U.S. citizen or permanent resident"),
            text("Temporary visa holder"),
            text("Life sciences"),
            text("U.S. citizen or permanent resident"),
            text("Temporary visa holder"),
            Cell::Empty,
        ]);
        assert_eq!(
            header,
            [
                "Year",
                "All fields",
                "U.S. citizen or permanent resident",
                "Temporary visa holder",
                "Life sciences",
                "U.S. citizen or permanent resident.1",
                "Temporary visa holder.1",
                "Unnamed: 7",
            ]
        );
    }

    #[test]
    fn header_skips_rows_and_blank_lines() {
        let sheet = RawSheet {
            rows: vec![
                vec![text("Table 49")],
                vec![],
                vec![text("(Dollars)")],
                vec![Cell::Empty, Cell::Empty],
                vec![text("Field"), text("Academia")],
                vec![text("All fields"), Cell::Integer(60000)],
                vec![],
                vec![text("Engineering")],
            ],
        };
        let headered = sheet.with_header(3).unwrap();
        assert_eq!(headered.header, ["Field", "Academia"]);
        assert_eq!(headered.len(), 2);
        assert_eq!(headered.cell(0, 1), &Cell::Integer(60000));
        assert_eq!(headered.cell(1, 1), &Cell::Empty);
        assert_eq!(headered.column_index("Academia"), Some(1));
    }

    #[test]
    fn header_missing_is_an_error() {
        let sheet = RawSheet {
            rows: vec![vec![text("only a title")]],
        };
        assert!(sheet.with_header(3).is_err());
    }

    #[test]
    fn csv_cells_are_typed() {
        assert_eq!(guess_cell_type("1987"), Cell::Integer(1987));
        assert_eq!(guess_cell_type("2.5"), Cell::Float(2.5));
        assert_eq!(guess_cell_type(""), Cell::Empty);
        assert_eq!(
            guess_cell_type("Psychology and social sciences "),
            text("Psychology and social sciences ")
        );
    }

    #[test]
    fn workbook_range_is_padded_to_a1() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("offset.xlsx");
        let sheet = read_sheet(&path).unwrap();

        // Used range is B3:C5.
        assert_eq!(sheet.rows.len(), 5);
        assert!(sheet.rows[..2].iter().all(|row| row.is_empty()));
        assert_eq!(sheet.rows[2], [Cell::Empty, text("Year"), text("All fields")]);
        assert_eq!(sheet.rows[3][1].as_i64(), Some(1987));
        assert_eq!(sheet.rows[3][2].as_f64(), Some(41000.0));
        assert_eq!(sheet.rows[4][2], text("D"));

        let headered = sheet.with_header(2).unwrap();
        assert_eq!(headered.header, ["Unnamed: 0", "Year", "All fields"]);
        assert_eq!(headered.len(), 2);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = read_sheet(Path::new("data/table.parquet")).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension"));
    }
}
