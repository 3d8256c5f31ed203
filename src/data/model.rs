use std::fmt;
use std::str::FromStr;

use super::error::SelectionError;

// ---------------------------------------------------------------------------
// Cell – a single value read from a spreadsheet
// ---------------------------------------------------------------------------

/// A dynamically-typed spreadsheet cell, independent of the file format.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Empty,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::String(s) => write!(f, "{s}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Empty => Ok(()),
        }
    }
}

impl Cell {
    /// Numeric view of the cell. Text such as `"D"` (suppressed) yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) if v.is_finite() => Some(*v),
            Cell::Integer(i) => Some(*i as f64),
            Cell::String(s) => s
                .trim()
                .replace(',', "")
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Integer view; floats are accepted only when they carry no fraction.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Integer(i) => Some(*i),
            Cell::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            Cell::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Graph I – median salaries by employment sector
// ---------------------------------------------------------------------------

/// Employment sectors reported by the salary table, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmploymentCategory {
    Academia,
    Industry,
    Government,
    Nonprofit,
    Other,
}

impl EmploymentCategory {
    /// Column order of the source sheet.
    pub const ALL: [EmploymentCategory; 5] = [
        EmploymentCategory::Academia,
        EmploymentCategory::Industry,
        EmploymentCategory::Government,
        EmploymentCategory::Nonprofit,
        EmploymentCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmploymentCategory::Academia => "Academia",
            EmploymentCategory::Industry => "Industry",
            EmploymentCategory::Government => "Government",
            EmploymentCategory::Nonprofit => "Nonprofit",
            EmploymentCategory::Other => "Other",
        }
    }

    /// Categories in alphabetical order, as offered by the sidebar.
    pub fn sorted() -> Vec<EmploymentCategory> {
        let mut all = Self::ALL.to_vec();
        all.sort_by_key(|c| c.label());
        all
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EmploymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EmploymentCategory {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| SelectionError::UnknownCategory(s.to_string()))
    }
}

/// One field of study with its median salary per employment sector.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRow {
    pub field: String,
    /// Indexed by [`EmploymentCategory`]; `None` for suppressed cells.
    pub salaries: [Option<f64>; 5],
}

impl SalaryRow {
    pub fn salary(&self, category: EmploymentCategory) -> Option<f64> {
        self.salaries[category.index()]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SalaryTable {
    pub rows: Vec<SalaryRow>,
}

impl SalaryTable {
    /// Distinct field names in table order.
    pub fn fields(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            if !out.contains(&row.field) {
                out.push(row.field.clone());
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Graph II – recipients per year, optionally split by citizenship
// ---------------------------------------------------------------------------

/// Recipient counts indexed by year, one column per header of the sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusTable {
    /// Row index, in sheet order.
    pub years: Vec<i32>,
    /// Column names after duplicate mangling (`Year` excluded).
    pub columns: Vec<String>,
    /// Column-major values: `values[c][r]` belongs to `columns[c]`, `years[r]`.
    pub values: Vec<Vec<Option<f64>>>,
}

impl StatusTable {
    /// Values of a named column, aligned with [`StatusTable::years`].
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| self.values[i].as_slice())
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }
}

// ---------------------------------------------------------------------------
// Graph III – countries of origin of temporary visa holders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CountryRow {
    pub country: String,
    pub rank: i64,
    pub recipients: Option<f64>,
}

/// Countries in the rank order of the source sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CountryTable {
    pub rows: Vec<CountryRow>,
}

impl CountryTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_numeric_views() {
        assert_eq!(Cell::Integer(7).as_f64(), Some(7.0));
        assert_eq!(Cell::String(" 12,500 ".into()).as_f64(), Some(12500.0));
        assert_eq!(Cell::String("D".into()).as_f64(), None);
        assert_eq!(Cell::Float(1987.0).as_i64(), Some(1987));
        assert_eq!(Cell::Float(1987.5).as_i64(), None);
        assert!(Cell::String("   ".into()).is_empty());
    }

    #[test]
    fn employment_categories_sort_alphabetically() {
        let labels: Vec<&str> = EmploymentCategory::sorted()
            .into_iter()
            .map(|c| c.label())
            .collect();
        assert_eq!(
            labels,
            ["Academia", "Government", "Industry", "Nonprofit", "Other"]
        );
        assert_eq!("Industry".parse::<EmploymentCategory>(), Ok(EmploymentCategory::Industry));
        assert_eq!(
            "Retired".parse::<EmploymentCategory>(),
            Err(SelectionError::UnknownCategory("Retired".into()))
        );
    }

    #[test]
    fn salary_fields_are_distinct_in_table_order() {
        let row = |f: &str| SalaryRow {
            field: f.to_string(),
            salaries: [None; 5],
        };
        let table = SalaryTable {
            rows: vec![row("B"), row("A"), row("B")],
        };
        assert_eq!(table.fields(), ["B", "A"]);
    }
}
