use std::collections::BTreeSet;
use std::fmt;

use super::error::SelectionError;
use super::model::{CountryRow, CountryTable, EmploymentCategory, SalaryTable, StatusTable};

// ---------------------------------------------------------------------------
// Graph I – salaries for a set of fields
// ---------------------------------------------------------------------------

/// Fields pre-selected in the salary multiselect. The trailing space in the
/// psychology label matches the source sheet.
pub const DEFAULT_SALARY_FIELDS: [&str; 8] = [
    "All fields",
    "Life sciences",
    "Science and engineering",
    "Physical sciences and earth sciences",
    "Mathematics and computer sciences",
    "Psychology and social sciences ",
    "Engineering",
    "Non-science and engineering",
];

/// One bar of Graph I.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryPoint {
    pub field: String,
    pub salary: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalarySelection {
    pub category: EmploymentCategory,
    /// Sorted by salary, highest first; missing salaries last.
    pub points: Vec<SalaryPoint>,
}

/// Rows whose field is in `fields`, as `(field, salary in category)`,
/// sorted descending. The sort is stable, so ties keep table order.
pub fn select_salaries(
    table: &SalaryTable,
    category: EmploymentCategory,
    fields: &BTreeSet<String>,
) -> SalarySelection {
    let mut points: Vec<SalaryPoint> = table
        .rows
        .iter()
        .filter(|row| fields.contains(&row.field))
        .map(|row| SalaryPoint {
            field: row.field.clone(),
            salary: row.salary(category),
        })
        .collect();

    points.sort_by(|a, b| match (a.salary, b.salary) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    SalarySelection { category, points }
}

/// Like [`select_salaries`] with the category given by name. An unknown
/// category matches no rows.
#[cfg(test)]
pub fn select_salaries_by_name(
    table: &SalaryTable,
    category: &str,
    fields: &BTreeSet<String>,
) -> Option<SalarySelection> {
    match category.parse::<EmploymentCategory>() {
        Ok(category) => Some(select_salaries(table, category, fields)),
        Err(e) => {
            log::warn!("{e}, no rows selected");
            None
        }
    }
}

/// The default multiselect content: [`DEFAULT_SALARY_FIELDS`] that exist in
/// the table.
pub fn default_salary_fields(table: &SalaryTable) -> BTreeSet<String> {
    let present = table.fields();
    DEFAULT_SALARY_FIELDS
        .into_iter()
        .filter(|f| present.iter().any(|p| p == f))
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Graph II – recipients per year, with citizenship mapping
// ---------------------------------------------------------------------------

pub const CITIZEN_COLUMN: &str = "U.S. citizen or permanent resident";
pub const VISA_COLUMN: &str = "Temporary visa holder";

/// Fields of study with citizenship-status companion columns.
///
/// This is a closed set: each field owns exactly one pair of companion
/// columns, distinguished by the numeric suffix the duplicated headers get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StudyField {
    AllFields,
    LifeSciences,
    PhysicalAndEarthSciences,
    MathematicsAndComputerSciences,
    PsychologyAndSocialSciences,
    Engineering,
    Education,
    HumanitiesAndArts,
    Other,
}

impl StudyField {
    pub const ALL: [StudyField; 9] = [
        StudyField::AllFields,
        StudyField::LifeSciences,
        StudyField::PhysicalAndEarthSciences,
        StudyField::MathematicsAndComputerSciences,
        StudyField::PsychologyAndSocialSciences,
        StudyField::Engineering,
        StudyField::Education,
        StudyField::HumanitiesAndArts,
        StudyField::Other,
    ];

    /// Column header of the field's total.
    pub fn label(self) -> &'static str {
        match self {
            StudyField::AllFields => "All fields",
            StudyField::LifeSciences => "Life sciences",
            StudyField::PhysicalAndEarthSciences => "Physical sciences and earth sciences",
            StudyField::MathematicsAndComputerSciences => "Mathematics and computer sciences",
            StudyField::PsychologyAndSocialSciences => "Psychology and social sciences",
            StudyField::Engineering => "Engineering",
            StudyField::Education => "Education",
            StudyField::HumanitiesAndArts => "Humanities and arts",
            StudyField::Other => "Other",
        }
    }

    /// Reject names outside the mapping instead of guessing a column pair.
    pub fn from_label(label: &str) -> Result<Self, SelectionError> {
        Self::ALL
            .into_iter()
            .find(|f| f.label() == label)
            .ok_or_else(|| SelectionError::UnknownStudyField(label.to_string()))
    }

    /// Suffix of the field's companion columns in the status sheet, where the
    /// repeated sub-headers are numbered left to right.
    pub fn column_suffix(self) -> Option<u8> {
        match self {
            StudyField::AllFields => None,
            StudyField::LifeSciences => Some(1),
            StudyField::PhysicalAndEarthSciences => Some(2),
            StudyField::MathematicsAndComputerSciences => Some(3),
            StudyField::PsychologyAndSocialSciences => Some(4),
            StudyField::Engineering => Some(5),
            StudyField::Education => Some(6),
            StudyField::HumanitiesAndArts => Some(7),
            StudyField::Other => Some(8),
        }
    }

    /// `(citizen or permanent resident, temporary visa holder)` column names.
    pub fn status_columns(self) -> (String, String) {
        match self.column_suffix() {
            None => (CITIZEN_COLUMN.to_string(), VISA_COLUMN.to_string()),
            Some(n) => (format!("{CITIZEN_COLUMN}.{n}"), format!("{VISA_COLUMN}.{n}")),
        }
    }
}

impl fmt::Display for StudyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fields offered by the Graph II selector, sorted alphabetically.
/// Every entry belongs to [`StudyField`].
pub fn status_field_choices() -> Vec<&'static str> {
    let mut choices = vec![
        StudyField::AllFields.label(),
        StudyField::LifeSciences.label(),
        StudyField::PhysicalAndEarthSciences.label(),
        StudyField::MathematicsAndComputerSciences.label(),
        StudyField::PsychologyAndSocialSciences.label(),
        StudyField::Engineering.label(),
        StudyField::HumanitiesAndArts.label(),
        StudyField::Other.label(),
    ];
    choices.sort_unstable();
    choices
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusSelection {
    /// One count per year.
    Total {
        field: String,
        years: Vec<i32>,
        counts: Vec<Option<f64>>,
    },
    /// Counts per year split by citizenship status.
    Breakdown {
        field: StudyField,
        years: Vec<i32>,
        citizen: Vec<Option<f64>>,
        visa: Vec<Option<f64>>,
    },
}

impl StatusSelection {
    pub fn years(&self) -> &[i32] {
        match self {
            StatusSelection::Total { years, .. } | StatusSelection::Breakdown { years, .. } => {
                years
            }
        }
    }
}

/// Counts for `field` over every year of the table, in table order.
///
/// With `show_status` the field must belong to the citizenship mapping;
/// otherwise any column of the table can be selected.
pub fn select_status(
    table: &StatusTable,
    field: &str,
    show_status: bool,
) -> Result<StatusSelection, SelectionError> {
    let column = |name: &str| {
        table
            .column(name)
            .map(<[Option<f64>]>::to_vec)
            .ok_or_else(|| SelectionError::MissingColumn(name.to_string()))
    };

    if !show_status {
        return Ok(StatusSelection::Total {
            field: field.to_string(),
            years: table.years.clone(),
            counts: column(field)?,
        });
    }

    let study_field = StudyField::from_label(field)?;
    let (citizen_col, visa_col) = study_field.status_columns();
    Ok(StatusSelection::Breakdown {
        field: study_field,
        years: table.years.clone(),
        citizen: column(&citizen_col)?,
        visa: column(&visa_col)?,
    })
}

// ---------------------------------------------------------------------------
// Graph III – top N countries
// ---------------------------------------------------------------------------

pub const MIN_TOP_COUNTRIES: usize = 1;
pub const MAX_TOP_COUNTRIES: usize = 35;
pub const DEFAULT_TOP_COUNTRIES: usize = 5;

/// The first `n` rows of the ranking; the whole table when `n` exceeds it.
pub fn select_top_countries(table: &CountryTable, n: usize) -> &[CountryRow] {
    &table.rows[..n.min(table.len())]
}
