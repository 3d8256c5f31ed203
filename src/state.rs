use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::chart::{self, ChartSpec};
use crate::data::cache::Tables;
use crate::data::filter::{
    DEFAULT_TOP_COUNTRIES, default_salary_fields, select_salaries, select_status,
    select_top_countries, status_field_choices,
};
use crate::data::model::EmploymentCategory;

// ---------------------------------------------------------------------------
// Per-graph selections
// ---------------------------------------------------------------------------

/// Sidebar choices for Graph I.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryControls {
    pub category: EmploymentCategory,
    pub fields: BTreeSet<String>,
}

/// Sidebar choices for Graph II.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusControls {
    pub field: String,
    pub show_status: bool,
}

/// Sidebar choice for Graph III.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryControls {
    pub top_n: usize,
}

/// A chart, or the reason it cannot be drawn.
pub type ChartResult = Result<ChartSpec, String>;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Tables loaded at startup; never mutated.
    pub tables: Tables,

    /// Optional banner shown above the title.
    pub header_image: Option<PathBuf>,

    pub salary: SalaryControls,
    pub status: StatusControls,
    pub countries: CountryControls,

    /// Charts derived from the controls above (cached between frames).
    pub salary_chart: ChartResult,
    pub status_chart: ChartResult,
    pub country_chart: ChartResult,
}

impl AppState {
    /// Initial selections, mirroring the sidebar defaults.
    pub fn new(tables: Tables, header_image: Option<PathBuf>) -> Self {
        let salary = SalaryControls {
            category: EmploymentCategory::sorted()[0],
            fields: default_salary_fields(&tables.salaries),
        };
        let status = StatusControls {
            field: status_field_choices()[0].to_string(),
            show_status: false,
        };
        let countries = CountryControls {
            top_n: DEFAULT_TOP_COUNTRIES,
        };

        let mut state = Self {
            tables,
            header_image,
            salary,
            status,
            countries,
            salary_chart: Err(String::new()),
            status_chart: Err(String::new()),
            country_chart: Err(String::new()),
        };
        state.refresh_salary_chart();
        state.refresh_status_chart();
        state.refresh_country_chart();
        state
    }

    /// Recompute Graph I after its controls changed.
    pub fn refresh_salary_chart(&mut self) {
        let selection = select_salaries(
            &self.tables.salaries,
            self.salary.category,
            &self.salary.fields,
        );
        self.salary_chart = Ok(chart::salary_chart(&selection));
    }

    /// Recompute Graph II after its controls changed.
    pub fn refresh_status_chart(&mut self) {
        self.status_chart = select_status(
            &self.tables.status,
            &self.status.field,
            self.status.show_status,
        )
        .map(|selection| chart::status_chart(&selection))
        .map_err(|e| {
            log::error!("Graph II: {e}");
            e.to_string()
        });
    }

    /// Recompute Graph III after its control changed.
    pub fn refresh_country_chart(&mut self) {
        let rows = select_top_countries(&self.tables.countries, self.countries.top_n);
        self.country_chart = Ok(chart::country_chart(rows));
    }

    pub fn set_category(&mut self, category: EmploymentCategory) {
        self.salary.category = category;
        self.refresh_salary_chart();
    }

    /// Toggle a single field in the Graph I multiselect.
    pub fn toggle_salary_field(&mut self, field: &str) {
        if !self.salary.fields.remove(field) {
            self.salary.fields.insert(field.to_string());
        }
        self.refresh_salary_chart();
    }

    /// Select every field of the salary table.
    pub fn select_all_fields(&mut self) {
        self.salary.fields = self.tables.salaries.fields().into_iter().collect();
        self.refresh_salary_chart();
    }

    /// Deselect every field.
    pub fn select_no_fields(&mut self) {
        self.salary.fields.clear();
        self.refresh_salary_chart();
    }

    pub fn set_study_field(&mut self, field: &str) {
        self.status.field = field.to_string();
        self.refresh_status_chart();
    }

    pub fn set_show_status(&mut self, show: bool) {
        self.status.show_status = show;
        self.refresh_status_chart();
    }

    pub fn set_top_n(&mut self, n: usize) {
        self.countries.top_n = n;
        self.refresh_country_chart();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::chart::BarLayout;
    use crate::data::model::{CountryRow, CountryTable, SalaryRow, SalaryTable, StatusTable};

    fn tables() -> Tables {
        let salary = |field: &str, academia: f64| SalaryRow {
            field: field.to_string(),
            salaries: [Some(academia), Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
        };
        Tables {
            salaries: Arc::new(SalaryTable {
                rows: vec![
                    salary("All fields", 60000.0),
                    salary("Engineering", 88000.0),
                    salary("Astronomy", 70000.0),
                ],
            }),
            status: Arc::new(StatusTable {
                years: vec![2016, 2017],
                columns: vec![
                    "All fields".into(),
                    "U.S. citizen or permanent resident".into(),
                    "Temporary visa holder".into(),
                ],
                values: vec![
                    vec![Some(54000.0), Some(55000.0)],
                    vec![Some(36000.0), Some(37000.0)],
                    vec![Some(15000.0), Some(15500.0)],
                ],
            }),
            countries: Arc::new(CountryTable {
                rows: (1..=10)
                    .map(|rank| CountryRow {
                        country: format!("Country {rank}"),
                        rank,
                        recipients: Some(100.0 - rank as f64),
                    })
                    .collect(),
            }),
        }
    }

    #[test]
    fn defaults_match_the_sidebar() {
        let state = AppState::new(tables(), None);
        assert_eq!(state.salary.category, EmploymentCategory::Academia);
        assert_eq!(state.status.field, "All fields");
        assert_eq!(state.countries.top_n, 5);

        let salary = state.salary_chart.as_ref().unwrap();
        assert_eq!(salary.categories, ["Engineering", "All fields"]);
        assert_eq!(state.country_chart.as_ref().unwrap().categories.len(), 5);
    }

    #[test]
    fn toggling_fields_updates_graph_one() {
        let mut state = AppState::new(tables(), None);
        state.toggle_salary_field("Astronomy");
        assert_eq!(state.salary_chart.as_ref().unwrap().categories.len(), 3);
        state.toggle_salary_field("Astronomy");
        assert_eq!(state.salary_chart.as_ref().unwrap().categories.len(), 2);
        state.select_no_fields();
        assert!(state.salary_chart.as_ref().unwrap().is_empty());
        state.select_all_fields();
        assert_eq!(state.salary_chart.as_ref().unwrap().categories.len(), 3);
    }

    #[test]
    fn status_toggle_switches_layout() {
        let mut state = AppState::new(tables(), None);
        assert_eq!(state.status_chart.as_ref().unwrap().layout, BarLayout::Single);
        state.set_show_status(true);
        assert_eq!(state.status_chart.as_ref().unwrap().layout, BarLayout::Grouped);
    }

    #[test]
    fn unmapped_column_surfaces_an_error() {
        let mut state = AppState::new(tables(), None);
        state.set_study_field("Engineering");
        let err = state.status_chart.as_ref().unwrap_err();
        assert!(err.contains("Engineering"));
    }

    #[test]
    fn top_n_is_capped_by_the_table() {
        let mut state = AppState::new(tables(), None);
        state.set_top_n(35);
        assert_eq!(state.country_chart.as_ref().unwrap().categories.len(), 10);
        state.set_top_n(1);
        assert_eq!(
            state.country_chart.as_ref().unwrap().categories,
            ["Country 1"]
        );
    }
}
