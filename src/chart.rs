use palette::Srgb;

use crate::color::{BAR_GREY, GOLD, NAVY, parse_hex};
use crate::data::filter::{CITIZEN_COLUMN, SalarySelection, StatusSelection, VISA_COLUMN};
use crate::data::model::CountryRow;

// ---------------------------------------------------------------------------
// ChartSpec – what the plot panel draws
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarLayout {
    /// One bar per category.
    Single,
    /// Series side by side within each category.
    Grouped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    /// One value per category; `None` leaves a gap.
    pub values: Vec<Option<f64>>,
    pub color: Srgb<u8>,
}

/// A bar chart ready for rendering. Values are plotted as given.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// x-axis labels, in drawing order.
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub layout: BarLayout,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Whether a legend helps: only grouped charts name several series.
    pub fn show_legend(&self) -> bool {
        self.series.len() > 1
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Graph I: one grey bar per field.
pub fn salary_chart(selection: &SalarySelection) -> ChartSpec {
    ChartSpec {
        title: format!(
            "Graph I: Median Salaries for doctorial recipients in {} (2017)",
            selection.category
        ),
        x_label: "Field of study".to_string(),
        y_label: "Median salary (USD)".to_string(),
        categories: selection.points.iter().map(|p| p.field.clone()).collect(),
        series: vec![Series {
            name: selection.category.to_string(),
            values: selection.points.iter().map(|p| p.salary).collect(),
            color: parse_hex(BAR_GREY),
        }],
        layout: BarLayout::Single,
    }
}

/// Graph II: yearly totals, or citizens and visa holders side by side.
pub fn status_chart(selection: &StatusSelection) -> ChartSpec {
    let categories = selection.years().iter().map(|y| y.to_string()).collect();
    let (field, series, layout) = match selection {
        StatusSelection::Total { field, counts, .. } => (
            field.clone(),
            vec![Series {
                name: field.clone(),
                values: counts.clone(),
                color: parse_hex(NAVY),
            }],
            BarLayout::Single,
        ),
        StatusSelection::Breakdown {
            field,
            citizen,
            visa,
            ..
        } => (
            field.to_string(),
            vec![
                Series {
                    name: CITIZEN_COLUMN.to_string(),
                    values: citizen.clone(),
                    color: parse_hex(NAVY),
                },
                Series {
                    name: VISA_COLUMN.to_string(),
                    values: visa.clone(),
                    color: parse_hex(GOLD),
                },
            ],
            BarLayout::Grouped,
        ),
    };

    ChartSpec {
        title: format!("Graph II: Number of Doctorate Recipients for {field} (1987-2017)"),
        x_label: "Year".to_string(),
        y_label: "Recipients".to_string(),
        categories,
        series,
        layout,
    }
}

/// Graph III: one grey bar per country, in rank order.
pub fn country_chart(rows: &[CountryRow]) -> ChartSpec {
    ChartSpec {
        title: format!(
            "Graph III: Top {} Countries of Origin of Temporary Visa Holders (2017)",
            rows.len()
        ),
        x_label: "Country".to_string(),
        y_label: "Recipients".to_string(),
        categories: rows.iter().map(|r| r.country.clone()).collect(),
        series: vec![Series {
            name: "recipients".to_string(),
            values: rows.iter().map(|r| r.recipients).collect(),
            color: parse_hex(BAR_GREY),
        }],
        layout: BarLayout::Single,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{SalaryPoint, StudyField};
    use crate::data::model::EmploymentCategory;

    #[test]
    fn salary_chart_keeps_selection_order() {
        let selection = SalarySelection {
            category: EmploymentCategory::Academia,
            points: vec![
                SalaryPoint {
                    field: "Engineering".into(),
                    salary: Some(88000.0),
                },
                SalaryPoint {
                    field: "Life sciences".into(),
                    salary: Some(64000.0),
                },
            ],
        };
        let chart = salary_chart(&selection);
        assert_eq!(chart.categories, ["Engineering", "Life sciences"]);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].values, [Some(88000.0), Some(64000.0)]);
        assert_eq!(chart.series[0].color, Srgb::new(0x48, 0x48, 0x48));
        assert_eq!(chart.layout, BarLayout::Single);
        assert!(chart.title.contains("Academia"));
    }

    #[test]
    fn empty_selection_gives_empty_chart() {
        let chart = salary_chart(&SalarySelection {
            category: EmploymentCategory::Other,
            points: Vec::new(),
        });
        assert!(chart.is_empty());
        assert!(chart.series[0].values.is_empty());
    }

    #[test]
    fn breakdown_is_grouped_with_two_colours() {
        let chart = status_chart(&StatusSelection::Breakdown {
            field: StudyField::Engineering,
            years: vec![2016, 2017],
            citizen: vec![Some(4000.0), Some(4100.0)],
            visa: vec![Some(5000.0), None],
        });
        assert_eq!(chart.layout, BarLayout::Grouped);
        assert_eq!(chart.categories, ["2016", "2017"]);
        assert!(chart.show_legend());
        assert_eq!(chart.series[0].name, CITIZEN_COLUMN);
        assert_eq!(chart.series[1].name, VISA_COLUMN);
        assert_eq!(chart.series[1].color, Srgb::new(0xDB, 0xAE, 0x58));
        assert_eq!(chart.series[1].values[1], None);
        assert!(chart.title.contains("Engineering"));
    }

    #[test]
    fn total_is_a_single_navy_series() {
        let chart = status_chart(&StatusSelection::Total {
            field: "All fields".into(),
            years: vec![1987],
            counts: vec![Some(32000.0)],
        });
        assert_eq!(chart.layout, BarLayout::Single);
        assert!(!chart.show_legend());
        assert_eq!(chart.series[0].color, Srgb::new(0x20, 0x28, 0x3E));
    }

    #[test]
    fn country_chart_title_counts_rows() {
        let rows = vec![
            CountryRow {
                country: "China".into(),
                rank: 1,
                recipients: Some(5020.0),
            },
            CountryRow {
                country: "India".into(),
                rank: 2,
                recipients: Some(2520.0),
            },
        ];
        let chart = country_chart(&rows);
        assert!(chart.title.starts_with("Graph III: Top 2 Countries"));
        assert_eq!(chart.categories, ["China", "India"]);
    }
}
