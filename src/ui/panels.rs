use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::filter::{MAX_TOP_COUNTRIES, MIN_TOP_COUNTRIES, status_field_choices};
use crate::data::model::EmploymentCategory;
use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Left side panel – one setup section per graph
// ---------------------------------------------------------------------------

/// Render the sidebar widgets.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            salary_setup(ui, state);
            ui.add_space(12.0);
            status_setup(ui, state);
            ui.add_space(12.0);
            country_setup(ui, state);
        });
}

fn salary_setup(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Setup for Graph I");
    ui.separator();

    ui.strong("Employment categories");
    let current = state.salary.category;
    egui::ComboBox::from_id_salt("employment_category")
        .selected_text(current.label())
        .show_ui(ui, |ui: &mut Ui| {
            for category in EmploymentCategory::sorted() {
                if ui
                    .selectable_label(current == category, category.label())
                    .clicked()
                {
                    state.set_category(category);
                }
            }
        });

    let all_fields = state.tables.salaries.fields();
    let header_text = format!(
        "Field of Study  ({}/{})",
        state.salary.fields.len(),
        all_fields.len()
    );

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt("salary_fields")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_fields();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_fields();
                }
            });

            for field in &all_fields {
                let mut checked = state.salary.fields.contains(field);
                if ui.checkbox(&mut checked, field.as_str()).changed() {
                    state.toggle_salary_field(field);
                }
            }
        });
}

fn status_setup(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Setup for Graph II");
    ui.separator();

    ui.strong("Field of Study");
    let current = state.status.field.clone();
    egui::ComboBox::from_id_salt("study_field")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for choice in status_field_choices() {
                if ui.selectable_label(current == choice, choice).clicked() {
                    state.set_study_field(choice);
                }
            }
        });

    let mut show_status = state.status.show_status;
    if ui
        .checkbox(&mut show_status, "Show Citizenship Status")
        .changed()
    {
        state.set_show_status(show_status);
    }
}

fn country_setup(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Setup for Graph III");
    ui.separator();

    ui.strong("Number of top countries");
    let mut top_n = state.countries.top_n;
    let slider = egui::Slider::new(&mut top_n, MIN_TOP_COUNTRIES..=MAX_TOP_COUNTRIES);
    if ui.add(slider).changed() {
        state.set_top_n(top_n);
    }
}

// ---------------------------------------------------------------------------
// Central panel – header and the three charts
// ---------------------------------------------------------------------------

const ABOUT: &str = "\
Data Source: National Science Foundation, Survey of Earned Doctorates
Duration: 1987-2017
Rust crates: eframe, egui_plot, calamine, csv";

const STATUS_NOTE: &str = "\
Other category includes agricultural sciences and natural resources; biological and \
biomedical sciences; and health sciences.
Life sciences category includes other non-science and engineering fields not shown separately.";

/// Render the page: banner, title, about box and the three graphs.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if let Some(path) = &state.header_image {
                let uri = format!("file://{}", path.display());
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.add(
                        egui::Image::new(uri)
                            .max_width(700.0_f32.min(ui.available_width()))
                            .rounding(4.0),
                    );
                });
            }

            ui.heading(RichText::new("Trends in PhD recipients in the US").size(28.0));
            egui::CollapsingHeader::new("About")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.label(ABOUT);
                });
            ui.separator();

            plot::chart_section(ui, "salary_plot", &state.salary_chart);
            ui.add_space(16.0);

            plot::chart_section(ui, "status_plot", &state.status_chart);
            ui.label(RichText::new(STATUS_NOTE).italics().small());
            ui.add_space(16.0);

            plot::chart_section(ui, "country_plot", &state.country_chart);
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu with a summary of the loaded tables.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} salary fields, {} years, {} countries loaded",
            state.tables.salaries.len(),
            state.tables.status.len(),
            state.tables.countries.len()
        ));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn about_box_names_source_duration_and_crates() {
        let labels: Vec<&str> = ABOUT
            .lines()
            .filter_map(|line| line.split_once(':').map(|(label, _)| label))
            .collect();
        assert_eq!(labels, ["Data Source", "Duration", "Rust crates"]);
        assert!(ABOUT.contains("National Science Foundation"));
    }
}
