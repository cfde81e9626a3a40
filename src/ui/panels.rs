use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::selection::ScaleMode;
use crate::state::{AppState, SelectionChange};

// ---------------------------------------------------------------------------
// Left side panel – selection controls
// ---------------------------------------------------------------------------

/// Render the selection panel: highlighted countries, the two axis
/// indicators with their scale modes, and the year slider. Every edit is
/// routed through [`AppState::apply`].
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selection");
    ui.separator();

    // Keep a cheap handle so widget loops can borrow the dataset while the
    // state is being mutated.
    let dataset = state.dataset.clone();
    let mut changes: Vec<SelectionChange> = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Highlighted countries ----
            let n_selected = state.selection.highlighted.len();
            let header = format!("Countries  ({n_selected}/{})", dataset.countries.len());
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("countries")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            changes.push(SelectionChange::SetCountries(
                                dataset.countries.iter().cloned().collect(),
                            ));
                        }
                        if ui.small_button("None").clicked() {
                            changes.push(SelectionChange::ClearCountries);
                        }
                    });

                    for country in &dataset.countries {
                        let mut checked = state.selection.highlighted.contains(country);
                        if ui.checkbox(&mut checked, country).changed() {
                            changes.push(SelectionChange::ToggleCountry(country.clone()));
                        }
                    }
                });
            ui.separator();

            // ---- Axes ----
            axis_controls(
                ui,
                "X axis",
                &dataset.indicators,
                state.selection.x_indicator.as_deref(),
                state.selection.x_scale,
                &mut changes,
                SelectionChange::XIndicator,
                SelectionChange::XScale,
            );
            ui.separator();
            axis_controls(
                ui,
                "Y axis",
                &dataset.indicators,
                state.selection.y_indicator.as_deref(),
                state.selection.y_scale,
                &mut changes,
                SelectionChange::YIndicator,
                SelectionChange::YScale,
            );
            ui.separator();

            // ---- Year ----
            ui.strong("Year");
            let (min, max) = dataset.year_bounds;
            let mut year = state.selection.year;
            if ui
                .add(Slider::new(&mut year, min..=max).integer())
                .changed()
            {
                changes.push(SelectionChange::Year(year));
            }
            ui.label(format!("{} distinct years in {min}–{max}", dataset.years.len()));
        });

    for change in changes {
        state.apply(change);
    }
}

/// One axis block: indicator dropdown plus Linear/Log radio.
#[allow(clippy::too_many_arguments)]
fn axis_controls(
    ui: &mut Ui,
    title: &str,
    indicators: &[String],
    current: Option<&str>,
    scale: ScaleMode,
    changes: &mut Vec<SelectionChange>,
    indicator_change: fn(Option<String>) -> SelectionChange,
    scale_change: fn(ScaleMode) -> SelectionChange,
) {
    ui.strong(title);

    let selected_text = current.unwrap_or("(none)").to_string();
    egui::ComboBox::from_id_salt(title)
        .selected_text(selected_text)
        .width(ui.available_width() * 0.9)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), "(none)").clicked() {
                changes.push(indicator_change(None));
            }
            for indicator in indicators {
                let is_current = current == Some(indicator.as_str());
                if ui.selectable_label(is_current, indicator).clicked() {
                    changes.push(indicator_change(Some(indicator.clone())));
                }
            }
        });

    ui.horizontal(|ui: &mut Ui| {
        for mode in ScaleMode::ALL {
            if ui.radio(scale == mode, mode.label()).clicked() && scale != mode {
                changes.push(scale_change(mode));
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records, {} indicators, {} countries",
            state.dataset.len(),
            state.dataset.indicators.len(),
            state.dataset.countries.len()
        ));

        ui.separator();

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Let the user open another dataset. A failed load keeps the current
/// dataset and shows the error in the top bar.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open statistics table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.replace_dataset(dataset),
            Err(e) => {
                log::error!("failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
