use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Record, COLUMNS};
use crate::state::AppState;
use crate::view::table::{TableColumn, TableView};

// ---------------------------------------------------------------------------
// Table region (bottom panel)
// ---------------------------------------------------------------------------

const SORTABLE: [TableColumn; 4] = [
    TableColumn::Country,
    TableColumn::Indicator,
    TableColumn::Year,
    TableColumn::Value,
];

/// Render the row listing for the highlighted countries. Renders nothing at
/// all when no countries are highlighted.
pub fn table_region(ui: &mut Ui, state: &mut AppState) {
    // Clone the listing so we can mutate state inside the widget closures.
    let rows: Vec<Record> = match &state.table {
        TableView::Empty => return,
        TableView::Populated(rows) => rows.clone(),
    };

    // ---- Controls: filter box + export ----
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Filter:");
        ui.text_edit_singleline(&mut state.table_controls.filter);
        if ui.button("Export CSV…").clicked() {
            let shown = state.table_controls.arrange(&rows);
            export_dialog(state, &shown);
        }
        ui.label(format!("{} rows", rows.len()));
    });
    ui.separator();

    let shown = state.table_controls.arrange(&rows);

    // ---- Rows ----
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder().at_least(200.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(100.0))
        .header(22.0, |mut header| {
            for (label, column) in COLUMNS.into_iter().zip(SORTABLE) {
                header.col(|ui| {
                    let text = header_text(state, label, column);
                    if ui.button(text).clicked() {
                        state.table_controls.click_column(column);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(20.0, shown.len(), |mut row| {
                let record = shown[row.index()];
                row.col(|ui| {
                    ui.label(&record.country);
                });
                row.col(|ui| {
                    ui.label(&record.indicator);
                });
                row.col(|ui| {
                    ui.label(record.year.to_string());
                });
                row.col(|ui| {
                    ui.label(record.value_text());
                });
            });
        });
}

fn header_text(state: &AppState, label: &str, column: TableColumn) -> RichText {
    let suffix = match state.table_controls.sort {
        Some((active, true)) if active == column => " ▲",
        Some((active, false)) if active == column => " ▼",
        _ => "",
    };
    RichText::new(format!("{label}{suffix}")).strong()
}

fn export_dialog(state: &mut AppState, shown: &[&Record]) {
    let file = rfd::FileDialog::new()
        .set_title("Export table rows")
        .set_file_name("indicators_export.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match crate::export::export_to_file(&path, shown) {
            Ok(()) => {
                log::info!("exported {} rows to {}", shown.len(), path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("export failed: {e:#}");
                state.status_message = Some(format!("Export error: {e:#}"));
            }
        }
    }
}
