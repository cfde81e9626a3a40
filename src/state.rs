use std::collections::BTreeSet;
use std::sync::Arc;

use crate::data::model::Dataset;
use crate::selection::{ScaleMode, Selection};
use crate::view::graph::{graph_view, GraphView};
use crate::view::table::{table_view, TableControls, TableView};

// ---------------------------------------------------------------------------
// Selection changes
// ---------------------------------------------------------------------------

/// One user edit to the selection. The UI emits these instead of poking the
/// Selection directly, so every accepted change goes through the same
/// recompute path.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionChange {
    XIndicator(Option<String>),
    YIndicator(Option<String>),
    Year(i32),
    XScale(ScaleMode),
    YScale(ScaleMode),
    ToggleCountry(String),
    SetCountries(BTreeSet<String>),
    ClearCountries,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is immutable and shared by reference; the derived views are
/// plain values replaced wholesale on every accepted change. There is no
/// memoization: both views recompute from scratch no matter which field
/// changed, which keeps them trivially in sync with the selection.
pub struct AppState {
    /// Loaded dataset, read-only for its whole lifetime.
    pub dataset: Arc<Dataset>,

    /// Current user selection.
    pub selection: Selection,

    /// Derived scatter comparison (replaced on every change).
    pub graph: GraphView,

    /// Derived row listing (replaced on every change).
    pub table: TableView,

    /// UI-side sort/filter state for the table region.
    pub table_controls: TableControls,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the initial state for a loaded dataset: default selection,
    /// both views computed once.
    pub fn new(dataset: Dataset) -> Self {
        let dataset = Arc::new(dataset);
        let selection = Selection::for_dataset(&dataset);
        let graph = graph_view(&dataset, &selection);
        let table = table_view(&dataset, &selection);
        AppState {
            dataset,
            selection,
            graph,
            table,
            table_controls: TableControls::default(),
            status_message: None,
        }
    }

    /// Swap in a newly loaded dataset (File → Open). The selection resets to
    /// the new dataset's defaults; stale highlights or indicators from the
    /// old dataset would otherwise silently match nothing.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        log::info!(
            "replacing dataset: {} records, {} indicators, {} countries",
            dataset.len(),
            dataset.indicators.len(),
            dataset.countries.len()
        );
        self.dataset = Arc::new(dataset);
        self.selection = Selection::for_dataset(&self.dataset);
        self.table_controls = TableControls::default();
        self.status_message = None;
        self.recompute();
    }

    /// Apply one selection change. On success both views are recomputed
    /// against the unchanged dataset; a rejected change (year out of range)
    /// leaves selection and views untouched and surfaces a status message.
    pub fn apply(&mut self, change: SelectionChange) {
        match change {
            SelectionChange::XIndicator(ind) => self.selection.set_x_indicator(ind),
            SelectionChange::YIndicator(ind) => self.selection.set_y_indicator(ind),
            SelectionChange::Year(year) => {
                if let Err(e) = self.selection.set_year(year, self.dataset.year_bounds) {
                    log::warn!("{e}");
                    self.status_message = Some(e.to_string());
                    return;
                }
            }
            SelectionChange::XScale(scale) => self.selection.set_x_scale(scale),
            SelectionChange::YScale(scale) => self.selection.set_y_scale(scale),
            SelectionChange::ToggleCountry(country) => self.selection.toggle_country(&country),
            SelectionChange::SetCountries(countries) => self.selection.set_highlighted(countries),
            SelectionChange::ClearCountries => self.selection.clear_highlighted(),
        }
        self.status_message = None;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.graph = graph_view(&self.dataset, &self.selection);
        self.table = table_view(&self.dataset, &self.selection);
    }
}
