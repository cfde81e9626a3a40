use std::cmp::Ordering;

use crate::data::model::{Dataset, Record};
use crate::selection::Selection;

// ---------------------------------------------------------------------------
// Table view: row listing for the highlighted countries at the chosen year
// ---------------------------------------------------------------------------

/// The derived row listing, or an explicit marker that no countries are
/// highlighted. `Populated` with zero rows ("highlights matched nothing") is
/// a different state from `Empty` ("nothing highlighted"): the former renders
/// an empty listing, the latter renders nothing at all.
#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    Empty,
    Populated(Vec<Record>),
}

impl TableView {
    pub fn rows(&self) -> Option<&[Record]> {
        match self {
            TableView::Empty => None,
            TableView::Populated(rows) => Some(rows),
        }
    }
}

/// Compute the row listing. Pure and total: filters the dataset to the
/// selected year and highlighted countries, keeping original record order and
/// every column.
pub fn table_view(dataset: &Dataset, selection: &Selection) -> TableView {
    if selection.highlighted.is_empty() {
        return TableView::Empty;
    }

    TableView::Populated(
        dataset
            .records
            .iter()
            .filter(|r| r.year == selection.year && selection.highlighted.contains(&r.country))
            .cloned()
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Client-side arrangement: sort and filter over the populated rows
// ---------------------------------------------------------------------------

/// Sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    Country,
    Indicator,
    Year,
    Value,
}

/// UI-side sort/filter state for the table region. Applied at render time
/// over a `Populated` listing; never mutates the view itself, so exporting
/// and re-rendering see the same arrangement.
#[derive(Debug, Clone, Default)]
pub struct TableControls {
    /// Active sort column and whether it is ascending.
    pub sort: Option<(TableColumn, bool)>,
    /// Case-insensitive substring match against every column.
    pub filter: String,
}

impl TableControls {
    /// Toggle sorting on a column: unsorted → ascending → descending.
    pub fn click_column(&mut self, column: TableColumn) {
        self.sort = match self.sort {
            Some((current, ascending)) if current == column => Some((column, !ascending)),
            _ => Some((column, true)),
        };
    }

    /// The displayed rows: filtered, then sorted. Row identity is preserved
    /// (references into the listing), so exports match the screen exactly.
    pub fn arrange<'a>(&self, rows: &'a [Record]) -> Vec<&'a Record> {
        let needle = self.filter.trim().to_lowercase();
        let mut out: Vec<&Record> = rows
            .iter()
            .filter(|r| needle.is_empty() || matches_filter(r, &needle))
            .collect();

        if let Some((column, ascending)) = self.sort {
            out.sort_by(|a, b| {
                let ord = compare(a, b, column);
                if ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        out
    }
}

fn matches_filter(record: &Record, needle: &str) -> bool {
    record.country.to_lowercase().contains(needle)
        || record.indicator.to_lowercase().contains(needle)
        || record.year.to_string().contains(needle)
        || record.value_text().to_lowercase().contains(needle)
}

fn compare(a: &Record, b: &Record, column: TableColumn) -> Ordering {
    match column {
        TableColumn::Country => a.country.cmp(&b.country),
        TableColumn::Indicator => a.indicator.cmp(&b.indicator),
        TableColumn::Year => a.year.cmp(&b.year),
        // Missing values sort before any number.
        TableColumn::Value => match (a.value, b.value) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x.total_cmp(&y),
        },
    }
}
