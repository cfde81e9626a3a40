use std::collections::BTreeSet;

use thiserror::Error;

use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Scale mode
// ---------------------------------------------------------------------------

/// Axis scale, chosen independently per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    #[default]
    Linear,
    Log,
}

impl ScaleMode {
    pub const ALL: [ScaleMode; 2] = [ScaleMode::Linear, ScaleMode::Log];

    pub fn label(self) -> &'static str {
        match self {
            ScaleMode::Linear => "Linear",
            ScaleMode::Log => "Log",
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A year outside the dataset's bounds was requested. Recovered locally by
/// the caller (the previous year is kept); never reaches the views.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("year {year} outside dataset range {min}..={max}")]
pub struct OutOfRangeError {
    pub year: i32,
    pub min: i32,
    pub max: i32,
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The user-chosen filter/axis/highlight state.
///
/// Each setter validates only its own field; no cross-field invariants exist.
/// The x and y indicators may be equal, or unset, and the highlight set may
/// name countries the dataset has never seen — the view computations are
/// total over any such Selection and degrade to empty output instead of
/// failing.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub x_indicator: Option<String>,
    pub y_indicator: Option<String>,
    pub year: i32,
    pub x_scale: ScaleMode,
    pub y_scale: ScaleMode,
    pub highlighted: BTreeSet<String>,
}

impl Selection {
    /// Defaults for a freshly loaded dataset: both indicators unset, linear
    /// axes, no highlights, year at the upper bound.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        Selection {
            x_indicator: None,
            y_indicator: None,
            year: dataset.year_bounds.1,
            x_scale: ScaleMode::default(),
            y_scale: ScaleMode::default(),
            highlighted: BTreeSet::new(),
        }
    }

    /// Unknown indicator names are tolerated; they match nothing downstream.
    pub fn set_x_indicator(&mut self, indicator: Option<String>) {
        self.x_indicator = indicator;
    }

    pub fn set_y_indicator(&mut self, indicator: Option<String>) {
        self.y_indicator = indicator;
    }

    /// Rejects years outside `bounds`; the current year is kept on error.
    pub fn set_year(&mut self, year: i32, bounds: (i32, i32)) -> Result<(), OutOfRangeError> {
        let (min, max) = bounds;
        if year < min || year > max {
            return Err(OutOfRangeError { year, min, max });
        }
        self.year = year;
        Ok(())
    }

    pub fn set_x_scale(&mut self, scale: ScaleMode) {
        self.x_scale = scale;
    }

    pub fn set_y_scale(&mut self, scale: ScaleMode) {
        self.y_scale = scale;
    }

    /// Replace the highlight set. Unknown country names are kept as-is.
    pub fn set_highlighted(&mut self, countries: BTreeSet<String>) {
        self.highlighted = countries;
    }

    /// Add or remove a single country from the highlight set.
    pub fn toggle_country(&mut self, country: &str) {
        if !self.highlighted.remove(country) {
            self.highlighted.insert(country.to_string());
        }
    }

    pub fn clear_highlighted(&mut self) {
        self.highlighted.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            Record {
                country: "A".into(),
                indicator: "GDP".into(),
                year: 1990,
                value: Some(1.0),
            },
            Record {
                country: "A".into(),
                indicator: "GDP".into(),
                year: 2020,
                value: Some(2.0),
            },
        ])
        .unwrap()
    }

    #[test]
    fn defaults_follow_dataset_bounds() {
        let sel = Selection::for_dataset(&dataset());
        assert_eq!(sel.year, 2020);
        assert_eq!(sel.x_indicator, None);
        assert_eq!(sel.x_scale, ScaleMode::Linear);
        assert!(sel.highlighted.is_empty());
    }

    #[test]
    fn year_setter_rejects_out_of_range() {
        let ds = dataset();
        let mut sel = Selection::for_dataset(&ds);
        let err = sel.set_year(1985, ds.year_bounds).unwrap_err();
        assert_eq!(
            err,
            OutOfRangeError {
                year: 1985,
                min: 1990,
                max: 2020
            }
        );
        // Rejected setter leaves the previous year in place.
        assert_eq!(sel.year, 2020);

        sel.set_year(1990, ds.year_bounds).unwrap();
        assert_eq!(sel.year, 1990);
    }

    #[test]
    fn unknown_countries_are_tolerated() {
        let mut sel = Selection::for_dataset(&dataset());
        sel.toggle_country("Atlantis");
        assert!(sel.highlighted.contains("Atlantis"));
        sel.toggle_country("Atlantis");
        assert!(sel.highlighted.is_empty());
    }
}
