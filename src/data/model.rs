use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Source column labels
// ---------------------------------------------------------------------------

/// Header labels of the long-format source table. These are also the labels
/// used for JSON input and CSV export.
pub const COL_COUNTRY: &str = "Country Name";
pub const COL_INDICATOR: &str = "Indicator Name";
pub const COL_YEAR: &str = "Year";
pub const COL_VALUE: &str = "Value";

/// All columns in display order.
pub const COLUMNS: [&str; 4] = [COL_COUNTRY, COL_INDICATOR, COL_YEAR, COL_VALUE];

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// One observation: a (country, indicator, year, value) data point.
///
/// The triple (country, indicator, year) is the natural key of the table, but
/// source files may repeat it; duplicates are kept verbatim and participate
/// in every downstream filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Country Name")]
    pub country: String,
    #[serde(rename = "Indicator Name")]
    pub indicator: String,
    #[serde(rename = "Year")]
    pub year: i32,
    /// Missing or unparsable values load as `None`.
    #[serde(rename = "Value", default)]
    pub value: Option<f64>,
}

impl Record {
    /// The value rendered the way it appears in the table region.
    pub fn value_text(&self) -> String {
        match self.value {
            Some(v) => format!("{v}"),
            None => String::new(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} / {}",
            self.country,
            self.indicator,
            self.year,
            self.value_text()
        )
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full loaded table with facets cached at load time. Immutable after
/// construction; shared by reference into the app state.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records, in source order.
    pub records: Vec<Record>,
    /// Distinct indicator names, first-occurrence order.
    pub indicators: Vec<String>,
    /// Distinct country names, first-occurrence order.
    pub countries: Vec<String>,
    /// Distinct years, ascending.
    pub years: Vec<i32>,
    /// (min, max) over all record years.
    pub year_bounds: (i32, i32),
}

impl Dataset {
    /// Build the facet caches from loaded records.
    ///
    /// Returns `None` for an empty record list: year bounds would be
    /// undefined, so loaders turn that case into a load error instead.
    pub fn from_records(records: Vec<Record>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mut indicators: Vec<String> = Vec::new();
        let mut countries: Vec<String> = Vec::new();
        let mut seen_indicators: BTreeSet<String> = BTreeSet::new();
        let mut seen_countries: BTreeSet<String> = BTreeSet::new();
        let mut years: BTreeSet<i32> = BTreeSet::new();

        for rec in &records {
            if seen_indicators.insert(rec.indicator.clone()) {
                indicators.push(rec.indicator.clone());
            }
            if seen_countries.insert(rec.country.clone()) {
                countries.push(rec.country.clone());
            }
            years.insert(rec.year);
        }

        let years: Vec<i32> = years.into_iter().collect();
        let year_bounds = (years[0], years[years.len() - 1]);

        Some(Dataset {
            records,
            indicators,
            countries,
            years,
            year_bounds,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty (never true for a constructed Dataset).
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(country: &str, indicator: &str, year: i32, value: f64) -> Record {
        Record {
            country: country.to_string(),
            indicator: indicator.to_string(),
            year,
            value: Some(value),
        }
    }

    #[test]
    fn facets_are_cached_in_stable_order() {
        let ds = Dataset::from_records(vec![
            rec("Norway", "Pop", 2010, 4.9),
            rec("Chile", "GDP", 1990, 2.0),
            rec("Norway", "GDP", 2000, 3.0),
            rec("Chile", "Pop", 2010, 13.1),
        ])
        .unwrap();

        // First-occurrence order, not alphabetical.
        assert_eq!(ds.indicators, vec!["Pop", "GDP"]);
        assert_eq!(ds.countries, vec!["Norway", "Chile"]);
        // Years ascending.
        assert_eq!(ds.years, vec![1990, 2000, 2010]);
        assert_eq!(ds.year_bounds, (1990, 2010));
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn empty_record_list_is_rejected() {
        assert!(Dataset::from_records(Vec::new()).is_none());
    }

    #[test]
    fn duplicate_keys_are_retained() {
        let ds = Dataset::from_records(vec![
            rec("A", "GDP", 2000, 1.0),
            rec("A", "GDP", 2000, 2.0),
        ])
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.indicators, vec!["GDP"]);
    }
}
