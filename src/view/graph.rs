use crate::data::model::{Dataset, Record};
use crate::selection::{ScaleMode, Selection};

// ---------------------------------------------------------------------------
// Graph view: two scatter series derived from (Dataset, Selection)
// ---------------------------------------------------------------------------

/// One scatter marker. Either coordinate may be absent (missing value, unset
/// indicator, or a shorter subsequence on that axis); the renderer skips
/// incomplete points. The country label comes from the y-axis subsequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub country: Option<String>,
}

/// Axis metadata for the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    /// Indicator name, or empty when no indicator is selected.
    pub title: String,
    pub scale: ScaleMode,
}

/// The derived scatter comparison: records not highlighted vs. highlighted.
/// Recomputed from scratch on every selection change, never stored across
/// recomputations.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphView {
    pub rest: Vec<SeriesPoint>,
    pub highlighted: Vec<SeriesPoint>,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
}

/// Compute the scatter comparison. Pure and total: any syntactically valid
/// Selection yields a GraphView, degraded selections just produce empty
/// series.
pub fn graph_view(dataset: &Dataset, selection: &Selection) -> GraphView {
    let (highlighted, rest) = partition_at_year(dataset, selection);

    GraphView {
        rest: series_points(&rest, selection),
        highlighted: series_points(&highlighted, selection),
        x_axis: AxisSpec {
            title: selection.x_indicator.clone().unwrap_or_default(),
            scale: selection.x_scale,
        },
        y_axis: AxisSpec {
            title: selection.y_indicator.clone().unwrap_or_default(),
            scale: selection.y_scale,
        },
    }
}

/// Split the selected year's records into (highlighted, rest) by highlight
/// membership, original order preserved within each side. The two sides are
/// disjoint and their union is exactly the year-filtered dataset.
pub fn partition_at_year<'a>(
    dataset: &'a Dataset,
    selection: &Selection,
) -> (Vec<&'a Record>, Vec<&'a Record>) {
    dataset
        .records
        .iter()
        .filter(|r| r.year == selection.year)
        .partition(|r| selection.highlighted.contains(&r.country))
}

/// Build one series from a partition.
///
/// The x and y subsequences are extracted independently per axis and paired
/// by position, NOT joined per country: if a country is missing one of the
/// two indicators at the selected year, every later pair in the partition
/// shifts and the label can attach to the wrong country's point. Callers
/// depend on this exact pairing; do not change it to a keyed join without a
/// product decision.
fn series_points(partition: &[&Record], selection: &Selection) -> Vec<SeriesPoint> {
    let xs = axis_subsequence(partition, selection.x_indicator.as_deref());
    let ys = axis_subsequence(partition, selection.y_indicator.as_deref());

    let len = xs.len().max(ys.len());
    (0..len)
        .map(|i| SeriesPoint {
            x: xs.get(i).and_then(|r| r.value),
            y: ys.get(i).and_then(|r| r.value),
            country: ys.get(i).map(|r| r.country.clone()),
        })
        .collect()
}

/// Records of the partition matching the axis indicator, original relative
/// order preserved. Empty when the indicator is unset.
fn axis_subsequence<'a>(partition: &[&'a Record], indicator: Option<&str>) -> Vec<&'a Record> {
    match indicator {
        None => Vec::new(),
        Some(name) => partition
            .iter()
            .filter(|r| r.indicator == name)
            .copied()
            .collect(),
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

    /// A / B with GDP and Pop at year 2000.
    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            rec("A", "GDP", 2000, 10.0),
            rec("A", "Pop", 2000, 5.0),
            rec("B", "GDP", 2000, 20.0),
            rec("B", "Pop", 2000, 8.0),
        ])
        .unwrap()
    }

    fn selection(ds: &Dataset, highlighted: &[&str]) -> Selection {
        let mut sel = Selection::for_dataset(ds);
        sel.set_x_indicator(Some("GDP".into()));
        sel.set_y_indicator(Some("Pop".into()));
        sel.set_highlighted(highlighted.iter().map(|s| s.to_string()).collect());
        sel
    }

    #[test]
    fn highlighted_and_rest_split_the_year() {
        let ds = dataset();
        let view = graph_view(&ds, &selection(&ds, &["A"]));

        assert_eq!(view.highlighted.len(), 1);
        assert_eq!(view.highlighted[0].x, Some(10.0));
        assert_eq!(view.highlighted[0].y, Some(5.0));
        assert_eq!(view.highlighted[0].country.as_deref(), Some("A"));

        assert_eq!(view.rest.len(), 1);
        assert_eq!(view.rest[0].x, Some(20.0));
        assert_eq!(view.rest[0].y, Some(8.0));
        assert_eq!(view.rest[0].country.as_deref(), Some("B"));
    }

    #[test]
    fn no_highlights_puts_everything_in_rest() {
        let ds = dataset();
        let view = graph_view(&ds, &selection(&ds, &[]));
        assert!(view.highlighted.is_empty());
        assert_eq!(view.rest.len(), 2);
    }

    #[test]
    fn unset_x_indicator_empties_x_for_both_series() {
        let ds = dataset();
        let mut sel = selection(&ds, &["A"]);
        sel.set_x_indicator(None);
        let view = graph_view(&ds, &sel);

        assert!(view.rest.iter().all(|p| p.x.is_none()));
        assert!(view.highlighted.iter().all(|p| p.x.is_none()));
        // y side still drives points and labels.
        assert_eq!(view.highlighted[0].y, Some(5.0));
        assert_eq!(view.x_axis.title, "");
    }

    #[test]
    fn scale_modes_map_one_to_one() {
        let ds = dataset();
        let mut sel = selection(&ds, &[]);
        sel.set_x_scale(ScaleMode::Log);
        let view = graph_view(&ds, &sel);
        assert_eq!(view.x_axis.scale, ScaleMode::Log);
        assert_eq!(view.y_axis.scale, ScaleMode::Linear);

        sel.set_y_scale(ScaleMode::Log);
        sel.set_x_scale(ScaleMode::Linear);
        let view = graph_view(&ds, &sel);
        assert_eq!(view.x_axis.scale, ScaleMode::Linear);
        assert_eq!(view.y_axis.scale, ScaleMode::Log);
    }

    #[test]
    fn axis_titles_copy_the_indicator_names() {
        let ds = dataset();
        let view = graph_view(&ds, &selection(&ds, &[]));
        assert_eq!(view.x_axis.title, "GDP");
        assert_eq!(view.y_axis.title, "Pop");
    }

    #[test]
    fn pairing_is_positional_not_keyed() {
        // B has no GDP row at 2000, so C's GDP value pairs with B's Pop value.
        let ds = Dataset::from_records(vec![
            rec("B", "Pop", 2000, 8.0),
            rec("C", "GDP", 2000, 30.0),
            rec("C", "Pop", 2000, 9.0),
        ])
        .unwrap();
        let view = graph_view(&ds, &selection(&ds, &[]));

        assert_eq!(view.rest.len(), 2);
        assert_eq!(view.rest[0].x, Some(30.0));
        assert_eq!(view.rest[0].y, Some(8.0));
        assert_eq!(view.rest[0].country.as_deref(), Some("B"));
        // The y subsequence is longer; the trailing point has no x.
        assert_eq!(view.rest[1].x, None);
        assert_eq!(view.rest[1].y, Some(9.0));
        assert_eq!(view.rest[1].country.as_deref(), Some("C"));
    }

    #[test]
    fn other_years_are_excluded() {
        let ds = Dataset::from_records(vec![
            rec("A", "GDP", 2000, 10.0),
            rec("A", "Pop", 2000, 5.0),
            rec("A", "GDP", 2010, 11.0),
            rec("A", "Pop", 2010, 6.0),
        ])
        .unwrap();
        let mut sel = selection(&ds, &[]);
        sel.set_year(2000, ds.year_bounds).unwrap();
        let view = graph_view(&ds, &sel);
        assert_eq!(view.rest.len(), 1);
        assert_eq!(view.rest[0].x, Some(10.0));
    }

    #[test]
    fn recomputation_is_idempotent() {
        let ds = dataset();
        let sel = selection(&ds, &["A"]);
        assert_eq!(graph_view(&ds, &sel), graph_view(&ds, &sel));
    }

    #[test]
    fn unknown_highlighted_country_matches_nothing() {
        let ds = dataset();
        let view = graph_view(&ds, &selection(&ds, &["Atlantis"]));
        assert!(view.highlighted.is_empty());
        assert_eq!(view.rest.len(), 2);
    }

    #[test]
    fn partitions_are_disjoint_and_cover_the_year() {
        let ds = Dataset::from_records(vec![
            rec("A", "GDP", 2000, 10.0),
            rec("B", "GDP", 2000, 20.0),
            rec("C", "GDP", 2000, 30.0),
            rec("A", "GDP", 2010, 11.0),
        ])
        .unwrap();
        for highlighted in [&[][..], &["A"][..], &["A", "C"][..], &["A", "B", "C"][..]] {
            let mut sel = selection(&ds, highlighted);
            sel.set_year(2000, ds.year_bounds).unwrap();
            let (hi, rest) = partition_at_year(&ds, &sel);

            let at_year: Vec<_> = ds.records.iter().filter(|r| r.year == 2000).collect();
            assert_eq!(hi.len() + rest.len(), at_year.len());
            for r in &at_year {
                let in_hi = hi.iter().any(|h| std::ptr::eq(*h, *r));
                let in_rest = rest.iter().any(|h| std::ptr::eq(*h, *r));
                assert!(in_hi != in_rest, "record must land on exactly one side");
            }
        }
    }

    #[test]
    fn missing_values_keep_their_slot() {
        let mut records = vec![rec("A", "GDP", 2000, 10.0), rec("A", "Pop", 2000, 5.0)];
        records[0].value = None;
        let ds = Dataset::from_records(records).unwrap();
        let view = graph_view(&ds, &selection(&ds, &[]));
        assert_eq!(view.rest.len(), 1);
        assert_eq!(view.rest[0].x, None);
        assert_eq!(view.rest[0].y, Some(5.0));
    }
}
