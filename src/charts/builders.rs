//! Chart builders
//!
//! Pure functions from tables or aggregation results to `ChartSpec`s.
//! Point order always follows the input order (table rows for the line
//! chart, key order for everything built from an `AggregationResult`).

use crate::aggregate::AggregationResult;
use crate::dataset::RegionTable;

use super::spec::{
    ChartKind, ChartSpec, ColorMapping, ColorScale, Layout, MapScope, Margin, Point, Series,
    SeriesColor, CATEGORY_PALETTE,
};

/// Display label of the daily cases series
pub const NEW_CASES_LABEL: &str = "New Cases";
/// Display label of the cumulative deaths series
pub const TOTAL_DEATHS_LABEL: &str = "Total Deaths";

pub const LINE_TITLE: &str = "Daily COVID-19 Cases/Cumulative Deaths";
pub const COMPARISON_TITLE: &str = "Total COVID-19 Cases Global Comparison";
pub const WORLD_MAP_TITLE: &str = "Worldwide COVID-19 Cases";
pub const USA_MAP_TITLE: &str = "USA COVID-19 Cases";

const NEW_CASES_COLOR: &str = "gold";
const TOTAL_DEATHS_COLOR: &str = "silver";
const PIE_HOLE: f64 = 0.5;

/// Daily new cases and cumulative deaths for one region, aligned by date
pub fn build_line(table: &RegionTable, region_name: &str) -> ChartSpec {
    let mut new_cases = Series::new(NEW_CASES_LABEL);
    let mut total_deaths = Series::new(TOTAL_DEATHS_LABEL);

    for row in table.rows_for_name(region_name) {
        let date = row.date.format("%Y-%m-%d").to_string();
        new_cases.points.push(Point::new(date.clone(), row.new_cases));
        total_deaths.points.push(Point::new(date, row.total_deaths));
    }

    ChartSpec {
        kind: ChartKind::Line,
        title: LINE_TITLE.to_string(),
        series: vec![new_cases, total_deaths],
        colors: ColorMapping::Discrete {
            colors: vec![
                SeriesColor::new(NEW_CASES_LABEL, NEW_CASES_COLOR),
                SeriesColor::new(TOTAL_DEATHS_LABEL, TOTAL_DEATHS_COLOR),
            ],
        },
        layout: Layout {
            x_axis_title: Some("date".to_string()),
            y_axis_title: Some("Cases".to_string()),
            ..Layout::default()
        },
    }
}

/// One bar per region, colored by region
pub fn build_bar(agg: &AggregationResult) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: COMPARISON_TITLE.to_string(),
        series: vec![category_series(agg)],
        colors: category_colors(agg),
        layout: Layout {
            x_axis_title: Some("iso_code".to_string()),
            y_axis_title: Some(agg.metric().to_string()),
            ..Layout::default()
        },
    }
}

/// One donut slice per region
pub fn build_pie(agg: &AggregationResult) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Pie { hole: PIE_HOLE },
        title: COMPARISON_TITLE.to_string(),
        series: vec![category_series(agg)],
        colors: category_colors(agg),
        layout: Layout::default(),
    }
}

/// Regions shaded by value on a world or US map
pub fn build_choropleth(agg: &AggregationResult, scope: MapScope) -> ChartSpec {
    let (title, scale) = match scope {
        MapScope::Global => (WORLD_MAP_TITLE, ColorScale::Plasma),
        MapScope::Usa => (USA_MAP_TITLE, ColorScale::Jet),
    };

    let mut series = Series::new(agg.metric().as_str());
    series.points = agg
        .iter()
        .map(|(code, value)| Point::new(code, Some(value)).hover(agg.label(code)))
        .collect();

    ChartSpec {
        kind: ChartKind::Choropleth {
            scope,
            location_mode: scope.location_mode().to_string(),
        },
        title: title.to_string(),
        series: vec![series],
        colors: ColorMapping::Continuous { scale },
        layout: Layout {
            margin: Some(Margin::ZERO),
            ..Layout::default()
        },
    }
}

fn category_series(agg: &AggregationResult) -> Series {
    let mut series = Series::new(agg.metric().as_str());
    series.points = agg
        .iter()
        .map(|(code, value)| Point::new(code, Some(value)))
        .collect();
    series
}

fn category_colors(agg: &AggregationResult) -> ColorMapping {
    let colors = agg
        .codes()
        .zip(CATEGORY_PALETTE.iter().cycle())
        .map(|(code, color)| SeriesColor::new(code, *color))
        .collect();
    ColorMapping::Discrete { colors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, join_state_codes};
    use crate::dataset::{
        CaseRecord, MetricName, RegionFilter, StateCodeLookup, StateRecord, StateTable,
    };
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, d).unwrap()
    }

    fn table() -> RegionTable {
        let usa = |d: u32, n: i64| {
            CaseRecord::new(day(d), "USA", "United States")
                .new_cases(n)
                .total_deaths(d as i64)
        };
        let mex = |d: u32| CaseRecord::new(day(d), "MEX", "Mexico").new_cases(10);
        RegionTable::from_records(vec![
            usa(1, 100),
            CaseRecord::new(day(1), "IND", "India").new_cases(50),
            mex(1),
            usa(2, 200),
            mex(2),
            mex(3),
            CaseRecord::new(day(3), "USA", "United States"),
        ])
    }

    fn comparison() -> AggregationResult {
        let filter: RegionFilter = ["USA", "IND", "MEX"].iter().map(|c| c.to_string()).collect();
        aggregate(&table(), &filter, MetricName::NewCases)
    }

    #[test]
    fn test_line_series_are_renamed_and_aligned() {
        let spec = build_line(&table(), "United States");

        assert_eq!(spec.kind, ChartKind::Line);
        let labels: Vec<_> = spec.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["New Cases", "Total Deaths"]);

        let cases = spec.series(NEW_CASES_LABEL).unwrap();
        let deaths = spec.series(TOTAL_DEATHS_LABEL).unwrap();
        assert_eq!(cases.points.len(), 3);
        assert!(cases.xs().eq(deaths.xs()));
        assert_eq!(
            cases.xs().collect::<Vec<_>>(),
            vec!["2021-03-01", "2021-03-02", "2021-03-03"]
        );
    }

    #[test]
    fn test_line_title() {
        assert_eq!(LINE_TITLE, "Daily COVID-19 Cases/Cumulative Deaths");
        assert_eq!(build_line(&table(), "United States").title, LINE_TITLE);
    }

    #[test]
    fn test_line_blank_cells_are_gaps() {
        let spec = build_line(&table(), "United States");
        let cases = spec.series(NEW_CASES_LABEL).unwrap();
        assert_eq!(cases.points[2].y, None);
        assert_eq!(cases.sum(), 300);
    }

    #[test]
    fn test_line_unknown_region_has_empty_series() {
        let spec = build_line(&table(), "Atlantis");
        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.point_count(), 0);
    }

    #[test]
    fn test_bar_and_pie_have_one_point_per_key() {
        let agg = comparison();
        let bar = build_bar(&agg);
        let pie = build_pie(&agg);

        assert_eq!(bar.point_count(), agg.len());
        assert_eq!(pie.point_count(), agg.len());
        assert!(bar.series[0].xs().eq(agg.codes()));
        assert!(pie.series[0].xs().eq(agg.codes()));
    }

    #[test]
    fn test_pie_scenario_sums_to_380() {
        let pie = build_pie(&comparison());

        assert_eq!(pie.kind, ChartKind::Pie { hole: 0.5 });
        assert_eq!(pie.series[0].points.len(), 3);
        assert_eq!(pie.series[0].sum(), 380);
    }

    #[test]
    fn test_bar_colors_follow_key_order() {
        let bar = build_bar(&comparison());
        match bar.colors {
            ColorMapping::Discrete { colors } => {
                let labels: Vec<_> = colors.iter().map(|c| c.label.as_str()).collect();
                assert_eq!(labels, vec!["IND", "MEX", "USA"]);
                assert_eq!(colors[0].color, CATEGORY_PALETTE[0]);
            }
            other => panic!("Expected discrete colors, got {:?}", other),
        }
    }

    #[test]
    fn test_repeated_builds_are_identical() {
        assert_eq!(build_bar(&comparison()), build_bar(&comparison()));
        assert_eq!(
            build_line(&table(), "Mexico"),
            build_line(&table(), "Mexico")
        );
    }

    #[test]
    fn test_usa_choropleth_drops_unmapped_state() {
        let states = StateTable::from_records(vec![
            StateRecord::new("Texas", 3000, 40),
            StateRecord::new("Foo", 999, 9),
        ]);
        let lookup = StateCodeLookup::from_pairs([("Texas", "TX")]);
        let agg = join_state_codes(&states, &lookup, MetricName::TotalCases);

        let map = build_choropleth(&agg, MapScope::Usa);

        assert_eq!(map.title, USA_MAP_TITLE);
        assert_eq!(map.point_count(), 1);
        let point = &map.series[0].points[0];
        assert_eq!(point.x, "TX");
        assert_eq!(point.hover.as_deref(), Some("Texas"));
        assert!(!map.series[0].xs().any(|x| x == "Foo"));
        assert_eq!(
            map.kind,
            ChartKind::Choropleth {
                scope: MapScope::Usa,
                location_mode: "USA-states".to_string(),
            }
        );
    }

    #[test]
    fn test_global_choropleth_uses_codes_as_hover() {
        let map = build_choropleth(&comparison(), MapScope::Global);

        assert_eq!(map.colors, ColorMapping::Continuous { scale: ColorScale::Plasma });
        assert_eq!(map.layout.margin, Some(Margin::ZERO));
        assert_eq!(map.series[0].points[0].hover.as_deref(), Some("IND"));
    }
}
