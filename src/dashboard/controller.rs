//! Reactive Controller
//!
//! One `DashboardController` per dashboard session. It owns that session's
//! selections and the last rendered spec of each interactive chart, and
//! borrows the shared dataset through an `Arc`.
//!
//! Each interactive chart is an independent two-state machine:
//!
//! ```text
//! Idle ──input event──▶ Recomputing ──spec built──▶ Idle (revision + 1)
//! ```
//!
//! The transition runs synchronously inside `handle`, so callers only ever
//! observe `Idle`. An event touches exactly one chart; the others keep their
//! last spec and revision.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::charts::{ChartSpec, Summary};
use crate::dataset::{Dataset, RegionFilter, RegionTable};

use super::defaults::{normalize_region, normalize_regions, DashboardDefaults};
use super::render;

/// Identifies one chart panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    Line,
    Bar,
    Pie,
    WorldMap,
    UsaMap,
}

/// A change to one dashboard control; `None` means nothing is selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    LineRegion(Option<String>),
    BarRegions(Option<Vec<String>>),
    PieRegions(Option<Vec<String>>),
}

impl InputEvent {
    /// The chart this event recomputes
    pub fn target(&self) -> ChartId {
        match self {
            InputEvent::LineRegion(_) => ChartId::Line,
            InputEvent::BarRegions(_) => ChartId::Bar,
            InputEvent::PieRegions(_) => ChartId::Pie,
        }
    }
}

/// Lifecycle state of one interactive chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Recomputing,
}

/// Last rendered spec of one chart plus its state machine
#[derive(Debug, Clone)]
pub struct ChartSlot {
    spec: ChartSpec,
    revision: u64,
    phase: Phase,
}

impl ChartSlot {
    fn new(spec: ChartSpec) -> Self {
        Self {
            spec,
            revision: 0,
            phase: Phase::Idle,
        }
    }

    fn recompute(&mut self, build: impl FnOnce() -> ChartSpec) {
        self.phase = Phase::Recomputing;
        self.spec = build();
        self.revision += 1;
        self.phase = Phase::Idle;
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn view(&self) -> ChartView {
        ChartView {
            revision: self.revision,
            spec: self.spec.clone(),
        }
    }
}

/// A chart spec tagged with the revision that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub revision: u64,
    pub spec: ChartSpec,
}

/// The single chart an input event changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartUpdate {
    pub chart: ChartId,
    pub revision: u64,
    pub spec: ChartSpec,
}

/// Current value of every control in one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub line_region: String,
    pub bar_regions: RegionFilter,
    pub pie_regions: RegionFilter,
}

impl SelectionState {
    pub fn initial(defaults: &DashboardDefaults) -> Self {
        Self {
            line_region: defaults.line_region.clone(),
            bar_regions: defaults.initial_bar_filter(),
            pie_regions: defaults.initial_pie_filter(),
        }
    }
}

/// Choices offered by the dropdowns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownOptions {
    /// Region display names for the line chart control
    pub region_names: Vec<String>,
    /// Region codes for the bar and pie chart controls
    pub region_codes: Vec<String>,
}

impl DropdownOptions {
    pub fn from_table(table: &RegionTable) -> Self {
        Self {
            region_names: table.region_names(),
            region_codes: table.region_codes(),
        }
    }
}

/// All five charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub line: ChartView,
    pub bar: ChartView,
    pub pie: ChartView,
    pub world_map: ChartView,
    pub usa_map: ChartView,
}

/// Everything a client needs to draw the full page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub charts: DashboardCharts,
    pub summary: Summary,
    pub options: DropdownOptions,
    pub selection: SelectionState,
}

/// Per-session reactive controller
pub struct DashboardController {
    dataset: Arc<Dataset>,
    defaults: Arc<DashboardDefaults>,
    selection: SelectionState,
    line: ChartSlot,
    bar: ChartSlot,
    pie: ChartSlot,
}

impl DashboardController {
    /// Create a controller and render the initial selections
    pub fn new(dataset: Arc<Dataset>, defaults: Arc<DashboardDefaults>) -> Self {
        let selection = SelectionState::initial(&defaults);
        let line = ChartSlot::new(render::line_chart(&dataset, &selection.line_region));
        let bar = ChartSlot::new(render::bar_chart(&dataset, &selection.bar_regions));
        let pie = ChartSlot::new(render::pie_chart(&dataset, &selection.pie_regions));

        Self {
            dataset,
            defaults,
            selection,
            line,
            bar,
            pie,
        }
    }

    /// Apply one input event and return the recomputed chart
    pub fn handle(&mut self, event: InputEvent) -> ChartUpdate {
        let chart = event.target();
        let dataset = &self.dataset;

        let slot = match event {
            InputEvent::LineRegion(region) => {
                let region = normalize_region(region, &self.defaults.line_region);
                self.line.recompute(|| render::line_chart(dataset, &region));
                self.selection.line_region = region;
                &self.line
            }
            InputEvent::BarRegions(regions) => {
                let filter = normalize_regions(regions, &self.defaults.fallback_filter());
                self.bar.recompute(|| render::bar_chart(dataset, &filter));
                self.selection.bar_regions = filter;
                &self.bar
            }
            InputEvent::PieRegions(regions) => {
                let filter = normalize_regions(regions, &self.defaults.fallback_filter());
                self.pie.recompute(|| render::pie_chart(dataset, &filter));
                self.selection.pie_regions = filter;
                &self.pie
            }
        };

        tracing::debug!(
            chart = ?chart,
            revision = slot.revision(),
            points = slot.spec().point_count(),
            "Chart recomputed"
        );

        ChartUpdate {
            chart,
            revision: slot.revision(),
            spec: slot.spec().clone(),
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Slot of an interactive chart; the maps have none
    pub fn slot(&self, chart: ChartId) -> Option<&ChartSlot> {
        match chart {
            ChartId::Line => Some(&self.line),
            ChartId::Bar => Some(&self.bar),
            ChartId::Pie => Some(&self.pie),
            ChartId::WorldMap | ChartId::UsaMap => None,
        }
    }

    /// Full page: interactive charts at their current revision, plus the
    /// maps, counters and dropdown options
    pub fn view(&self) -> DashboardView {
        let dataset = &self.dataset;
        DashboardView {
            charts: DashboardCharts {
                line: self.line.view(),
                bar: self.bar.view(),
                pie: self.pie.view(),
                world_map: ChartSlot::new(render::world_map(dataset)).view(),
                usa_map: ChartSlot::new(render::usa_map(dataset)).view(),
            },
            summary: Summary::compute(dataset),
            options: DropdownOptions::from_table(&dataset.cases),
            selection: self.selection.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::charts::{build_bar, NEW_CASES_LABEL};
    use crate::dashboard::defaults::DEFAULT_REGION_FILTER;
    use crate::dataset::{
        CaseRecord, MetricName, StateCodeLookup, StateRecord, StateTable,
    };
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, d).unwrap()
    }

    fn dataset() -> Arc<Dataset> {
        let row = |d: u32, code: &str, name: &str, cases: i64| {
            CaseRecord::new(day(d), code, name)
                .continent("Somewhere")
                .new_cases(cases)
                .total_deaths(d as i64)
        };
        Arc::new(Dataset::new(
            RegionTable::from_records(vec![
                row(1, "USA", "United States", 100),
                row(2, "USA", "United States", 200),
                row(1, "IND", "India", 50),
                row(1, "MEX", "Mexico", 10),
                row(2, "MEX", "Mexico", 10),
                row(3, "MEX", "Mexico", 10),
                CaseRecord::new(day(1), "OWID_WRL", "World").new_cases(380),
            ]),
            StateTable::from_records(vec![
                StateRecord::new("Texas", 3000, 40),
                StateRecord::new("Foo", 10, 1),
            ]),
            StateCodeLookup::from_pairs([("Texas", "TX")]),
        ))
    }

    fn controller() -> DashboardController {
        DashboardController::new(dataset(), Arc::new(DashboardDefaults::default()))
    }

    fn codes(list: &[&str]) -> Option<Vec<String>> {
        Some(list.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_initial_selection_and_revisions() {
        let ctl = controller();

        assert_eq!(ctl.selection().line_region, "United States");
        assert_eq!(ctl.selection().pie_regions.len(), 3);
        for chart in [ChartId::Line, ChartId::Bar, ChartId::Pie] {
            let slot = ctl.slot(chart).unwrap();
            assert_eq!(slot.revision(), 0);
            assert_eq!(slot.phase(), Phase::Idle);
        }
        assert!(ctl.slot(ChartId::WorldMap).is_none());
    }

    #[test]
    fn test_pie_event_scenario() {
        let mut ctl = controller();

        let update = ctl.handle(InputEvent::PieRegions(codes(&["USA", "IND", "MEX"])));

        assert_eq!(update.chart, ChartId::Pie);
        assert_eq!(update.revision, 1);
        let slices = &update.spec.series[0];
        assert_eq!(slices.points.len(), 3);
        assert_eq!(slices.sum(), 380);
    }

    #[test]
    fn test_empty_selection_matches_default_filter() {
        let data = dataset();
        let default_filter: RegionFilter =
            DEFAULT_REGION_FILTER.iter().map(|c| c.to_string()).collect();
        let expected = build_bar(&aggregate(&data.cases, &default_filter, MetricName::NewCases));

        let mut ctl = DashboardController::new(Arc::clone(&data), Arc::new(DashboardDefaults::default()));
        let from_empty = ctl.handle(InputEvent::BarRegions(Some(vec![])));
        let from_absent = ctl.handle(InputEvent::BarRegions(None));

        assert_eq!(from_empty.spec, expected);
        assert_eq!(from_absent.spec, expected);
        assert_eq!(ctl.selection().bar_regions, default_filter);
        assert_eq!(from_absent.revision, 2);
    }

    #[test]
    fn test_events_do_not_touch_other_charts() {
        let mut ctl = controller();
        let line_before = ctl.slot(ChartId::Line).unwrap().spec().clone();
        let pie_before = ctl.slot(ChartId::Pie).unwrap().spec().clone();

        ctl.handle(InputEvent::BarRegions(codes(&["MEX"])));

        assert_eq!(ctl.slot(ChartId::Bar).unwrap().revision(), 1);
        assert_eq!(ctl.slot(ChartId::Line).unwrap().revision(), 0);
        assert_eq!(ctl.slot(ChartId::Pie).unwrap().revision(), 0);
        assert_eq!(ctl.slot(ChartId::Line).unwrap().spec(), &line_before);
        assert_eq!(ctl.slot(ChartId::Pie).unwrap().spec(), &pie_before);
        assert_eq!(ctl.selection().pie_regions.len(), 3);
    }

    #[test]
    fn test_line_event_switches_region_and_falls_back() {
        let mut ctl = controller();

        let update = ctl.handle(InputEvent::LineRegion(Some("Mexico".to_string())));
        assert_eq!(update.chart, ChartId::Line);
        assert_eq!(update.spec.series(NEW_CASES_LABEL).unwrap().points.len(), 3);
        assert_eq!(ctl.selection().line_region, "Mexico");

        let update = ctl.handle(InputEvent::LineRegion(None));
        assert_eq!(update.spec.series(NEW_CASES_LABEL).unwrap().points.len(), 2);
        assert_eq!(ctl.selection().line_region, "United States");
        assert_eq!(ctl.slot(ChartId::Line).unwrap().phase(), Phase::Idle);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let data = dataset();
        let defaults = Arc::new(DashboardDefaults::default());
        let mut first = DashboardController::new(Arc::clone(&data), Arc::clone(&defaults));
        let second = DashboardController::new(Arc::clone(&data), Arc::clone(&defaults));

        first.handle(InputEvent::PieRegions(codes(&["IND"])));

        assert_eq!(first.selection().pie_regions.len(), 1);
        assert_eq!(second.selection().pie_regions.len(), 3);
        assert_eq!(second.slot(ChartId::Pie).unwrap().revision(), 0);
    }

    #[test]
    fn test_view_contains_every_panel() {
        let mut ctl = controller();
        ctl.handle(InputEvent::LineRegion(Some("India".to_string())));

        let view = ctl.view();

        assert_eq!(view.charts.line.revision, 1);
        assert_eq!(view.charts.world_map.spec.point_count(), 3);
        assert_eq!(view.charts.usa_map.spec.point_count(), 1);
        assert_eq!(view.summary.total_cases.formatted, "760");
        assert_eq!(view.options.region_names.len(), 4);
        assert_eq!(view.selection.line_region, "India");
    }
}
