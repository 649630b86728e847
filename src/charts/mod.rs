//! Chart Builder
//!
//! Turns tables and aggregation results into declarative chart specs:
//!
//! - **spec**: `ChartSpec` and its parts (series, colors, layout)
//! - **builders**: line, bar, pie and choropleth builders
//! - **format**: thousands-separator formatting
//! - **summary**: the four headline counters
//!
//! # Example
//!
//! ```rust
//! use covidash::aggregate::aggregate;
//! use covidash::charts::build_pie;
//! use covidash::dataset::{CaseRecord, MetricName, RegionFilter, RegionTable};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
//! let table = RegionTable::from_records(vec![
//!     CaseRecord::new(date, "USA", "United States").new_cases(300),
//!     CaseRecord::new(date, "IND", "India").new_cases(50),
//! ]);
//! let filter: RegionFilter = ["USA", "IND"].iter().map(|c| c.to_string()).collect();
//!
//! let pie = build_pie(&aggregate(&table, &filter, MetricName::NewCases));
//! assert_eq!(pie.series[0].sum(), 350);
//! ```

pub mod builders;
pub mod format;
pub mod spec;
pub mod summary;

pub use builders::{
    build_bar, build_choropleth, build_line, build_pie, COMPARISON_TITLE, LINE_TITLE,
    NEW_CASES_LABEL, TOTAL_DEATHS_LABEL, USA_MAP_TITLE, WORLD_MAP_TITLE,
};
pub use format::format_thousands;
pub use spec::{
    ChartKind, ChartSpec, ColorMapping, ColorScale, Layout, MapScope, Margin, Point, Series,
    SeriesColor,
};
pub use summary::{Counter, Summary};
