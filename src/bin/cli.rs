//! Covidash CLI
//!
//! Offline inspection of the dashboard datasets:
//! - Print the headline counters
//! - Aggregate a metric over region codes
//! - Dump a chart spec as JSON
//! - List dropdown options
//! - Generate a config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use covidash::aggregate::aggregate;
use covidash::charts::Summary;
use covidash::config::{generate_default_config, Config};
use covidash::dashboard::{normalize_region, normalize_regions, render, DropdownOptions};
use covidash::dataset::{Dataset, MetricName, RegionFilter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "covidash-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect the COVID-19 dashboard datasets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the CSV files, overrides the config
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ChartArg {
    Line,
    Bar,
    Pie,
    WorldMap,
    UsaMap,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the four headline counters and dataset coverage
    Summary,

    /// Sum a metric per region code
    Aggregate {
        /// Region codes (comma-separated or multiple args)
        regions: Vec<String>,
        /// Metric: new_cases, new_deaths, total_cases, total_deaths
        #[arg(short, long, default_value = "new_cases")]
        metric: String,
    },

    /// Print a chart spec as JSON
    Chart {
        #[arg(value_enum)]
        chart: ChartArg,
        /// Region name for the line chart
        #[arg(short, long)]
        region: Option<String>,
        /// Region codes for the bar and pie charts
        #[arg(short = 'R', long, value_delimiter = ',')]
        regions: Vec<String>,
    },

    /// List dropdown options
    Regions {
        /// List display names instead of codes
        #[arg(long)]
        names: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let load = || -> anyhow::Result<(Config, Dataset)> {
        let mut config = match &cli.config {
            Some(path) => Config::load_with_env(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => Config::load_default(),
        };
        if let Some(dir) = cli.data_dir.clone() {
            config.data.data_dir = dir;
        }
        let dataset = Dataset::load(&config.data.paths()).context("failed to load dataset")?;
        Ok((config, dataset))
    };

    match &cli.command {
        Commands::Summary => {
            let (_, dataset) = load()?;
            let summary = Summary::compute(&dataset);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
                OutputFormat::Table => {
                    println!("Covidash v{}", env!("CARGO_PKG_VERSION"));
                    println!("{}", dataset.stats());
                    println!();
                    for counter in summary.counters() {
                        println!("{:<18} {:>16}", counter.label, counter.formatted);
                    }
                }
            }
        }

        Commands::Aggregate { regions, metric } => {
            let (_, dataset) = load()?;
            let metric: MetricName = metric.parse().map_err(anyhow::Error::msg)?;
            let filter: RegionFilter = regions
                .iter()
                .flat_map(|arg| arg.split(','))
                .map(|code| code.trim().to_string())
                .filter(|code| !code.is_empty())
                .collect();

            let result = aggregate(&dataset.cases, &filter, metric);

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Table => {
                    if result.is_empty() {
                        println!("No matching regions.");
                        return Ok(());
                    }
                    println!("{:<10} {:<30} {:>16}", "Code", "Region", metric.as_str());
                    println!("{}", "-".repeat(58));
                    for (code, value) in result.iter() {
                        println!("{:<10} {:<30} {:>16}", code, result.label(code), value);
                    }
                    println!("{}", "-".repeat(58));
                    println!("{:<41} {:>16}", "Total", result.total());
                }
            }
        }

        Commands::Chart {
            chart,
            region,
            regions,
        } => {
            let (config, dataset) = load()?;
            let defaults = &config.dashboard;
            let selection = (!regions.is_empty()).then(|| regions.clone());
            let spec = match chart {
                ChartArg::Line => {
                    let region = normalize_region(region.clone(), &defaults.line_region);
                    render::line_chart(&dataset, &region)
                }
                ChartArg::Bar => render::bar_chart(
                    &dataset,
                    &normalize_regions(selection, &defaults.fallback_filter()),
                ),
                ChartArg::Pie => render::pie_chart(
                    &dataset,
                    &normalize_regions(selection, &defaults.fallback_filter()),
                ),
                ChartArg::WorldMap => render::world_map(&dataset),
                ChartArg::UsaMap => render::usa_map(&dataset),
            };
            println!("{}", serde_json::to_string_pretty(&spec)?);
        }

        Commands::Regions { names } => {
            let (_, dataset) = load()?;
            let options = DropdownOptions::from_table(&dataset.cases);
            let list = if *names {
                options.region_names
            } else {
                options.region_codes
            };
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&list)?),
                OutputFormat::Table => {
                    for entry in &list {
                        println!("{}", entry);
                    }
                    println!();
                    println!("{} entries", list.len());
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}
