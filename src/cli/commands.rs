use std::path::Path;

use chrono::NaiveDate;
use tracing::Level;

use crate::cli::args::{Cli, Commands, RangeArgs};
use crate::error::Result;
use crate::models::{BinCount, Dataset, DateRange, Measurement};
use crate::pipeline::{
    run_query, DashboardQuery, DashboardView, MeasurementSeries, ScatterSelection,
    StationSelection,
};
use crate::readers::ObservationReader;

pub fn run(cli: Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Commands::Overview { range } => {
            let dataset = load(&range.input)?;
            let query = build_query(&dataset, &range, None)?;
            let view = run_query(&dataset, &query)?;

            if range.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_range_banner(&query);
                println!("\nPollutants Overview");
                print_series_group(&view.pollutants);
                println!("\nWeather Overview");
                print_series_group(&view.weather);
            }
        }

        Commands::Station { range, station } => {
            let dataset = load(&range.input)?;
            let selection = StationSelection {
                station,
                scatter: None,
            };
            let query = build_query(&dataset, &range, Some(selection))?;
            let view = run_query(&dataset, &query)?;
            // station was set on the query, so the view carries it
            let Some(station_view) = view.station.as_ref() else {
                return Ok(());
            };

            if range.json {
                println!("{}", serde_json::to_string_pretty(station_view)?);
            } else {
                print_range_banner(&query);
                println!("\nStation Comparison: {}", station_view.station);
                print_series_group(&station_view.pollutants);
            }
        }

        Commands::Scatter {
            range,
            station,
            weather,
            pollutant,
        } => {
            let dataset = load(&range.input)?;
            let selection = StationSelection {
                station,
                scatter: Some(ScatterSelection {
                    weather: Measurement::parse(&weather)?,
                    pollutant: Measurement::parse(&pollutant)?,
                }),
            };
            let query = build_query(&dataset, &range, Some(selection))?;
            let view = run_query(&dataset, &query)?;
            // both were set on the query, so the view carries them
            let Some(station_view) = view.station.as_ref() else {
                return Ok(());
            };
            let Some(points) = station_view.scatter.as_ref() else {
                return Ok(());
            };

            if range.json {
                println!("{}", serde_json::to_string_pretty(points)?);
            } else {
                print_range_banner(&query);
                println!(
                    "\n{} vs {} for {} ({} samples)",
                    weather,
                    pollutant,
                    station_view.station,
                    points.len()
                );
                for point in points {
                    println!("  {:>10.2}  {:>10.2}", point.x, point.y);
                }
            }
        }

        Commands::Stats { range } => {
            let dataset = load(&range.input)?;
            let query = build_query(&dataset, &range, None)?;
            let view = run_query(&dataset, &query)?;

            if range.json {
                println!("{}", serde_json::to_string_pretty(&view.summary)?);
            } else {
                print_range_banner(&query);
                print_summary(&view);
            }
        }

        Commands::Info { input, json } => {
            let dataset = load(&input)?;
            let span = dataset.time_span()?;
            let stations = dataset.stations();

            if json {
                let info = serde_json::json!({
                    "rows": dataset.len(),
                    "start": span.start,
                    "end": span.end,
                    "stations": stations,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Observations: {}", dataset.len());
                println!("Time span: {} to {}", span.start, span.end);
                println!("Stations ({}):", stations.len());
                for station in stations {
                    println!("  {}", station);
                }
            }
        }
    }

    Ok(())
}

fn load(input: &Path) -> Result<Dataset> {
    let reader = ObservationReader::with_progress(true);
    let dataset = reader.read_observations(input)?;
    if dataset.is_empty() {
        return Err(crate::error::DashboardError::EmptyDataset);
    }
    Ok(dataset)
}

/// Resolve CLI dates against the dataset span and assemble the query. This
/// is the UI boundary the pipeline trusts: clamping happens here.
fn build_query(
    dataset: &Dataset,
    args: &RangeArgs,
    station: Option<StationSelection>,
) -> Result<DashboardQuery> {
    let span = dataset.time_span()?;

    let start = match &args.start_date {
        Some(date) => parse_date(date)?.and_hms_opt(0, 0, 0).unwrap_or(span.start),
        None => span.start,
    };
    let end = match &args.end_date {
        Some(date) => parse_date(date)?.and_hms_opt(23, 0, 0).unwrap_or(span.end),
        None => span.end,
    };

    let range = DateRange::new(start, end)?.clamp_to(&span)?;
    let bins = BinCount::new(args.bins)?;

    Ok(DashboardQuery {
        range,
        bins,
        station,
    })
}

fn parse_date(date: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(date, "%Y-%m-%d")?)
}

fn print_range_banner(query: &DashboardQuery) {
    println!(
        "Range: {} to {} ({} bins)",
        query.range.start,
        query.range.end,
        query.bins.get()
    );
}

fn print_series_group(group: &[MeasurementSeries]) {
    for series in group {
        println!("\n{} over time", series.measurement);
        if series.points.is_empty() {
            println!("  (no rows in range)");
            continue;
        }
        for point in &series.points {
            match point.value {
                Some(value) => println!("  {}  {:>10.2}", point.label, value),
                None => println!("  {}  {:>10}", point.label, "missing"),
            }
        }
    }
}

fn print_summary(view: &DashboardView) {
    println!("\nDescriptive Statistics ({} rows)", view.summary.total_rows);
    println!(
        "{:>8} {:>8} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for column in &view.summary.columns {
        println!(
            "{:>8} {:>8} {} {} {} {} {} {} {}",
            column.measurement.column_name(),
            column.count,
            fmt_stat(column.mean),
            fmt_stat(column.std),
            fmt_stat(column.min),
            fmt_stat(column.q25),
            fmt_stat(column.median),
            fmt_stat(column.q75),
            fmt_stat(column.max),
        );
    }
}

fn fmt_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:>10.2}", v),
        None => format!("{:>10}", "-"),
    }
}
