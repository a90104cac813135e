use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::DEFAULT_BIN_COUNT;

#[derive(Parser)]
#[command(name = "aq-dashboard")]
#[command(about = "Air-quality and weather dashboard data pipeline")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

/// Arguments shared by every pipeline subcommand. Dates are calendar days;
/// the start maps to 00:00 and the end to 23:00 so an inclusive range covers
/// whole days of hourly samples. Both are clamped to the dataset span.
#[derive(Args)]
pub struct RangeArgs {
    #[arg(short, long, help = "Input observation CSV file")]
    pub input: PathBuf,

    #[arg(long, help = "Start date (YYYY-MM-DD) [default: dataset start]")]
    pub start_date: Option<String>,

    #[arg(long, help = "End date (YYYY-MM-DD) [default: dataset end]")]
    pub end_date: Option<String>,

    #[arg(short, long, default_value_t = DEFAULT_BIN_COUNT, help = "Number of bins [1-100]")]
    pub bins: u32,

    #[arg(long, help = "Emit JSON instead of text tables")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregated pollutant and weather series over the filtered range
    Overview {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Pollutant series restricted to a single station
    Station {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(short, long, help = "Station name")]
        station: String,
    },

    /// Raw weather/pollutant sample pairs for a station
    Scatter {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(short, long, help = "Station name")]
        station: String,

        #[arg(short, long, default_value = "TEMP", help = "Weather column (x axis)")]
        weather: String,

        #[arg(short, long, default_value = "PM2.5", help = "Pollutant column (y axis)")]
        pollutant: String,
    },

    /// Descriptive statistics over the filtered rows
    Stats {
        #[command(flatten)]
        range: RangeArgs,
    },

    /// Dataset time span, row count, and station list
    Info {
        #[arg(short, long, help = "Input observation CSV file")]
        input: PathBuf,

        #[arg(long, help = "Emit JSON instead of text")]
        json: bool,
    },
}
