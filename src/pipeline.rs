//! The per-interaction entry point. Every parameter change re-runs
//! [`run_query`] from scratch against the loaded dataset; nothing is cached
//! or mutated between runs.

use serde::Serialize;
use tracing::debug;

use crate::analyzers::{summarize, SummaryStatistics};
use crate::error::{DashboardError, Result};
use crate::models::{BinCount, Dataset, DateRange, Measurement};
use crate::processors::{
    aggregate, filter_and_bin, filter_rows, scatter_points, series, ScatterPoint, SeriesPoint,
};

/// Raw weather/pollutant pairing for the station scatter view.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScatterSelection {
    pub weather: Measurement,
    pub pollutant: Measurement,
}

/// Station comparison selection. Scatter is tied to a station, so it cannot
/// be requested without one.
#[derive(Debug, Clone, Serialize)]
pub struct StationSelection {
    pub station: String,
    pub scatter: Option<ScatterSelection>,
}

/// Everything one interaction cycle needs. `range` is trusted to be clamped
/// into the dataset span by the caller (the UI boundary).
#[derive(Debug, Clone, Serialize)]
pub struct DashboardQuery {
    pub range: DateRange,
    pub bins: BinCount,
    pub station: Option<StationSelection>,
}

/// One chart's data: the measurement plotted plus its bucketed series.
#[derive(Debug, Clone, Serialize)]
pub struct MeasurementSeries {
    pub measurement: Measurement,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StationView {
    pub station: String,
    pub pollutants: Vec<MeasurementSeries>,
    pub scatter: Option<Vec<ScatterPoint>>,
}

/// The complete data contract consumed by the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub pollutants: Vec<MeasurementSeries>,
    pub weather: Vec<MeasurementSeries>,
    pub station: Option<StationView>,
    pub summary: SummaryStatistics,
}

/// Pure function of `(dataset, query)`: filter, bin, aggregate, summarize.
pub fn run_query(dataset: &Dataset, query: &DashboardQuery) -> Result<DashboardView> {
    let rows = dataset.observations();

    let buckets = filter_and_bin(rows, &query.range, query.bins);
    let aggregated = aggregate(&buckets);
    debug!(
        buckets = aggregated.len(),
        "aggregated full-range series"
    );

    let pollutants = measurement_series(&aggregated, &Measurement::POLLUTANTS);
    let weather = measurement_series(&aggregated, &Measurement::WEATHER);

    let station = match &query.station {
        Some(selection) => Some(station_view(dataset, query, selection)?),
        None => None,
    };

    let filtered = filter_rows(rows, &query.range);
    let summary = summarize(&filtered);

    Ok(DashboardView {
        pollutants,
        weather,
        station,
        summary,
    })
}

fn station_view(
    dataset: &Dataset,
    query: &DashboardQuery,
    selection: &StationSelection,
) -> Result<StationView> {
    if !dataset.has_station(&selection.station) {
        return Err(DashboardError::StationNotFound(selection.station.clone()));
    }

    // Station filter applies before bucket assignment; the bucketing logic
    // itself is shared with the overview.
    let station_rows = dataset
        .observations()
        .iter()
        .filter(|obs| obs.station == selection.station);
    let buckets = filter_and_bin(station_rows, &query.range, query.bins);
    let aggregated = aggregate(&buckets);

    let scatter = selection.scatter.map(|sel| {
        scatter_points(
            dataset.observations(),
            &query.range,
            &selection.station,
            sel.weather,
            sel.pollutant,
        )
    });

    Ok(StationView {
        station: selection.station.clone(),
        pollutants: measurement_series(&aggregated, &Measurement::POLLUTANTS),
        scatter,
    })
}

fn measurement_series(
    aggregated: &[crate::processors::AggregatedBucket],
    measurements: &[Measurement],
) -> Vec<MeasurementSeries> {
    measurements
        .iter()
        .map(|&measurement| MeasurementSeries {
            measurement,
            points: series(aggregated, measurement),
        })
        .collect()
}
