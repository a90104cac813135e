use serde::Serialize;

use crate::models::{DateRange, Measurement, Observation};

/// One raw paired sample for the station scatter view: a weather reading on
/// the x axis against a pollutant reading on the y axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

/// Relational projection of raw (unbinned) samples for one station within
/// the filtered range. Rows where either side is missing are dropped.
pub fn scatter_points(
    rows: &[Observation],
    range: &DateRange,
    station: &str,
    weather: Measurement,
    pollutant: Measurement,
) -> Vec<ScatterPoint> {
    rows.iter()
        .filter(|obs| obs.station == station && range.contains(obs.timestamp))
        .filter_map(|obs| {
            let x = obs.value(weather)?;
            let y = obs.value(pollutant)?;
            Some(ScatterPoint { x, y })
        })
        .collect()
}
