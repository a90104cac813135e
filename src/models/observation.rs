use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::models::Measurement;

/// One hourly sampled record. Measurement fields are `Option<f64>`: a cell
/// that was empty or failed numeric coercion is `None` and stays out of every
/// mean, never substituted with zero.
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    pub station: String,
    pub timestamp: NaiveDateTime,

    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub so2: Option<f64>,
    pub no2: Option<f64>,
    pub co: Option<f64>,
    pub o3: Option<f64>,

    pub temp: Option<f64>,
    pub pres: Option<f64>,
    pub dewp: Option<f64>,
    pub rain: Option<f64>,
    pub wspm: Option<f64>,
}

impl Observation {
    /// Build the chronological instant from the source's separate
    /// year/month/day/hour columns. An impossible calendar combination is a
    /// hard error: the row has no instant and cannot be binned.
    pub fn timestamp_from_parts(
        row: usize,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
    ) -> Result<NaiveDateTime> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .ok_or(DashboardError::InvalidTimestamp {
                row,
                year,
                month,
                day,
                hour,
            })
    }

    pub fn value(&self, measurement: Measurement) -> Option<f64> {
        match measurement {
            Measurement::Pm25 => self.pm25,
            Measurement::Pm10 => self.pm10,
            Measurement::So2 => self.so2,
            Measurement::No2 => self.no2,
            Measurement::Co => self.co,
            Measurement::O3 => self.o3,
            Measurement::Temp => self.temp,
            Measurement::Pres => self.pres,
            Measurement::Dewp => self.dewp,
            Measurement::Rain => self.rain,
            Measurement::Wspm => self.wspm,
        }
    }

    pub fn has_value(&self, measurement: Measurement) -> bool {
        self.value(measurement).is_some()
    }
}
