use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// The fixed measurement set of the dataset. Column selection is by variant,
/// never by free-form string, so an unknown column is a construction-time
/// error rather than a lookup failure mid-pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measurement {
    Pm25,
    Pm10,
    So2,
    No2,
    Co,
    O3,
    Temp,
    Pres,
    Dewp,
    Rain,
    Wspm,
}

impl Measurement {
    pub const COUNT: usize = 11;

    pub const POLLUTANTS: [Measurement; 6] = [
        Measurement::Pm25,
        Measurement::Pm10,
        Measurement::So2,
        Measurement::No2,
        Measurement::Co,
        Measurement::O3,
    ];

    pub const WEATHER: [Measurement; 5] = [
        Measurement::Temp,
        Measurement::Pres,
        Measurement::Dewp,
        Measurement::Rain,
        Measurement::Wspm,
    ];

    pub const ALL: [Measurement; Self::COUNT] = [
        Measurement::Pm25,
        Measurement::Pm10,
        Measurement::So2,
        Measurement::No2,
        Measurement::Co,
        Measurement::O3,
        Measurement::Temp,
        Measurement::Pres,
        Measurement::Dewp,
        Measurement::Rain,
        Measurement::Wspm,
    ];

    /// Exact CSV header name (case-sensitive).
    pub fn column_name(&self) -> &'static str {
        match self {
            Measurement::Pm25 => "PM2.5",
            Measurement::Pm10 => "PM10",
            Measurement::So2 => "SO2",
            Measurement::No2 => "NO2",
            Measurement::Co => "CO",
            Measurement::O3 => "O3",
            Measurement::Temp => "TEMP",
            Measurement::Pres => "PRES",
            Measurement::Dewp => "DEWP",
            Measurement::Rain => "RAIN",
            Measurement::Wspm => "WSPM",
        }
    }

    pub fn parse(name: &str) -> Result<Self> {
        Measurement::ALL
            .into_iter()
            .find(|m| m.column_name() == name)
            .ok_or_else(|| DashboardError::UnknownColumn(name.to_string()))
    }

    /// Position within `ALL`, used for dense per-measurement storage.
    pub fn index(&self) -> usize {
        match self {
            Measurement::Pm25 => 0,
            Measurement::Pm10 => 1,
            Measurement::So2 => 2,
            Measurement::No2 => 3,
            Measurement::Co => 4,
            Measurement::O3 => 5,
            Measurement::Temp => 6,
            Measurement::Pres => 7,
            Measurement::Dewp => 8,
            Measurement::Rain => 9,
            Measurement::Wspm => 10,
        }
    }

    pub fn is_pollutant(&self) -> bool {
        Measurement::POLLUTANTS.contains(self)
    }

    pub fn is_weather(&self) -> bool {
        Measurement::WEATHER.contains(self)
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}
