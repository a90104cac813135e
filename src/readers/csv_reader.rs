use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};
use crate::models::{Dataset, Measurement, Observation};
use crate::utils::constants::{
    DAY_COLUMN, HOUR_COLUMN, MISSING_MARKERS, MONTH_COLUMN, STATION_COLUMN, YEAR_COLUMN,
};
use crate::utils::ProgressReporter;

/// Raw CSV row before timestamp derivation and numeric coercion. Measurement
/// cells stay as text here so a bad cell degrades to missing instead of
/// failing the whole deserialization.
#[derive(Debug, Deserialize)]
struct RawObservation {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    station: String,

    #[serde(rename = "PM2.5")]
    pm25: String,
    #[serde(rename = "PM10")]
    pm10: String,
    #[serde(rename = "SO2")]
    so2: String,
    #[serde(rename = "NO2")]
    no2: String,
    #[serde(rename = "CO")]
    co: String,
    #[serde(rename = "O3")]
    o3: String,
    #[serde(rename = "TEMP")]
    temp: String,
    #[serde(rename = "PRES")]
    pres: String,
    #[serde(rename = "DEWP")]
    dewp: String,
    #[serde(rename = "RAIN")]
    rain: String,
    #[serde(rename = "WSPM")]
    wspm: String,
}

/// All-or-nothing loader for the observation table. Header must carry every
/// required column (case-sensitive); extra columns are ignored.
pub struct ObservationReader {
    show_progress: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self {
            show_progress: false,
        }
    }

    pub fn with_progress(show_progress: bool) -> Self {
        Self { show_progress }
    }

    pub fn read_observations(&self, path: &Path) -> Result<Dataset> {
        let progress = ProgressReporter::new_spinner(
            &format!("Loading {}", path.display()),
            !self.show_progress,
        );

        let mut reader = csv::Reader::from_path(path)?;
        self.validate_header(reader.headers()?)?;

        let mut observations = Vec::new();
        for (index, record) in reader.deserialize::<RawObservation>().enumerate() {
            let raw = record?;
            // 1-based data row, header excluded
            let row = index + 1;
            observations.push(self.build_observation(row, raw)?);
        }

        progress.finish_with_message(&format!("Loaded {} observations", observations.len()));
        debug!(rows = observations.len(), "dataset loaded");

        Ok(Dataset::new(observations))
    }

    fn validate_header(&self, header: &csv::StringRecord) -> Result<()> {
        let mut required: Vec<&str> = vec![
            YEAR_COLUMN,
            MONTH_COLUMN,
            DAY_COLUMN,
            HOUR_COLUMN,
            STATION_COLUMN,
        ];
        required.extend(Measurement::ALL.iter().map(|m| m.column_name()));

        for column in required {
            if !header.iter().any(|field| field == column) {
                return Err(DashboardError::MissingColumn {
                    column: column.to_string(),
                });
            }
        }

        Ok(())
    }

    fn build_observation(&self, row: usize, raw: RawObservation) -> Result<Observation> {
        let timestamp =
            Observation::timestamp_from_parts(row, raw.year, raw.month, raw.day, raw.hour)?;

        Ok(Observation {
            station: raw.station,
            timestamp,
            pm25: coerce_cell(row, Measurement::Pm25, &raw.pm25),
            pm10: coerce_cell(row, Measurement::Pm10, &raw.pm10),
            so2: coerce_cell(row, Measurement::So2, &raw.so2),
            no2: coerce_cell(row, Measurement::No2, &raw.no2),
            co: coerce_cell(row, Measurement::Co, &raw.co),
            o3: coerce_cell(row, Measurement::O3, &raw.o3),
            temp: coerce_cell(row, Measurement::Temp, &raw.temp),
            pres: coerce_cell(row, Measurement::Pres, &raw.pres),
            dewp: coerce_cell(row, Measurement::Dewp, &raw.dewp),
            rain: coerce_cell(row, Measurement::Rain, &raw.rain),
            wspm: coerce_cell(row, Measurement::Wspm, &raw.wspm),
        })
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Lenient numeric coercion for a measurement cell. Unparseable text becomes
/// missing with a warning; it never aborts the load. `f64::parse` accepts
/// spellings like `nan` and `inf`; those are missing too, so no non-finite
/// value can poison a downstream mean.
fn coerce_cell(row: usize, measurement: Measurement, cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if MISSING_MARKERS.contains(&trimmed) {
        return None;
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            warn!(
                row,
                column = measurement.column_name(),
                cell = trimmed,
                "measurement cell failed numeric coercion, treating as missing"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "year,month,day,hour,station,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,WSPM";

    fn write_csv(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_read_observations() {
        let file = write_csv(&[
            "2013,3,1,0,Aotizhongxin,4,4,4,7,300,77,-0.7,1023,-18.8,0,4.4",
            "2013,3,1,1,Aotizhongxin,8,8,4,7,300,77,-1.1,1023.2,-18.2,0,4.7",
        ]);

        let reader = ObservationReader::new();
        let dataset = reader.read_observations(file.path()).unwrap();

        assert_eq!(dataset.len(), 2);
        let first = &dataset.observations()[0];
        assert_eq!(first.station, "Aotizhongxin");
        assert_eq!(first.timestamp.to_string(), "2013-03-01 00:00:00");
        assert_eq!(first.pm25, Some(4.0));
        assert_eq!(first.temp, Some(-0.7));
    }

    #[test]
    fn test_unparseable_cells_become_missing() {
        let file = write_csv(&[
            "2013,3,1,0,Gucheng,NA,12,n/a,7,,77,-0.7,1023,-18.8,0,4.4",
        ]);

        let reader = ObservationReader::new();
        let dataset = reader.read_observations(file.path()).unwrap();

        let obs = &dataset.observations()[0];
        assert_eq!(obs.pm25, None); // NA marker
        assert_eq!(obs.so2, None); // coercion failure
        assert_eq!(obs.co, None); // empty cell
        assert_eq!(obs.pm10, Some(12.0));
    }

    #[test]
    fn test_non_finite_cells_become_missing() {
        // f64::parse accepts these spellings, but they must not survive as values
        let file = write_csv(&[
            "2013,3,1,0,Gucheng,nan,NAN,inf,-inf,Infinity,77,-0.7,1023,-18.8,0,4.4",
        ]);

        let reader = ObservationReader::new();
        let dataset = reader.read_observations(file.path()).unwrap();

        let obs = &dataset.observations()[0];
        assert_eq!(obs.pm25, None);
        assert_eq!(obs.pm10, None);
        assert_eq!(obs.so2, None);
        assert_eq!(obs.no2, None);
        assert_eq!(obs.co, None);
        assert_eq!(obs.o3, Some(77.0));
    }

    #[test]
    fn test_missing_column_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "year,month,day,hour,station,PM2.5").unwrap();
        writeln!(file, "2013,3,1,0,Gucheng,4").unwrap();

        let reader = ObservationReader::new();
        let err = reader.read_observations(file.path()).unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn { .. }));
    }

    #[test]
    fn test_invalid_calendar_row_fails_load() {
        let file = write_csv(&[
            "2013,3,1,0,Gucheng,4,4,4,7,300,77,-0.7,1023,-18.8,0,4.4",
            "2013,2,30,0,Gucheng,4,4,4,7,300,77,-0.7,1023,-18.8,0,4.4",
        ]);

        let reader = ObservationReader::new();
        let err = reader.read_observations(file.path()).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InvalidTimestamp { row: 2, .. }
        ));
    }

    #[test]
    fn test_missing_file_rejected() {
        let reader = ObservationReader::new();
        let err = reader
            .read_observations(Path::new("no_such_main_data.csv"))
            .unwrap_err();
        assert!(matches!(err, DashboardError::Csv(_)));
    }

    #[test]
    fn test_extra_columns_ignored() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "No,{},wd", HEADER).unwrap();
        writeln!(
            file,
            "1,2013,3,1,0,Gucheng,4,4,4,7,300,77,-0.7,1023,-18.8,0,4.4,NNW"
        )
        .unwrap();

        let reader = ObservationReader::new();
        let dataset = reader.read_observations(file.path()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.observations()[0].pm25, Some(4.0));
    }
}
