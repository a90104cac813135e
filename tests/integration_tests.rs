use std::io::Write;

use aq_dashboard::models::{BinCount, DateRange, Measurement};
use aq_dashboard::pipeline::{run_query, DashboardQuery, ScatterSelection, StationSelection};
use aq_dashboard::readers::ObservationReader;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

const HEADER: &str = "year,month,day,hour,station,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,WSPM";

fn write_csv(rows: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file
}

fn row(station: &str, day: u32, hour: u32, pm25: &str, temp: &str) -> String {
    format!(
        "2013,3,{},{},{},{},10,5,20,400,60,{},1020,-10,0,2.5",
        day, hour, station, pm25, temp
    )
}

fn instant(day: u32, hour: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2013, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Three daily rows with PM2.5 = 10, 20, missing.
fn three_day_file() -> NamedTempFile {
    write_csv(&[
        row("Aotizhongxin", 1, 0, "10", "1.0"),
        row("Aotizhongxin", 2, 0, "20", "2.0"),
        row("Aotizhongxin", 3, 0, "NA", "3.0"),
    ])
}

fn query(range: DateRange, bins: u32) -> DashboardQuery {
    DashboardQuery {
        range,
        bins: BinCount::new(bins).unwrap(),
        station: None,
    }
}

#[test]
fn test_single_bucket_mean_excludes_missing() {
    let file = three_day_file();
    let dataset = ObservationReader::new()
        .read_observations(file.path())
        .unwrap();

    let range = dataset.time_span().unwrap();
    let view = run_query(&dataset, &query(range, 1)).unwrap();

    let pm25 = view
        .pollutants
        .iter()
        .find(|s| s.measurement == Measurement::Pm25)
        .unwrap();
    assert_eq!(pm25.points.len(), 1);
    assert_eq!(pm25.points[0].label, "2013-03-01");
    assert_eq!(pm25.points[0].value, Some(15.0));
}

#[test]
fn test_three_buckets_one_row_each() {
    let file = three_day_file();
    let dataset = ObservationReader::new()
        .read_observations(file.path())
        .unwrap();

    let range = dataset.time_span().unwrap();
    let view = run_query(&dataset, &query(range, 3)).unwrap();

    let pm25 = view
        .pollutants
        .iter()
        .find(|s| s.measurement == Measurement::Pm25)
        .unwrap();
    let values: Vec<Option<f64>> = pm25.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![Some(10.0), Some(20.0), None]);
}

#[test]
fn test_lowercase_nan_cell_does_not_poison_mean() {
    let file = write_csv(&[
        row("Aotizhongxin", 1, 0, "10", "1.0"),
        row("Aotizhongxin", 2, 0, "nan", "2.0"),
    ]);
    let dataset = ObservationReader::new()
        .read_observations(file.path())
        .unwrap();

    let range = dataset.time_span().unwrap();
    let view = run_query(&dataset, &query(range, 1)).unwrap();

    let pm25 = view
        .pollutants
        .iter()
        .find(|s| s.measurement == Measurement::Pm25)
        .unwrap();
    assert_eq!(pm25.points[0].value, Some(10.0));

    let summary = view
        .summary
        .columns
        .iter()
        .find(|c| c.measurement == Measurement::Pm25)
        .unwrap();
    assert_eq!(summary.count, 1);
    assert_eq!(summary.mean, Some(10.0));
}

#[test]
fn test_bucket_count_bounded_by_bins() {
    let mut rows = Vec::new();
    for day in 1..=5 {
        for hour in [0, 6, 12, 18] {
            rows.push(row("Gucheng", day, hour, "30", "5.0"));
        }
    }
    let file = write_csv(&rows);
    let dataset = ObservationReader::new()
        .read_observations(file.path())
        .unwrap();
    let range = dataset.time_span().unwrap();

    for bins in [1, 2, 7, 20, 100] {
        let view = run_query(&dataset, &query(range, bins)).unwrap();
        let pm25 = &view.pollutants[0];
        assert!(pm25.points.len() <= bins as usize);
        assert!(!pm25.points.is_empty());

        // no double-counting, no drops: bucket row counts cover every row
        let total: usize = view.summary.total_rows;
        assert_eq!(total, rows.len());
    }
}

#[test]
fn test_degenerate_range_single_labeled_bucket() {
    let file = write_csv(&[
        row("Wanliu", 2, 12, "40", "1.0"),
        row("Wanliu", 2, 12, "60", "2.0"),
        row("Wanliu", 2, 13, "90", "3.0"),
    ]);
    let dataset = ObservationReader::new()
        .read_observations(file.path())
        .unwrap();

    let range = DateRange::new(instant(2, 12), instant(2, 12)).unwrap();
    let view = run_query(&dataset, &query(range, 5)).unwrap();

    let pm25 = view
        .pollutants
        .iter()
        .find(|s| s.measurement == Measurement::Pm25)
        .unwrap();
    assert_eq!(pm25.points.len(), 1);
    assert_eq!(pm25.points[0].label, "2013-03-02");
    assert_eq!(pm25.points[0].value, Some(50.0));
}

#[test]
fn test_station_restricted_view_and_scatter() {
    let file = write_csv(&[
        row("Changping", 1, 0, "10", "1.0"),
        row("Changping", 2, 0, "20", "2.0"),
        row("Dingling", 1, 0, "100", "5.0"),
        row("Dingling", 2, 0, "200", "6.0"),
    ]);
    let dataset = ObservationReader::new()
        .read_observations(file.path())
        .unwrap();

    let mut q = query(dataset.time_span().unwrap(), 2);
    q.station = Some(StationSelection {
        station: "Dingling".to_string(),
        scatter: Some(ScatterSelection {
            weather: Measurement::Temp,
            pollutant: Measurement::Pm25,
        }),
    });

    let view = run_query(&dataset, &q).unwrap();
    let station = view.station.unwrap();

    let pm25 = station
        .pollutants
        .iter()
        .find(|s| s.measurement == Measurement::Pm25)
        .unwrap();
    let values: Vec<Option<f64>> = pm25.points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![Some(100.0), Some(200.0)]);

    let scatter = station.scatter.unwrap();
    assert_eq!(scatter.len(), 2);
    assert_eq!(scatter[0].x, 5.0);
    assert_eq!(scatter[0].y, 100.0);

    // overview still aggregates across stations
    let overview_pm25 = view
        .pollutants
        .iter()
        .find(|s| s.measurement == Measurement::Pm25)
        .unwrap();
    let overview: Vec<Option<f64>> = overview_pm25.points.iter().map(|p| p.value).collect();
    assert_eq!(overview, vec![Some(55.0), Some(110.0)]);
}

#[test]
fn test_summary_statistics_over_filtered_rows() {
    let file = write_csv(&[
        row("Tiantan", 1, 0, "1", "1.0"),
        row("Tiantan", 1, 1, "2", "2.0"),
        row("Tiantan", 1, 2, "3", "3.0"),
        row("Tiantan", 1, 3, "4", "4.0"),
        // outside the queried range
        row("Tiantan", 9, 0, "1000", "50.0"),
    ]);
    let dataset = ObservationReader::new()
        .read_observations(file.path())
        .unwrap();

    let range = DateRange::new(instant(1, 0), instant(1, 3)).unwrap();
    let view = run_query(&dataset, &query(range, 2)).unwrap();

    let pm25 = view
        .summary
        .columns
        .iter()
        .find(|c| c.measurement == Measurement::Pm25)
        .unwrap();
    assert_eq!(pm25.count, 4);
    assert_eq!(pm25.mean, Some(2.5));
    assert_eq!(pm25.min, Some(1.0));
    assert_eq!(pm25.q25, Some(1.75));
    assert_eq!(pm25.median, Some(2.5));
    assert_eq!(pm25.q75, Some(3.25));
    assert_eq!(pm25.max, Some(4.0));
}

#[test]
fn test_requested_range_clamps_to_dataset_span() {
    let file = three_day_file();
    let dataset = ObservationReader::new()
        .read_observations(file.path())
        .unwrap();

    let span = dataset.time_span().unwrap();
    let requested = DateRange::new(instant(1, 0) - chrono::Duration::days(30), instant(3, 0) + chrono::Duration::days(30)).unwrap();
    let clamped = requested.clamp_to(&span).unwrap();

    assert_eq!(clamped, span);
}

#[test]
fn test_unknown_station_surfaces_typed_error() {
    let file = three_day_file();
    let dataset = ObservationReader::new()
        .read_observations(file.path())
        .unwrap();

    let mut q = query(dataset.time_span().unwrap(), 1);
    q.station = Some(StationSelection {
        station: "Nongzhanguan".to_string(),
        scatter: None,
    });

    let err = run_query(&dataset, &q).unwrap_err();
    assert!(matches!(
        err,
        aq_dashboard::DashboardError::StationNotFound(_)
    ));
}
