use serde::Serialize;

use crate::models::{Measurement, Observation};

/// Descriptive statistics for one measurement column over the filtered row
/// set. Computed over non-missing values only; a column with none reports
/// `count = 0` and missing everywhere else.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub measurement: Measurement,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryStatistics {
    pub total_rows: usize,
    pub columns: Vec<ColumnSummary>,
}

/// Compute the per-column descriptive table over filtered (not binned) rows,
/// one entry per measurement in declaration order.
pub fn summarize(rows: &[&Observation]) -> SummaryStatistics {
    let columns = Measurement::ALL
        .into_iter()
        .map(|measurement| summarize_column(rows, measurement))
        .collect();

    SummaryStatistics {
        total_rows: rows.len(),
        columns,
    }
}

fn summarize_column(rows: &[&Observation], measurement: Measurement) -> ColumnSummary {
    let mut values: Vec<f64> = rows.iter().filter_map(|obs| obs.value(measurement)).collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let count = values.len();
    if count == 0 {
        return ColumnSummary {
            measurement,
            count,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        };
    }

    let mean = values.iter().sum::<f64>() / count as f64;

    // sample standard deviation (n-1 denominator), undefined for one value
    let std = if count > 1 {
        let variance =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        Some(variance.sqrt())
    } else {
        None
    };

    ColumnSummary {
        measurement,
        count,
        mean: Some(mean),
        std,
        min: Some(values[0]),
        q25: Some(quantile(&values, 0.25)),
        median: Some(quantile(&values, 0.5)),
        q75: Some(quantile(&values, 0.75)),
        max: Some(values[count - 1]),
    }
}

/// Linear-interpolation quantile over sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let low = position.floor() as usize;
    let high = position.ceil() as usize;
    if low == high {
        return sorted[low];
    }
    let fraction = position - low as f64;
    sorted[low] + (sorted[high] - sorted[low]) * fraction
}
