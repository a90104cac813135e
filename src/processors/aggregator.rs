use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::Measurement;
use crate::processors::binner::Bucket;

/// Per-bucket means for every measurement column. Only non-empty buckets are
/// produced; a column with no usable values in a bucket stays `None` and is
/// never reported as zero.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedBucket {
    pub label: String,
    pub start: NaiveDateTime,
    pub row_count: usize,
    means: [Option<f64>; Measurement::COUNT],
}

impl AggregatedBucket {
    pub fn mean(&self, measurement: Measurement) -> Option<f64> {
        self.means[measurement.index()]
    }
}

/// One point of a chart series: bucket label plus the (possibly missing)
/// aggregated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: Option<f64>,
}

/// Collapse buckets into one output row per non-empty bucket, ordered by
/// bucket start time. Means skip missing values per column.
pub fn aggregate(buckets: &[Bucket<'_>]) -> Vec<AggregatedBucket> {
    buckets
        .iter()
        .filter(|bucket| !bucket.is_empty())
        .map(|bucket| AggregatedBucket {
            label: bucket.label(),
            start: bucket.left,
            row_count: bucket.rows.len(),
            means: column_means(bucket),
        })
        .collect()
}

/// Extract the `(label, value)` series a single chart consumes.
pub fn series(aggregated: &[AggregatedBucket], measurement: Measurement) -> Vec<SeriesPoint> {
    aggregated
        .iter()
        .map(|bucket| SeriesPoint {
            label: bucket.label.clone(),
            value: bucket.mean(measurement),
        })
        .collect()
}

fn column_means(bucket: &Bucket<'_>) -> [Option<f64>; Measurement::COUNT] {
    let mut means = [None; Measurement::COUNT];

    for measurement in Measurement::ALL {
        let mut sum = 0.0f64;
        let mut count = 0usize;
        for obs in &bucket.rows {
            if let Some(value) = obs.value(measurement) {
                sum += value;
                count += 1;
            }
        }

        if count > 0 {
            means[measurement.index()] = Some(sum / count as f64);
        }
    }

    means
}
