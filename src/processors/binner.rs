use chrono::{Duration, NaiveDateTime};
use tracing::debug;

use crate::models::{BinCount, DateRange, Observation};
use crate::utils::constants::BUCKET_LABEL_FORMAT;

/// One of the N equal-width sub-intervals of the filtered range. Half-open
/// `[left, right)`, except the final bucket whose right edge is inclusive so
/// the row exactly at `range.end` is never dropped.
#[derive(Debug)]
pub struct Bucket<'a> {
    pub index: usize,
    pub left: NaiveDateTime,
    pub right: NaiveDateTime,
    pub rows: Vec<&'a Observation>,
}

impl Bucket<'_> {
    /// Display/grouping key: the calendar date of the left edge.
    pub fn label(&self) -> String {
        self.left.format(BUCKET_LABEL_FORMAT).to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rows whose timestamp lies in the inclusive range.
pub fn filter_rows<'a, I>(rows: I, range: &DateRange) -> Vec<&'a Observation>
where
    I: IntoIterator<Item = &'a Observation>,
{
    rows.into_iter()
        .filter(|obs| range.contains(obs.timestamp))
        .collect()
}

/// Partition the inclusive range into `bins` equal-width buckets and assign
/// each retained row to the bucket containing its timestamp. Empty buckets
/// are carried in the result; the aggregator drops them.
///
/// The caller is trusted to have clamped `range` into the dataset span.
pub fn filter_and_bin<'a, I>(rows: I, range: &DateRange, bins: BinCount) -> Vec<Bucket<'a>>
where
    I: IntoIterator<Item = &'a Observation>,
{
    let n = bins.get() as i64;
    let total_seconds = range.duration_seconds();

    let mut buckets: Vec<Bucket<'a>> = (0..n)
        .map(|i| {
            let left = range.start + Duration::seconds(edge_offset(total_seconds, n, i));
            let right = if i == n - 1 {
                range.end
            } else {
                range.start + Duration::seconds(edge_offset(total_seconds, n, i + 1))
            };
            Bucket {
                index: i as usize,
                left,
                right,
                rows: Vec::new(),
            }
        })
        .collect();

    let mut retained = 0usize;
    for obs in rows {
        if !range.contains(obs.timestamp) {
            continue;
        }
        let index = bucket_index(obs.timestamp, range, n);
        buckets[index].rows.push(obs);
        retained += 1;
    }

    debug!(
        retained,
        bins = n,
        start = %range.start,
        end = %range.end,
        "filtered and binned rows"
    );

    buckets
}

/// `floor((ts - start) / width)` with the result clamped to the last bucket,
/// so the row exactly at `range.end` lands in bucket N-1. Degenerate
/// zero-width ranges collapse everything into bucket 0.
fn bucket_index(timestamp: NaiveDateTime, range: &DateRange, n: i64) -> usize {
    let total_seconds = range.duration_seconds();
    if total_seconds == 0 {
        return 0;
    }

    let offset = (timestamp - range.start).num_seconds();
    let index = offset * n / total_seconds;
    index.min(n - 1) as usize
}

/// Left-edge offset of bucket `i` in whole seconds: the first second-aligned
/// offset assigned to that bucket (ceiling of the rational edge `i*total/n`,
/// matching the floor assignment in `bucket_index` exactly).
fn edge_offset(total_seconds: i64, n: i64, i: i64) -> i64 {
    (total_seconds * i + n - 1) / n
}
