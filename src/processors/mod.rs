pub mod aggregator;
pub mod binner;
pub mod scatter;

pub use aggregator::{aggregate, series, AggregatedBucket, SeriesPoint};
pub use binner::{filter_and_bin, filter_rows, Bucket};
pub use scatter::{scatter_points, ScatterPoint};
