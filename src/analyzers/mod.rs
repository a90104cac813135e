pub mod summary;

pub use summary::{summarize, ColumnSummary, SummaryStatistics};
