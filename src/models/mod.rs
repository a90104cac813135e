pub mod dataset;
pub mod measurement;
pub mod observation;
pub mod range;

pub use dataset::Dataset;
pub use measurement::Measurement;
pub use observation::Observation;
pub use range::{BinCount, DateRange};
