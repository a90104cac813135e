pub mod analyzers;
pub mod cli;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod processors;
pub mod readers;
pub mod utils;

pub use error::{DashboardError, Result};
