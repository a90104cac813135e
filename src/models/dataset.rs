use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::models::{DateRange, Observation};

/// The full loaded row set. Immutable after load; every derived table is
/// recomputed from it on each interaction.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Min/max timestamp across all observations. The UI clamps requested
    /// date ranges into this span.
    pub fn time_span(&self) -> Result<DateRange> {
        let first = self
            .observations
            .first()
            .ok_or(DashboardError::EmptyDataset)?;

        let mut min = first.timestamp;
        let mut max = first.timestamp;
        for obs in &self.observations {
            if obs.timestamp < min {
                min = obs.timestamp;
            }
            if obs.timestamp > max {
                max = obs.timestamp;
            }
        }

        DateRange::new(min, max)
    }

    /// Sorted unique station names (the station selector's options).
    pub fn stations(&self) -> Vec<String> {
        let mut stations: Vec<String> = self
            .observations
            .iter()
            .map(|obs| obs.station.clone())
            .collect();
        stations.sort();
        stations.dedup();
        stations
    }

    pub fn has_station(&self, station: &str) -> bool {
        self.observations.iter().any(|obs| obs.station == station)
    }
}
