use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::model::Mode;

/// Relative importance of the three per-edge measures
///
/// Each weight lies in [0, 1] and the three sum to 1. The default splits
/// them evenly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weighting {
    pub time: f64,
    pub cost: f64,
    pub transfer: f64,
}

impl Default for Weighting {
    fn default() -> Self {
        Self {
            time: 1.0 / 3.0,
            cost: 1.0 / 3.0,
            transfer: 1.0 / 3.0,
        }
    }
}

impl Weighting {
    const SUM_TOLERANCE: f64 = 1e-6;

    pub fn new(time: f64, cost: f64, transfer: f64) -> Result<Self, PlanError> {
        let weighting = Self {
            time,
            cost,
            transfer,
        };
        weighting.validate()?;
        Ok(weighting)
    }

    /// Pure fastest-route weighting
    pub fn time_only() -> Self {
        Self {
            time: 1.0,
            cost: 0.0,
            transfer: 0.0,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), PlanError> {
        for (label, value) in [
            ("time", self.time),
            ("cost", self.cost),
            ("transfer", self.transfer),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PlanError::InvalidCriteria(format!(
                    "{label} weight {value} outside [0, 1]"
                )));
            }
        }
        let sum = self.time + self.cost + self.transfer;
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(PlanError::InvalidCriteria(format!(
                "weights sum to {sum}, expected 1"
            )));
        }
        Ok(())
    }
}

/// One route planning request
///
/// Transient and caller-supplied; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub origin: String,
    pub destination: String,
    /// Restrict the search to one region before running it
    pub region: Option<String>,
    pub weighting: Weighting,
    /// Edges of these modes are hidden from the search
    pub excluded_modes: Vec<Mode>,
}

impl SearchCriteria {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            region: None,
            weighting: Weighting::default(),
            excluded_modes: Vec::new(),
        }
    }

    #[must_use]
    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    #[must_use]
    pub fn without_mode(mut self, mode: Mode) -> Self {
        self.excluded_modes.push(mode);
        self
    }
}

/// One multi-destination tour request
///
/// Callers pick the destination set; the planner chooses the visiting
/// order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourCriteria {
    pub origin: String,
    pub destinations: Vec<String>,
    pub weighting: Weighting,
    /// Edges of these modes are hidden from every segment search
    pub excluded_modes: Vec<Mode>,
}

impl TourCriteria {
    pub fn new(
        origin: impl Into<String>,
        destinations: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destinations: destinations.into_iter().map(Into::into).collect(),
            weighting: Weighting::default(),
            excluded_modes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    #[must_use]
    pub fn without_mode(mut self, mode: Mode) -> Self {
        self.excluded_modes.push(mode);
        self
    }
}
