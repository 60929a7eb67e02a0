//! Prediction domain types: the form's input row, the one-row report and the
//! derived cost estimate.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, FromRepr};
use thiserror::Error;
use validator::Validate;

pub const MONTH_RANGE: (u32, u32) = (1, 12);
pub const HUMIDITY_RANGE: (f64, f64) = (0.0, 100.0);
pub const WIND_SPEED_RANGE: (f64, f64) = (0.0, 50.0);

#[derive(Debug, Error)]
pub enum InputError {
    #[error("{0}")]
    OutOfRange(#[from] validator::ValidationErrors),

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(u32)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub fn number(self) -> u32 {
        self as u32
    }
}

/// The three predictors fed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct PredictionInput {
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,
    #[validate(range(min = 0.0, max = 50.0))]
    pub wind_speed: f64,
}

impl PredictionInput {
    pub fn new(month: u32, humidity: f64, wind_speed: f64) -> Result<Self, InputError> {
        let input = Self {
            month,
            humidity,
            wind_speed,
        };
        input.check()?;
        Ok(input)
    }

    /// Validates ranges; NaN slips past range checks so finiteness is checked first.
    pub fn check(&self) -> Result<(), InputError> {
        if !self.humidity.is_finite() {
            return Err(InputError::NotFinite { field: "humidity" });
        }
        if !self.wind_speed.is_finite() {
            return Err(InputError::NotFinite { field: "wind_speed" });
        }
        self.validate()?;
        Ok(())
    }

    /// Coerces each value into its widget range, the way a slider would.
    pub fn clamped(month: u32, humidity: f64, wind_speed: f64) -> Self {
        Self {
            month: month.clamp(MONTH_RANGE.0, MONTH_RANGE.1),
            humidity: clamp_finite(humidity, HUMIDITY_RANGE),
            wind_speed: clamp_finite(wind_speed, WIND_SPEED_RANGE),
        }
    }

    pub fn features(&self) -> [f64; 3] {
        [self.month as f64, self.humidity, self.wind_speed]
    }
}

pub(crate) fn clamp_finite(value: f64, (min, max): (f64, f64)) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        min
    }
}

/// One-row table of inputs plus the predicted consumption (kWh).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub month: u32,
    pub humidity: f64,
    pub wind_speed: f64,
    pub predicted_consumption: f64,
}

impl PredictionReport {
    pub fn from_prediction(input: &PredictionInput, predicted_consumption: f64) -> Self {
        Self {
            month: input.month,
            humidity: input.humidity,
            wind_speed: input.wind_speed,
            predicted_consumption,
        }
    }

    pub fn input(&self) -> PredictionInput {
        PredictionInput {
            month: self.month,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub cost_per_unit: f64,
    pub energy_cost: f64,
}

/// Cost of the predicted consumption. Negative or non-finite unit costs are
/// treated as zero, matching the number widget's lower bound.
pub fn estimate_cost(predicted_consumption: f64, cost_per_unit: f64) -> CostEstimate {
    let cost_per_unit = unit_cost(cost_per_unit);
    CostEstimate {
        cost_per_unit,
        energy_cost: predicted_consumption * cost_per_unit,
    }
}

pub fn unit_cost(cost_per_unit: f64) -> f64 {
    if cost_per_unit.is_finite() {
        cost_per_unit.max(0.0)
    } else {
        0.0
    }
}
