//! Energy consumption prediction service.
//!
//! Serves a single-page form that predicts energy consumption (kWh) from
//! month, humidity and wind speed using a pre-trained regression model,
//! optionally pre-filling humidity and wind speed from a live weather lookup.

pub mod api;
pub mod app;
pub mod config;
pub mod ml;
pub mod predictor;
pub mod report;
pub mod telemetry;
pub mod weather;
