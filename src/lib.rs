// src/lib.rs - Library interface for the power log plotting pipeline

pub mod axis_scaler;
pub mod channels;
pub mod constants;
pub mod data_input;
pub mod error;
pub mod font_config;
pub mod plot_framework;
pub mod plot_functions;
pub mod series_selector;
pub mod types;

pub use channels::{Channel, MeasurementType, Source};
pub use error::PlotError;
pub use plot_functions::plot_power_log;
pub use types::{PlotRequest, ScalePolicy};
