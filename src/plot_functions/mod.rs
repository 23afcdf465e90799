// src/plot_functions/mod.rs

pub mod plot_power_log;

pub use plot_power_log::{build_figure_plan, plot_power_log, FigurePlan};
