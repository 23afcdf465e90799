// src/plot_functions/plot_power_log.rs

use std::ops::Range;

use tracing::{debug, info};

use crate::axis_scaler::{max_data_value, y_upper_bound};
use crate::channels::Channel;
use crate::constants::{
    FIGURE_TITLE_PREFIX, LINE_WIDTH_PLOT, MAX_TIME_TICKS, MAX_VALUE_TICKS, PANEL_HEIGHT,
    PLOT_WIDTH, SINGLE_SAMPLE_TIME_PADDING_S, TITLE_END_FORMAT, TITLE_START_FORMAT,
};
use crate::data_input::log_data::LogTable;
use crate::data_input::log_parser::parse_log_file;
use crate::data_input::timezone::abbreviation;
use crate::error::PlotError;
use crate::plot_framework::{render_to_file, to_axis_seconds, PanelConfig, PlotSeries, TickedAxis};
use crate::series_selector::select_series;
use crate::types::PlotRequest;

/// Everything needed to draw the figure, computed before any pixel is touched.
#[derive(Debug, Clone)]
pub struct FigurePlan {
    pub title: String,
    pub panels: Vec<PanelConfig>,
    /// Channels requested but absent from the log, per panel.
    pub missing: Vec<Vec<Channel>>,
    pub size: (u32, u32),
}

/// Figure title covering the logged time range.
pub fn figure_title(table: &LogTable) -> String {
    match (table.first_timestamp(), table.last_timestamp()) {
        (Some(first), Some(last)) => format!(
            "{FIGURE_TITLE_PREFIX} ({} to {})",
            first.format(TITLE_START_FORMAT),
            last.format(TITLE_END_FORMAT)
        ),
        _ => FIGURE_TITLE_PREFIX.to_string(),
    }
}

/// Shared x range; a zero-length span is padded on both sides.
fn time_range(table: &LogTable) -> Range<f64> {
    let start = table.first_timestamp().map(to_axis_seconds).unwrap_or(0.0);
    let end = table.last_timestamp().map(to_axis_seconds).unwrap_or(start);
    if end > start {
        start..end
    } else {
        (start - SINGLE_SAMPLE_TIME_PADDING_S)..(start + SINGLE_SAMPLE_TIME_PADDING_S)
    }
}

/// Lays out one panel per requested measurement type, top to bottom.
///
/// Only the bottom panel carries time labels and the time axis title; the
/// others draw the same tick grid without text.
pub fn build_figure_plan(request: &PlotRequest, table: &LogTable) -> Result<FigurePlan, PlotError> {
    if request.types.is_empty() {
        return Err(PlotError::EmptySelection);
    }

    let tz = table.display_tz();
    let x_range = time_range(table);
    let x_label = match table.first_timestamp() {
        Some(first) => format!("Time ({})", abbreviation(first)),
        None => "Time".to_string(),
    };

    let mut panels = Vec::with_capacity(request.types.len());
    let mut missing = Vec::with_capacity(request.types.len());
    for (panel_index, &measurement) in request.types.iter().enumerate() {
        let is_bottom = panel_index + 1 == request.types.len();
        let selection = select_series(table.column_names(), &request.sources, measurement);

        let series: Vec<PlotSeries> = selection
            .channels
            .iter()
            .map(|selected| {
                PlotSeries::from_samples(
                    table
                        .rows()
                        .iter()
                        .map(|row| (to_axis_seconds(&row.timestamp), row.reading(selected.channel))),
                    selected.label,
                    selected.color,
                    LINE_WIDTH_PLOT,
                )
            })
            .collect();

        let max_value = max_data_value(series.iter().flat_map(PlotSeries::values));
        let y_max = y_upper_bound(max_value, measurement.scale_steps(), request.scale_policy);
        debug!(
            "{} panel: {} line(s), data max {:.3}, y-axis 0..{}",
            measurement,
            series.len(),
            max_value,
            y_max
        );

        panels.push(PanelConfig {
            title: measurement.title().to_string(),
            x_axis: TickedAxis::time(x_range.clone(), tz, MAX_TIME_TICKS, is_bottom),
            y_axis: TickedAxis::value(y_max, MAX_VALUE_TICKS),
            series,
            x_label: is_bottom.then(|| x_label.clone()),
            y_label: measurement.y_label().to_string(),
        });
        missing.push(selection.missing);
    }

    Ok(FigurePlan {
        title: figure_title(table),
        size: (PLOT_WIDTH, PANEL_HEIGHT * panels.len() as u32),
        panels,
        missing,
    })
}

/// Loads the log named by `request`, composes the figure and writes the image.
///
/// Nothing is written unless every step succeeds.
pub fn plot_power_log(request: &PlotRequest) -> Result<FigurePlan, PlotError> {
    let table = parse_log_file(&request.input, request.display_tz)?;
    let plan = build_figure_plan(request, &table)?;
    render_to_file(&request.output, plan.size, &plan.title, &plan.panels)?;
    info!("Plot successfully saved to '{}'", request.output.display());
    Ok(plan)
}
