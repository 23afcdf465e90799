// src/plot_framework.rs

use chrono::DateTime;
use chrono_tz::Tz;
use plotters::backend::{BitMapBackend, DrawingBackend, SVGBackend};
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::PathElement;
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::{Color, RGBColor};

use std::error::Error;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::constants::{
    COLOR_GRID, FIGURE_TITLE_AREA_PX, GRID_DASH_COUNT, LINE_WIDTH_GRID, LINE_WIDTH_LEGEND,
    PANEL_MARGIN_PX, TICK_LABEL_FORMAT, X_LABEL_AREA_BOTTOM_PX, X_LABEL_AREA_INNER_PX,
    Y_LABEL_AREA_PX,
};
use crate::error::PlotError;
use crate::font_config::{
    FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_CHART_TITLE, FONT_TUPLE_LEGEND, FONT_TUPLE_MAIN_TITLE,
    FONT_TUPLE_TICK_LABEL,
};

/// Seconds per candidate time tick step, smallest first.
const TIME_TICK_STEPS_S: [f64; 20] = [
    1.0, 2.0, 5.0, 10.0, 15.0, 30.0, // seconds
    60.0, 120.0, 300.0, 600.0, 900.0, 1800.0, // minutes
    3600.0, 7200.0, 10800.0, 21600.0, 43200.0, // hours
    86400.0, 172800.0, 604800.0, // days
];

/// Seconds since the Unix epoch, the x coordinate used for every time axis.
pub fn to_axis_seconds(ts: &DateTime<Tz>) -> f64 {
    ts.timestamp_millis() as f64 / 1000.0
}

/// Formats an x coordinate as wall-clock time in `tz`.
pub fn format_time_label(x: f64, tz: Tz) -> String {
    DateTime::from_timestamp_millis((x * 1000.0).round() as i64)
        .map(|utc| utc.with_timezone(&tz).format(TICK_LABEL_FORMAT).to_string())
        .unwrap_or_default()
}

/// Fixed-point text with at most three decimals and no trailing zeros.
fn trim_decimals(v: f64) -> String {
    let text = format!("{:.3}", v);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Formats a y value with "k"/"M" notation for large values. Fractional ticks
/// keep the decimals they need, so 12.5 stays "12.5" and 1200 is "1.2k".
pub fn format_value_label(y: f64) -> String {
    if y.abs() >= 1_000_000.0 {
        format!("{}M", trim_decimals(y / 1_000_000.0))
    } else if y.abs() >= 1000.0 {
        format!("{}k", trim_decimals(y / 1000.0))
    } else {
        trim_decimals(y)
    }
}

/// Seconds the wall clock in `tz` is ahead of UTC at axis coordinate `x`.
fn utc_offset_at(x: f64, tz: Tz) -> f64 {
    DateTime::from_timestamp_millis((x * 1000.0) as i64)
        .map(|utc| utc.with_timezone(&tz).naive_local().and_utc().timestamp() - utc.timestamp())
        .unwrap_or(0) as f64
}

/// Tick positions over `range`, at most `max_ticks`, aligned to round
/// wall-clock times in `tz` (whole seconds, minutes, hours or days).
///
/// Alignment follows the zone offset in force at each tick, so a range that
/// crosses a DST change stays on round local times on both sides.
pub fn time_ticks(range: &Range<f64>, tz: Tz, max_ticks: usize) -> Vec<f64> {
    if max_ticks == 0 || !(range.end >= range.start) {
        return Vec::new();
    }
    let start_offset = utc_offset_at(range.start, tz);
    let end_offset = utc_offset_at(range.end, tz);
    let mut offsets = vec![start_offset];
    if end_offset != start_offset {
        offsets.push(end_offset);
    }

    let (start, end) = (range.start + start_offset, range.end + start_offset);
    let count_for = |step: f64| ((end / step).floor() - (start / step).ceil() + 1.0).max(0.0);
    let mut step = TIME_TICK_STEPS_S
        .iter()
        .copied()
        .find(|&s| count_for(s) <= max_ticks as f64)
        .unwrap_or(TIME_TICK_STEPS_S[TIME_TICK_STEPS_S.len() - 1]);

    loop {
        let mut ticks: Vec<f64> = Vec::new();
        for &offset in &offsets {
            let first = ((range.start + offset) / step).ceil() as i64;
            let last = ((range.end + offset) / step).floor() as i64;
            ticks.extend(
                (first..=last)
                    .map(|k| k as f64 * step - offset)
                    .filter(|&t| t >= range.start && t <= range.end)
                    .filter(|&t| utc_offset_at(t, tz) == offset),
            );
        }
        ticks.sort_by(f64::total_cmp);
        ticks.dedup();
        if ticks.len() <= max_ticks {
            return ticks;
        }
        step *= 2.0;
    }
}

/// Ticks `0, step, 2*step, ...` up to `upper`, at most `max_ticks`, with the
/// step taken from 1, 2, 2.5 and 5 times a power of ten.
pub fn value_ticks(upper: f64, max_ticks: usize) -> Vec<f64> {
    if max_ticks < 2 || !(upper > 0.0) || !upper.is_finite() {
        return vec![0.0];
    }
    let mut magnitude = 10f64.powf((upper / max_ticks as f64).log10().floor() - 1.0);
    loop {
        for factor in [1.0, 2.0, 2.5, 5.0] {
            let step = factor * magnitude;
            let count = (upper / step + 1e-9).floor() as usize + 1;
            if count <= max_ticks {
                return (0..count).map(|k| k as f64 * step).collect();
            }
        }
        magnitude *= 10.0;
    }
}

/// How a [`TickedAxis`] renders its tick labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisLabels {
    /// Wall-clock time in the given zone.
    Time(Tz),
    /// Plain numbers.
    Value,
    /// Grid positions only, no text. Used for the time axis of upper panels.
    Hidden,
}

/// Linear f64 axis whose tick positions are computed up front, so the labels
/// and the dashed grid always agree.
#[derive(Debug, Clone)]
pub struct TickedAxis {
    range: Range<f64>,
    ticks: Vec<f64>,
    labels: AxisLabels,
}

impl TickedAxis {
    pub fn time(range: Range<f64>, tz: Tz, max_ticks: usize, show_labels: bool) -> Self {
        let ticks = time_ticks(&range, tz, max_ticks);
        Self {
            range,
            ticks,
            labels: if show_labels {
                AxisLabels::Time(tz)
            } else {
                AxisLabels::Hidden
            },
        }
    }

    /// Value axis from 0 to `upper`.
    pub fn value(upper: f64, max_ticks: usize) -> Self {
        Self {
            range: 0.0..upper,
            ticks: value_ticks(upper, max_ticks),
            labels: AxisLabels::Value,
        }
    }

    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    pub fn labels(&self) -> AxisLabels {
        self.labels
    }

    pub fn bounds(&self) -> Range<f64> {
        self.range.clone()
    }
}

impl Ranged for TickedAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let span = self.range.end - self.range.start;
        if span <= 0.0 {
            return limit.0;
        }
        let normalized = (*value - self.range.start) / span;
        ((limit.1 - limit.0) as f64 * normalized).round() as i32 + limit.0
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.range.clone()
    }
}

impl ValueFormatter<f64> for TickedAxis {
    fn format_ext(&self, value: &f64) -> String {
        match self.labels {
            AxisLabels::Time(tz) => format_time_label(*value, tz),
            AxisLabels::Value => format_value_label(*value),
            AxisLabels::Hidden => String::new(),
        }
    }
}

/// One line in a panel. Missing samples split the line into segments.
#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub segments: Vec<Vec<(f64, f64)>>,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
}

impl PlotSeries {
    /// Builds the segments from `(x, y)` samples, breaking at every `None`.
    pub fn from_samples<I>(samples: I, label: &str, color: RGBColor, stroke_width: u32) -> Self
    where
        I: IntoIterator<Item = (f64, Option<f64>)>,
    {
        let mut segments: Vec<Vec<(f64, f64)>> = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();
        for (x, y) in samples {
            match y {
                Some(y) => current.push((x, y)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        Self {
            segments,
            label: label.to_string(),
            color,
            stroke_width,
        }
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.segments.iter().flatten().map(|&(_, y)| y)
    }
}

#[derive(Debug, Clone)]
pub struct PanelConfig {
    pub title: String,
    pub x_axis: TickedAxis,
    pub y_axis: TickedAxis,
    pub series: Vec<PlotSeries>,
    /// Only set on the bottom panel.
    pub x_label: Option<String>,
    pub y_label: String,
}

/// Dashed light lines at every tick of both axes, drawn as short segments.
fn draw_dashed_grid<DB: DrawingBackend>(
    chart: &mut plotters::chart::ChartContext<
        '_,
        DB,
        plotters::coord::cartesian::Cartesian2d<TickedAxis, TickedAxis>,
    >,
    x_axis: &TickedAxis,
    y_axis: &TickedAxis,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let style = COLOR_GRID.stroke_width(LINE_WIDTH_GRID);
    let x_bounds = x_axis.bounds();
    let y_bounds = y_axis.bounds();

    let dashes = |from: f64, to: f64| {
        let dash = (to - from) / (GRID_DASH_COUNT as f64 * 2.0);
        (0..GRID_DASH_COUNT).map(move |i| {
            let start = from + (i as f64 * 2.0) * dash;
            (start, start + dash)
        })
    };

    let mut segments: Vec<Vec<(f64, f64)>> = Vec::new();
    for &x in x_axis.ticks() {
        segments.extend(dashes(y_bounds.start, y_bounds.end).map(|(y0, y1)| vec![(x, y0), (x, y1)]));
    }
    for &y in y_axis.ticks() {
        segments.extend(dashes(x_bounds.start, x_bounds.end).map(|(x0, x1)| vec![(x0, y), (x1, y)]));
    }
    chart.draw_series(segments.into_iter().map(|points| PathElement::new(points, style)))?;
    Ok(())
}

/// Draws one panel: axes, dashed grid, one line per series and a legend.
/// A panel without series still gets its axes and grid.
pub fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &PanelConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let x_label_area = if panel.x_label.is_some() {
        X_LABEL_AREA_BOTTOM_PX
    } else {
        X_LABEL_AREA_INNER_PX
    };
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, FONT_TUPLE_CHART_TITLE)
        .margin(PANEL_MARGIN_PX)
        .x_label_area_size(x_label_area)
        .y_label_area_size(Y_LABEL_AREA_PX)
        .build_cartesian_2d(panel.x_axis.clone(), panel.y_axis.clone())?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .y_desc(&panel.y_label)
            .label_style(FONT_TUPLE_TICK_LABEL)
            .axis_desc_style(FONT_TUPLE_AXIS_LABEL);
        if let Some(x_label) = &panel.x_label {
            mesh.x_desc(x_label);
        }
        mesh.draw()?;
    }

    draw_dashed_grid(&mut chart, &panel.x_axis, &panel.y_axis)?;

    let mut legend_series_count = 0;
    for s in &panel.series {
        let style = s.color.stroke_width(s.stroke_width);
        let color = s.color;
        let mut labelled = false;
        for segment in &s.segments {
            let drawn = chart.draw_series(LineSeries::new(segment.iter().copied(), style))?;
            if !labelled && !s.label.is_empty() {
                drawn.label(&s.label).legend(move |(x, y)| {
                    PathElement::new(
                        vec![(x, y), (x + 20, y)],
                        color.stroke_width(LINE_WIDTH_LEGEND),
                    )
                });
                labelled = true;
                legend_series_count += 1;
            }
        }
    }

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(FONT_TUPLE_LEGEND)
            .draw()?;
    }
    Ok(())
}

/// Fills `root`, writes the figure title and stacks `panels` top to bottom.
pub fn draw_stacked_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    panels: &[PanelConfig],
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    if panels.is_empty() {
        return Ok(());
    }
    let (title_area, body) = root.split_vertically(FIGURE_TITLE_AREA_PX);
    title_area.titled(title, FONT_TUPLE_MAIN_TITLE)?;
    for (area, panel) in body.split_evenly((panels.len(), 1)).iter().zip(panels) {
        draw_panel(area, panel)?;
    }
    Ok(())
}

/// Sibling path the image is rendered to before it replaces `output`.
/// Keeps the extension so the backend still picks the right encoder.
fn staging_path(output: &Path) -> PathBuf {
    let file_name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "plot".to_string());
    let staged = match output.extension() {
        Some(ext) => format!(".{file_name}.partial.{}", ext.to_string_lossy()),
        None => format!(".{file_name}.partial"),
    };
    output.with_file_name(staged)
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

fn render_on<DB: DrawingBackend>(
    backend: DB,
    title: &str,
    panels: &[PanelConfig],
) -> Result<Result<(), String>, String>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    draw_stacked_figure(&root, title, panels).map_err(|e| e.to_string())?;
    Ok(root.present().map_err(|e| e.to_string()))
}

/// Renders the figure and writes it to `output` (SVG for `.svg`, bitmap otherwise).
///
/// The image is staged next to `output` and only moved into place once it has
/// been drawn and encoded completely, so a failed run never leaves a partial file.
pub fn render_to_file(
    output: &Path,
    size: (u32, u32),
    title: &str,
    panels: &[PanelConfig],
) -> Result<(), PlotError> {
    let staged = staging_path(output);
    let outcome = if is_svg(output) {
        render_on(SVGBackend::new(&staged, size), title, panels)
    } else {
        render_on(BitMapBackend::new(&staged, size), title, panels)
    };

    let result = match outcome {
        Err(reason) => Err(PlotError::Render { reason }),
        Ok(Err(reason)) => Err(PlotError::Save {
            path: output.to_path_buf(),
            reason,
        }),
        Ok(Ok(())) => fs::rename(&staged, output).map_err(|e| PlotError::Save {
            path: output.to_path_buf(),
            reason: e.to_string(),
        }),
    };
    if result.is_err() {
        let _ = fs::remove_file(&staged);
    }
    result
}


// src/plot_framework.rs
