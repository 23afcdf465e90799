// src/constants.rs

use plotters::style::colors::{BLUE, RED};
use plotters::style::RGBColor;

// Output resolution, in pixels per inch.
pub const PLOT_DPI: u32 = 150;

// Figure geometry in inches: fixed width, fixed height per stacked panel.
pub const FIGURE_WIDTH_IN: u32 = 15;
pub const PANEL_HEIGHT_IN: u32 = 6;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = FIGURE_WIDTH_IN * PLOT_DPI;
pub const PANEL_HEIGHT: u32 = PANEL_HEIGHT_IN * PLOT_DPI;

// Space reserved above the first panel for the figure title.
pub const FIGURE_TITLE_AREA_PX: u32 = 70;

// Margins around every panel.
pub const PANEL_MARGIN_PX: u32 = 20;
pub const X_LABEL_AREA_BOTTOM_PX: u32 = 110;
pub const X_LABEL_AREA_INNER_PX: u32 = 10;
pub const Y_LABEL_AREA_PX: u32 = 90;

// Tick density caps.
pub const MAX_TIME_TICKS: usize = 15;
pub const MAX_VALUE_TICKS: usize = 10;

// Padding added to both ends of a zero-length time span, in seconds.
pub const SINGLE_SAMPLE_TIME_PADDING_S: f64 = 1.0;

// --- Channel Color Assignments ---
pub const COLOR_VIN: RGBColor = RED;
pub const COLOR_MAIN: RGBColor = RGBColor(0, 128, 0);
pub const COLOR_USB: RGBColor = BLUE;

pub const COLOR_GRID: RGBColor = RGBColor(176, 176, 176);

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 2;
pub const LINE_WIDTH_LEGEND: u32 = 3;
pub const LINE_WIDTH_GRID: u32 = 1;

// Grid dashes: number of dash+gap pairs drawn along each grid line.
pub const GRID_DASH_COUNT: usize = 60;

// Font sizes (pixels at PLOT_DPI).
pub const FONT_SIZE_MAIN_TITLE: i32 = 34;
pub const FONT_SIZE_CHART_TITLE: i32 = 26;
pub const FONT_SIZE_AXIS_LABEL: i32 = 20;
pub const FONT_SIZE_TICK_LABEL: i32 = 18;
pub const FONT_SIZE_LEGEND: i32 = 20;

// Figure title prefix.
pub const FIGURE_TITLE_PREFIX: &str = "ODROID Power Log";

// Timestamp formats used in titles and tick labels.
pub const TITLE_START_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const TITLE_END_FORMAT: &str = "%H:%M:%S";
pub const TICK_LABEL_FORMAT: &str = "%H:%M:%S";

// Required column in every log.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

// src/constants.rs
