// src/axis_scaler.rs

//! Y-axis scaling for one panel.
//!
//! Panels snap their upper bound to a fixed ladder of steps so charts from
//! different runs stay comparable. The lower bound is always 0.

use tracing::warn;

use crate::types::ScalePolicy;

/// Largest finite value across all drawn series; 0 when there is nothing to draw.
pub fn max_data_value<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(0.0)
}

/// First step `>= max_value`. Above the last step, `Clip` returns the last step
/// (the chart cuts off higher data) and `Extend` returns the smallest multiple
/// of the last step that covers the data.
///
/// `steps` must be ascending and non-empty.
pub fn select_step(max_value: f64, steps: &[f64], policy: ScalePolicy) -> f64 {
    if let Some(&step) = steps.iter().find(|&&s| s >= max_value) {
        return step;
    }
    let largest = steps.last().copied().unwrap_or(0.0);
    match policy {
        ScalePolicy::Clip => largest,
        ScalePolicy::Extend if largest > 0.0 => (max_value / largest).ceil() * largest,
        ScalePolicy::Extend => auto_upper_bound(max_value),
    }
}

/// Upper bound used when a measurement has no ladder: the data maximum plus 15%
/// padding, or a fixed padding for (near) zero data.
pub fn auto_upper_bound(max_value: f64) -> f64 {
    let max = max_value.max(0.0);
    let padding = if max < 1e-6 { 0.5 } else { max * 0.15 };
    max + padding
}

/// Y-axis upper bound for a panel whose drawn data peaks at `max_value`.
pub fn y_upper_bound(max_value: f64, steps: Option<&[f64]>, policy: ScalePolicy) -> f64 {
    match steps {
        Some(steps) if !steps.is_empty() => {
            let bound = select_step(max_value, steps, policy);
            if max_value > bound {
                warn!(
                    "Data peaks at {max_value:.3}, above the largest scale step {bound}; the chart is clipped"
                );
            }
            bound
        }
        _ => auto_upper_bound(max_value),
    }
}
