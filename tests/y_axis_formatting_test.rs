// tests/y_axis_formatting_test.rs

use powerlog_plot::axis_scaler::y_upper_bound;
use powerlog_plot::constants::MAX_VALUE_TICKS;
use powerlog_plot::plot_framework::{format_value_label, value_ticks};
use powerlog_plot::{MeasurementType, ScalePolicy};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_ladder_labels_keep_decimals() {
        // Current panels top out at 1 A, so ticks fall on tenths.
        let ticks = value_ticks(1.0, MAX_VALUE_TICKS);
        let labels: Vec<String> = ticks.iter().map(|&y| format_value_label(y)).collect();
        assert_eq!(labels, vec!["0", "0.2", "0.4", "0.6", "0.8", "1"]);
    }

    #[test]
    fn test_quarter_steps() {
        assert_eq!(format_value_label(2.5), "2.5");
        assert_eq!(format_value_label(7.5), "7.5");
        assert_eq!(format_value_label(12.5), "12.5");
        assert_eq!(format_value_label(17.5), "17.5");
        assert_eq!(format_value_label(0.25), "0.25");
        assert_eq!(format_value_label(20.0), "20");
    }

    #[test]
    fn test_large_values_use_suffixes() {
        assert_eq!(format_value_label(1000.0), "1k");
        assert_eq!(format_value_label(5000.0), "5k");
        assert_eq!(format_value_label(1200.0), "1.2k");
        assert_eq!(format_value_label(1250.0), "1.25k");
        assert_eq!(format_value_label(1_000_000.0), "1M");
        assert_eq!(format_value_label(2_500_000.0), "2.5M");
    }

    /// Reads a tick label back into a number, honouring the k/M suffixes.
    fn label_value(label: &str) -> f64 {
        if let Some(v) = label.strip_suffix('M') {
            v.parse::<f64>().unwrap() * 1_000_000.0
        } else if let Some(v) = label.strip_suffix('k') {
            v.parse::<f64>().unwrap() * 1000.0
        } else {
            label.parse::<f64>().unwrap()
        }
    }

    fn assert_labels_match_ticks(upper: f64) {
        let ticks = value_ticks(upper, MAX_VALUE_TICKS);
        let labels: Vec<String> = ticks.iter().map(|&y| format_value_label(y)).collect();
        for (tick, label) in ticks.iter().zip(&labels) {
            let back = label_value(label);
            assert!(
                (back - tick).abs() <= 1e-9 * tick.abs().max(1.0),
                "upper {upper}: tick {tick} labelled {label}"
            );
        }
        let mut unique = labels.clone();
        unique.dedup();
        assert_eq!(unique.len(), labels.len(), "upper {upper}: duplicate labels {labels:?}");
    }

    #[test]
    fn test_labels_read_back_as_their_ticks() {
        for measurement in MeasurementType::ALL {
            let steps = measurement.scale_steps().unwrap();
            for &step in steps {
                assert_labels_match_ticks(step);
            }
            let largest = steps[steps.len() - 1];
            for factor in [2.0, 3.0, 7.5, 10.0] {
                let upper =
                    y_upper_bound(largest * factor, Some(steps), ScalePolicy::Extend);
                assert_labels_match_ticks(upper);
            }
        }
        for upper in [0.5, 2.3, 12.0, 1200.0, 12_500.0, 2_500_000.0] {
            assert_labels_match_ticks(upper);
        }
    }

    #[test]
    fn test_every_ladder_step_has_clean_ticks() {
        for measurement in MeasurementType::ALL {
            for &step in measurement.scale_steps().unwrap() {
                let upper = y_upper_bound(step, measurement.scale_steps(), ScalePolicy::Clip);
                assert_eq!(upper, step);
                let ticks = value_ticks(upper, MAX_VALUE_TICKS);
                assert_eq!(ticks[0], 0.0);
                assert!(ticks.len() >= 2 && ticks.len() <= MAX_VALUE_TICKS);
                for y in ticks {
                    let label = format_value_label(y);
                    assert!(!label.is_empty());
                    assert!(label.parse::<f64>().is_ok(), "{label} is not numeric");
                }
            }
        }
    }
}
