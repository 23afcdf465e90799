// src/series_selector.rs

use plotters::style::RGBColor;
use tracing::warn;

use crate::channels::{Channel, MeasurementType, Source};

/// One line to draw in a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedChannel {
    pub channel: Channel,
    pub column: &'static str,
    pub label: &'static str,
    pub color: RGBColor,
}

/// Result of resolving one panel's channels against the available columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Channels to draw, in the caller's source order.
    pub channels: Vec<SelectedChannel>,
    /// Requested channels whose column is absent from the log.
    pub missing: Vec<Channel>,
}

/// Resolves which columns a panel draws.
///
/// Sources keep the order they were requested in, so legend order matches the
/// command line. A source whose column is absent is skipped with a warning;
/// a panel may end up with no channels at all.
pub fn select_series<S: AsRef<str>>(
    available_columns: &[S],
    sources: &[Source],
    measurement: MeasurementType,
) -> Selection {
    let mut selection = Selection::default();
    for &source in sources {
        let channel = Channel::new(source, measurement);
        let column = channel.column_name();
        if available_columns.iter().any(|c| c.as_ref() == column) {
            selection.channels.push(SelectedChannel {
                channel,
                column,
                label: channel.label(),
                color: channel.color(),
            });
        } else {
            warn!(
                "Column '{column}' not found in log; skipping {} in the {} panel",
                source.label(),
                measurement
            );
            selection.missing.push(channel);
        }
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_HEADER: [&str; 10] = [
        "timestamp",
        "vin_power",
        "vin_voltage",
        "vin_current",
        "main_power",
        "main_voltage",
        "main_current",
        "usb_power",
        "usb_voltage",
        "usb_current",
    ];

    fn labels(selection: &Selection) -> Vec<&'static str> {
        selection.channels.iter().map(|c| c.label).collect()
    }

    #[test]
    fn test_caller_order_is_preserved() {
        let selection = select_series(
            &FULL_HEADER,
            &[Source::Usb, Source::Vin],
            MeasurementType::Power,
        );
        assert_eq!(labels(&selection), vec!["USB", "VIN"]);
        assert_eq!(selection.channels[0].column, "usb_power");
        assert_eq!(selection.channels[1].color, RGBColor(255, 0, 0));
        assert!(selection.missing.is_empty());
    }

    #[test]
    fn test_missing_column_is_skipped_not_fatal() {
        let header = ["timestamp", "vin_power", "main_power"];
        let selection = select_series(&header, &Source::ALL, MeasurementType::Power);
        assert_eq!(labels(&selection), vec!["VIN", "MAIN"]);
        assert_eq!(
            selection.missing,
            vec![Channel::new(Source::Usb, MeasurementType::Power)]
        );
    }

    #[test]
    fn test_all_missing_gives_empty_panel() {
        let header = vec!["timestamp".to_string(), "vin_power".to_string()];
        let selection = select_series(&header, &[Source::Main], MeasurementType::Power);
        assert!(selection.channels.is_empty());
        assert_eq!(selection.missing.len(), 1);
    }

    #[test]
    fn test_measurement_picks_matching_columns() {
        let selection = select_series(&FULL_HEADER, &Source::ALL, MeasurementType::Current);
        let columns: Vec<&str> = selection.channels.iter().map(|c| c.column).collect();
        assert_eq!(columns, vec!["vin_current", "main_current", "usb_current"]);
    }
}
