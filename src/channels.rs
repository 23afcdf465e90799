// src/channels.rs

//! Static registry of the logical channels a power log can carry.
//!
//! A channel is a `(Source, MeasurementType)` pair. Column names, labels,
//! colors and y-axis step ladders all come from the tables below, so adding a
//! source or a measurement type means adding table rows, not new logic.

use std::fmt;

use clap::ValueEnum;
use plotters::style::RGBColor;

use crate::constants::{COLOR_MAIN, COLOR_USB, COLOR_VIN};

/// A power rail monitored by the logging hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Source {
    Vin,
    Main,
    Usb,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Vin, Source::Main, Source::Usb];

    /// Lowercase key used as the column name prefix.
    pub fn key(self) -> &'static str {
        match self {
            Source::Vin => "vin",
            Source::Main => "main",
            Source::Usb => "usb",
        }
    }

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            Source::Vin => "VIN",
            Source::Main => "MAIN",
            Source::Usb => "USB",
        }
    }

    pub fn color(self) -> RGBColor {
        match self {
            Source::Vin => COLOR_VIN,
            Source::Main => COLOR_MAIN,
            Source::Usb => COLOR_USB,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The quantity shown in one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum MeasurementType {
    Power,
    Voltage,
    Current,
}

impl MeasurementType {
    pub const ALL: [MeasurementType; 3] = [
        MeasurementType::Power,
        MeasurementType::Voltage,
        MeasurementType::Current,
    ];

    /// Lowercase key used as the column name suffix.
    pub fn key(self) -> &'static str {
        match self {
            MeasurementType::Power => "power",
            MeasurementType::Voltage => "voltage",
            MeasurementType::Current => "current",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MeasurementType::Power => "Power Consumption",
            MeasurementType::Voltage => "Voltage",
            MeasurementType::Current => "Current",
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            MeasurementType::Power => "Power (W)",
            MeasurementType::Voltage => "Voltage (V)",
            MeasurementType::Current => "Current (A)",
        }
    }

    /// Ascending y-axis upper bounds, or `None` to auto-scale from the data.
    pub fn scale_steps(self) -> Option<&'static [f64]> {
        match self {
            MeasurementType::Power => Some(&POWER_STEPS),
            MeasurementType::Voltage => Some(&VOLTAGE_STEPS),
            MeasurementType::Current => Some(&CURRENT_STEPS),
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

const POWER_STEPS: [f64; 4] = [5.0, 20.0, 50.0, 160.0];
const VOLTAGE_STEPS: [f64; 4] = [5.0, 12.0, 20.0, 25.0];
const CURRENT_STEPS: [f64; 4] = [1.0, 3.0, 5.0, 10.0];

/// One `(source, measurement)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel {
    pub source: Source,
    pub measurement: MeasurementType,
}

struct ChannelEntry {
    channel: Channel,
    column: &'static str,
}

const fn entry(source: Source, measurement: MeasurementType, column: &'static str) -> ChannelEntry {
    ChannelEntry {
        channel: Channel {
            source,
            measurement,
        },
        column,
    }
}

/// Number of known channels.
pub const CHANNEL_COUNT: usize = 9;

static CHANNEL_TABLE: [ChannelEntry; CHANNEL_COUNT] = [
    entry(Source::Vin, MeasurementType::Power, "vin_power"),
    entry(Source::Vin, MeasurementType::Voltage, "vin_voltage"),
    entry(Source::Vin, MeasurementType::Current, "vin_current"),
    entry(Source::Main, MeasurementType::Power, "main_power"),
    entry(Source::Main, MeasurementType::Voltage, "main_voltage"),
    entry(Source::Main, MeasurementType::Current, "main_current"),
    entry(Source::Usb, MeasurementType::Power, "usb_power"),
    entry(Source::Usb, MeasurementType::Voltage, "usb_voltage"),
    entry(Source::Usb, MeasurementType::Current, "usb_current"),
];

impl Channel {
    pub fn new(source: Source, measurement: MeasurementType) -> Self {
        Self {
            source,
            measurement,
        }
    }

    /// Every known channel, in table order.
    pub fn all() -> impl Iterator<Item = Channel> {
        CHANNEL_TABLE.iter().map(|s| s.channel)
    }

    /// Position of this channel in the registry, `0..CHANNEL_COUNT`.
    pub fn index(self) -> usize {
        CHANNEL_TABLE
            .iter()
            .position(|s| s.channel == self)
            // Every (source, measurement) pair has a row in CHANNEL_TABLE.
            .unwrap_or_default()
    }

    /// Name of the CSV column holding this channel.
    pub fn column_name(self) -> &'static str {
        CHANNEL_TABLE[self.index()].column
    }

    /// Reverse lookup from a CSV header.
    pub fn from_column_name(column: &str) -> Option<Channel> {
        CHANNEL_TABLE
            .iter()
            .find(|s| s.column == column)
            .map(|s| s.channel)
    }

    pub fn label(self) -> &'static str {
        self.source.label()
    }

    pub fn color(self) -> RGBColor {
        self.source.color()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_has_a_column() {
        for source in Source::ALL {
            for measurement in MeasurementType::ALL {
                let channel = Channel::new(source, measurement);
                assert_eq!(
                    channel.column_name(),
                    format!("{}_{}", source.key(), measurement.key())
                );
            }
        }
        assert_eq!(Channel::all().count(), CHANNEL_COUNT);
        for (i, channel) in Channel::all().enumerate() {
            assert_eq!(channel.index(), i);
        }
    }

    #[test]
    fn test_column_lookup_round_trip() {
        for channel in Channel::all() {
            assert_eq!(Channel::from_column_name(channel.column_name()), Some(channel));
        }
        assert_eq!(Channel::from_column_name("timestamp"), None);
        assert_eq!(Channel::from_column_name("VIN_POWER"), None);
    }

    #[test]
    fn test_labels_and_colors() {
        assert_eq!(Source::Vin.label(), "VIN");
        assert_eq!(Source::Main.label(), "MAIN");
        assert_eq!(Source::Usb.label(), "USB");
        assert_eq!(Source::Vin.color(), RGBColor(255, 0, 0));
        assert_eq!(Source::Main.color(), RGBColor(0, 128, 0));
        assert_eq!(Source::Usb.color(), RGBColor(0, 0, 255));
    }

    #[test]
    fn test_ladders_are_ascending() {
        for measurement in MeasurementType::ALL {
            let steps = measurement.scale_steps().expect("ladder defined");
            assert!(!steps.is_empty());
            assert!(steps.windows(2).all(|w| w[0] < w[1]), "{measurement} ladder not ascending");
        }
        assert_eq!(
            MeasurementType::Power.scale_steps(),
            Some(&[5.0, 20.0, 50.0, 160.0][..])
        );
    }

    #[test]
    fn test_titles() {
        assert_eq!(MeasurementType::Power.title(), "Power Consumption");
        assert_eq!(MeasurementType::Voltage.y_label(), "Voltage (V)");
        assert_eq!(MeasurementType::Current.y_label(), "Current (A)");
    }
}
