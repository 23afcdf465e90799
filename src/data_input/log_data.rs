// src/data_input/log_data.rs

use chrono::DateTime;
use chrono_tz::Tz;

use crate::channels::{Channel, CHANNEL_COUNT};

/// One row of the power log, timestamp already in the display timezone.
/// Channels that are absent from the file or left empty in this row are `None`.
#[derive(Debug, Clone)]
pub struct LogRowData {
    pub timestamp: DateTime<Tz>,
    pub readings: [Option<f64>; CHANNEL_COUNT],
}

impl LogRowData {
    pub fn new(timestamp: DateTime<Tz>) -> Self {
        Self {
            timestamp,
            readings: [None; CHANNEL_COUNT],
        }
    }

    pub fn reading(&self, channel: Channel) -> Option<f64> {
        self.readings[channel.index()]
    }
}

/// A loaded log: rows in file order plus what the header announced.
#[derive(Debug, Clone)]
pub struct LogTable {
    rows: Vec<LogRowData>,
    columns: Vec<String>,
    display_tz: Tz,
}

impl LogTable {
    pub fn new(rows: Vec<LogRowData>, columns: Vec<String>, display_tz: Tz) -> Self {
        Self {
            rows,
            columns,
            display_tz,
        }
    }

    pub fn rows(&self) -> &[LogRowData] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header names, in file order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Timezone every timestamp was converted to.
    pub fn display_tz(&self) -> Tz {
        self.display_tz
    }

    pub fn first_timestamp(&self) -> Option<&DateTime<Tz>> {
        self.rows.first().map(|r| &r.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<&DateTime<Tz>> {
        self.rows.last().map(|r| &r.timestamp)
    }

    /// `(timestamp, value)` pairs for one channel, one per row.
    pub fn series(&self, channel: Channel) -> Vec<(DateTime<Tz>, Option<f64>)> {
        self.rows
            .iter()
            .map(|r| (r.timestamp, r.reading(channel)))
            .collect()
    }
}

// src/data_input/log_data.rs
