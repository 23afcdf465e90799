// src/types.rs

use std::path::PathBuf;

use chrono_tz::Tz;
use clap::ValueEnum;

use crate::channels::{MeasurementType, Source};

/// What to do when the data exceeds the largest step of a ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ScalePolicy {
    /// Keep the largest step; data above it is drawn outside the visible range.
    #[default]
    Clip,
    /// Grow to the next multiple of the largest step that covers the data.
    Extend,
}

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct PlotRequest {
    /// Panels, top to bottom.
    pub types: Vec<MeasurementType>,
    /// Lines within each panel, in legend order.
    pub sources: Vec<Source>,
    pub input: PathBuf,
    pub output: PathBuf,
    pub display_tz: Tz,
    pub scale_policy: ScalePolicy,
}

impl PlotRequest {
    /// Request for every panel and every source, displayed in `display_tz`.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, display_tz: Tz) -> Self {
        Self {
            types: MeasurementType::ALL.to_vec(),
            sources: Source::ALL.to_vec(),
            input: input.into(),
            output: output.into(),
            display_tz,
            scale_policy: ScalePolicy::default(),
        }
    }

    pub fn with_types(mut self, types: &[MeasurementType]) -> Self {
        self.types = dedup_keep_first(types);
        self
    }

    pub fn with_sources(mut self, sources: &[Source]) -> Self {
        self.sources = dedup_keep_first(sources);
        self
    }

    pub fn with_scale_policy(mut self, scale_policy: ScalePolicy) -> Self {
        self.scale_policy = scale_policy;
        self
    }
}

/// Drops repeated entries, keeping the position of the first occurrence.
pub fn dedup_keep_first<T: Copy + PartialEq>(items: &[T]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(*item);
        }
    }
    out
}
