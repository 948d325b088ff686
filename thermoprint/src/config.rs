//! Printer configuration

use std::ops::RangeInclusive;

use thermoprint_core::constants::paper;

use crate::error::{Error, Result};

/// Printer session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterConfig {
    /// Printable width in dots; images without an explicit width are
    /// scaled to it
    pub dot_width: u32,

    /// Publish lifecycle events to subscribers
    pub enable_events: bool,

    /// Events buffered per subscriber before the oldest are dropped
    pub event_capacity: usize,
}

impl PrinterConfig {
    pub const DOT_WIDTH_RANGE: RangeInclusive<u32> = 8..=2048;
    pub const EVENT_CAPACITY_RANGE: RangeInclusive<usize> = 1..=4096;

    pub fn new() -> Self {
        Self {
            dot_width: paper::WIDTH_58MM,
            enable_events: true,
            event_capacity: 64,
        }
    }

    /// 58mm paper, 384 dots
    pub fn paper_58mm() -> Self {
        Self::new().with_dot_width(paper::WIDTH_58MM)
    }

    /// 80mm paper, 576 dots
    pub fn paper_80mm() -> Self {
        Self::new().with_dot_width(paper::WIDTH_80MM)
    }

    pub fn with_dot_width(mut self, dot_width: u32) -> Self {
        self.dot_width = dot_width;
        self
    }

    pub fn with_events(mut self, enable: bool) -> Self {
        self.enable_events = enable;
        self
    }

    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Check every value is in range
    pub fn validate(&self) -> Result<()> {
        if !Self::DOT_WIDTH_RANGE.contains(&self.dot_width) {
            return Err(Error::invalid_parameter(format!(
                "dot width {} out of range {:?}",
                self.dot_width,
                Self::DOT_WIDTH_RANGE
            )));
        }

        if !Self::EVENT_CAPACITY_RANGE.contains(&self.event_capacity) {
            return Err(Error::invalid_parameter(format!(
                "event capacity {} out of range {:?}",
                self.event_capacity,
                Self::EVENT_CAPACITY_RANGE
            )));
        }

        Ok(())
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::new()
    }
}
