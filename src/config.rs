//! Module for the settings of the ingestion pipeline

use crate::Error;

/// Cells buffered between producer and consumer before the producer blocks.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 4;
/// Capacity of the read buffer in front of each source file.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 64 * 1024;

const CHANNEL_CAPACITY_VAR: &str = "POI_CHANNEL_CAPACITY";
const READ_BUFFER_SIZE_VAR: &str = "POI_READ_BUFFER_SIZE";

/// Settings of a pipeline run. Both values only affect throughput, never the cells delivered or their order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    channel_capacity: usize,
    read_buffer_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl PipelineConfig {
    /// Reads the settings from the `POI_CHANNEL_CAPACITY` and `POI_READ_BUFFER_SIZE` env variables, falling back to
    /// the defaults for unset variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut config = Self::default();
        if let Some(raw) = lookup(CHANNEL_CAPACITY_VAR) {
            config.channel_capacity = parse_setting(CHANNEL_CAPACITY_VAR, &raw)?;
        }
        if let Some(raw) = lookup(READ_BUFFER_SIZE_VAR) {
            config.read_buffer_size = parse_setting(READ_BUFFER_SIZE_VAR, &raw)?;
        }
        Ok(config)
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Result<Self, Error> {
        self.channel_capacity = ensure_positive("channel_capacity", capacity)?;
        Ok(self)
    }

    pub fn with_read_buffer_size(mut self, size: usize) -> Result<Self, Error> {
        self.read_buffer_size = ensure_positive("read_buffer_size", size)?;
        Ok(self)
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    pub fn read_buffer_size(&self) -> usize {
        self.read_buffer_size
    }
}

fn parse_setting(name: &'static str, raw: &str) -> Result<usize, Error> {
    let value = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| Error::InvalidSetting {
            name,
            reason: format!("{raw:?} is not a number: {e}"),
        })?;
    ensure_positive(name, value)
}

fn ensure_positive(name: &'static str, value: usize) -> Result<usize, Error> {
    if value == 0 {
        return Err(Error::InvalidSetting {
            name,
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(value)
}
