use crate::{constants::GNSS_MAX_MEASUREMENT, error::Error};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which measurements survive when a raw batch exceeds the capacity.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TruncationPolicy {
    /// Keep the first measurements, in arrival order
    #[default]
    KeepFirst,
    /// Keep the measurements with the highest C/N0.
    /// Kept measurements still appear in arrival order.
    StrongestSignal,
}

fn default_capacity() -> usize {
    GNSS_MAX_MEASUREMENT
}

fn default_truncation() -> TruncationPolicy {
    TruncationPolicy::KeepFirst
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Config {
    /// Maximal number of measurements per normalized batch.
    /// Cannot exceed [GNSS_MAX_MEASUREMENT].
    #[cfg_attr(feature = "serde", serde(default = "default_capacity"))]
    pub capacity: usize,
    /// [TruncationPolicy] applied past `capacity`
    #[cfg_attr(feature = "serde", serde(default = "default_truncation"))]
    pub truncation: TruncationPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            truncation: default_truncation(),
        }
    }
}

impl Config {
    /// Returns [Config] that retains the `capacity` strongest signals.
    /// You can then customize [Self] as you will.
    pub fn strongest_signal_preset(capacity: usize) -> Self {
        let mut s = Self::default();
        s.capacity = capacity;
        s.truncation = TruncationPolicy::StrongestSignal;
        s
    }

    /// Copies and returns [Config] with updated capacity
    pub fn with_capacity(&self, capacity: usize) -> Self {
        let mut s = self.clone();
        s.capacity = capacity;
        s
    }

    /// Verifies this [Config] may be deployed.
    pub fn validate(&self) -> Result<(), Error> {
        if self.capacity == 0 || self.capacity > GNSS_MAX_MEASUREMENT {
            Err(Error::InvalidCapacity(self.capacity))
        } else {
            Ok(())
        }
    }
}
