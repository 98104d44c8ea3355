//! Receiver clock snapshot
use bitflags::bitflags;

use hifitime::Unit;

use crate::prelude::{Duration, Epoch, TimeScale};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Indicates which [RawGnssClock] fields are valid.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct ClockFlags: u16 {
        const HAS_LEAP_SECOND = 1 << 0;
        const HAS_TIME_UNCERTAINTY = 1 << 1;
        const HAS_FULL_BIAS = 1 << 2;
        const HAS_BIAS = 1 << 3;
        const HAS_BIAS_UNCERTAINTY = 1 << 4;
        const HAS_DRIFT = 1 << 5;
        const HAS_DRIFT_UNCERTAINTY = 1 << 6;
    }
}

/// Receiver clock, as produced by the location source.
/// Fields are only meaningful when the matching [ClockFlags] bit is set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawGnssClock {
    /// Local hardware clock value (ns), mandatory.
    pub time_ns: i64,
    /// Leap second
    pub leap_second: i16,
    /// 1-sigma uncertainty of `time_ns`
    pub time_uncertainty_ns: f64,
    /// Offset between `time_ns` and GPS time since 1980-01-06T00:00:00Z
    pub full_bias_ns: i64,
    /// Sub-nanosecond bias
    pub bias_ns: f64,
    /// 1-sigma uncertainty of `full_bias_ns + bias_ns`
    pub bias_uncertainty_ns: f64,
    /// Clock drift (ns/s)
    pub drift_nsps: f64,
    /// 1-sigma uncertainty of the drift (ns/s)
    pub drift_uncertainty_nsps: f64,
    /// Incremented on each hardware clock discontinuity, mandatory.
    pub hw_clock_discontinuity_count: u32,
    /// Validity flags
    pub flags: ClockFlags,
}

/// Normalized receiver clock: each optional field is only present
/// when the source declared it valid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GnssClock {
    /// Local hardware clock value (ns)
    pub time_ns: i64,
    /// Hardware clock discontinuity counter
    pub hw_clock_discontinuity_count: u32,
    pub leap_second: Option<i16>,
    pub time_uncertainty_ns: Option<f64>,
    pub full_bias_ns: Option<i64>,
    pub bias_ns: Option<f64>,
    pub bias_uncertainty_ns: Option<f64>,
    pub drift_nsps: Option<f64>,
    pub drift_uncertainty_nsps: Option<f64>,
}

/// Returns `value` if `flag` is contained in `flags`.
fn gated<T>(flags: ClockFlags, flag: ClockFlags, value: T) -> Option<T> {
    if flags.contains(flag) {
        Some(value)
    } else {
        None
    }
}

impl GnssClock {
    /// Builds a [GnssClock] that only carries the mandatory fields.
    pub fn new(time_ns: i64) -> Self {
        Self {
            time_ns,
            ..Default::default()
        }
    }

    /// Builds a [GnssClock] from [RawGnssClock], discarding
    /// every field whose validity flag is not set.
    pub fn from_raw(raw: &RawGnssClock) -> Self {
        let flags = raw.flags;
        Self {
            time_ns: raw.time_ns,
            hw_clock_discontinuity_count: raw.hw_clock_discontinuity_count,
            leap_second: gated(flags, ClockFlags::HAS_LEAP_SECOND, raw.leap_second),
            time_uncertainty_ns: gated(
                flags,
                ClockFlags::HAS_TIME_UNCERTAINTY,
                raw.time_uncertainty_ns,
            ),
            full_bias_ns: gated(flags, ClockFlags::HAS_FULL_BIAS, raw.full_bias_ns),
            bias_ns: gated(flags, ClockFlags::HAS_BIAS, raw.bias_ns),
            bias_uncertainty_ns: gated(
                flags,
                ClockFlags::HAS_BIAS_UNCERTAINTY,
                raw.bias_uncertainty_ns,
            ),
            drift_nsps: gated(flags, ClockFlags::HAS_DRIFT, raw.drift_nsps),
            drift_uncertainty_nsps: gated(
                flags,
                ClockFlags::HAS_DRIFT_UNCERTAINTY,
                raw.drift_uncertainty_nsps,
            ),
        }
    }

    /// Validity flags, as defined by field presence.
    pub fn flags(&self) -> ClockFlags {
        let mut flags = ClockFlags::empty();
        flags.set(ClockFlags::HAS_LEAP_SECOND, self.leap_second.is_some());
        flags.set(
            ClockFlags::HAS_TIME_UNCERTAINTY,
            self.time_uncertainty_ns.is_some(),
        );
        flags.set(ClockFlags::HAS_FULL_BIAS, self.full_bias_ns.is_some());
        flags.set(ClockFlags::HAS_BIAS, self.bias_ns.is_some());
        flags.set(
            ClockFlags::HAS_BIAS_UNCERTAINTY,
            self.bias_uncertainty_ns.is_some(),
        );
        flags.set(ClockFlags::HAS_DRIFT, self.drift_nsps.is_some());
        flags.set(
            ClockFlags::HAS_DRIFT_UNCERTAINTY,
            self.drift_uncertainty_nsps.is_some(),
        );
        flags
    }

    /// True if no flag gated field is present
    pub fn is_bare(&self) -> bool {
        self.flags().is_empty()
    }

    /// Converts back to the wire representation.
    /// Absent fields are zeroed.
    pub fn to_raw(&self) -> RawGnssClock {
        RawGnssClock {
            time_ns: self.time_ns,
            hw_clock_discontinuity_count: self.hw_clock_discontinuity_count,
            leap_second: self.leap_second.unwrap_or_default(),
            time_uncertainty_ns: self.time_uncertainty_ns.unwrap_or_default(),
            full_bias_ns: self.full_bias_ns.unwrap_or_default(),
            bias_ns: self.bias_ns.unwrap_or_default(),
            bias_uncertainty_ns: self.bias_uncertainty_ns.unwrap_or_default(),
            drift_nsps: self.drift_nsps.unwrap_or_default(),
            drift_uncertainty_nsps: self.drift_uncertainty_nsps.unwrap_or_default(),
            flags: self.flags(),
        }
    }

    /// Receiver estimate of GPS time, as [Epoch] in [TimeScale::GPST]:
    /// `time_ns - (full_bias_ns + bias_ns)`.
    /// Requires the full bias to be known, sub-nanosecond bias is optional.
    pub fn gpst_epoch(&self) -> Option<Epoch> {
        let full_bias_ns = self.full_bias_ns?;
        let nanos = self.time_ns as i128 - full_bias_ns as i128;
        let bias = self.bias_ns.unwrap_or_default() * Unit::Nanosecond;
        let dt = Duration::from_total_nanoseconds(nanos) - bias;
        Some(Epoch::from_duration(dt, TimeScale::GPST))
    }
}
