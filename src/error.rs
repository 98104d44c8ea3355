use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sentence field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Malformed {
    /// Latitude is not a number or exceeds +/-90°
    Latitude,
    /// Longitude is not a number or exceeds +/-180°
    Longitude,
    /// Hemisphere indicator does not match the coordinate sign
    Hemisphere,
    /// Altitude is not a number
    Altitude,
    /// Only meters are supported
    AltitudeUnit,
    /// Fix quality indicator out of the 0..=8 range
    FixQuality,
    /// Time of day outside of a single day
    TimeOfDay,
    /// Date is negative or not aligned to UTC midnight
    Date,
    /// Status is neither active (A) nor void (V)
    Status,
    /// Ground speed is negative or not a number
    Speed,
    /// Bearing is outside of [0°, 360°[
    Bearing,
    /// Accuracy is negative or not a number
    Accuracy,
    /// Dilution of precision is negative or not a number
    Hdop,
}

impl std::fmt::Display for Malformed {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self {
            Self::Latitude => write!(f, "latitude"),
            Self::Longitude => write!(f, "longitude"),
            Self::Hemisphere => write!(f, "hemisphere"),
            Self::Altitude => write!(f, "altitude"),
            Self::AltitudeUnit => write!(f, "altitude unit"),
            Self::FixQuality => write!(f, "fix quality"),
            Self::TimeOfDay => write!(f, "time of day"),
            Self::Date => write!(f, "date"),
            Self::Status => write!(f, "status"),
            Self::Speed => write!(f, "speed"),
            Self::Bearing => write!(f, "bearing"),
            Self::Accuracy => write!(f, "accuracy"),
            Self::Hdop => write!(f, "hdop"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input tag does not select any supported payload.
    /// Fatal to that call: the report should be skipped or reported upstream.
    #[error("unsupported gps data format")]
    UnsupportedFormat,

    /// More measurements were provided than the batch may hold.
    /// This is not fatal when surfaced by [Normalized::warning]:
    /// the batch is still returned, truncated to `capacity`.
    ///
    /// [Normalized::warning]: crate::prelude::Normalized::warning
    #[error("capacity exceeded: {received} measurements for {capacity} slots")]
    CapacityExceeded { received: usize, capacity: usize },

    /// Legacy sentence fields failed basic range or format checks.
    #[error("malformed sentence: invalid {0}")]
    MalformedSentence(Malformed),

    /// Batch capacity must be within 1..=64
    #[error("invalid measurement capacity: {0}")]
    InvalidCapacity(usize),

    /// No report was available within the requested timeout.
    #[error("no gps data available")]
    NoData,

    /// The report queue was torn down.
    #[error("gps data queue disconnected")]
    Disconnected,

    /// NMEA parser failure (bad checksum, bad field..)
    #[error("nmea parsing error: {0}")]
    Nmea(&'static str),

    /// Well formed NMEA sentence that does not carry a position fix.
    #[error("nmea sentence carries no fix")]
    NoFix,
}
