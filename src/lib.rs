#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

// private modules
mod cfg;
mod clock;
mod constants;
mod constellation;
mod data;
mod error;
mod measurement;
mod normalizer;
mod position;
mod processor;
mod sentence;
mod time;

pub mod nmea;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::cfg::{Config, TruncationPolicy};
    pub use crate::clock::{ClockFlags, GnssClock, RawGnssClock};
    pub use crate::constants::GNSS_MAX_MEASUREMENT;
    pub use crate::constellation::ConstellationType;
    pub use crate::data::{GnssData, GpsData, GpsDataType, RawGnssData};
    pub use crate::error::{Error, Malformed};
    pub use crate::measurement::{GnssMeasurement, MeasurementState, RawGnssMeasurement};
    pub use crate::normalizer::{normalize, Normalized, Normalizer, Truncation};
    pub use crate::position::{FixSource, PositionFix};
    pub use crate::processor::{GpsProcessor, Timeout};
    pub use crate::sentence::{FixQuality, GgaData, GpsUtcTime, RmcData};
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
    pub use nalgebra::Vector3;
}

// pub export
pub use error::Error;
