use hifitime::Unit;

use crate::{
    error::{Error, Malformed},
    position::{FixSource, PositionFix},
    sentence::{
        accuracy, check_accuracies, check_coordinates, check_time_of_day, FixQuality, GpsUtcTime,
        UNSET,
    },
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// GGA essential fix data: 3D location and accuracy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GgaData {
    /// UTC time of day of the fix (ms)
    pub time: GpsUtcTime,
    /// Latitude in decimal degrees, negative south
    pub latitude: f64,
    /// `N`, `S` or unset
    pub latitude_hemi: char,
    /// Longitude in decimal degrees, negative west
    pub longitude: f64,
    /// `E`, `W` or unset
    pub longitude_hemi: char,
    /// Altitude above mean sea level
    pub altitude: f64,
    /// `M` or unset
    pub altitude_unit: char,
    /// Wire fix quality indicator (0..=8)
    pub fix_quality: u8,
    /// Satellites used in the fix
    pub satellites: u8,
    /// Horizontal dilution of precision
    pub hdop: f32,
    /// Horizontal accuracy (m), 0 when unknown
    pub horizontal_accuracy: f32,
    /// Vertical accuracy (m), 0 when unknown
    pub vertical_accuracy: f32,
}

impl Default for GgaData {
    fn default() -> Self {
        Self {
            time: 0,
            latitude: 0.0,
            latitude_hemi: UNSET,
            longitude: 0.0,
            longitude_hemi: UNSET,
            altitude: 0.0,
            altitude_unit: 'M',
            fix_quality: 0,
            satellites: 0,
            hdop: 0.0,
            horizontal_accuracy: 0.0,
            vertical_accuracy: 0.0,
        }
    }
}

impl GgaData {
    /// Basic GGA definition, at `time` (ms in day), with signed coordinates
    /// in decimal degrees and altitude in meters.
    pub fn new(time: GpsUtcTime, latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            time,
            latitude,
            longitude,
            altitude,
            fix_quality: 1,
            ..Default::default()
        }
    }

    /// Copies and returns [GgaData] with updated fix quality indicator
    pub fn with_fix_quality(&self, fix_quality: u8) -> Self {
        let mut s = *self;
        s.fix_quality = fix_quality;
        s
    }

    /// Copies and returns [GgaData] with hemisphere indicators
    pub fn with_hemispheres(&self, latitude_hemi: char, longitude_hemi: char) -> Self {
        let mut s = *self;
        s.latitude_hemi = latitude_hemi;
        s.longitude_hemi = longitude_hemi;
        s
    }

    /// Copies and returns [GgaData] with satellites count and HDOP
    pub fn with_satellites(&self, satellites: u8, hdop: f32) -> Self {
        let mut s = *self;
        s.satellites = satellites;
        s.hdop = hdop;
        s
    }

    /// Verifies all fields are within their physical range.
    pub fn validate(&self) -> Result<FixQuality, Error> {
        check_time_of_day(self.time)?;
        check_coordinates(
            self.latitude,
            self.latitude_hemi,
            self.longitude,
            self.longitude_hemi,
        )?;

        if !self.altitude.is_finite() {
            return Err(Error::MalformedSentence(Malformed::Altitude));
        }

        if !matches!(self.altitude_unit, 'M' | UNSET) {
            return Err(Error::MalformedSentence(Malformed::AltitudeUnit));
        }

        if !self.hdop.is_finite() || self.hdop < 0.0 {
            return Err(Error::MalformedSentence(Malformed::Hdop));
        }

        check_accuracies(self.horizontal_accuracy, self.vertical_accuracy)?;
        FixQuality::try_from(self.fix_quality)
    }

    /// Validates and converts to a [PositionFix]
    pub fn to_fix(&self) -> Result<PositionFix, Error> {
        let quality = self.validate()?;
        Ok(PositionFix {
            quality,
            source: FixSource::Gga,
            latitude_deg: self.latitude,
            longitude_deg: self.longitude,
            altitude_m: Some(self.altitude),
            speed_m_s: None,
            bearing_deg: None,
            satellites: Some(self.satellites),
            hdop: Some(self.hdop),
            horizontal_accuracy_m: accuracy(self.horizontal_accuracy),
            vertical_accuracy_m: accuracy(self.vertical_accuracy),
            time_of_day: self.time * Unit::Millisecond,
            epoch: None,
            active: quality.is_valid(),
        })
    }
}
