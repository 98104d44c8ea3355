//! Legacy sentence based fixes
use num_traits::Float;

use crate::{
    constants::MILLISECONDS_PER_DAY,
    error::{Error, Malformed},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod gga;
mod rmc;

pub use gga::GgaData;
pub use rmc::RmcData;

/// Milliseconds since 1970-01-01T00:00:00 UTC
pub type GpsUtcTime = i64;

/// Unset hemisphere or unit indicator
pub const UNSET: char = '\0';

/// GGA fix quality indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FixQuality {
    #[default]
    Invalid,
    /// Autonomous GPS fix
    Gps,
    /// Differential GPS fix
    Dgps,
    /// Precise Positioning Service
    Pps,
    /// Real Time Kinematic (fixed integers)
    Rtk,
    /// Float RTK
    FloatRtk,
    /// Dead reckoning
    Estimated,
    /// Manual input mode
    Manual,
    Simulation,
}

impl TryFrom<u8> for FixQuality {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Invalid),
            1 => Ok(Self::Gps),
            2 => Ok(Self::Dgps),
            3 => Ok(Self::Pps),
            4 => Ok(Self::Rtk),
            5 => Ok(Self::FloatRtk),
            6 => Ok(Self::Estimated),
            7 => Ok(Self::Manual),
            8 => Ok(Self::Simulation),
            _ => Err(Error::MalformedSentence(Malformed::FixQuality)),
        }
    }
}

impl From<FixQuality> for u8 {
    fn from(value: FixQuality) -> Self {
        match value {
            FixQuality::Invalid => 0,
            FixQuality::Gps => 1,
            FixQuality::Dgps => 2,
            FixQuality::Pps => 3,
            FixQuality::Rtk => 4,
            FixQuality::FloatRtk => 5,
            FixQuality::Estimated => 6,
            FixQuality::Manual => 7,
            FixQuality::Simulation => 8,
        }
    }
}

impl FixQuality {
    /// True when this represents an actual position fix
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

fn malformed(field: Malformed) -> Error {
    Error::MalformedSentence(field)
}

/// Finite and within `[min, max]`
fn within<T: Float>(value: T, min: T, max: T) -> bool {
    value.is_finite() && value >= min && value <= max
}

/// Finite and positive (or null)
fn positive<T: Float>(value: T) -> bool {
    value.is_finite() && value >= T::zero()
}

/// Hemisphere letter must agree with the coordinate sign.
/// A null coordinate lies on both hemispheres.
fn hemisphere(value: f64, hemi: char, positive: char, negative: char) -> bool {
    match hemi {
        UNSET => true,
        c if c == positive => value >= 0.0,
        c if c == negative => value <= 0.0,
        _ => false,
    }
}

pub(crate) fn check_coordinates(
    latitude: f64,
    latitude_hemi: char,
    longitude: f64,
    longitude_hemi: char,
) -> Result<(), Error> {
    if !within(latitude, -90.0, 90.0) {
        return Err(malformed(Malformed::Latitude));
    }
    if !within(longitude, -180.0, 180.0) {
        return Err(malformed(Malformed::Longitude));
    }
    if !hemisphere(latitude, latitude_hemi, 'N', 'S') {
        return Err(malformed(Malformed::Hemisphere));
    }
    if !hemisphere(longitude, longitude_hemi, 'E', 'W') {
        return Err(malformed(Malformed::Hemisphere));
    }
    Ok(())
}

pub(crate) fn check_time_of_day(time_ms: GpsUtcTime) -> Result<(), Error> {
    if (0..MILLISECONDS_PER_DAY).contains(&time_ms) {
        Ok(())
    } else {
        Err(malformed(Malformed::TimeOfDay))
    }
}

pub(crate) fn check_accuracies(horizontal: f32, vertical: f32) -> Result<(), Error> {
    if positive(horizontal) && positive(vertical) {
        Ok(())
    } else {
        Err(malformed(Malformed::Accuracy))
    }
}

/// Accuracies are not reported when null.
pub(crate) fn accuracy(value: f32) -> Option<f32> {
    if value > 0.0 {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hemispheres() {
        assert!(check_coordinates(37.7749, 'N', -122.4194, 'W').is_ok());
        assert!(check_coordinates(37.7749, UNSET, -122.4194, UNSET).is_ok());
        assert!(check_coordinates(0.0, 'S', 0.0, 'E').is_ok());
        assert_eq!(
            check_coordinates(37.7749, 'S', -122.4194, 'W'),
            Err(Error::MalformedSentence(Malformed::Hemisphere))
        );
        assert_eq!(
            check_coordinates(37.7749, 'N', -122.4194, 'E'),
            Err(Error::MalformedSentence(Malformed::Hemisphere))
        );
        assert_eq!(
            check_coordinates(37.7749, 'X', -122.4194, 'W'),
            Err(Error::MalformedSentence(Malformed::Hemisphere))
        );
    }

    #[test]
    fn coordinate_ranges() {
        assert_eq!(
            check_coordinates(f64::NAN, UNSET, 0.0, UNSET),
            Err(Error::MalformedSentence(Malformed::Latitude))
        );
        assert_eq!(
            check_coordinates(90.1, UNSET, 0.0, UNSET),
            Err(Error::MalformedSentence(Malformed::Latitude))
        );
        assert_eq!(
            check_coordinates(0.0, UNSET, f64::INFINITY, UNSET),
            Err(Error::MalformedSentence(Malformed::Longitude))
        );
        assert_eq!(
            check_coordinates(0.0, UNSET, -180.5, UNSET),
            Err(Error::MalformedSentence(Malformed::Longitude))
        );
        assert!(check_coordinates(-90.0, 'S', 180.0, 'E').is_ok());
    }

    #[test]
    fn time_of_day() {
        assert!(check_time_of_day(0).is_ok());
        assert!(check_time_of_day(86_399_999).is_ok());
        assert!(check_time_of_day(86_400_000).is_err());
        assert!(check_time_of_day(-1).is_err());
    }

    #[test]
    fn fix_quality() {
        for value in 0..=8_u8 {
            let quality = FixQuality::try_from(value).unwrap();
            assert_eq!(u8::from(quality), value);
        }
        assert_eq!(
            FixQuality::try_from(9),
            Err(Error::MalformedSentence(Malformed::FixQuality))
        );
        assert!(!FixQuality::Invalid.is_valid());
        assert!(FixQuality::Rtk.is_valid());
    }
}
