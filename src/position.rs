//! Position fix derived from legacy sentences
use crate::{
    constants::{EARTH_FLATTENING_WGS84, EARTH_SEMI_MAJOR_AXIS_WGS84},
    prelude::{Duration, Epoch, FixQuality, Vector3},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sentence a [PositionFix] was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FixSource {
    Gga,
    Rmc,
}

impl std::fmt::Display for FixSource {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self {
            Self::Gga => write!(f, "GGA"),
            Self::Rmc => write!(f, "RMC"),
        }
    }
}

/// Validated position fix. Coordinates are reported exactly as received.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionFix {
    pub source: FixSource,
    /// Fix quality. RMC only distinguishes [FixQuality::Gps]
    /// from [FixQuality::Invalid].
    pub quality: FixQuality,
    /// False for void RMC or invalid GGA fixes
    pub active: bool,
    /// Latitude in decimal degrees
    pub latitude_deg: f64,
    /// Longitude in decimal degrees
    pub longitude_deg: f64,
    /// Altitude above mean sea level (GGA)
    pub altitude_m: Option<f64>,
    /// Ground speed (RMC)
    pub speed_m_s: Option<f32>,
    /// Course over ground (RMC)
    pub bearing_deg: Option<f32>,
    /// Satellites used in the fix (GGA)
    pub satellites: Option<u8>,
    /// Horizontal dilution of precision (GGA)
    pub hdop: Option<f32>,
    pub horizontal_accuracy_m: Option<f32>,
    pub vertical_accuracy_m: Option<f32>,
    /// UTC time of day
    pub time_of_day: Duration,
    /// Absolute UTC instant, when the date is known (RMC)
    pub epoch: Option<Epoch>,
}

impl PositionFix {
    /// Geodetic coordinates: latitude (rad), longitude (rad), altitude (m).
    /// Unknown altitude is considered null.
    pub fn geodetic(&self) -> Vector3<f64> {
        Vector3::new(
            self.latitude_deg.to_radians(),
            self.longitude_deg.to_radians(),
            self.altitude_m.unwrap_or_default(),
        )
    }

    /// WGS84 ECEF coordinates, in meters.
    pub fn to_ecef_m(&self) -> Vector3<f64> {
        let geo = self.geodetic();
        let (lat, lon, alt) = (geo[0], geo[1], geo[2]);

        let e2 = EARTH_FLATTENING_WGS84 * (2.0 - EARTH_FLATTENING_WGS84);
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();
        let n = EARTH_SEMI_MAJOR_AXIS_WGS84 / (1.0 - e2 * sin_lat.powi(2)).sqrt();

        Vector3::new(
            (n + alt) * cos_lat * cos_lon,
            (n + alt) * cos_lat * sin_lon,
            (n * (1.0 - e2) + alt) * sin_lat,
        )
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::GgaData;

    #[test]
    fn ecef() {
        let fix = GgaData::new(0, 0.0, 0.0, 0.0).to_fix().unwrap();
        let ecef = fix.to_ecef_m();
        assert!((ecef[0] - 6378137.0).abs() < 1.0E-6);
        assert!(ecef[1].abs() < 1.0E-6);
        assert!(ecef[2].abs() < 1.0E-6);

        let fix = GgaData::new(0, 90.0, 0.0, 0.0).to_fix().unwrap();
        let ecef = fix.to_ecef_m();
        assert!((ecef[2] - 6356752.314).abs() < 1.0E-2);

        // Toulouse (CNES)
        let fix = GgaData::new(0, 43.5612, 1.4808, 150.0).to_fix().unwrap();
        let ecef = fix.to_ecef_m();
        assert!((ecef.norm() - 6_368_300.0).abs() < 1_000.0);
    }
}
