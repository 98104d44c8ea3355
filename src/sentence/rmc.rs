use hifitime::Unit;

use crate::{
    constants::{MILLISECONDS_PER_DAY, NANOSECONDS_PER_MILLISECOND},
    error::{Error, Malformed},
    position::{FixSource, PositionFix},
    sentence::{
        accuracy, check_accuracies, check_coordinates, check_time_of_day, FixQuality, GpsUtcTime,
        UNSET,
    },
    time::utc_epoch,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RMC essential position, velocity and time data.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RmcData {
    /// UTC time of day of the fix (ms)
    pub time: GpsUtcTime,
    /// `A` (active) or `V` (void)
    pub status: char,
    /// Latitude in decimal degrees, negative south
    pub latitude: f64,
    /// `N`, `S` or unset
    pub latitude_hemi: char,
    /// Longitude in decimal degrees, negative west
    pub longitude: f64,
    /// `E`, `W` or unset
    pub longitude_hemi: char,
    /// Ground speed (m/s)
    pub speed: f32,
    /// Course over ground (degrees)
    pub bearing: f32,
    /// UTC midnight of the fix day (ms since Unix epoch)
    pub date: GpsUtcTime,
    /// Horizontal accuracy (m), 0 when unknown
    pub horizontal_accuracy: f32,
    /// Vertical accuracy (m), 0 when unknown
    pub vertical_accuracy: f32,
}

impl Default for RmcData {
    fn default() -> Self {
        Self {
            time: 0,
            status: 'A',
            latitude: 0.0,
            latitude_hemi: UNSET,
            longitude: 0.0,
            longitude_hemi: UNSET,
            speed: 0.0,
            bearing: 0.0,
            date: 0,
            horizontal_accuracy: 0.0,
            vertical_accuracy: 0.0,
        }
    }
}

impl RmcData {
    /// Active RMC definition on `date` (UTC midnight, ms since Unix epoch)
    /// at `time` (ms in day), with signed coordinates in decimal degrees.
    pub fn new(date: GpsUtcTime, time: GpsUtcTime, latitude: f64, longitude: f64) -> Self {
        Self {
            date,
            time,
            latitude,
            longitude,
            ..Default::default()
        }
    }

    /// Copies and returns [RmcData] with ground speed (m/s) and course (degrees)
    pub fn with_motion(&self, speed: f32, bearing: f32) -> Self {
        let mut s = *self;
        s.speed = speed;
        s.bearing = bearing;
        s
    }

    /// Copies and returns [RmcData] with updated status
    pub fn with_status(&self, status: char) -> Self {
        let mut s = *self;
        s.status = status;
        s
    }

    /// Absolute fix instant, in milliseconds since Unix epoch.
    /// Fails when this instant cannot be expressed in nanoseconds.
    pub fn utc_time(&self) -> Result<GpsUtcTime, Error> {
        self.date
            .checked_add(self.time)
            .filter(|ms| ms.checked_mul(NANOSECONDS_PER_MILLISECOND).is_some())
            .ok_or(Error::MalformedSentence(Malformed::Date))
    }

    /// Verifies all fields are within their physical range.
    /// Returns whether the fix is active.
    pub fn validate(&self) -> Result<bool, Error> {
        let active = match self.status {
            'A' => true,
            'V' => false,
            _ => return Err(Error::MalformedSentence(Malformed::Status)),
        };

        check_time_of_day(self.time)?;

        if self.date < 0 || self.date % MILLISECONDS_PER_DAY != 0 {
            return Err(Error::MalformedSentence(Malformed::Date));
        }

        self.utc_time()?;

        check_coordinates(
            self.latitude,
            self.latitude_hemi,
            self.longitude,
            self.longitude_hemi,
        )?;

        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(Error::MalformedSentence(Malformed::Speed));
        }

        if !self.bearing.is_finite() || !(0.0..360.0).contains(&self.bearing) {
            return Err(Error::MalformedSentence(Malformed::Bearing));
        }

        check_accuracies(self.horizontal_accuracy, self.vertical_accuracy)?;
        Ok(active)
    }

    /// Validates and converts to a [PositionFix]
    pub fn to_fix(&self) -> Result<PositionFix, Error> {
        let active = self.validate()?;
        let utc_time = self.utc_time()?;
        Ok(PositionFix {
            active,
            source: FixSource::Rmc,
            quality: if active {
                FixQuality::Gps
            } else {
                FixQuality::Invalid
            },
            latitude_deg: self.latitude,
            longitude_deg: self.longitude,
            altitude_m: None,
            speed_m_s: Some(self.speed),
            bearing_deg: Some(self.bearing),
            satellites: None,
            hdop: None,
            horizontal_accuracy_m: accuracy(self.horizontal_accuracy),
            vertical_accuracy_m: accuracy(self.vertical_accuracy),
            time_of_day: self.time * Unit::Millisecond,
            epoch: Some(utc_epoch(utc_time)),
        })
    }
}

#[cfg(test)]
mod test {
    use super::RmcData;
    use crate::error::{Error, Malformed};

    // 2024-03-23T00:00:00 UTC
    const DATE: i64 = 1_711_152_000_000;

    #[test]
    fn status() {
        let rmc = RmcData::new(DATE, 0, 1.0, 1.0);
        assert_eq!(rmc.validate(), Ok(true));
        assert_eq!(rmc.with_status('V').validate(), Ok(false));
        assert_eq!(
            rmc.with_status('?').validate(),
            Err(Error::MalformedSentence(Malformed::Status))
        );
    }

    #[test]
    fn motion() {
        let rmc = RmcData::new(DATE, 0, 1.0, 1.0);
        assert!(rmc.with_motion(10.0, 359.9).validate().is_ok());
        assert_eq!(
            rmc.with_motion(-1.0, 0.0).validate(),
            Err(Error::MalformedSentence(Malformed::Speed))
        );
        assert_eq!(
            rmc.with_motion(1.0, 360.0).validate(),
            Err(Error::MalformedSentence(Malformed::Bearing))
        );
        assert_eq!(
            rmc.with_motion(f32::NAN, 0.0).validate(),
            Err(Error::MalformedSentence(Malformed::Speed))
        );
    }

    #[test]
    fn date() {
        let rmc = RmcData::new(DATE + 1, 0, 1.0, 1.0);
        assert_eq!(rmc.validate(), Err(Error::MalformedSentence(Malformed::Date)));

        let rmc = RmcData::new(-86_400_000, 0, 1.0, 1.0);
        assert_eq!(rmc.validate(), Err(Error::MalformedSentence(Malformed::Date)));

        // 2262-04-11 is the last day whose instants fit in i64 nanoseconds
        let last = 106_751 * 86_400_000;
        let rmc = RmcData::new(last, 0, 1.0, 1.0);
        assert_eq!(rmc.utc_time(), Ok(last));
        assert!(rmc.validate().is_ok());

        let rmc = RmcData::new(last + 86_400_000, 0, 1.0, 1.0);
        assert_eq!(rmc.utc_time(), Err(Error::MalformedSentence(Malformed::Date)));
    }

    #[test]
    fn fix_epoch() {
        let fix = RmcData::new(DATE, 45_296_000, 1.0, 1.0).to_fix().unwrap();
        let epoch = fix.epoch.unwrap();
        assert_eq!(epoch.to_gregorian_utc(), (2024, 3, 23, 12, 34, 56, 0));
        assert!(fix.active);
    }
}
