//! Input reports and normalized batches
use crate::{
    constants::GNSS_MAX_MEASUREMENT,
    prelude::{
        Error, GgaData, GnssClock, GnssMeasurement, PositionFix, RawGnssClock,
        RawGnssMeasurement, RmcData,
    },
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wire discriminator of a [GpsData] report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GpsDataType {
    Unknown,
    /// Essential fix data (3D location and accuracy)
    Gga,
    /// Essential position, velocity and time data
    Rmc,
    /// Raw GNSS measurements, first revision
    GnssV1,
}

impl GpsDataType {
    /// Wire value
    pub fn bits(&self) -> u32 {
        match self {
            Self::Unknown => 1 << 0,
            Self::Gga => 1 << 1,
            Self::Rmc => 1 << 2,
            Self::GnssV1 => 1 << 3,
        }
    }
}

impl From<u32> for GpsDataType {
    fn from(bits: u32) -> Self {
        match bits {
            0b0010 => Self::Gga,
            0b0100 => Self::Rmc,
            0b1000 => Self::GnssV1,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for GpsDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self {
            Self::Unknown => write!(f, "Unknown"),
            Self::Gga => write!(f, "GGA"),
            Self::Rmc => write!(f, "RMC"),
            Self::GnssV1 => write!(f, "GNSSv1"),
        }
    }
}

/// Raw GNSS measurement batch, as produced by the location source.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawGnssData {
    pub clock: RawGnssClock,
    /// Number of valid entries in `measurements`
    pub measurement_count: usize,
    pub measurements: Vec<RawGnssMeasurement>,
}

impl RawGnssData {
    /// Builds [RawGnssData] where every provided measurement is valid.
    pub fn new(clock: RawGnssClock, measurements: Vec<RawGnssMeasurement>) -> Self {
        Self {
            clock,
            measurement_count: measurements.len(),
            measurements,
        }
    }

    /// Valid measurements, in arrival order
    pub fn valid_measurements(&self) -> &[RawGnssMeasurement] {
        let count = self.measurement_count.min(self.measurements.len());
        &self.measurements[..count]
    }
}

/// Positioning report, one variant per supported format.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GpsData {
    Unknown,
    Gga(GgaData),
    Rmc(RmcData),
    Gnss(RawGnssData),
}

impl GpsData {
    /// Returns the wire discriminator
    pub fn data_type(&self) -> GpsDataType {
        match self {
            Self::Unknown => GpsDataType::Unknown,
            Self::Gga(_) => GpsDataType::Gga,
            Self::Rmc(_) => GpsDataType::Rmc,
            Self::Gnss(_) => GpsDataType::GnssV1,
        }
    }
}

impl From<GgaData> for GpsData {
    fn from(gga: GgaData) -> Self {
        Self::Gga(gga)
    }
}

impl From<RmcData> for GpsData {
    fn from(rmc: RmcData) -> Self {
        Self::Rmc(rmc)
    }
}

impl From<RawGnssData> for GpsData {
    fn from(raw: RawGnssData) -> Self {
        Self::Gnss(raw)
    }
}

/// Normalized batch: one clock snapshot and up to
/// [GNSS_MAX_MEASUREMENT] measurements in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GnssData {
    /// Receiver clock
    pub clock: GnssClock,
    /// Possible position fix, for sentence based reports
    pub fix: Option<PositionFix>,
    measurements: Vec<GnssMeasurement>,
}

impl GnssData {
    /// Builds an empty batch
    pub fn new(clock: GnssClock) -> Self {
        Self {
            clock,
            fix: None,
            measurements: Vec::with_capacity(GNSS_MAX_MEASUREMENT),
        }
    }

    /// Copies and returns [GnssData] with given [PositionFix]
    pub fn with_fix(&self, fix: PositionFix) -> Self {
        let mut s = self.clone();
        s.fix = Some(fix);
        s
    }

    /// Appends one measurement, unless the batch is full.
    pub fn push(&mut self, measurement: GnssMeasurement) -> Result<(), Error> {
        if self.is_full() {
            return Err(Error::CapacityExceeded {
                received: self.measurements.len() + 1,
                capacity: GNSS_MAX_MEASUREMENT,
            });
        }
        self.measurements.push(measurement);
        Ok(())
    }

    /// Measurements, in arrival order
    pub fn measurements(&self) -> &[GnssMeasurement] {
        &self.measurements
    }

    /// Measurements iterator
    pub fn measurements_iter(&self) -> impl Iterator<Item = &GnssMeasurement> + '_ {
        self.measurements.iter()
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// True once [GNSS_MAX_MEASUREMENT] measurements are stored
    pub fn is_full(&self) -> bool {
        self.measurements.len() >= GNSS_MAX_MEASUREMENT
    }

    /// Converts back to the raw representation, so a normalized batch
    /// may be fed to another normalization stage.
    pub fn to_raw(&self) -> RawGnssData {
        RawGnssData::new(
            self.clock.to_raw(),
            self.measurements.iter().map(|m| m.to_raw()).collect(),
        )
    }
}

impl From<&GnssData> for GpsData {
    fn from(data: &GnssData) -> Self {
        Self::Gnss(data.to_raw())
    }
}
