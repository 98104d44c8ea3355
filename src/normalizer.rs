//! Report normalization
use itertools::Itertools;
use log::{debug, error, warn};

use crate::{
    cfg::{Config, TruncationPolicy},
    constants::NANOSECONDS_PER_MILLISECOND,
    prelude::{
        Error, GnssClock, GnssData, GnssMeasurement, GpsData, PositionFix, RawGnssData,
        RawGnssMeasurement,
    },
};

/// Reports that a raw batch did not fit in the normalized batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    /// Valid measurements proposed by the source
    pub received: usize,
    /// Measurements retained
    pub kept: usize,
}

/// Normalization output
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Normalized batch, always usable
    pub data: GnssData,
    /// Possible truncation that occurred
    pub truncation: Option<Truncation>,
}

impl Normalized {
    /// Returns [Error::CapacityExceeded] when the batch was truncated.
    /// This is a warning: [Self::data] remains valid.
    pub fn warning(&self) -> Option<Error> {
        let truncation = self.truncation?;
        Some(Error::CapacityExceeded {
            received: truncation.received,
            capacity: truncation.kept,
        })
    }

    pub fn is_truncated(&self) -> bool {
        self.truncation.is_some()
    }

    /// Drops the truncation report
    pub fn into_inner(self) -> GnssData {
        self.data
    }
}

/// [Normalizer] converts any supported [GpsData] report to a [GnssData] batch.
/// It holds no state besides its [Config] and may be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    cfg: Config,
}

impl Normalizer {
    /// Builds a [Normalizer], after [Config] verification.
    pub fn new(cfg: Config) -> Result<Self, Error> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn cfg(&self) -> &Config {
        &self.cfg
    }

    /// Normalizes one report.
    /// ## Input
    /// - input: [GpsData] report
    /// ## Output
    /// - [Normalized] batch. GGA and RMC reports produce a single
    ///   placeholder measurement, a bare clock and a [PositionFix].
    ///   Raw reports only retain fields that were declared valid.
    /// - [Error::UnsupportedFormat] for [GpsData::Unknown]
    /// - [Error::MalformedSentence] when a GGA or RMC field is out of range
    pub fn normalize(&self, input: &GpsData) -> Result<Normalized, Error> {
        match input {
            GpsData::Gga(gga) => {
                let fix = gga.to_fix()?;
                // time of day was validated
                self.sentence(fix, gga.time * NANOSECONDS_PER_MILLISECOND)
            },
            GpsData::Rmc(rmc) => {
                let fix = rmc.to_fix()?;
                let utc_time = rmc.utc_time()?;
                self.sentence(fix, utc_time * NANOSECONDS_PER_MILLISECOND)
            },
            GpsData::Gnss(raw) => self.raw(raw),
            GpsData::Unknown => {
                error!("unsupported gps data format");
                Err(Error::UnsupportedFormat)
            },
        }
    }

    /// Synthesizes a single measurement batch for a sentence fix.
    fn sentence(&self, fix: PositionFix, time_ns: i64) -> Result<Normalized, Error> {
        let clock = GnssClock::new(time_ns);

        let mut data = GnssData::new(clock).with_fix(fix);
        data.push(GnssMeasurement::placeholder())?;

        debug!(
            "{} fix: lat={}° long={}° ({:?})",
            fix.source, fix.latitude_deg, fix.longitude_deg, fix.quality
        );

        Ok(Normalized {
            data,
            truncation: None,
        })
    }

    fn raw(&self, raw: &RawGnssData) -> Result<Normalized, Error> {
        if raw.measurement_count > raw.measurements.len() {
            debug!(
                "measurement count ({}) exceeds provided measurements ({})",
                raw.measurement_count,
                raw.measurements.len()
            );
        }

        let valid = raw.valid_measurements();
        let capacity = self.cfg.capacity;

        let (retained, truncation) = if valid.len() > capacity {
            warn!(
                "{} measurements exceed capacity ({}): truncating ({:?})",
                valid.len(),
                capacity,
                self.cfg.truncation
            );
            let retained = self.truncate(valid, capacity);
            let truncation = Truncation {
                received: valid.len(),
                kept: retained.len(),
            };
            (retained, Some(truncation))
        } else {
            (valid.iter().collect::<Vec<_>>(), None)
        };

        let flags = raw.clock.flags;
        let mut data = GnssData::new(GnssClock::from_raw(&raw.clock));

        for measurement in retained {
            data.push(GnssMeasurement::from_raw(measurement, flags))?;
        }

        debug!(
            "gnss batch: {} measurements, clock flags {:?}",
            data.len(),
            data.clock.flags()
        );

        Ok(Normalized { data, truncation })
    }

    /// Selects `capacity` measurements according to [TruncationPolicy],
    /// preserving arrival order.
    fn truncate<'a>(
        &self,
        valid: &'a [RawGnssMeasurement],
        capacity: usize,
    ) -> Vec<&'a RawGnssMeasurement> {
        match self.cfg.truncation {
            TruncationPolicy::KeepFirst => valid.iter().take(capacity).collect(),
            TruncationPolicy::StrongestSignal => valid
                .iter()
                .enumerate()
                .sorted_by(|(_, a), (_, b)| b.c_n0_dbhz.total_cmp(&a.c_n0_dbhz))
                .take(capacity)
                .sorted_by_key(|(index, _)| *index)
                .map(|(_, measurement)| measurement)
                .collect(),
        }
    }
}

/// Normalizes one report with the default [Config].
pub fn normalize(input: &GpsData) -> Result<Normalized, Error> {
    Normalizer::default().normalize(input)
}
