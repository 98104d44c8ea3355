//! Satellite signal measurements
use bitflags::bitflags;

use crate::{
    clock::ClockFlags,
    prelude::{ConstellationType, SV},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Per satellite sync state. Several milestones are usually reached
    /// at once, for example `CODE_LOCK | BIT_SYNC | MSEC_AMBIGUOUS`.
    /// An empty state means the receiver is still searching.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct MeasurementState: u32 {
        const CODE_LOCK = 1 << 0;
        const BIT_SYNC = 1 << 1;
        const SUBFRAME_SYNC = 1 << 2;
        const TOW_DECODED = 1 << 3;
        const MSEC_AMBIGUOUS = 1 << 4;
        const SYMBOL_SYNC = 1 << 5;
        const GLO_STRING_SYNC = 1 << 6;
        const GLO_TOD_DECODED = 1 << 7;
        const BDS_D2_BIT_SYNC = 1 << 8;
        const BDS_D2_SUBFRAME_SYNC = 1 << 9;
        const GAL_E1BC_CODE_LOCK = 1 << 10;
        const GAL_E1C_2ND_CODE_LOCK = 1 << 11;
        const GAL_E1B_PAGE_SYNC = 1 << 12;
        const SBAS_SYNC = 1 << 13;
        const TOW_KNOWN = 1 << 14;
        const GLO_TOD_KNOWN = 1 << 15;
    }
}

impl MeasurementState {
    /// Decodes a wire state. Bits we do not know about are kept as is.
    pub fn from_wire(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }

    /// True while the satellite is still being searched for.
    pub fn is_searching(&self) -> bool {
        self.is_empty()
    }
}

/// Satellite measurement, as produced by the location source.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawGnssMeasurement {
    /// Satellite vehicle ID number
    pub svid: i16,
    /// Wire constellation value (see [ConstellationType])
    pub constellation: u8,
    /// Sync state, wire bitmask
    pub state: u32,
    /// Received time of week (or time of day for Glonass) in nanoseconds.
    pub received_sv_time_ns: i64,
    /// 1-sigma uncertainty of the received time
    pub received_sv_time_uncertainty_ns: i64,
    /// Carrier to noise density (dB-Hz)
    pub c_n0_dbhz: f64,
    /// Uncorrected pseudo range rate (m/s)
    pub pseudorange_rate_mps: f64,
    /// 1-sigma uncertainty of the pseudo range rate
    pub pseudorange_rate_uncertainty_mps: f64,
    /// Carrier frequency, 0 when not reported (L1 is then assumed).
    pub carrier_frequency_hz: f32,
}

/// Normalized satellite measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GnssMeasurement {
    pub svid: i16,
    pub constellation: ConstellationType,
    /// Sync state, preserved bit for bit.
    pub state: MeasurementState,
    /// Carrier to noise density (dB-Hz)
    pub c_n0_dbhz: f64,
    /// Received satellite time, only present once something is tracked.
    pub received_sv_time_ns: Option<i64>,
    pub received_sv_time_uncertainty_ns: Option<i64>,
    /// Uncorrected pseudo range rate. Only present when the clock drift
    /// is reported, since the rate cannot be corrected otherwise.
    pub pseudorange_rate_mps: Option<f64>,
    pub pseudorange_rate_uncertainty_mps: Option<f64>,
    /// Carrier frequency, absent means L1
    pub carrier_frequency_hz: Option<f32>,
}

impl GnssMeasurement {
    /// Placeholder measurement used for legacy sentence fixes:
    /// unknown constellation, nothing tracked.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Builds a [GnssMeasurement] from [RawGnssMeasurement],
    /// discarding every field that is not backed by either the measurement
    /// state or the clock `flags`.
    pub fn from_raw(raw: &RawGnssMeasurement, flags: ClockFlags) -> Self {
        let state = MeasurementState::from_wire(raw.state);
        let tracked = !state.is_searching();
        let has_drift = flags.contains(ClockFlags::HAS_DRIFT);

        Self {
            state,
            svid: raw.svid,
            c_n0_dbhz: raw.c_n0_dbhz,
            constellation: ConstellationType::from(raw.constellation),
            received_sv_time_ns: tracked.then_some(raw.received_sv_time_ns),
            received_sv_time_uncertainty_ns: tracked
                .then_some(raw.received_sv_time_uncertainty_ns),
            pseudorange_rate_mps: has_drift.then_some(raw.pseudorange_rate_mps),
            pseudorange_rate_uncertainty_mps: has_drift
                .then_some(raw.pseudorange_rate_uncertainty_mps),
            carrier_frequency_hz: if raw.carrier_frequency_hz != 0.0 {
                Some(raw.carrier_frequency_hz)
            } else {
                None
            },
        }
    }

    /// Converts back to the wire representation.
    /// Absent fields are zeroed.
    pub fn to_raw(&self) -> RawGnssMeasurement {
        RawGnssMeasurement {
            svid: self.svid,
            constellation: self.constellation.into(),
            state: self.state.bits(),
            c_n0_dbhz: self.c_n0_dbhz,
            received_sv_time_ns: self.received_sv_time_ns.unwrap_or_default(),
            received_sv_time_uncertainty_ns: self
                .received_sv_time_uncertainty_ns
                .unwrap_or_default(),
            pseudorange_rate_mps: self.pseudorange_rate_mps.unwrap_or_default(),
            pseudorange_rate_uncertainty_mps: self
                .pseudorange_rate_uncertainty_mps
                .unwrap_or_default(),
            carrier_frequency_hz: self.carrier_frequency_hz.unwrap_or_default(),
        }
    }

    /// Returns the [SV] identity, when constellation is known
    /// and the satellite ID is a valid PRN.
    pub fn sv(&self) -> Option<SV> {
        let constellation = self.constellation.constellation()?;
        let prn = u8::try_from(self.svid).ok()?;
        if prn == 0 {
            return None;
        }
        Some(SV::new(constellation, prn))
    }
}

#[cfg(test)]
mod test {
    use super::{GnssMeasurement, MeasurementState, RawGnssMeasurement};
    use crate::{
        clock::ClockFlags,
        prelude::{Constellation, ConstellationType, SV},
    };

    fn raw() -> RawGnssMeasurement {
        RawGnssMeasurement {
            svid: 12,
            constellation: 1,
            state: (MeasurementState::CODE_LOCK | MeasurementState::BIT_SYNC).bits(),
            received_sv_time_ns: 123_456,
            received_sv_time_uncertainty_ns: 10,
            c_n0_dbhz: 42.0,
            pseudorange_rate_mps: -120.5,
            pseudorange_rate_uncertainty_mps: 0.2,
            carrier_frequency_hz: 0.0,
        }
    }

    #[test]
    fn state_is_a_union() {
        let m = GnssMeasurement::from_raw(&raw(), ClockFlags::HAS_DRIFT);
        assert!(m.state.contains(MeasurementState::CODE_LOCK));
        assert!(m.state.contains(MeasurementState::BIT_SYNC));
        assert!(!m.state.contains(MeasurementState::TOW_DECODED));
        assert_eq!(m.state.bits(), 0b11);
    }

    #[test]
    fn unknown_state_bits_are_retained() {
        let mut raw = raw();
        raw.state = 1 << 20 | 1;
        let m = GnssMeasurement::from_raw(&raw, ClockFlags::empty());
        assert_eq!(m.state.bits(), 1 << 20 | 1);
        assert_eq!(m.to_raw().state, raw.state);
    }

    #[test]
    fn drift_gates_pseudorange_rate() {
        let m = GnssMeasurement::from_raw(&raw(), ClockFlags::HAS_BIAS);
        assert!(m.pseudorange_rate_mps.is_none());
        assert!(m.pseudorange_rate_uncertainty_mps.is_none());
        assert_eq!(m.received_sv_time_ns, Some(123_456));

        let m = GnssMeasurement::from_raw(&raw(), ClockFlags::HAS_DRIFT);
        assert_eq!(m.pseudorange_rate_mps, Some(-120.5));
        assert_eq!(m.pseudorange_rate_uncertainty_mps, Some(0.2));
    }

    #[test]
    fn searching_clears_received_time() {
        let mut raw = raw();
        raw.state = 0;
        let m = GnssMeasurement::from_raw(&raw, ClockFlags::all());
        assert!(m.state.is_searching());
        assert!(m.received_sv_time_ns.is_none());
        assert!(m.received_sv_time_uncertainty_ns.is_none());
        assert!(m.carrier_frequency_hz.is_none());
        assert_eq!(m.to_raw().received_sv_time_ns, 0);
    }

    #[test]
    fn sv_identity() {
        let m = GnssMeasurement::from_raw(&raw(), ClockFlags::empty());
        assert_eq!(m.sv(), Some(SV::new(Constellation::GPS, 12)));

        let mut unknown = m;
        unknown.constellation = ConstellationType::Unknown;
        assert!(unknown.sv().is_none());

        let mut negative = m;
        negative.svid = -1;
        assert!(negative.sv().is_none());

        assert!(GnssMeasurement::placeholder().sv().is_none());
    }
}
