//! UTC helpers for millisecond based sentence timestamps
use hifitime::Unit;

use crate::prelude::{Epoch, Error, GpsUtcTime, Malformed};

/// UTC midnight of given date, in ms since Unix epoch.
pub(crate) fn utc_midnight_ms(year: i32, month: u8, day: u8) -> Result<GpsUtcTime, Error> {
    let midnight = Epoch::maybe_from_gregorian_utc(year, month, day, 0, 0, 0, 0)
        .map_err(|_| Error::MalformedSentence(Malformed::Date))?;
    Ok(midnight.to_unix_milliseconds().round() as GpsUtcTime)
}

/// Builds the UTC [Epoch] of an instant expressed in ms since Unix epoch.
pub(crate) fn utc_epoch(unix_ms: GpsUtcTime) -> Epoch {
    Epoch::from_unix_duration(unix_ms * Unit::Millisecond)
}
