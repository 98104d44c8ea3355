/// Maximal number of measurements a single [GnssData] batch may hold.
///
/// [GnssData]: crate::prelude::GnssData
pub const GNSS_MAX_MEASUREMENT: usize = 64;

/// One day, in milliseconds
pub const MILLISECONDS_PER_DAY: i64 = 86_400_000;

/// One millisecond, in nanoseconds
pub const NANOSECONDS_PER_MILLISECOND: i64 = 1_000_000;

/// Knots to m.s⁻¹
pub const KNOTS_TO_M_S: f64 = 0.514_444;

/// WGS84 Earth Frame Ellipsoid semi-major axis (meters)
pub const EARTH_SEMI_MAJOR_AXIS_WGS84: f64 = 6378137.0_f64;

/// WGS84 Earth Frame Ellipsoid flattening
pub const EARTH_FLATTENING_WGS84: f64 = 1.0 / 298.257223563;
