/// Earth gravitational constant (km^3 s-2), WGS72 as used by SGP4
pub const EARTH_GRAVITATION_MU_KM3_S2: f64 = 398600.8;

/// WGS84 Earth Frame Ellipsoid semi-major axis (kilometers)
pub const EARTH_SEMI_MAJOR_AXIS_WGS84_KM: f64 = 6378.137;

/// WGS84 Earth Frame Ellipsoid flattening
pub const EARTH_FLATTENING_WGS84: f64 = 1.0 / 298.257223563;

/// Seconds per (solar) day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Julian date of J2000 reference epoch
pub const J2000_JD: f64 = 2451545.0;

/// Days per julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

/// Total number of remote retrieval attempts
pub const RETRY_ATTEMPTS: usize = 3;

/// Fixed delay between two remote retrieval attempts (seconds)
pub const RETRY_DELAY_SECONDS: f64 = 2.0;

/// TLE element line width (columns)
pub const TLE_LINE_WIDTH: usize = 69;

/// Name used when a TLE comes without its title line
pub const UNKNOWN_OBJECT_NAME: &str = "Unknown";

/// Longitude jump (degrees) above which the ground track is split
pub const ANTIMERIDIAN_JUMP_DEG: f64 = 180.0;
