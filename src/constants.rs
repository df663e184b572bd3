//! Physical constants shared by the element set initializer,
//! the propagator and the frame transforms.
//! Gravity model values are the WGS-72 ones, which is the convention
//! element sets are fitted against.

/// sqrt(GM) expressed in (Earth radii)^1.5 per minute
pub const XKE: f64 = 7.43669161E-2;

/// J2 / 2, in Earth radii squared
pub const CK2: f64 = 5.413079E-4;

/// Earth equatorial radius (kilometers), WGS-72
pub const EARTH_RADIUS_KM: f64 = 6378.135;

/// Distance unit of the element set model (Earth radii)
pub const AE: f64 = 1.0;

/// Minutes per day
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// J2000.0 reference epoch, as Julian Date
pub const J2000_JD: f64 = 2451545.0;

/// Days per Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

/// Perigee altitude (km) under which an orbit is flagged as "low perigee"
pub const LOW_PERIGEE_ALTITUDE_KM: f64 = 220.0;

/// Orbital period (minutes) above which an object is considered deep space
pub const DEEP_SPACE_PERIOD_MINUTES: f64 = 225.0;

/// Maximal number of Kepler equation iterations
pub const KEPLER_MAX_ITERATIONS: usize = 10;

/// Kepler equation convergence criterion, on the eccentric anomaly increment (rad)
pub const KEPLER_TOLERANCE_RAD: f64 = 1.0E-8;

/// Element sets with a two digit year below this pivot are 21st century
pub const TLE_CENTURY_PIVOT: i32 = 57;
