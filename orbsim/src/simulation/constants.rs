//! Physical constants and unit factors (SI)

/// Gravitational constant (m^3 kg^-1 s^-2)
pub const G: f64 = 6.67408e-11;

/// Softening radius used when a body does not configure one (m)
pub const DEFAULT_SOFTENING_RADIUS: f64 = 0.1;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Ephemeris positions come in km
pub const KM_TO_M: f64 = 1000.0;

/// Ephemeris velocities come in km/day
pub const KM_PER_DAY_TO_M_PER_S: f64 = KM_TO_M / SECONDS_PER_DAY;
