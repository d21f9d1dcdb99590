//! Numerical parameters for a run
//!
//! `Parameters` holds runtime settings:
//! - time span and fixed step size (seconds),
//! - the start epoch as a Julian day, when the system came from an ephemeris

use super::constants::SECONDS_PER_DAY;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_start: f64, // time start
    pub t_end: f64, // time end
    pub dt: f64, // step size
    pub epoch_jd: Option<f64>, // epoch of t_start (UTC Julian day)
}

impl Parameters {
    /// Julian day reached after `steps` full steps from `t_start`
    pub fn epoch_after(&self, steps: usize) -> Option<f64> {
        self.epoch_jd.map(|jd| jd + steps as f64 * self.dt / SECONDS_PER_DAY)
    }
}
