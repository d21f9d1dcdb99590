//! Error types for orbsim.
//!
//! Almost everything that can go wrong happens before the first step: bad
//! bodies, bad stage tables, bad epochs or time spans, or an ephemeris that
//! does not cover the request. A single step has no fault states; a run only
//! stops early if `dt` falls below the resolution of `t`.

use thiserror::Error;

use crate::simulation::ephemeris::EphemerisError;

/// Result type alias for orbsim operations.
pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    // ===== Configuration Errors =====
    #[error("body '{name}' has non-positive mass {mass}")]
    NonPositiveMass { name: String, mass: f64 },

    #[error("body '{name}' has negative softening radius {radius}")]
    NegativeRadius { name: String, radius: f64 },

    #[error("body '{body}' names unknown parent '{parent}' (parents must be defined first)")]
    UnknownParent { body: String, parent: String },

    #[error("body '{0}' is defined more than once")]
    DuplicateBody(String),

    #[error("stage table is empty")]
    EmptyStageTable,

    #[error("stage table mismatch: {k} k-fractions vs {s} s-weights")]
    StageTableMismatch { k: usize, s: usize },

    #[error("custom integrator selected but no `stages` table was given")]
    MissingStageTable,

    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),

    #[error("time span must be finite, got {t_start} .. {t_end}")]
    InvalidTimeSpan { t_start: f64, t_end: f64 },

    #[error("time step {dt} no longer advances t = {t}")]
    StalledTime { t: f64, dt: f64 },

    #[error("ephemeris construction requires `parameters.epoch`")]
    MissingEpoch,

    #[error("invalid epoch '{epoch}': {reason}")]
    InvalidEpoch { epoch: String, reason: String },

    // ===== Collaborator Errors =====
    #[error("ephemeris lookup failed: {0}")]
    Ephemeris(#[from] EphemerisError),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
