//! Configuration types for loading orbital scenarios from YAML.
//!
//! A thin, `serde`-deserializable representation of a scenario:
//!
//! - [`EngineConfig`]     – integrator choice (and a custom stage table)
//! - [`ParametersConfig`] – time span, step size and ephemeris epoch
//! - [`BodyConfig`]       – mass, optional initial state, parent, softening, catalog id
//! - [`ScenarioConfig`]   – top-level wrapper loaded from YAML
//!
//! # YAML format
//!
//! ```yaml
//! name: sol_system
//!
//! engine:
//!   integrator: rk4          # euler | ralston | rk4 | custom
//!
//! parameters:
//!   t_start: 0.0             # s
//!   t_end: 1.0e8             # s
//!   dt: 1.0e5                # s
//!   epoch: "2021-07-30T00:00:00 UTC"
//!
//! bodies:                    # order matters: parents before children
//!   sun:
//!     mass: 1.989e30
//!     enum: 10
//!   earth:
//!     mass: 5.972e24
//!     enum: 399
//!     radius: 6.371e6
//!   moon:
//!     mass: 7.342e22
//!     parent: earth
//!     pos: [3.844e8, 0.0, 0.0]
//!     vel: [0.0, 1022.0, 0.0]
//! ```
//!
//! A `custom` integrator reads its table from `engine.stages`:
//!
//! ```yaml
//! engine:
//!   integrator: custom
//!   stages:
//!     k: [0.5, 0.5]
//!     s: [0.0, 1.0]
//! ```

use std::path::Path;

use hifitime::Epoch;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{SimError, SimResult};

/// Which stage table the engine integrates with
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[serde(rename = "euler")] // single stage, first order
    ForwardEuler,

    #[serde(rename = "ralston")] // two stages, second order
    Ralston,

    #[serde(rename = "rk4")] // classical four-stage Runge–Kutta
    #[default]
    Rk4,

    #[serde(rename = "custom")] // table given in `engine.stages`
    Custom,
}

/// Explicit stage table for `integrator: custom`
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct StageConfig {
    pub k: Vec<f64>, // step fractions toward the next stage point
    pub s: Vec<f64>, // quadrature weights per stage
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: IntegratorConfig,
    #[serde(default)]
    pub stages: Option<StageConfig>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(default)]
    pub t_start: f64,  // s
    #[serde(default = "default_t_end")]
    pub t_end: f64,    // s
    #[serde(default = "default_dt")]
    pub dt: f64,       // s
    #[serde(default)]
    pub epoch: Option<String>, // start epoch for ephemeris construction, e.g. "2021-07-30T00:00:00 UTC"
}

fn default_t_end() -> f64 {
    1.0e8
}

fn default_dt() -> f64 {
    1.0e5
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            t_start: 0.0,
            t_end: default_t_end(),
            dt: default_dt(),
            epoch: None,
        }
    }
}

impl ParametersConfig {
    /// Start epoch as a UTC Julian day, if one is configured
    pub fn epoch_jd(&self) -> SimResult<Option<f64>> {
        self.epoch.as_deref().map(parse_epoch_jd).transpose()
    }
}

/// Parse a calendar epoch (e.g. "2021-07-30T00:00:00 UTC") into a UTC Julian day
pub fn parse_epoch_jd(epoch: &str) -> SimResult<f64> {
    let parsed: Epoch = epoch.parse().map_err(|e| SimError::InvalidEpoch {
        epoch: epoch.to_string(),
        reason: format!("{e}"),
    })?;
    Ok(parsed.to_jde_utc_days())
}

/// Configuration for a single body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub mass: f64,                // kg, must be > 0
    #[serde(default)]
    pub pos: Option<[f64; 3]>,    // m, relative to parent if one is given
    #[serde(default)]
    pub vel: Option<[f64; 3]>,    // m/s, relative to parent if one is given
    #[serde(default)]
    pub parent: Option<String>,   // name of an earlier body
    #[serde(default)]
    pub radius: Option<f64>,      // softening radius in m
    #[serde(default, rename = "enum")]
    pub ephemeris_id: Option<i32>, // ephemeris catalog id, 0 = none
}

impl BodyConfig {
    /// Ephemeris catalog id, with `enum: 0` meaning "not catalogued"
    pub fn catalog_id(&self) -> Option<i32> {
        self.ephemeris_id.filter(|&id| id != 0)
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    pub bodies: IndexMap<String, BodyConfig>, // keeps file order for parent lookup
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> SimResult<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_yaml_path(path: &Path) -> SimResult<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }
}
