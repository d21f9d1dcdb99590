//! High-level runtime engine settings
//!
//! Resolves the configured integrator choice into a validated
//! `StageIntegrator` used when running a `Scenario`

use crate::configuration::config::{EngineConfig, IntegratorConfig};
use crate::error::{SimError, SimResult};
use super::integrator::{StageIntegrator, StageTable};

#[derive(Debug, Clone)]
pub struct Engine {
    pub kind: IntegratorConfig, // euler, ralston, rk4 or custom
    pub integrator: StageIntegrator,
}

impl Engine {
    pub fn from_config(cfg: &EngineConfig) -> SimResult<Self> {
        let table = match cfg.integrator {
            IntegratorConfig::ForwardEuler => StageTable::forward_euler(),
            IntegratorConfig::Ralston => StageTable::ralston(),
            IntegratorConfig::Rk4 => StageTable::rk4(),
            IntegratorConfig::Custom => {
                let stages = cfg.stages.as_ref().ok_or(SimError::MissingStageTable)?;
                StageTable::new(stages.k.clone(), stages.s.clone())?
            }
        };

        Ok(Self {
            kind: cfg.integrator,
            integrator: StageIntegrator::new(table),
        })
    }
}
