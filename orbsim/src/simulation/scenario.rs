//! Build fully-initialized orbital systems from configuration
//!
//! Two ways to get initial states:
//! - `OrbitalSystem::from_static_config`: positions/velocities straight from YAML (SI)
//! - `OrbitalSystem::from_ephemeris`: sampled from an ephemeris provider at an epoch
//!   (km, km/day) and converted to m, m/s
//!
//! In both, bodies are built in file order and a `parent` is looked up among the
//! bodies already built, then folded into the child's initial state once
//!
//! `Scenario` bundles the system with its engine and parameters, ready to run

use std::path::Path;

use tracing::{debug, info, warn};

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::{SimError, SimResult};
use super::constants::{DEFAULT_SOFTENING_RADIUS, KM_PER_DAY_TO_M_PER_S, KM_TO_M};
use super::engine::Engine;
use super::ephemeris::EphemerisProvider;
use super::params::Parameters;
use super::recorder::{Recorder, TrajectoryRecorder};
use super::states::{Body, NVec3, OrbitalSystem, State};

/// Build one body from its config and an initial (parent-relative) state,
/// resolving `parent` against the bodies already in `sys`
fn build_body(sys: &OrbitalSystem, name: &str, bc: &BodyConfig, pos: NVec3, vel: NVec3) -> SimResult<Body> {
    let parent = match &bc.parent {
        Some(p) => Some(sys.body(p).ok_or_else(|| SimError::UnknownParent {
            body: name.to_string(),
            parent: p.clone(),
        })?),
        None => None,
    };

    let radius = bc.radius.unwrap_or(DEFAULT_SOFTENING_RADIUS);
    let mut body = Body::new(name, bc.mass, State::new(pos, vel), parent, radius)?;
    if let Some(id) = bc.catalog_id() {
        body = body.with_ephemeris_id(id);
    }

    debug!(body = name, parent = ?bc.parent, pos = ?body.state.pos_i, "built body");
    Ok(body)
}

impl OrbitalSystem {
    /// Initial states taken directly from the configuration (missing pos/vel = 0)
    pub fn from_static_config(cfg: &ScenarioConfig) -> SimResult<Self> {
        let mut sys = OrbitalSystem::new(cfg.name.clone());

        for (name, bc) in &cfg.bodies {
            let pos = bc.pos.map(NVec3::from).unwrap_or_else(NVec3::zeros);
            let vel = bc.vel.map(NVec3::from).unwrap_or_else(NVec3::zeros);
            let body = build_body(&sys, name, bc, pos, vel)?;
            sys.insert(body)?;
        }

        info!(system = %sys.name, bodies = sys.len(), "built system from static config");
        Ok(sys)
    }

    /// Initial states sampled from `provider` at `epoch_jd`
    ///
    /// Bodies with a catalog id get the provider's position (km -> m) and
    /// velocity (km/day -> m/s); bodies without one (or with id 0) start at zero
    pub fn from_ephemeris<P: EphemerisProvider + ?Sized>(
        epoch_jd: f64,
        provider: &P,
        cfg: &ScenarioConfig,
    ) -> SimResult<Self> {
        let mut sys = OrbitalSystem::new(cfg.name.clone());

        for (name, bc) in &cfg.bodies {
            let (pos, vel) = match bc.catalog_id() {
                Some(id) => {
                    let (pos_km, vel_km_day) = provider.sample(id, epoch_jd)?;
                    debug!(body = %name, id, epoch_jd, "sampled ephemeris");
                    (pos_km * KM_TO_M, vel_km_day * KM_PER_DAY_TO_M_PER_S)
                }
                None => (NVec3::zeros(), NVec3::zeros()),
            };
            let body = build_body(&sys, name, bc, pos, vel)?;
            sys.insert(body)?;
        }

        info!(system = %sys.name, bodies = sys.len(), epoch_jd, "built system from ephemeris");
        Ok(sys)
    }
}

/// Runtime bundle: engine settings, parameters and the system state
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: OrbitalSystem,
}

impl Scenario {
    /// Scenario with initial states from the configuration itself
    pub fn build_scenario(cfg: &ScenarioConfig) -> SimResult<Self> {
        let engine = Engine::from_config(&cfg.engine)?;
        let parameters = Self::runtime_parameters(cfg, cfg.parameters.epoch_jd()?);
        let system = OrbitalSystem::from_static_config(cfg)?;

        Ok(Self { engine, parameters, system })
    }

    /// Scenario with initial states sampled from `provider` at the configured epoch
    pub fn build_scenario_from_ephemeris<P: EphemerisProvider + ?Sized>(
        cfg: &ScenarioConfig,
        provider: &P,
    ) -> SimResult<Self> {
        let engine = Engine::from_config(&cfg.engine)?;
        let epoch_jd = cfg.parameters.epoch_jd()?.ok_or(SimError::MissingEpoch)?;
        let parameters = Self::runtime_parameters(cfg, Some(epoch_jd));
        let system = OrbitalSystem::from_ephemeris(epoch_jd, provider, cfg)?;

        Ok(Self { engine, parameters, system })
    }

    fn runtime_parameters(cfg: &ScenarioConfig, epoch_jd: Option<f64>) -> Parameters {
        let p = &cfg.parameters;
        Parameters {
            t_start: p.t_start,
            t_end: p.t_end,
            dt: p.dt,
            epoch_jd,
        }
    }

    /// Integrate over the configured time span; returns the number of steps
    pub fn run<R: Recorder + ?Sized>(&mut self, recorder: &mut R) -> SimResult<usize> {
        info!(
            integrator = ?self.engine.kind,
            t_start = self.parameters.t_start,
            t_end = self.parameters.t_end,
            dt = self.parameters.dt,
            "starting run"
        );
        self.engine.integrator.run(
            self.parameters.t_start,
            self.parameters.t_end,
            self.parameters.dt,
            &mut self.system,
            recorder,
        )
    }

    /// Difference (m) between each catalogued body's integrated position and
    /// the provider's position after `steps` steps from the start epoch
    pub fn position_errors<P: EphemerisProvider + ?Sized>(
        &self,
        provider: &P,
        steps: usize,
    ) -> SimResult<Vec<(String, NVec3)>> {
        let epoch_jd = self.parameters.epoch_after(steps).ok_or(SimError::MissingEpoch)?;

        let mut errors = Vec::new();
        for body in self.system.bodies.values() {
            if let Some(id) = body.ephemeris_id {
                let (pos_km, _) = provider.sample(id, epoch_jd)?;
                errors.push((body.name.clone(), pos_km * KM_TO_M - body.state.pos_i));
            }
        }
        Ok(errors)
    }

    /// Run, write the trajectories to `output`, then (with a provider) log how
    /// far each catalogued body ended up from the ephemeris
    ///
    /// The comparison runs after the data is on disk and never fails the run:
    /// an end epoch outside the provider's coverage is only a warning.
    /// Returns the number of steps taken
    pub fn run_and_write<P: EphemerisProvider + ?Sized>(
        &mut self,
        recorder: &mut TrajectoryRecorder,
        output: &Path,
        provider: Option<&P>,
    ) -> SimResult<usize> {
        let steps = self.run(recorder)?;
        recorder.write_csv(output)?;

        if let Some(provider) = provider {
            match self.position_errors(provider, steps) {
                Ok(errors) => {
                    for (name, err) in errors {
                        info!(
                            "position error for {}: [{:.3e}, {:.3e}, {:.3e}] m ({:.3e} m)",
                            name, err.x, err.y, err.z, err.norm()
                        );
                    }
                }
                Err(e) => warn!("skipping ephemeris error check: {e}"),
            }
        }

        Ok(steps)
    }
}
