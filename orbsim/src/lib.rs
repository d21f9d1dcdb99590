pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use simulation::states::{NVec3, State, Body, OrbitalSystem};
pub use simulation::integrator::{StageTable, StageIntegrator};
pub use simulation::ephemeris::{EphemerisProvider, EphemerisSample, EphemerisError, TabulatedEphemeris};
pub use simulation::recorder::{Recorder, NullRecorder, Trajectory, TrajectoryRecorder, csv_file_name};
pub use simulation::scenario::Scenario;

pub use configuration::config::{IntegratorConfig, EngineConfig, ParametersConfig, BodyConfig, StageConfig, ScenarioConfig, parse_epoch_jd};

pub use error::{SimError, SimResult};

pub use benchmark::benchmark::{bench_refresh, bench_integrators, make_system};
