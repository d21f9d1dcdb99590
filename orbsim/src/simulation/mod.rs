pub mod constants;
pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod ephemeris;
pub mod recorder;
pub mod scenario;
