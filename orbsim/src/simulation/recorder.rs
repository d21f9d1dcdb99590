//! Per-body trajectory recording
//!
//! The integrator calls `Recorder::record` once per body per completed step.
//! `TrajectoryRecorder` keeps the samples in memory, append-only, and can
//! persist them as one CSV file per body

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use tracing::info;

use crate::error::SimResult;
use super::states::{Body, NVec3};

/// Sink for finalized body states
pub trait Recorder {
    fn record(&mut self, body: &Body);
}

/// Recorder that drops everything (benchmarks, dry runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecorder;

impl Recorder for NullRecorder {
    fn record(&mut self, _body: &Body) {}
}

#[derive(Debug, Default, Clone)]
pub struct Trajectory {
    pub positions: Vec<NVec3>,
    pub velocities: Vec<NVec3>,
}

#[derive(Debug, Default, Clone)]
pub struct TrajectoryRecorder {
    tracks: IndexMap<String, Trajectory>,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded positions of `name` in step order (empty if never recorded)
    pub fn export(&self, name: &str) -> &[NVec3] {
        self.tracks.get(name).map(|t| t.positions.as_slice()).unwrap_or(&[])
    }

    pub fn export_velocities(&self, name: &str) -> &[NVec3] {
        self.tracks.get(name).map(|t| t.velocities.as_slice()).unwrap_or(&[])
    }

    pub fn body_names(&self) -> impl Iterator<Item = &str> {
        self.tracks.keys().map(String::as_str)
    }

    /// Write `<dir>/<body>.csv` with one `x,y,z` row per recorded step
    ///
    /// Body names are reduced to a single path component (see [`csv_file_name`])
    /// so every file lands directly inside `dir`
    pub fn write_csv(&self, dir: &Path) -> SimResult<()> {
        fs::create_dir_all(dir)?;

        for (name, track) in &self.tracks {
            let path = dir.join(csv_file_name(name));
            let mut w = csv::Writer::from_path(&path)?;
            for p in &track.positions {
                w.write_record(&[p.x.to_string(), p.y.to_string(), p.z.to_string()])?;
            }
            w.flush()?;
            info!("wrote {} samples to {}", track.positions.len(), path.display());
        }
        Ok(())
    }
}

/// File name for a body's trajectory: anything outside `[A-Za-z0-9._-]`
/// becomes `_`, and names made only of dots are prefixed
pub fn csv_file_name(name: &str) -> String {
    let mut stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    if stem.chars().all(|c| c == '.') {
        stem.insert(0, '_');
    }
    format!("{stem}.csv")
}

impl Recorder for TrajectoryRecorder {
    fn record(&mut self, body: &Body) {
        let track = self.tracks.entry(body.name.clone()).or_default();
        track.positions.push(body.state.pos_i);
        track.velocities.push(body.state.vel_i);
    }
}
