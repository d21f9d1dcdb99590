//! Ephemeris provider contract and a tabulated implementation
//!
//! Providers answer "where is body `id` at Julian day `jd`" in km and km/day.
//! They are only queried while building a system, never during stepping.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::error::SimResult;
use super::states::NVec3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("body {0} is not in the ephemeris catalog")]
    BodyNotFound(i32),
    #[error("epoch JD {epoch} is outside the coverage of body {body} (JD {start} .. {end})")]
    EpochOutOfRange { body: i32, epoch: f64, start: f64, end: f64 },
}

/// Read-only source of body positions/velocities
pub trait EphemerisProvider {
    /// Position (km) and velocity (km/day) of `body_id` at `epoch_jd`
    fn sample(&self, body_id: i32, epoch_jd: f64) -> Result<(NVec3, NVec3), EphemerisError>;
}

/// One tabulated row, in provider units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisSample {
    pub jd: f64,
    pub pos_km: NVec3,
    pub vel_km_per_day: NVec3,
}

/// CSV row layout: `body,jd,x,y,z,vx,vy,vz`
#[derive(Debug, Deserialize)]
struct SampleRecord {
    body: i32,
    jd: f64,
    x: f64,
    y: f64,
    z: f64,
    vx: f64,
    vy: f64,
    vz: f64,
}

/// In-memory ephemeris: sorted samples per body, linearly interpolated
/// between neighbours and strict about coverage
#[derive(Debug, Clone, Default)]
pub struct TabulatedEphemeris {
    tables: BTreeMap<i32, Vec<EphemerisSample>>,
}

impl TabulatedEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sample, keeping the body's table sorted by epoch.
    /// A sample at an already tabulated epoch replaces the old one.
    pub fn insert(&mut self, body_id: i32, sample: EphemerisSample) {
        let table = self.tables.entry(body_id).or_default();
        match table.binary_search_by(|s| s.jd.total_cmp(&sample.jd)) {
            Ok(i) => table[i] = sample,
            Err(i) => table.insert(i, sample),
        }
    }

    pub fn from_csv_path(path: &Path) -> SimResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut eph = Self::new();
        for row in reader.deserialize() {
            let r: SampleRecord = row?;
            eph.insert(r.body, EphemerisSample {
                jd: r.jd,
                pos_km: NVec3::new(r.x, r.y, r.z),
                vel_km_per_day: NVec3::new(r.vx, r.vy, r.vz),
            });
        }
        debug!("loaded ephemeris for {} bodies from {}", eph.tables.len(), path.display());
        Ok(eph)
    }

    /// Covered Julian-day interval of `body_id`
    pub fn coverage(&self, body_id: i32) -> Option<(f64, f64)> {
        let table = self.tables.get(&body_id)?;
        Some((table.first()?.jd, table.last()?.jd))
    }
}

impl EphemerisProvider for TabulatedEphemeris {
    fn sample(&self, body_id: i32, epoch_jd: f64) -> Result<(NVec3, NVec3), EphemerisError> {
        let table = self
            .tables
            .get(&body_id)
            .filter(|t| !t.is_empty())
            .ok_or(EphemerisError::BodyNotFound(body_id))?;

        let first = table[0];
        let last = table[table.len() - 1];
        if !(epoch_jd >= first.jd && epoch_jd <= last.jd) {
            return Err(EphemerisError::EpochOutOfRange {
                body: body_id,
                epoch: epoch_jd,
                start: first.jd,
                end: last.jd,
            });
        }

        // index of the first sample with jd >= epoch
        let hi = table.partition_point(|s| s.jd < epoch_jd);
        let b = table[hi];
        if b.jd == epoch_jd || hi == 0 {
            return Ok((b.pos_km, b.vel_km_per_day));
        }

        let a = table[hi - 1];
        let w = (epoch_jd - a.jd) / (b.jd - a.jd);
        Ok((
            a.pos_km.lerp(&b.pos_km, w),
            a.vel_km_per_day.lerp(&b.vel_km_per_day, w),
        ))
    }
}
