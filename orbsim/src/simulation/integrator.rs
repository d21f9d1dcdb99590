//! Fixed-step explicit Runge–Kutta family for the orbital system
//!
//! One integrator type, parameterized by a `StageTable`:
//! - `k[i]`: fraction of `dt` used to reach the evaluation point of stage i+1
//! - `s[i]`: weight of stage i in the final combination
//!
//! Presets: forward Euler, Ralston, classical RK4. Each next stage point is
//! built from the current stage's own derivative, not from a blend of earlier
//! slopes

use tracing::{debug, info};

use crate::error::{SimError, SimResult};
use super::recorder::Recorder;
use super::states::{NVec3, OrbitalSystem};

/// Stage fractions and weights of an explicit RK scheme
#[derive(Debug, Clone, PartialEq)]
pub struct StageTable {
    k: Vec<f64>,
    s: Vec<f64>,
}

impl StageTable {
    /// Validated table: non-empty, `k` and `s` of equal length
    pub fn new(k: Vec<f64>, s: Vec<f64>) -> SimResult<Self> {
        if k.len() != s.len() {
            return Err(SimError::StageTableMismatch { k: k.len(), s: s.len() });
        }
        if k.is_empty() {
            return Err(SimError::EmptyStageTable);
        }
        Ok(Self { k, s })
    }

    pub fn forward_euler() -> Self {
        Self { k: vec![1.0], s: vec![1.0] }
    }

    pub fn ralston() -> Self {
        Self {
            k: vec![2.0 / 3.0, 2.0 / 3.0],
            s: vec![1.0 / 4.0, 3.0 / 4.0],
        }
    }

    pub fn rk4() -> Self {
        Self {
            k: vec![1.0, 0.5, 0.5, 1.0],
            s: vec![1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0],
        }
    }

    pub fn stages(&self) -> usize {
        self.k.len()
    }

    pub fn k(&self) -> &[f64] {
        &self.k
    }

    pub fn s(&self) -> &[f64] {
        &self.s
    }
}

/// Explicit multi-stage integrator; owns its own table so differently
/// configured integrators never share stage data
#[derive(Debug, Clone)]
pub struct StageIntegrator {
    table: StageTable,
}

impl StageIntegrator {
    pub fn new(table: StageTable) -> Self {
        Self { table }
    }

    pub fn forward_euler() -> Self {
        Self::new(StageTable::forward_euler())
    }

    pub fn ralston() -> Self {
        Self::new(StageTable::ralston())
    }

    pub fn rk4() -> Self {
        Self::new(StageTable::rk4())
    }

    pub fn table(&self) -> &StageTable {
        &self.table
    }

    /// Advance every body in `sys` by one step of size `dt`
    ///
    /// Bodies share the stage loop, so accelerations are recomputed jointly at
    /// each stage. After the last stage each body's finalized state is handed
    /// to `recorder`, in body order
    pub fn step<R: Recorder + ?Sized>(&self, dt: f64, sys: &mut OrbitalSystem, recorder: &mut R) {
        let k = &self.table.k;
        let s = &self.table.s;
        let last = self.table.stages() - 1;

        for idx in 0..=last {
            // a_n at the current stage positions, for every body at once
            sys.refresh_accelerations();

            for body in sys.bodies.values_mut() {
                let x = &mut body.state;

                // Weighted sums toward the combined step
                x.vel_k += s[idx] * x.vel_n;
                x.acc_k += s[idx] * x.acc_n;

                if idx != last {
                    // Next stage point from this stage's own slope:
                    // x_n = x_i + dt * k[idx+1] * v_n
                    // v_n = v_i + dt * k[idx+1] * a_n
                    let h = dt * k[idx + 1];
                    x.pos_n = x.pos_i + h * x.vel_n;
                    x.vel_n = x.vel_i + h * x.acc_n;
                } else {
                    // Finalize: x_i += dt * sum(s v), v_i += dt * sum(s a)
                    x.pos_i += dt * x.vel_k;
                    x.vel_i += dt * x.acc_k;

                    x.pos_n = x.pos_i;
                    x.vel_n = x.vel_i;

                    x.vel_k = NVec3::zeros();
                    x.acc_k = NVec3::zeros();

                    recorder.record(body);
                }
            }
        }
    }

    /// Step from `t_start` while `t < t_end`
    ///
    /// The last interval is always a full `dt`, so time may overshoot `t_end`
    /// by less than one step. Returns the number of steps taken. A non-finite
    /// span, or a `dt` too small to move `t`, is rejected before stepping on
    pub fn run<R: Recorder + ?Sized>(
        &self,
        t_start: f64,
        t_end: f64,
        dt: f64,
        sys: &mut OrbitalSystem,
        recorder: &mut R,
    ) -> SimResult<usize> {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(SimError::InvalidTimeStep(dt));
        }
        if !t_start.is_finite() || !t_end.is_finite() {
            return Err(SimError::InvalidTimeSpan { t_start, t_end });
        }

        let mut t = t_start;
        let mut steps = 0;
        while t < t_end {
            // dt below the resolution of t would loop forever
            let next = t + dt;
            if next <= t {
                return Err(SimError::StalledTime { t, dt });
            }
            self.step(dt, sys, recorder);
            t = next;
            steps += 1;
        }

        debug!(t, "run reached final time");
        info!(steps, bodies = sys.len(), stages = self.table.stages(), "run complete");
        Ok(steps)
    }
}
