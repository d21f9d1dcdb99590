//! Pairwise Newtonian gravity for the orbital system
//!
//! Accelerations are evaluated at the *stage* positions (`pos_n`), so the
//! integrator must refresh them at every stage of every step

use super::constants::G;
use super::states::{Body, NVec3, OrbitalSystem};

impl Body {
    /// Acceleration this body feels toward `other`
    ///
    /// Hard cutoff: when the separation is at or below this body's softening
    /// radius the contribution is exactly zero (no smoothing, no ramp)
    pub fn acceleration_toward(&self, other: &Body) -> NVec3 {
        // d points from self to other, so self is pulled along +d
        let d = other.state.pos_n - self.state.pos_n;
        let r = d.norm();

        if r > self.radius {
            // a = G * m_other / r^2 along the unit vector d / r
            (G * other.mass / (r * r)) * (d / r)
        } else {
            NVec3::zeros()
        }
    }

    /// Force on this body toward `other` (diagnostics only)
    pub fn force_toward(&self, other: &Body) -> NVec3 {
        self.mass * self.acceleration_toward(other)
    }
}

impl OrbitalSystem {
    /// Recompute `acc_n` for every body from the current stage positions
    ///
    /// All-pairs O(n^2). Every body reads the same snapshot of `pos_n`:
    /// the sums are gathered first and only written back afterwards
    pub fn refresh_accelerations(&mut self) {
        let n = self.bodies.len();
        if n == 0 { // no bodies, return
            return;
        }

        let mut acc = vec![NVec3::zeros(); n];

        // acc[i] = sum over j != i of a(i -> j)
        for (i, (_, bi)) in self.bodies.iter().enumerate() {
            for (j, (_, bj)) in self.bodies.iter().enumerate() {
                if i != j {
                    acc[i] += bi.acceleration_toward(bj);
                }
            }
        }

        for (body, a) in self.bodies.values_mut().zip(acc) {
            body.state.acc_n = a;
        }
    }
}
