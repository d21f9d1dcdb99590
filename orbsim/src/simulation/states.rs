//! Core state types for the orbital simulation.
//!
//! - `NVec3`         3D vector (nalgebra)
//! - `State`         integrated + in-progress stage kinematics of one body
//! - `Body`          a gravitating body owning its `State`
//! - `OrbitalSystem` named collection of bodies keyed by body name
//!
//! Outside of a step `pos_n == pos_i`, `vel_n == vel_i` and both
//! accumulators are zero. The integrator is the only thing that breaks this,
//! and it restores it when the step is finalized.

use indexmap::IndexMap;
use nalgebra::Vector3;

use crate::error::{SimError, SimResult};

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub pos_i: NVec3, // integrated position (inertial frame)
    pub vel_i: NVec3, // integrated velocity (inertial frame)
    pub pos_n: NVec3, // stage position
    pub vel_n: NVec3, // stage velocity
    pub acc_n: NVec3, // acceleration at the stage position
    pub vel_k: NVec3, // weighted velocity accumulator
    pub acc_k: NVec3, // weighted acceleration accumulator
}

impl State {
    pub fn new(pos: NVec3, vel: NVec3) -> Self {
        Self {
            pos_i: pos,
            vel_i: vel,
            pos_n: pos,
            vel_n: vel,
            acc_n: NVec3::zeros(),
            vel_k: NVec3::zeros(),
            acc_k: NVec3::zeros(),
        }
    }

    /// Fold another state's stage position/velocity into this one.
    /// Only valid between steps, so the integrated values move with the
    /// stage values.
    pub fn combine(&mut self, other: &State) {
        self.pos_n += other.pos_n;
        self.vel_n += other.vel_n;
        self.pos_i = self.pos_n;
        self.vel_i = self.vel_n;
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(NVec3::zeros(), NVec3::zeros())
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub mass: f64,                 // kg, always > 0
    pub radius: f64,               // softening radius, >= 0
    pub state: State,
    pub ephemeris_id: Option<i32>, // catalog id the body was sampled from, if any
}

impl Body {
    /// Build a body, validating mass and softening radius.
    ///
    /// `parent` is only read here: its current position/velocity are added to
    /// `state` so the body starts in the inertial frame. No link is kept.
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        mut state: State,
        parent: Option<&Body>,
        radius: f64,
    ) -> SimResult<Self> {
        let name = name.into();
        if !(mass > 0.0) || !mass.is_finite() {
            return Err(SimError::NonPositiveMass { name, mass });
        }
        if !(radius >= 0.0) {
            return Err(SimError::NegativeRadius { name, radius });
        }

        if let Some(parent) = parent {
            state.combine(&parent.state);
        }

        Ok(Self {
            name,
            mass,
            radius,
            state,
            ephemeris_id: None,
        })
    }

    pub fn with_ephemeris_id(mut self, id: i32) -> Self {
        self.ephemeris_id = Some(id);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrbitalSystem {
    pub name: String,
    pub bodies: IndexMap<String, Body>,
}

impl OrbitalSystem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bodies: IndexMap::new(),
        }
    }

    /// Insert a body; names are unique keys.
    pub fn insert(&mut self, body: Body) -> SimResult<()> {
        if self.bodies.contains_key(&body.name) {
            return Err(SimError::DuplicateBody(body.name));
        }
        self.bodies.insert(body.name.clone(), body);
        Ok(())
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies.get(name)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
