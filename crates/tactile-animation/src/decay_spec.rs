//! Frame-based exponential decay.
//!
//! Each frame multiplies the velocity by `power` and adds it to the position.
//! The simulation settles once the velocity magnitude drops below
//! `rest_delta`. When snap points are configured, slow frames home the
//! written position onto the nearest snap point.

use tactile_ui_graphics::{magnitude, snap, SnapConfig, Vec2};

/// Velocity multiplier applied per frame when none is configured.
pub const DEFAULT_DECAY_POWER: f32 = 0.95;

/// Velocity magnitude under which the simulation stops.
pub const DEFAULT_REST_DELTA: f32 = 0.5;

/// Velocity magnitude under which frames start homing onto snap points.
pub const SNAP_ENGAGEMENT_VELOCITY: f32 = 0.5;

/// Parameters of the decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecaySpec {
    /// Per-frame velocity multiplier, in `(0, 1)`.
    pub power: f32,
    /// Settle threshold on the velocity magnitude.
    pub rest_delta: f32,
    pub snap_engagement_velocity: f32,
}

impl DecaySpec {
    pub fn new(power: f32, rest_delta: f32) -> Self {
        Self {
            power,
            rest_delta,
            snap_engagement_velocity: SNAP_ENGAGEMENT_VELOCITY,
        }
    }

    pub fn with_snap_engagement_velocity(mut self, velocity: f32) -> Self {
        self.snap_engagement_velocity = velocity;
        self
    }

    /// Replaces out-of-range parameters with the defaults so the simulation
    /// always terminates.
    pub fn sanitized(self) -> Self {
        let power = if self.power > 0.0 && self.power < 1.0 {
            self.power
        } else {
            log::warn!(
                "decay power {} outside (0, 1); using {}",
                self.power,
                DEFAULT_DECAY_POWER
            );
            DEFAULT_DECAY_POWER
        };
        let rest_delta = if self.rest_delta > 0.0 && self.rest_delta.is_finite() {
            self.rest_delta
        } else {
            log::warn!(
                "decay rest delta {} must be positive; using {}",
                self.rest_delta,
                DEFAULT_REST_DELTA
            );
            DEFAULT_REST_DELTA
        };
        let snap_engagement_velocity = if self.snap_engagement_velocity.is_finite() {
            self.snap_engagement_velocity.max(0.0)
        } else {
            SNAP_ENGAGEMENT_VELOCITY
        };
        Self {
            power,
            rest_delta,
            snap_engagement_velocity,
        }
    }

    /// Number of frames needed to settle from `speed`: `ceil(ln(rest / speed) / ln(power))`.
    pub fn frames_to_rest(&self, speed: f32) -> u32 {
        if speed < self.rest_delta {
            return 1;
        }
        let frames = ((self.rest_delta / speed).ln() / self.power.ln()).ceil();
        frames.max(1.0) as u32
    }
}

impl Default for DecaySpec {
    fn default() -> Self {
        Self::new(DEFAULT_DECAY_POWER, DEFAULT_REST_DELTA)
    }
}

/// What one frame of the simulation produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayFrame {
    /// Position to present this frame, possibly snapped.
    pub position: Vec2,
    /// Velocity after this frame's decay.
    pub velocity: Vec2,
    /// True on the last frame.
    pub settled: bool,
}

/// Pure stepping model of the inertia simulator.
#[derive(Debug, Clone)]
pub struct DecaySimulation {
    position: Vec2,
    velocity: Vec2,
    spec: DecaySpec,
    snap: Option<SnapConfig>,
    snap_threshold: f32,
    settled: bool,
}

impl DecaySimulation {
    pub fn new(position: Vec2, velocity: Vec2, spec: DecaySpec) -> Self {
        let velocity = if velocity.is_finite() {
            velocity
        } else {
            Vec2::ZERO
        };
        Self {
            position,
            velocity,
            spec: spec.sanitized(),
            snap: None,
            snap_threshold: 0.0,
            settled: false,
        }
    }

    /// Enables homing onto `config` once the motion slows down.
    pub fn with_snap(mut self, config: SnapConfig, default_threshold: f32) -> Self {
        if config.points.is_empty() {
            log::warn!("inertia snap configured without snap points; ignoring");
        } else {
            self.snap = Some(config);
            self.snap_threshold = default_threshold;
        }
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn spec(&self) -> DecaySpec {
        self.spec
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    fn snapped(&self, position: Vec2) -> Vec2 {
        match &self.snap {
            Some(config) => snap(position, config, self.snap_threshold),
            None => position,
        }
    }

    /// Advances one frame. Stepping a settled simulation returns the final
    /// position again without moving.
    pub fn step(&mut self) -> DecayFrame {
        if self.settled {
            return DecayFrame {
                position: self.position,
                velocity: Vec2::ZERO,
                settled: true,
            };
        }

        self.velocity *= self.spec.power;
        self.position += self.velocity;
        let speed = magnitude(self.velocity);

        if speed < self.spec.rest_delta {
            self.settled = true;
            self.position = self.snapped(self.position);
            return DecayFrame {
                position: self.position,
                velocity: self.velocity,
                settled: true,
            };
        }

        let position = if speed < self.spec.snap_engagement_velocity {
            self.snapped(self.position)
        } else {
            self.position
        };
        DecayFrame {
            position,
            velocity: self.velocity,
            settled: false,
        }
    }
}
