//! A single converging dot.
//!
//! Particles spawn just outside the left or right edge of the field and ease toward
//! a random point near the center. They fade in while traveling, fade out on
//! arrival, and respawn from their original edge once they are close and dim.

use crate::constants::*;
use glam::Vec2;
use rand::Rng;

/// Which edge of the field a particle enters from. Never changes after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnSide {
    Left,
    Right,
}

/// What happened to a particle during one frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Respawned,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub side: SpawnSide,
    pub position: Vec2,
    pub target: Vec2,
    /// Circle radius
    pub size: f32,
    /// Fraction of the remaining distance covered each frame
    pub speed: f32,
    pub opacity: f32,
    pub max_opacity: f32,
}

impl Particle {
    /// Create a particle on `side` of a field of the given size
    pub fn spawn(side: SpawnSide, width: f32, height: f32, center: Vec2, rng: &mut impl Rng) -> Self {
        let mut particle = Self {
            side,
            position: Vec2::ZERO,
            target: center,
            size: 0.0,
            speed: 0.0,
            opacity: 0.0,
            max_opacity: 0.0,
        };
        particle.respawn(width, height, center, rng);
        particle
    }

    /// Put the particle back on its edge with a fresh target, size, speed and peak opacity
    pub fn respawn(&mut self, width: f32, height: f32, center: Vec2, rng: &mut impl Rng) {
        let x = match self.side {
            SpawnSide::Left => -PARTICLE_SPAWN_MARGIN,
            SpawnSide::Right => width + PARTICLE_SPAWN_MARGIN,
        };
        self.position = Vec2::new(x, rng.gen::<f32>() * height);
        self.target = center
            + Vec2::new(
                (rng.gen::<f32>() - 0.5) * PARTICLE_TARGET_SPREAD,
                (rng.gen::<f32>() - 0.5) * PARTICLE_TARGET_SPREAD,
            );
        self.size = rng.gen::<f32>() * PARTICLE_SIZE_RANGE + PARTICLE_MIN_SIZE;
        self.speed = rng.gen::<f32>() * PARTICLE_SPEED_RANGE + PARTICLE_MIN_SPEED;
        self.opacity = 0.0;
        self.max_opacity = rng.gen::<f32>() * PARTICLE_MAX_OPACITY_RANGE + PARTICLE_MIN_MAX_OPACITY;
    }

    pub fn distance_to_target(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Advance one frame.
    ///
    /// The fade and respawn decisions use the distance measured before the move.
    pub fn step(&mut self, width: f32, height: f32, center: Vec2, rng: &mut impl Rng) -> StepOutcome {
        let delta = self.target - self.position;
        self.position += delta * self.speed;

        let distance = delta.length();
        if distance > PARTICLE_FADE_DISTANCE {
            self.opacity = (self.opacity + PARTICLE_FADE_IN_STEP).min(self.max_opacity);
        } else {
            self.opacity = (self.opacity - PARTICLE_FADE_OUT_STEP).max(0.0);
        }

        if distance < PARTICLE_ARRIVAL_DISTANCE && self.opacity < PARTICLE_RESPAWN_OPACITY {
            self.respawn(width, height, center, rng);
            return StepOutcome::Respawned;
        }
        StepOutcome::Moved
    }
}
