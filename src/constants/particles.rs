//! Particle field constants.

/// Number of particles in the field (half spawn on each side)
pub const PARTICLE_COUNT: usize = 60;
/// How far outside the frame particles spawn horizontally
pub const PARTICLE_SPAWN_MARGIN: f32 = 20.0;
/// Side length of the square around the center that targets are drawn from
pub const PARTICLE_TARGET_SPREAD: f32 = 100.0;
/// Smallest particle radius
pub const PARTICLE_MIN_SIZE: f32 = 2.0;
/// Random radius added on top of the minimum
pub const PARTICLE_SIZE_RANGE: f32 = 3.0;
/// Smallest per-frame interpolation factor toward the target
pub const PARTICLE_MIN_SPEED: f32 = 0.3;
/// Random interpolation factor added on top of the minimum
pub const PARTICLE_SPEED_RANGE: f32 = 0.5;
/// Smallest peak opacity
pub const PARTICLE_MIN_MAX_OPACITY: f32 = 0.3;
/// Random peak opacity added on top of the minimum
pub const PARTICLE_MAX_OPACITY_RANGE: f32 = 0.6;
/// Opacity gained per frame while far from the target
pub const PARTICLE_FADE_IN_STEP: f32 = 0.02;
/// Opacity lost per frame while near the target
pub const PARTICLE_FADE_OUT_STEP: f32 = 0.01;
/// Distance above which a particle fades in, at or below which it fades out
pub const PARTICLE_FADE_DISTANCE: f32 = 100.0;
/// A particle closer than this to its target may respawn
pub const PARTICLE_ARRIVAL_DISTANCE: f32 = 10.0;
/// A particle dimmer than this may respawn
pub const PARTICLE_RESPAWN_OPACITY: f32 = 0.1;
/// Dot color (off-white), alpha comes from the particle opacity
pub const PARTICLE_COLOR_RGB: [u8; 3] = [230, 230, 225];
