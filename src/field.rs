//! The particle field: dimensions, center point, and the ordered particle list.

use crate::constants::*;
use crate::particle::{Particle, SpawnSide, StepOutcome};
use crate::surface::{DrawSurface, Rgba};
use glam::Vec2;
use rand::Rng;

pub struct ParticleField {
    width: f32,
    height: f32,
    center: Vec2,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Build a field for a container of the given size.
    ///
    /// Particles alternate left, right, left, right so each side gets half.
    pub fn new(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let center = Vec2::new(width / 2.0, height / 2.0);
        let mut particles = Vec::with_capacity(PARTICLE_COUNT);
        for _ in 0..PARTICLE_COUNT / 2 {
            particles.push(Particle::spawn(SpawnSide::Left, width, height, center, rng));
            particles.push(Particle::spawn(SpawnSide::Right, width, height, center, rng));
        }
        Self {
            width,
            height,
            center,
            particles,
        }
    }

    /// Adopt new container dimensions.
    ///
    /// In-flight particles keep their current targets until they next respawn.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.center = Vec2::new(width / 2.0, height / 2.0);
    }

    /// Advance every particle one frame, returns how many respawned
    pub fn update(&mut self, rng: &mut impl Rng) -> usize {
        puffin::profile_function!();

        let (width, height, center) = (self.width, self.height, self.center);
        self.particles
            .iter_mut()
            .map(|p| p.step(width, height, center, rng))
            .filter(|outcome| *outcome == StepOutcome::Respawned)
            .count()
    }

    /// Clear the surface and paint every particle in list order
    pub fn draw(&self, surface: &mut impl DrawSurface) {
        puffin::profile_function!();

        surface.clear();
        for particle in &self.particles {
            surface.fill_circle(
                particle.position,
                particle.size,
                Rgba::from_rgb8(PARTICLE_COLOR_RGB, particle.opacity),
            );
        }
        surface.finish();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::RecordingSurface;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field(seed: u64) -> (ParticleField, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let field = ParticleField::new(800.0, 400.0, &mut rng);
        (field, rng)
    }

    #[test]
    fn test_center_is_half_the_container() {
        let (field, _) = field(1);
        assert_eq!(field.center(), Vec2::new(400.0, 200.0));
        assert_eq!(field.size(), (800.0, 400.0));
    }

    #[test]
    fn test_particles_split_evenly_between_sides() {
        let (field, _) = field(1);
        let particles = field.particles();
        assert_eq!(particles.len(), PARTICLE_COUNT);
        let left = particles.iter().filter(|p| p.side == SpawnSide::Left).count();
        let right = particles.iter().filter(|p| p.side == SpawnSide::Right).count();
        assert_eq!(left, 30);
        assert_eq!(right, 30);
    }

    #[test]
    fn test_opacity_stays_within_bounds_every_frame() {
        let (mut field, mut rng) = field(42);
        for _ in 0..2000 {
            field.update(&mut rng);
            for p in field.particles() {
                assert!(p.opacity >= 0.0);
                assert!(p.opacity <= p.max_opacity);
            }
        }
    }

    #[test]
    fn test_count_and_sides_constant_over_time() {
        let (mut field, mut rng) = field(3);
        let sides: Vec<_> = field.particles().iter().map(|p| p.side).collect();
        let mut respawns = 0;
        for _ in 0..2000 {
            respawns += field.update(&mut rng);
        }
        assert!(respawns > 0);
        let after: Vec<_> = field.particles().iter().map(|p| p.side).collect();
        assert_eq!(sides, after);
    }

    #[test]
    fn test_distance_decreases_between_respawns() {
        let (mut field, mut rng) = field(9);
        let mut previous: Vec<f32> = field.particles().iter().map(|p| p.distance_to_target()).collect();
        for _ in 0..500 {
            let targets: Vec<Vec2> = field.particles().iter().map(|p| p.target).collect();
            field.update(&mut rng);
            for (i, p) in field.particles().iter().enumerate() {
                let distance = p.distance_to_target();
                // A changed target means the particle respawned this frame.
                // Below a hundredth of a unit the step drops under f32 precision.
                if p.target == targets[i] && previous[i] > 0.01 {
                    assert!(distance < previous[i]);
                }
                previous[i] = distance;
            }
        }
    }

    #[test]
    fn test_left_particle_moves_rightward_until_near_target() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut field = ParticleField::new(800.0, 400.0, &mut rng);
        let first = field.particles()[0].clone();
        assert_eq!(first.side, SpawnSide::Left);
        assert_eq!(first.position.x, -20.0);

        let mut last_x = first.position.x;
        loop {
            field.update(&mut rng);
            let p = &field.particles()[0];
            assert!(p.position.x > last_x);
            last_x = p.position.x;
            if p.distance_to_target() <= PARTICLE_FADE_DISTANCE {
                break;
            }
        }
    }

    #[test]
    fn test_resize_recenters_without_touching_targets() {
        let (mut field, _) = field(5);
        let targets: Vec<Vec2> = field.particles().iter().map(|p| p.target).collect();
        field.resize(1000.0, 600.0);
        assert_eq!(field.center(), Vec2::new(500.0, 300.0));
        assert_eq!(field.size(), (1000.0, 600.0));
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
        let after: Vec<Vec2> = field.particles().iter().map(|p| p.target).collect();
        assert_eq!(targets, after);
    }

    #[test]
    fn test_draw_clears_then_paints_in_order() {
        let (field, _) = field(2);
        let mut surface = RecordingSurface::default();
        field.draw(&mut surface);
        field.draw(&mut surface);
        assert_eq!(surface.clears, 2);
        assert_eq!(surface.circles.len(), PARTICLE_COUNT);
        for (circle, particle) in surface.circles.iter().zip(field.particles()) {
            assert_eq!(circle.center, particle.position);
            assert_eq!(circle.radius, particle.size);
            assert_eq!(circle.color.a, particle.opacity);
        }
    }
}
