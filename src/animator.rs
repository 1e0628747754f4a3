//! Particle field animator.
//!
//! Owns the field, the drawing surface, and the frame scheduler, and exposes an
//! explicit start/stop lifecycle. Each delivered frame updates the field, repaints
//! it, and requests the next frame.

use crate::field::ParticleField;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::DrawSurface;
use rand::Rng;

pub struct ParticleAnimator<S, F, R> {
    field: ParticleField,
    surface: S,
    scheduler: F,
    rng: R,
    /// The frame we are waiting for, `None` when stopped
    pending: Option<FrameHandle>,
}

impl<S: DrawSurface, F: FrameScheduler, R: Rng> ParticleAnimator<S, F, R> {
    /// Size the surface to the container and populate the field.
    ///
    /// Returns `None` when there is no surface to draw on.
    pub fn init(surface: Option<S>, container: (f32, f32), scheduler: F, mut rng: R) -> Option<Self> {
        let mut surface = surface?;
        let (width, height) = container;
        surface.set_size(width, height);
        let field = ParticleField::new(width, height, &mut rng);
        log::info!(
            "particle field initialized: {}x{}, {} particles",
            width,
            height,
            field.particles().len()
        );
        Some(Self {
            field,
            surface,
            scheduler,
            rng,
            pending: None,
        })
    }

    /// Begin the frame loop. Does nothing if already running.
    pub fn start(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
            log::info!("particle animation started");
        }
    }

    /// Cancel the pending frame, ending the loop
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
            log::info!("particle animation stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Run one frame if `handle` is the one we asked for.
    ///
    /// Returns true when the frame ran.
    pub fn frame(&mut self, handle: FrameHandle) -> bool {
        if self.pending != Some(handle) {
            return false;
        }

        self.field.update(&mut self.rng);
        self.field.draw(&mut self.surface);
        self.pending = Some(self.scheduler.request_frame());
        true
    }

    /// Remeasure after the container changed size
    pub fn resize(&mut self, container: (f32, f32)) {
        let (width, height) = container;
        log::debug!("particle field resized to {}x{}", width, height);
        self.surface.set_size(width, height);
        self.field.resize(width, height);
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PARTICLE_COUNT;
    use crate::scheduler::testing::ManualScheduler;
    use crate::surface::testing::RecordingSurface;
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type TestAnimator = ParticleAnimator<RecordingSurface, ManualScheduler, StdRng>;

    fn animator() -> TestAnimator {
        ParticleAnimator::init(
            Some(RecordingSurface::default()),
            (800.0, 400.0),
            ManualScheduler::default(),
            StdRng::seed_from_u64(1),
        )
        .unwrap()
    }

    fn deliver(animator: &mut TestAnimator) -> bool {
        match animator.scheduler_mut().pending.take() {
            Some(handle) => animator.frame(handle),
            None => false,
        }
    }

    #[test]
    fn test_missing_surface_is_a_silent_no_op() {
        let animator: Option<TestAnimator> = ParticleAnimator::init(
            None,
            (800.0, 400.0),
            ManualScheduler::default(),
            StdRng::seed_from_u64(1),
        );
        assert!(animator.is_none());
    }

    #[test]
    fn test_init_sizes_surface_to_container() {
        let animator = animator();
        assert_eq!(animator.surface().size(), (800.0, 400.0));
        assert_eq!(animator.field().center(), Vec2::new(400.0, 200.0));
        assert!(!animator.is_running());
    }

    #[test]
    fn test_frames_loop_until_stopped() {
        let mut animator = animator();
        animator.start();
        for _ in 0..10 {
            assert!(deliver(&mut animator));
        }
        assert_eq!(animator.surface().clears, 10);
        assert_eq!(animator.surface().circles.len(), PARTICLE_COUNT);

        animator.stop();
        assert!(!animator.is_running());
        assert!(!deliver(&mut animator));
        assert_eq!(animator.surface().clears, 10);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut animator = animator();
        animator.start();
        animator.start();
        assert_eq!(animator.scheduler_mut().requested, 1);
    }

    #[test]
    fn test_stop_cancels_pending_frame() {
        let mut animator = animator();
        animator.start();
        let handle = animator.scheduler_mut().pending.unwrap();
        animator.stop();
        assert_eq!(animator.scheduler_mut().cancelled, vec![handle]);
        assert!(!animator.frame(handle));
    }

    #[test]
    fn test_stale_handle_is_ignored() {
        let mut animator = animator();
        animator.start();
        let first = animator.scheduler_mut().pending.unwrap();
        assert!(animator.frame(first));
        assert!(!animator.frame(first));
    }

    #[test]
    fn test_resize_keeps_particles() {
        let mut animator = animator();
        animator.start();
        deliver(&mut animator);
        animator.resize((1024.0, 768.0));
        assert_eq!(animator.surface().size(), (1024.0, 768.0));
        assert_eq!(animator.field().center(), Vec2::new(512.0, 384.0));
        assert_eq!(animator.field().particles().len(), PARTICLE_COUNT);
        assert!(deliver(&mut animator));
    }
}
