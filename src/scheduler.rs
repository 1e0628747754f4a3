//! Frame scheduling.
//!
//! The animator asks a `FrameScheduler` for the next display frame and gets back a
//! handle. The host later delivers that handle to `ParticleAnimator::frame`. On a
//! window this maps onto `request_redraw`; tests drive frames by hand.

use std::sync::Arc;
use winit::window::Window;

/// Identifies one requested frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

pub trait FrameScheduler {
    /// Ask for a callback on the next display refresh
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a previously requested frame
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Schedules frames through winit redraw requests
pub struct WindowScheduler {
    window: Arc<Window>,
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl WindowScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            next_id: 0,
            pending: None,
        }
    }

    /// Take the frame that a `RedrawRequested` event should be delivered as
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.window.request_redraw();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}
