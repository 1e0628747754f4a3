//! Drawing surface abstraction.
//!
//! The particle field paints through this trait so the update/draw logic does not
//! depend on a live GL context.

use glam::Vec2;

/// Straight (non-premultiplied) RGBA color, channels in 0.0..=1.0
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub fn from_rgb8(rgb: [u8; 3], alpha: f32) -> Self {
        Self {
            r: rgb[0] as f32 / 255.0,
            g: rgb[1] as f32 / 255.0,
            b: rgb[2] as f32 / 255.0,
            a: alpha,
        }
    }
}

/// A 2D surface that can be resized, cleared, and filled with circles.
///
/// Coordinates are in surface pixels with the origin at the top-left corner.
pub trait DrawSurface {
    /// Resize the backing store to match the container
    fn set_size(&mut self, width: f32, height: f32);

    /// Current size of the surface
    fn size(&self) -> (f32, f32);

    /// Erase everything drawn so far
    fn clear(&mut self);

    /// Paint a filled circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Called once all circles for the frame have been submitted
    fn finish(&mut self) {}
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// One recorded call to `fill_circle`
    #[derive(Clone, Debug)]
    pub struct Circle {
        pub center: Vec2,
        pub radius: f32,
        pub color: Rgba,
    }

    /// Surface that records draw calls instead of rendering them
    #[derive(Default)]
    pub struct RecordingSurface {
        pub width: f32,
        pub height: f32,
        pub clears: usize,
        pub circles: Vec<Circle>,
    }

    impl DrawSurface for RecordingSurface {
        fn set_size(&mut self, width: f32, height: f32) {
            self.width = width;
            self.height = height;
        }

        fn size(&self) -> (f32, f32) {
            (self.width, self.height)
        }

        fn clear(&mut self) {
            self.clears += 1;
            self.circles.clear();
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
            self.circles.push(Circle { center, radius, color });
        }
    }
}
