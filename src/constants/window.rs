//! Window and rendering constants.

/// Default window width
pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
/// Default window height
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
/// Window title
pub const WINDOW_TITLE: &str = "Hero Dots";
/// Background clear color (near-black)
pub const BACKGROUND_COLOR: [f32; 4] = [0.04, 0.04, 0.05, 1.0];
/// Upper bound on dots uploaded per frame
pub const MAX_DOT_INSTANCES: usize = 1024;
/// Environment variable that enables the puffin profiler server
pub const PROFILE_ENV: &str = "HERO_DOTS_PROFILE";
