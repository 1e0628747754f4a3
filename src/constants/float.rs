//! Ambient float effect constants.

use std::time::Duration;

/// Vertical offset reached at the end of each leg (negative is up)
pub const FLOAT_OFFSET: f32 = -20.0;
/// Duration of a single leg of the float
pub const FLOAT_LEG_DURATION: Duration = Duration::from_secs(3);
/// Delay between checks for a tweening utility
pub const FLOAT_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Text of the floating decorative label
pub const FLOAT_LABEL: &str = "SIRENS";
/// Font size of the floating label in points
pub const FLOAT_LABEL_SIZE: f32 = 64.0;
/// Environment variable carrying the reduced-motion preference
pub const REDUCED_MOTION_ENV: &str = "HERO_DOTS_REDUCED_MOTION";
