//! Navigation and animation tuning constants.

/// Pan momentum below this speed (pixels/sec) is treated as stopped
pub const VELOCITY_THRESHOLD: f32 = 15.0;
/// Zoom momentum deadband; smaller leftover impulses leave the scale alone
pub const DELTA_SCALE_THRESHOLD: f32 = 0.5;
/// Flashlight radius momentum deadband, stops micro-jitter near rest
pub const DELTA_RADIUS_THRESHOLD: f32 = 1.0;
/// Decay constant for the flashlight radius momentum
pub const DELTA_RADIUS_DECELERATION: f32 = 10.0;
/// Linear fade rate for the flashlight shadow (units/sec)
pub const SHADOW_RATE: f32 = 6.0;
/// Darkest the area outside the spotlight gets
pub const MAX_SHADOW: f32 = 0.8;
/// Spotlight radius at startup (pixels)
pub const DEFAULT_FLASHLIGHT_RADIUS: f32 = 200.0;
/// Radius momentum added per scroll detent (pixels/sec)
pub const RADIUS_IMPULSE: f32 = 250.0;
/// Fallback timestep when the display refresh rate cannot be queried
pub const DEFAULT_DT: f32 = 1.0 / 60.0;
/// Default window size in windowed mode
pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
