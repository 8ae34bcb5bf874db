//! Camera, flashlight and mouse state with their per-frame updates.
//!
//! All motion is momentum-based: input bumps a delta value, the per-frame
//! update integrates it and bleeds it off with the discrete decay
//! `v -= v * k * dt`. The flashlight shadow is the one exception: it eases
//! linearly toward its target so toggling reads as a fade, not a fling.

use glam::Vec2;

use crate::config::Config;
use crate::constants::*;

/// Viewport position and zoom within the captured image.
pub struct Camera {
    /// World-space offset of the view center
    pub position: Vec2,
    /// Pan momentum, pixels/sec
    pub velocity: Vec2,
    /// Zoom factor, always within the configured `[min_scale, max_scale]`
    pub scale: f32,
    /// Zoom momentum
    pub delta_scale: f32,
    /// Window-space point held visually fixed while a zoom impulse plays out
    pub scale_pivot: Vec2,
    /// Fixed timestep, derived once from the display refresh rate
    pub dt: f32,
}

impl Camera {
    pub fn new(dt: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            scale: 1.0,
            delta_scale: 0.0,
            scale_pivot: Vec2::ZERO,
            dt,
        }
    }

    /// Convert a viewport-space vector (e.g. a mouse delta) to its
    /// world-space magnitude at the current zoom.
    pub fn world(&self, v: Vec2) -> Vec2 {
        v / self.scale
    }

    /// Queue a zoom impulse anchored on `pivot` (window coordinates).
    pub fn zoom_impulse(&mut self, amount: f32, pivot: Vec2) {
        self.delta_scale += amount;
        self.scale_pivot = pivot;
    }

    /// One-shot velocity kick (keyboard movement).
    pub fn nudge(&mut self, delta_v: Vec2) {
        self.velocity += delta_v;
    }

    /// Back to the identity view: scale 1, origin position, no motion.
    /// The scale pivot is left alone; it is rewritten on the next impulse.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.delta_scale = 0.0;
        self.position = Vec2::ZERO;
        self.velocity = Vec2::ZERO;
    }

    /// Advance one fixed timestep.
    ///
    /// While a zoom impulse is live, the window point under `scale_pivot`
    /// stays visually fixed: the pivot's world position is computed before
    /// and after the scale step and the difference folds into `position`.
    /// Velocity panning is suppressed entirely while dragging; drag deltas
    /// are applied by the input layer instead.
    pub fn update(&mut self, config: &Config, dragging: bool, window_size: Vec2) {
        if self.delta_scale.abs() > DELTA_SCALE_THRESHOLD {
            let anchor = self.scale_pivot - window_size * 0.5;
            let p0 = anchor / self.scale;
            self.scale = (self.scale + self.delta_scale * self.dt)
                .clamp(config.min_scale, config.max_scale);
            let p1 = anchor / self.scale;
            self.position += p0 - p1;

            self.delta_scale -= self.delta_scale * self.dt * config.scale_friction;
        }

        if !dragging && self.velocity.length() > VELOCITY_THRESHOLD {
            self.position += self.velocity * self.dt;
            self.velocity -= self.velocity * self.dt * config.drag_friction;
        }
    }
}

/// Circular spotlight that dims everything outside its radius.
pub struct Flashlight {
    pub is_enabled: bool,
    /// Darkness outside the spotlight, eased within `[0, MAX_SHADOW]`
    pub shadow: f32,
    /// Spotlight radius in pixels, never negative
    pub radius: f32,
    /// Radius momentum
    pub delta_radius: f32,
}

impl Flashlight {
    pub fn new() -> Self {
        Self {
            is_enabled: false,
            shadow: 0.0,
            radius: DEFAULT_FLASHLIGHT_RADIUS,
            delta_radius: 0.0,
        }
    }

    pub fn toggle(&mut self) {
        self.is_enabled = !self.is_enabled;
    }

    pub fn radius_impulse(&mut self, amount: f32) {
        self.delta_radius += amount;
    }

    /// Advance one fixed timestep.
    pub fn update(&mut self, dt: f32) {
        if self.delta_radius.abs() > DELTA_RADIUS_THRESHOLD {
            self.radius = (self.radius + self.delta_radius * dt).max(0.0);
            self.delta_radius -= self.delta_radius * DELTA_RADIUS_DECELERATION * dt;
        }

        // Smoothly interpolate between on and off, never overshooting
        if self.is_enabled {
            self.shadow = (self.shadow + SHADOW_RATE * dt).min(MAX_SHADOW);
        } else {
            self.shadow = (self.shadow - SHADOW_RATE * dt).max(0.0);
        }
    }
}

impl Default for Flashlight {
    fn default() -> Self {
        Self::new()
    }
}

/// Pointer state for drag computation. `previous` holds the position as of
/// the end of the prior event's processing, giving exactly one sample of lag
/// for delta computation.
pub struct Mouse {
    pub current: Vec2,
    pub previous: Vec2,
    pub dragging: bool,
}

impl Mouse {
    pub fn new(position: Vec2) -> Self {
        Self {
            current: position,
            previous: position,
            dragging: false,
        }
    }
}
