//! Application window and OpenGL context management.
//!
//! This module handles window creation and OpenGL context setup. It keeps
//! platform/graphics plumbing away from the navigation logic. The magnifier
//! normally covers the whole screen borderless; `windowed = true` in the
//! settings gives a regular resizable window instead.

use std::ffi::CString;
use std::num::NonZeroU32;
use std::sync::Arc;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window, WindowAttributes};

use crate::constants::*;

/// Result of window and GL context creation.
pub struct WindowContext {
    pub window: Window,
    pub gl_surface: glutin::surface::Surface<WindowSurface>,
    pub gl_context: glutin::context::PossiblyCurrentContext,
    pub gl: Arc<glow::Context>,
}

/// Create the overlay window with an OpenGL 3.3 context.
pub fn create_window(event_loop: &ActiveEventLoop, windowed: bool) -> WindowContext {
    let window_attrs = if windowed {
        WindowAttributes::default()
            .with_title("loupe")
            .with_inner_size(PhysicalSize::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT))
            .with_resizable(true)
    } else {
        WindowAttributes::default()
            .with_title("loupe")
            .with_decorations(false)
            .with_fullscreen(Some(Fullscreen::Borderless(None)))
    };

    let template = ConfigTemplateBuilder::new().with_alpha_size(8);
    let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attrs));

    let (window, gl_config) = display_builder
        .build(event_loop, template, |configs| {
            configs
                .reduce(|accum, config| {
                    if config.num_samples() > accum.num_samples() {
                        config
                    } else {
                        accum
                    }
                })
                .unwrap()
        })
        .expect("Failed to create window");

    let window = window.expect("Failed to create window");
    let window_handle = window.window_handle().unwrap();
    let gl_display = gl_config.display();

    let context_attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .build(Some(window_handle.as_raw()));

    let gl_context = unsafe {
        gl_display
            .create_context(&gl_config, &context_attrs)
            .expect("Failed to create OpenGL context")
    };

    let size = window.inner_size();
    let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        window_handle.as_raw(),
        NonZeroU32::new(size.width).unwrap(),
        NonZeroU32::new(size.height).unwrap(),
    );

    let gl_surface = unsafe {
        gl_display
            .create_window_surface(&gl_config, &surface_attrs)
            .expect("Failed to create surface")
    };

    let gl_context = gl_context
        .make_current(&gl_surface)
        .expect("Failed to make context current");

    let gl = Arc::new(unsafe {
        glow::Context::from_loader_function(|s| {
            let s = CString::new(s).unwrap();
            gl_display.get_proc_address(&s) as *const _
        })
    });

    WindowContext {
        window,
        gl_surface,
        gl_context,
        gl,
    }
}

/// Resize the GL surface to match the window size.
pub fn resize_surface(
    gl_surface: &glutin::surface::Surface<WindowSurface>,
    gl_context: &glutin::context::PossiblyCurrentContext,
    width: u32,
    height: u32,
) {
    if width > 0 && height > 0 {
        gl_surface.resize(
            gl_context,
            NonZeroU32::new(width).unwrap(),
            NonZeroU32::new(height).unwrap(),
        );
    }
}

/// Fixed per-frame timestep from the display refresh rate. winit reports
/// millihertz; fall back to 60 Hz when the monitor cannot be queried.
pub fn refresh_interval(window: &Window) -> f32 {
    window
        .current_monitor()
        .and_then(|monitor| monitor.refresh_rate_millihertz())
        .map(|mhz| 1000.0 / mhz as f32)
        .unwrap_or(DEFAULT_DT)
}
