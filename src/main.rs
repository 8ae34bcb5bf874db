mod app;
mod capture;
mod config;
mod constants;
mod error;
mod input;
mod navigation;
mod renderer;

use glam::Vec2;
use glutin::prelude::*;
use glutin::surface::WindowSurface;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{ModifiersState, PhysicalKey};
use winit::window::{Window, WindowId};

use capture::Screenshot;
use config::Config;
use input::{Button, InputAction, InputEvent};
use navigation::{Camera, Flashlight, Mouse};
use renderer::Renderer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Everything that can fail without a window fails here, before any
    // graphics state exists.
    let config = Config::load()?;
    let vertex_src = config::load_shader_source("vertex.glsl")?;
    let fragment_src = config::load_shader_source("fragment.glsl")?;
    let screenshot = capture::capture_screen()?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, screenshot, vertex_src, fragment_src);
    event_loop.run_app(&mut app)?;
    Ok(())
}

/// Inputs gathered before the event loop starts; consumed on first resume.
struct Boot {
    config: Config,
    screenshot: Screenshot,
    vertex_src: String,
    fragment_src: String,
}

struct App {
    boot: Option<Boot>,
    state: Option<AppState>,
}

struct AppState {
    // Window and GL
    window: Window,
    gl_surface: glutin::surface::Surface<WindowSurface>,
    gl_context: glutin::context::PossiblyCurrentContext,
    renderer: Renderer,

    // Navigation state
    config: Config,
    camera: Camera,
    flashlight: Flashlight,
    mouse: Mouse,

    // Modifier keys as of the last ModifiersChanged event
    modifiers: ModifiersState,
}

impl App {
    fn new(config: Config, screenshot: Screenshot, vertex_src: String, fragment_src: String) -> Self {
        Self {
            boot: Some(Boot {
                config,
                screenshot,
                vertex_src,
                fragment_src,
            }),
            state: None,
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let boot = match self.boot.take() {
            Some(boot) => boot,
            None => return,
        };

        let app::WindowContext {
            window,
            gl_surface,
            gl_context,
            gl,
        } = app::create_window(event_loop, boot.config.windowed);

        let dt = app::refresh_interval(&window);
        log::info!("fixed timestep {dt:.5}s");

        let renderer = Renderer::new(gl, &boot.vertex_src, &boot.fragment_src, &boot.screenshot)
            .expect("Failed to create renderer");

        let size = window.inner_size();
        renderer.resize(size.width as i32, size.height as i32);

        self.state = Some(AppState {
            window,
            gl_surface,
            gl_context,
            renderer,
            config: boot.config,
            camera: Camera::new(dt),
            flashlight: Flashlight::new(),
            mouse: Mouse::new(Vec2::ZERO),
            modifiers: ModifiersState::default(),
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                state.apply(event_loop, InputEvent::QuitRequested);
            }
            WindowEvent::Resized(size) => {
                app::resize_surface(&state.gl_surface, &state.gl_context, size.width, size.height);
                state.renderer.resize(size.width as i32, size.height as i32);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                state.modifiers = modifiers.state();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        let ctrl = state.modifiers.control_key();
                        state.apply(event_loop, InputEvent::KeyDown { code, ctrl });
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                state.apply(
                    event_loop,
                    InputEvent::PointerMoved {
                        x: position.x as f32,
                        y: position.y as f32,
                    },
                );
            }
            WindowEvent::MouseInput { state: btn_state, button: MouseButton::Left, .. } => {
                let event = match btn_state {
                    ElementState::Pressed => InputEvent::ButtonDown {
                        button: Button::Primary,
                        ctrl: state.modifiers.control_key(),
                    },
                    ElementState::Released => InputEvent::ButtonUp {
                        button: Button::Primary,
                    },
                };
                state.apply(event_loop, event);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // One impulse per event, like one wheel detent
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                let button = if y > 0.0 {
                    Some(Button::ScrollUp)
                } else if y < 0.0 {
                    Some(Button::ScrollDown)
                } else {
                    None
                };
                if let Some(button) = button {
                    let ctrl = state.modifiers.control_key();
                    state.apply(event_loop, InputEvent::ButtonDown { button, ctrl });
                }
            }
            WindowEvent::RedrawRequested => {
                state.update_and_render();
                state.window.request_redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}

impl AppState {
    /// Route one normalized event through the input mapping and execute
    /// whatever side effect it asks for.
    fn apply(&mut self, event_loop: &ActiveEventLoop, event: InputEvent) {
        let action = input::apply_event(
            event,
            &mut self.camera,
            &mut self.flashlight,
            &mut self.mouse,
            &self.config,
        );
        match action {
            InputAction::None => {}
            InputAction::Quit => event_loop.exit(),
            InputAction::ReloadConfig => match Config::load() {
                Ok(config) => {
                    log::info!("configuration reloaded");
                    self.config = config;
                }
                Err(e) => {
                    log::error!("configuration reload failed: {e}");
                    std::process::exit(1);
                }
            },
        }
    }

    /// One fixed-timestep update followed by one frame.
    fn update_and_render(&mut self) {
        let size = self.window.inner_size();
        let window_size = Vec2::new(size.width as f32, size.height as f32);

        self.camera.update(&self.config, self.mouse.dragging, window_size);
        self.flashlight.update(self.camera.dt);

        self.renderer
            .render(&self.camera, &self.flashlight, &self.mouse, window_size);

        self.gl_surface.swap_buffers(&self.gl_context).unwrap();
    }
}
