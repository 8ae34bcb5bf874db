//! Input-to-intent mapping.
//!
//! Window events arrive already normalized into [`InputEvent`]; `apply_event`
//! turns each one into impulses on the camera/flashlight/mouse state. This
//! layer owns all gesture semantics (drag deltas, zoom anchoring, the
//! flashlight-vs-zoom scroll gate) but performs no I/O: side effects it
//! cannot express as state changes are reported back as an [`InputAction`].

use glam::Vec2;
use winit::keyboard::KeyCode;

use crate::config::Config;
use crate::constants::*;
use crate::navigation::{Camera, Flashlight, Mouse};

/// Normalized input events consumed by the mapping layer. Wheel ticks arrive
/// as scroll buttons, one event per detent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown { code: KeyCode, ctrl: bool },
    ButtonDown { button: Button, ctrl: bool },
    ButtonUp { button: Button },
    PointerMoved { x: f32, y: f32 },
    QuitRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    ScrollUp,
    ScrollDown,
}

/// Side effects the mapping layer cannot perform itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ReloadConfig,
}

/// Apply one event to the navigation state.
pub fn apply_event(
    event: InputEvent,
    camera: &mut Camera,
    flashlight: &mut Flashlight,
    mouse: &mut Mouse,
    config: &Config,
) -> InputAction {
    match event {
        InputEvent::KeyDown { code, ctrl } => {
            key_down(code, ctrl, camera, flashlight, mouse, config)
        }
        InputEvent::ButtonDown { button, ctrl } => {
            match button {
                Button::Primary => {
                    // Drag start cancels residual momentum
                    mouse.previous = mouse.current;
                    mouse.dragging = true;
                    camera.velocity = Vec2::ZERO;
                }
                Button::ScrollUp => scroll(1.0, ctrl, camera, flashlight, mouse, config),
                Button::ScrollDown => scroll(-1.0, ctrl, camera, flashlight, mouse, config),
            }
            InputAction::None
        }
        InputEvent::ButtonUp { button } => {
            if button == Button::Primary {
                mouse.dragging = false;
            }
            InputAction::None
        }
        InputEvent::PointerMoved { x, y } => {
            mouse.current = Vec2::new(x, y);
            if mouse.dragging {
                let delta = camera.world(mouse.previous) - camera.world(mouse.current);
                camera.position += delta;
                // Releasing mid-motion leaves momentum equal to the last
                // sample's drag speed, which then decays in the update.
                camera.velocity = delta / camera.dt;
            }
            mouse.previous = mouse.current;
            InputAction::None
        }
        InputEvent::QuitRequested => InputAction::Quit,
    }
}

fn key_down(
    code: KeyCode,
    ctrl: bool,
    camera: &mut Camera,
    flashlight: &mut Flashlight,
    mouse: &mut Mouse,
    config: &Config,
) -> InputAction {
    match code {
        KeyCode::ArrowLeft | KeyCode::KeyH => {
            camera.nudge(Vec2::new(-config.key_move_speed, 0.0));
        }
        KeyCode::ArrowDown | KeyCode::KeyJ => {
            camera.nudge(Vec2::new(0.0, config.key_move_speed));
        }
        KeyCode::ArrowUp | KeyCode::KeyK => {
            camera.nudge(Vec2::new(0.0, -config.key_move_speed));
        }
        KeyCode::ArrowRight | KeyCode::KeyL => {
            camera.nudge(Vec2::new(config.key_move_speed, 0.0));
        }
        KeyCode::Minus => scroll(-1.0, ctrl, camera, flashlight, mouse, config),
        KeyCode::Equal => scroll(1.0, ctrl, camera, flashlight, mouse, config),
        KeyCode::Digit0 => camera.reset(),
        KeyCode::KeyF => flashlight.toggle(),
        KeyCode::KeyR => return InputAction::ReloadConfig,
        KeyCode::KeyQ | KeyCode::Escape => return InputAction::Quit,
        _ => {}
    }
    InputAction::None
}

/// One scroll detent, from the wheel or the `-`/`=` keys. The impulse goes to
/// the flashlight radius iff the flashlight is on AND Control is held;
/// otherwise it zooms, anchored on the cursor. The wheel and keyboard paths
/// share this one rule.
fn scroll(
    direction: f32,
    ctrl: bool,
    camera: &mut Camera,
    flashlight: &mut Flashlight,
    mouse: &Mouse,
    config: &Config,
) {
    if ctrl && flashlight.is_enabled {
        flashlight.radius_impulse(direction * RADIUS_IMPULSE);
    } else {
        camera.zoom_impulse(direction * config.scroll_speed, mouse.current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    struct Rig {
        camera: Camera,
        flashlight: Flashlight,
        mouse: Mouse,
        config: Config,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                camera: Camera::new(DT),
                flashlight: Flashlight::new(),
                mouse: Mouse::new(Vec2::ZERO),
                config: Config::default(),
            }
        }

        fn apply(&mut self, event: InputEvent) -> InputAction {
            apply_event(
                event,
                &mut self.camera,
                &mut self.flashlight,
                &mut self.mouse,
                &self.config,
            )
        }
    }

    #[test]
    fn drag_round_trip_leaves_position_unchanged() {
        let mut rig = Rig::new();
        rig.camera.velocity = Vec2::new(123.0, -45.0);

        rig.apply(InputEvent::PointerMoved { x: 100.0, y: 100.0 });
        rig.apply(InputEvent::ButtonDown { button: Button::Primary, ctrl: false });

        assert!(rig.mouse.dragging);
        assert_eq!(rig.camera.velocity, Vec2::ZERO);
        assert_eq!(rig.mouse.previous, rig.mouse.current);

        rig.apply(InputEvent::ButtonUp { button: Button::Primary });

        assert!(!rig.mouse.dragging);
        assert_eq!(rig.camera.position, Vec2::ZERO);
    }

    #[test]
    fn drag_applies_world_space_delta_and_momentum() {
        let mut rig = Rig::new();
        rig.camera.scale = 2.0;

        rig.apply(InputEvent::PointerMoved { x: 100.0, y: 100.0 });
        rig.apply(InputEvent::ButtonDown { button: Button::Primary, ctrl: false });
        rig.apply(InputEvent::PointerMoved { x: 110.0, y: 100.0 });

        // 10 window pixels right at 2x zoom is 5 world units
        assert_eq!(rig.camera.position, Vec2::new(-5.0, 0.0));
        assert_eq!(rig.camera.velocity, Vec2::new(-5.0 / DT, 0.0));
        assert_eq!(rig.mouse.previous, Vec2::new(110.0, 100.0));
    }

    #[test]
    fn directional_keys_add_velocity_kicks() {
        let mut rig = Rig::new();

        rig.apply(InputEvent::KeyDown { code: KeyCode::KeyL, ctrl: false });
        rig.apply(InputEvent::KeyDown { code: KeyCode::ArrowUp, ctrl: false });

        let speed = rig.config.key_move_speed;
        assert_eq!(rig.camera.velocity, Vec2::new(speed, -speed));
    }

    #[test]
    fn scroll_zooms_anchored_on_cursor() {
        let mut rig = Rig::new();

        rig.apply(InputEvent::PointerMoved { x: 320.0, y: 200.0 });
        rig.apply(InputEvent::ButtonDown { button: Button::ScrollUp, ctrl: false });

        assert_eq!(rig.camera.delta_scale, rig.config.scroll_speed);
        assert_eq!(rig.camera.scale_pivot, Vec2::new(320.0, 200.0));
    }

    #[test]
    fn ctrl_scroll_with_flashlight_adjusts_radius_not_zoom() {
        let mut rig = Rig::new();
        rig.flashlight.toggle();

        rig.apply(InputEvent::ButtonDown { button: Button::ScrollUp, ctrl: true });

        assert_eq!(rig.flashlight.delta_radius, RADIUS_IMPULSE);
        assert_eq!(rig.camera.delta_scale, 0.0);

        rig.apply(InputEvent::ButtonDown { button: Button::ScrollDown, ctrl: true });

        assert_eq!(rig.flashlight.delta_radius, 0.0);
    }

    #[test]
    fn scroll_without_ctrl_zooms_even_with_flashlight_on() {
        let mut rig = Rig::new();
        rig.flashlight.toggle();

        rig.apply(InputEvent::ButtonDown { button: Button::ScrollUp, ctrl: false });

        assert_eq!(rig.camera.delta_scale, rig.config.scroll_speed);
        assert_eq!(rig.flashlight.delta_radius, 0.0);
    }

    #[test]
    fn ctrl_scroll_without_flashlight_zooms() {
        let mut rig = Rig::new();

        rig.apply(InputEvent::ButtonDown { button: Button::ScrollDown, ctrl: true });

        assert_eq!(rig.camera.delta_scale, -rig.config.scroll_speed);
        assert_eq!(rig.flashlight.delta_radius, 0.0);
    }

    #[test]
    fn keyboard_zoom_keys_follow_the_same_gate() {
        let mut rig = Rig::new();
        rig.flashlight.toggle();

        rig.apply(InputEvent::KeyDown { code: KeyCode::Minus, ctrl: true });
        assert_eq!(rig.flashlight.delta_radius, -RADIUS_IMPULSE);

        rig.apply(InputEvent::KeyDown { code: KeyCode::Equal, ctrl: false });
        assert_eq!(rig.camera.delta_scale, rig.config.scroll_speed);
    }

    #[test]
    fn reset_key_restores_identity() {
        let mut rig = Rig::new();
        rig.camera.zoom_impulse(3.0, Vec2::new(50.0, 50.0));
        rig.camera.nudge(Vec2::new(400.0, 0.0));
        rig.camera.position = Vec2::new(12.0, -7.0);

        rig.apply(InputEvent::KeyDown { code: KeyCode::Digit0, ctrl: false });

        assert_eq!(rig.camera.scale, 1.0);
        assert_eq!(rig.camera.delta_scale, 0.0);
        assert_eq!(rig.camera.position, Vec2::ZERO);
        assert_eq!(rig.camera.velocity, Vec2::ZERO);
    }

    #[test]
    fn quit_and_reload_surface_as_actions() {
        let mut rig = Rig::new();

        let quit = rig.apply(InputEvent::KeyDown { code: KeyCode::Escape, ctrl: false });
        assert_eq!(quit, InputAction::Quit);

        let quit = rig.apply(InputEvent::KeyDown { code: KeyCode::KeyQ, ctrl: false });
        assert_eq!(quit, InputAction::Quit);

        let reload = rig.apply(InputEvent::KeyDown { code: KeyCode::KeyR, ctrl: false });
        assert_eq!(reload, InputAction::ReloadConfig);

        let quit = rig.apply(InputEvent::QuitRequested);
        assert_eq!(quit, InputAction::Quit);
    }

    #[test]
    fn flashlight_toggle_key_flips_state() {
        let mut rig = Rig::new();

        rig.apply(InputEvent::KeyDown { code: KeyCode::KeyF, ctrl: false });
        assert!(rig.flashlight.is_enabled);

        rig.apply(InputEvent::KeyDown { code: KeyCode::KeyF, ctrl: false });
        assert!(!rig.flashlight.is_enabled);
    }
}
