//! Pointer and wheel events as the editor receives them.

use crate::camera::Camera;
use crate::config::EditorConfig;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Pointer event with both screen and world positions.
///
/// The host converts screen to world with the current camera before handing
/// the event over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        screen: Point,
        world: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Move {
        screen: Point,
        world: Point,
    },
    Up {
        screen: Point,
        world: Point,
    },
    /// Pointer left the canvas. Ends a gesture like `Up`.
    Leave,
}

/// Wheel or trackpad scroll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    /// Cursor position relative to the canvas.
    pub screen: Point,
    pub delta: Vec2,
    pub modifiers: Modifiers,
}

/// Camera after a wheel event.
///
/// With ctrl held the wheel zooms around the cursor, in on negative `delta.y`.
/// Otherwise it pans; shift turns vertical scrolling into horizontal panning.
pub fn camera_after_wheel(camera: &Camera, event: &WheelEvent, config: &EditorConfig) -> Camera {
    if event.modifiers.ctrl {
        let factor = if event.delta.y < 0.0 {
            config.wheel_zoom_in
        } else {
            config.wheel_zoom_out
        };
        return camera.zoomed_at(event.screen, factor, &config.zoom_limits());
    }

    let (dx, dy) = if event.modifiers.shift {
        (event.delta.y, 0.0)
    } else {
        (event.delta.x, event.delta.y)
    };
    Camera {
        x: camera.x - dx * config.wheel_pan_speed / camera.zoom,
        y: camera.y - dy * config.wheel_pan_speed / camera.zoom,
        zoom: camera.zoom,
    }
}
