//! Keyboard and pointer translation
//!
//! Hosts forward raw events here; the result is accumulated into the
//! `TickInput` for the next frame.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GameState, TickInput, Viewport};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Escape,
    Q,
    M,
    N,
    Left,
    Right,
    Up,
    Down,
    S,
    F,
    A,
    D,
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

/// Fold a key press (or repeat) into `input`
///
/// Ctrl+arrows move the red bucket, Alt+arrows the green one, plain arrows
/// pan the camera.
pub fn apply_key(key: Key, mods: Modifiers, input: &mut TickInput) {
    match key {
        Key::Space => input.fire = true,
        Key::Escape | Key::Q => input.quit = true,
        Key::M => input.fall_speed_delta += FALL_SPEED_STEP,
        Key::N => input.fall_speed_delta -= FALL_SPEED_STEP,
        Key::Left | Key::Right => {
            let dir = if key == Key::Left { -1.0 } else { 1.0 };
            if mods.ctrl {
                input.red_bucket_delta += dir * BUCKET_STEP;
            } else if mods.alt {
                input.green_bucket_delta += dir * BUCKET_STEP;
            } else {
                input.pan_delta += dir * PAN_STEP;
            }
        }
        Key::Up => input.zoom_delta += ZOOM_KEY_STEP,
        Key::Down => input.zoom_delta -= ZOOM_KEY_STEP,
        Key::S => input.turret_y_delta += TURRET_Y_STEP,
        Key::F => input.turret_y_delta -= TURRET_Y_STEP,
        Key::A => input.turret_rotation_delta += TURRET_ROTATION_STEP,
        Key::D => input.turret_rotation_delta -= TURRET_ROTATION_STEP,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// What a right-button drag is holding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    RedBucket,
    GreenBucket,
    Turret,
}

/// Pointer tracking: cursor position in world units and the current drag
#[derive(Debug, Clone)]
pub struct Pointer {
    pub viewport: Viewport,
    pub cursor: Vec2,
    pub drag: Option<DragTarget>,
}

impl Pointer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            cursor: Vec2::ZERO,
            drag: None,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Cursor moved to screen position (sx, sy)
    ///
    /// The turret tracks the cursor; a held drag follows it.
    pub fn moved(&mut self, sx: f32, sy: f32, input: &mut TickInput) {
        self.cursor = self.viewport.screen_to_world(sx, sy);
        input.aim_at = Some(self.cursor);

        match self.drag {
            Some(DragTarget::RedBucket) => input.red_bucket_x = Some(self.cursor.x),
            Some(DragTarget::GreenBucket) => input.green_bucket_x = Some(self.cursor.x),
            Some(DragTarget::Turret) => input.turret_y = Some(self.cursor.y),
            None => {}
        }
    }

    /// Button press or release at the current cursor
    pub fn button(
        &mut self,
        button: MouseButton,
        pressed: bool,
        state: &GameState,
        input: &mut TickInput,
    ) {
        match (button, pressed) {
            (MouseButton::Left, true) => input.fire_at = Some(self.cursor),
            (MouseButton::Right, true) => self.drag = self.pick(state),
            (MouseButton::Right, false) => self.drag = None,
            (MouseButton::Left, false) => {}
        }
    }

    /// Scroll wheel; positive is zoom in
    pub fn scroll(&mut self, dy: f32, input: &mut TickInput) {
        input.zoom_delta += dy * ZOOM_SCROLL_STEP;
    }

    fn pick(&self, state: &GameState) -> Option<DragTarget> {
        if state.red_bucket.hit(self.cursor) {
            Some(DragTarget::RedBucket)
        } else if state.green_bucket.hit(self.cursor) {
            Some(DragTarget::GreenBucket)
        } else if state.turret.hit(self.cursor) {
            Some(DragTarget::Turret)
        } else {
            None
        }
    }
}
