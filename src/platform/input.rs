//! Input mapping
//!
//! Keyboard, mouse and touch all collapse into a single jump request. The
//! browser glue asks here which events count and whether to swallow them.

/// Where a jump request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpSource {
    Key,
    Mouse,
    Touch,
}

/// What an input event means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Jump {
        source: JumpSource,
        /// Suppress the browser default (page scroll on space/arrows/touch)
        prevent_default: bool,
    },
    Ignore,
}

/// Key codes (`KeyboardEvent.code`) that jump
pub const JUMP_KEYS: [&str; 3] = ["Space", "ArrowUp", "KeyW"];

pub fn action_for_key(code: &str) -> InputAction {
    if JUMP_KEYS.contains(&code) {
        InputAction::Jump {
            source: JumpSource::Key,
            prevent_default: true,
        }
    } else {
        InputAction::Ignore
    }
}

pub fn action_for_mouse_down() -> InputAction {
    InputAction::Jump {
        source: JumpSource::Mouse,
        prevent_default: false,
    }
}

pub fn action_for_touch_start() -> InputAction {
    InputAction::Jump {
        source: JumpSource::Touch,
        prevent_default: true,
    }
}
