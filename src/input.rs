//! Per-tick input snapshots.
//!
//! The platform layer records raw key and button levels while pumping OS
//! events; at the start of each tick it derives a fresh [`Input`] snapshot
//! from those levels and the previous tick's snapshot. Two snapshots
//! alternate roles every frame, which makes edge detection exact: a
//! `pressed` flag is true on the single tick where the level went from up
//! to down.
//!
//! Every key and button carries both the level (`ended_down`) and the edge
//! (`pressed`); call sites choose which to read.

/// State of one key or mouse button for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Up-to-down transition happened this tick (valid for exactly one tick).
    pub pressed: bool,
    /// The key/button is currently held.
    pub ended_down: bool,
}

impl ButtonState {
    /// Derive this tick's state from the previous tick's state and the
    /// current raw level.
    pub fn transition(old: ButtonState, is_down: bool) -> ButtonState {
        ButtonState {
            pressed: !old.ended_down && is_down,
            ended_down: is_down,
        }
    }
}

/// Keys the application tracks. Everything else is ignored at the platform
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    R,
    G,
    B,
    Escape,
}

impl Key {
    pub const ALL: [Key; KEY_COUNT] = [Key::Space, Key::R, Key::G, Key::B, Key::Escape];

    fn index(self) -> usize {
        match self {
            Key::Space => 0,
            Key::R => 1,
            Key::G => 2,
            Key::B => 3,
            Key::Escape => 4,
        }
    }
}

pub const KEY_COUNT: usize = 5;

/// Keyboard half of a snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyboardInput {
    keys: [ButtonState; KEY_COUNT],
}

impl KeyboardInput {
    pub fn key(&self, key: Key) -> ButtonState {
        self.keys[key.index()]
    }

    pub fn set_key(&mut self, key: Key, state: ButtonState) {
        self.keys[key.index()] = state;
    }
}

/// Mouse half of a snapshot. Position is normalized to `[0, 1)` over the
/// buffer's logical extent; the platform layer guarantees the upper bound
/// is exclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseInput {
    pub x: f64,
    pub y: f64,
    pub left: ButtonState,
    pub right: ButtonState,
    pub middle: ButtonState,
}

/// One tick's worth of input. The core only reads this.
#[derive(Debug, Clone, Copy, Default)]
pub struct Input {
    pub keyboard: KeyboardInput,
    pub mouse: MouseInput,
}

/// Raw levels accumulated by the platform layer between ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputLevels {
    pub keys_down: [bool; KEY_COUNT],
    pub left_down: bool,
    pub right_down: bool,
    pub middle_down: bool,
    pub mouse_x: f64,
    pub mouse_y: f64,
}

impl InputLevels {
    pub fn set_key_down(&mut self, key: Key, is_down: bool) {
        self.keys_down[key.index()] = is_down;
    }
}

/// Build the new snapshot from the previous one plus the current levels.
pub fn next_input(old: &Input, levels: &InputLevels) -> Input {
    let mut keyboard = KeyboardInput::default();
    for key in Key::ALL {
        keyboard.set_key(
            key,
            ButtonState::transition(old.keyboard.key(key), levels.keys_down[key.index()]),
        );
    }

    Input {
        keyboard,
        mouse: MouseInput {
            x: levels.mouse_x,
            y: levels.mouse_y,
            left: ButtonState::transition(old.mouse.left, levels.left_down),
            right: ButtonState::transition(old.mouse.right, levels.right_down),
            middle: ButtonState::transition(old.mouse.middle, levels.middle_down),
        },
    }
}
