//! Per-frame input snapshot
//!
//! The shell captures raw key names and pointer state; the simulation only
//! ever reads this snapshot.

use std::collections::HashSet;

use glam::Vec2;

/// Logical keys the simulation cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Pause,
    Restart,
    Choice1,
    Choice2,
    Choice3,
}

impl Key {
    /// Map a browser-style key name (case-insensitive) to a logical key
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Key::Up),
            "s" | "arrowdown" => Some(Key::Down),
            "a" | "arrowleft" => Some(Key::Left),
            "d" | "arrowright" => Some(Key::Right),
            "escape" | "esc" => Some(Key::Pause),
            "r" => Some(Key::Restart),
            "1" => Some(Key::Choice1),
            "2" => Some(Key::Choice2),
            "3" => Some(Key::Choice3),
            _ => None,
        }
    }
}

/// Keys held, pointer position (arena-local) and trigger state for one frame
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub keys: HashSet<Key>,
    pub pointer: Vec2,
    pub pointer_down: bool,
}

impl InputSnapshot {
    /// Build a snapshot from raw key names; unknown names are ignored
    pub fn from_key_names<'a>(
        names: impl IntoIterator<Item = &'a str>,
        pointer: Vec2,
        pointer_down: bool,
    ) -> Self {
        Self {
            keys: names.into_iter().filter_map(Key::from_name).collect(),
            pointer,
            pointer_down,
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Movement direction from the four directional keys, normalized so
    /// diagonals are no faster than a single axis
    pub fn move_dir(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_down(Key::Up) {
            dir.y -= 1.0;
        }
        if self.is_down(Key::Down) {
            dir.y += 1.0;
        }
        if self.is_down(Key::Left) {
            dir.x -= 1.0;
        }
        if self.is_down(Key::Right) {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }

    /// Index of the upgrade choice key held, checking 1, 2, 3 in order
    pub fn upgrade_choice(&self) -> Option<usize> {
        [Key::Choice1, Key::Choice2, Key::Choice3]
            .iter()
            .position(|k| self.is_down(*k))
    }
}

/// Fires once on a key's down-transition, never while held
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTrigger {
    was_down: bool,
}

impl EdgeTrigger {
    pub fn update(&mut self, down: bool) -> bool {
        let pressed = down && !self.was_down;
        self.was_down = down;
        pressed
    }
}
