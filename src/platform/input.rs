//! Key code translation and press-edge debouncing

use serde::{Deserialize, Serialize};

use crate::sim::Action;

/// Device key code to action table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    pub bindings: Vec<(String, Action)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            bindings: vec![
                ("Space".to_string(), Action::Jump),
                ("ArrowUp".to_string(), Action::Jump),
                ("KeyP".to_string(), Action::Pause),
                ("Escape".to_string(), Action::Pause),
            ],
        }
    }
}

impl KeyBindings {
    pub fn action_for(&self, code: &str) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == code)
            .map(|(_, action)| *action)
    }
}

/// Emits an action once per press; holding a key never re-fires it
#[derive(Debug, Default, Clone)]
pub struct ActionDebouncer {
    pub bindings: KeyBindings,
    jump_locked: bool,
    pause_locked: bool,
}

impl ActionDebouncer {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            jump_locked: false,
            pause_locked: false,
        }
    }

    fn lock(&mut self, action: Action) -> &mut bool {
        match action {
            Action::Jump => &mut self.jump_locked,
            Action::Pause => &mut self.pause_locked,
        }
    }

    /// Key pressed; `repeat` is the OS auto-repeat flag
    pub fn key_down(&mut self, code: &str, repeat: bool) -> Option<Action> {
        let action = self.bindings.action_for(code)?;
        if repeat {
            return None;
        }
        let locked = self.lock(action);
        if *locked {
            return None;
        }
        *locked = true;
        Some(action)
    }

    /// Key released; unlocks its action
    pub fn key_up(&mut self, code: &str) {
        if let Some(action) = self.bindings.action_for(code) {
            *self.lock(action) = false;
        }
    }

    /// Mouse or touch press: always a jump, never debounced
    pub fn pointer_down(&mut self) -> Action {
        Action::Jump
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_keys_ignored() {
        let mut input = ActionDebouncer::default();
        assert_eq!(input.key_down("KeyQ", false), None);
    }

    #[test]
    fn test_held_key_fires_once() {
        let mut input = ActionDebouncer::default();
        assert_eq!(input.key_down("Space", false), Some(Action::Jump));
        assert_eq!(input.key_down("Space", true), None);
        assert_eq!(input.key_down("Space", false), None);
        input.key_up("Space");
        assert_eq!(input.key_down("Space", false), Some(Action::Jump));
    }

    #[test]
    fn test_aliases_share_a_lock() {
        let mut input = ActionDebouncer::default();
        assert_eq!(input.key_down("Space", false), Some(Action::Jump));
        // Still holding Space
        assert_eq!(input.key_down("ArrowUp", false), None);
        assert_eq!(input.key_down("Escape", false), Some(Action::Pause));
        input.key_up("Escape");
        assert_eq!(input.key_down("KeyP", false), Some(Action::Pause));
    }

    #[test]
    fn test_pointer_is_jump() {
        let mut input = ActionDebouncer::default();
        assert_eq!(input.pointer_down(), Action::Jump);
        assert_eq!(input.pointer_down(), Action::Jump);
    }
}
