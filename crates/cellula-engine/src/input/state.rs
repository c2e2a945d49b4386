use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Current input state for the window.
///
/// Holds "is down" information; the runtime feeds it every translated
/// event and reacts when an event turns out to be a fresh press.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an input event and returns the key if the event is a fresh
    /// press: a transition to "down" that is neither an OS auto-repeat nor
    /// a duplicate of an already-held key.
    pub fn apply_event(&mut self, ev: &InputEvent) -> Option<Key> {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear the "down" set. Avoids stuck keys
                    // when focus changes mid-press.
                    self.keys_down.clear();
                }
                None
            }

            InputEvent::Key { key, state, repeat } => match state {
                KeyState::Pressed => {
                    let inserted = self.keys_down.insert(*key);
                    (inserted && !*repeat).then_some(*key)
                }
                KeyState::Released => {
                    self.keys_down.remove(key);
                    None
                }
            },
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key, repeat: bool) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            repeat,
        }
    }

    fn release(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Released,
            repeat: false,
        }
    }

    // ── press / release ───────────────────────────────────────────────────

    #[test]
    fn first_press_is_fresh() {
        let mut state = InputState::default();
        assert_eq!(state.apply_event(&press(Key::F, false)), Some(Key::F));
        assert!(state.keys_down.contains(&Key::F));
    }

    #[test]
    fn release_clears_down_without_reporting() {
        let mut state = InputState::default();
        state.apply_event(&press(Key::F, false));
        assert_eq!(state.apply_event(&release(Key::F)), None);
        assert!(!state.keys_down.contains(&Key::F));
    }

    #[test]
    fn press_release_press_is_two_fresh_presses() {
        let mut state = InputState::default();
        assert_eq!(state.apply_event(&press(Key::F, false)), Some(Key::F));
        state.apply_event(&release(Key::F));
        assert_eq!(state.apply_event(&press(Key::F, false)), Some(Key::F));
    }

    // ── repeats ───────────────────────────────────────────────────────────

    #[test]
    fn auto_repeat_is_not_fresh() {
        let mut state = InputState::default();
        state.apply_event(&press(Key::F, false));
        assert_eq!(state.apply_event(&press(Key::F, true)), None);
        assert!(state.keys_down.contains(&Key::F));
    }

    #[test]
    fn duplicate_press_without_release_is_not_fresh() {
        let mut state = InputState::default();
        state.apply_event(&press(Key::F, false));
        assert_eq!(state.apply_event(&press(Key::F, false)), None);
    }

    // ── focus ─────────────────────────────────────────────────────────────

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        state.apply_event(&press(Key::F, false));
        assert_eq!(state.apply_event(&InputEvent::Focused(false)), None);
        assert!(!state.focused);
        assert!(state.keys_down.is_empty());
    }
}
