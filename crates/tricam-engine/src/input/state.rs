use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Current keyboard state for the window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Releases are not delivered to an unfocused window.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(key) {
                        frame.keys_pressed.insert(key);
                    }
                }
                KeyState::Released => {
                    self.keys_down.remove(&key);
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Sticky query: true if `key` is held now or was pressed at any point
    /// since `frame` was last cleared.
    pub fn key_hit(&self, frame: &InputFrame, key: Key) -> bool {
        self.key_down(key) || frame.keys_pressed.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state }
    }

    #[test]
    fn press_and_release_tracked() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, key(Key::Escape, KeyState::Pressed));
        assert!(st.key_down(Key::Escape));
        assert!(fr.keys_pressed.contains(&Key::Escape));

        st.apply_event(&mut fr, key(Key::Escape, KeyState::Released));
        assert!(!st.key_down(Key::Escape));
    }

    #[test]
    fn press_released_before_frame_is_still_a_hit() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, key(Key::Escape, KeyState::Pressed));
        st.apply_event(&mut fr, key(Key::Escape, KeyState::Released));

        assert!(!st.key_down(Key::Escape));
        assert!(st.key_hit(&fr, Key::Escape));

        fr.clear();
        assert!(!st.key_hit(&fr, Key::Escape));
    }

    #[test]
    fn held_key_is_not_pressed_again() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, key(Key::Unknown(44), KeyState::Pressed));
        fr.clear();
        st.apply_event(&mut fr, key(Key::Unknown(44), KeyState::Pressed));

        assert!(fr.keys_pressed.is_empty());
        assert!(st.key_down(Key::Unknown(44)));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, InputEvent::Focused(true));
        st.apply_event(&mut fr, key(Key::Escape, KeyState::Pressed));
        st.apply_event(&mut fr, InputEvent::Focused(false));

        assert!(!st.focused);
        assert!(st.keys_down.is_empty());
    }

    #[test]
    fn other_keys_are_not_an_escape_hit() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        for code in [0, 13, 32, 81, 0xffff] {
            st.apply_event(&mut fr, key(Key::Unknown(code), KeyState::Pressed));
        }
        st.apply_event(&mut fr, InputEvent::Focused(false));
        st.apply_event(&mut fr, InputEvent::Focused(true));

        assert!(!st.key_hit(&fr, Key::Escape));
    }
}
