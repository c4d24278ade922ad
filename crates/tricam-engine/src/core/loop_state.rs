use std::fmt;

/// Render loop state.
///
/// `Running → Stopped` happens only through `advance` with an exit signal set;
/// `Stopped` is absorbing.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LoopState {
    #[default]
    Running,
    Stopped,
}

/// Observations that can end the loop.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ExitSignals {
    /// The configured exit key was pressed since the last check.
    pub exit_key: bool,
    /// The window system asked the window to close.
    pub close_requested: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StopReason {
    ExitKey,
    CloseRequested,
}

impl ExitSignals {
    pub fn reason(self) -> Option<StopReason> {
        if self.close_requested {
            Some(StopReason::CloseRequested)
        } else if self.exit_key {
            Some(StopReason::ExitKey)
        } else {
            None
        }
    }
}

impl LoopState {
    pub fn advance(self, signals: ExitSignals) -> Self {
        match (self, signals.reason()) {
            (LoopState::Running, None) => LoopState::Running,
            _ => LoopState::Stopped,
        }
    }

    pub fn is_running(self) -> bool {
        self == LoopState::Running
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StopReason::ExitKey => "exit key pressed",
            StopReason::CloseRequested => "window close requested",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: ExitSignals = ExitSignals { exit_key: false, close_requested: false };
    const KEY: ExitSignals = ExitSignals { exit_key: true, close_requested: false };
    const CLOSE: ExitSignals = ExitSignals { exit_key: false, close_requested: true };
    const BOTH: ExitSignals = ExitSignals { exit_key: true, close_requested: true };

    #[test]
    fn starts_running() {
        assert!(LoopState::default().is_running());
    }

    #[test]
    fn stays_running_without_signals() {
        let mut s = LoopState::Running;
        for _ in 0..1000 {
            s = s.advance(NONE);
        }
        assert_eq!(s, LoopState::Running);
    }

    #[test]
    fn each_signal_stops_the_loop() {
        assert_eq!(LoopState::Running.advance(KEY), LoopState::Stopped);
        assert_eq!(LoopState::Running.advance(CLOSE), LoopState::Stopped);
        assert_eq!(LoopState::Running.advance(BOTH), LoopState::Stopped);
    }

    #[test]
    fn stopped_is_absorbing() {
        for s in [NONE, KEY, CLOSE, BOTH] {
            assert_eq!(LoopState::Stopped.advance(s), LoopState::Stopped);
        }
    }

    #[test]
    fn other_input_keeps_running() {
        use crate::input::{InputEvent, InputFrame, InputState, Key, KeyState};

        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        let mut s = LoopState::Running;

        let events = [
            InputEvent::Focused(true),
            InputEvent::Key { key: Key::Unknown(32), state: KeyState::Pressed },
            InputEvent::Key { key: Key::Unknown(32), state: KeyState::Released },
            InputEvent::Key { key: Key::Unknown(0), state: KeyState::Pressed },
            InputEvent::Focused(false),
            InputEvent::Focused(true),
        ];
        for ev in events {
            input.apply_event(&mut frame, ev);
            s = s.advance(ExitSignals {
                exit_key: input.key_hit(&frame, Key::Escape),
                close_requested: false,
            });
            frame.clear();
        }
        assert_eq!(s, LoopState::Running);

        input.apply_event(&mut frame, InputEvent::Key { key: Key::Escape, state: KeyState::Pressed });
        input.apply_event(&mut frame, InputEvent::Key { key: Key::Escape, state: KeyState::Released });
        s = s.advance(ExitSignals {
            exit_key: input.key_hit(&frame, Key::Escape),
            close_requested: false,
        });
        assert_eq!(s, LoopState::Stopped);
    }

    #[test]
    fn reason_prefers_close() {
        assert_eq!(NONE.reason(), None);
        assert_eq!(KEY.reason(), Some(StopReason::ExitKey));
        assert_eq!(CLOSE.reason(), Some(StopReason::CloseRequested));
        assert_eq!(BOTH.reason(), Some(StopReason::CloseRequested));
    }
}
