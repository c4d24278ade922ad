//! Input subsystem.
//!
//! Public API does not expose winit types. The runtime translates platform
//! events through `platform::winit` into `InputEvent`s and applies them to an
//! `InputState`, recording per-frame transitions in an `InputFrame`.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
