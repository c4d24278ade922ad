//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the
//! application: the `App` callbacks, the contexts they receive, and the
//! loop termination state machine.

mod app;
mod ctx;
mod loop_state;

pub use app::App;
pub use ctx::{FrameCtx, InitCtx, WindowCtx};
pub use loop_state::{ExitSignals, LoopState, StopReason};
