//! Time subsystem.
//!
//! One `FrameClock` per render loop; call `tick()` once per presented frame to
//! obtain a `FrameTime`. `FrameTime::elapsed` is the monotonic time since the
//! clock was created and drives the camera path.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
