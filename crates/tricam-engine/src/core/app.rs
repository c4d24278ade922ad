use anyhow::Result;

use super::ctx::{FrameCtx, InitCtx};

/// Application contract implemented by higher layers.
///
/// Errors returned from either callback are fatal: the runtime stops the loop
/// and `Runtime::run` returns the error.
pub trait App {
    /// Called once after the window and GPU context exist, before the first
    /// frame. Create GPU resources here.
    fn on_init(&mut self, ctx: &mut InitCtx<'_, '_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called once per rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<()>;

    /// Called once after the loop has stopped, before GPU objects are dropped.
    fn on_exit(&mut self) {}
}
