use anyhow::Result;

use crate::input::Key;
use crate::render::RenderCtx;
use crate::window::RuntimeCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the viewer layer.
///
/// The runtime guarantees the call order: `on_ready` exactly once, after
/// the GPU context exists and before the first `on_frame`; frames only in
/// response to a redraw request (one is issued automatically after
/// `on_ready`, further ones come from the app itself).
pub trait App {
    /// Called once when the GPU context is ready.
    ///
    /// Build all GPU resources here; a failure aborts before any frame is
    /// drawn.
    fn on_ready(&mut self, ctx: &RenderCtx<'_>) -> Result<()>;

    /// Called for each fresh key press (auto-repeats filtered out).
    ///
    /// Request follow-up work (redraw, exit) via `runtime`.
    fn on_key_pressed(&mut self, key: Key, runtime: &mut RuntimeCtx) -> AppControl {
        let _ = (key, runtime);
        AppControl::Continue
    }

    /// Called once per requested frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
