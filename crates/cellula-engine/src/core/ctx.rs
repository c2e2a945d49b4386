use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::render::{RenderCtx, RenderTarget};
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Acquires the surface frame, calls `draw` with a ready [`RenderCtx`]
    /// and [`RenderTarget`], then submits and presents.
    ///
    /// The closure records all passes for the frame into the target's
    /// encoder; everything it records is submitted as one command buffer,
    /// so pass ordering within the frame is the recording order.
    ///
    /// Surface errors are mapped through the device layer: transient ones
    /// skip the frame, fatal ones exit.
    pub fn render<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::warn!("surface frame unavailable: {err}");
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        // RenderTarget borrows frame.encoder; dropped before submit() takes frame.
        {
            let rctx = RenderCtx::new(
                self.gpu.device(),
                self.gpu.queue(),
                self.gpu.surface_format(),
            );
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
