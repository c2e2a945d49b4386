use anyhow::Result;
use winit::dpi::PhysicalSize;

use cellula_engine::core::{App, AppControl, FrameCtx};
use cellula_engine::input::Key;
use cellula_engine::render::RenderCtx;
use cellula_engine::time::SeedClock;
use cellula_engine::window::RuntimeCtx;

use crate::voronoi::VoronoiRenderer;

/// The viewer application: one Voronoi renderer, one trigger key.
///
/// The runtime draws the startup frame on its own; after that, every frame
/// is requested here in response to `f`. Every other key is ignored.
pub struct ViewerApp {
    canvas: PhysicalSize<u32>,
    site_count: u32,
    seed_clock: SeedClock,
    renderer: Option<VoronoiRenderer>,
}

impl ViewerApp {
    pub fn new(canvas: PhysicalSize<u32>, site_count: u32) -> Self {
        Self {
            canvas,
            site_count,
            seed_clock: SeedClock::new(),
            renderer: None,
        }
    }
}

impl App for ViewerApp {
    fn on_ready(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        self.renderer = Some(VoronoiRenderer::new(ctx, self.canvas));
        Ok(())
    }

    fn on_key_pressed(&mut self, key: Key, runtime: &mut RuntimeCtx) -> AppControl {
        if key == Key::F {
            log::debug!("redraw requested ({} sites)", self.site_count);
            runtime.request_redraw();
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(renderer) = &self.renderer else {
            // The runtime calls on_ready before any frame; reaching this
            // arm means that contract broke.
            log::error!("frame requested before renderer setup");
            return AppControl::Exit;
        };

        let site_count = self.site_count;
        let seed = self.seed_clock.tick();

        ctx.render(|rctx, target| {
            renderer.draw(rctx, target, site_count, seed);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> ViewerApp {
        ViewerApp::new(PhysicalSize::new(1920, 1080), 1024)
    }

    // ── trigger key ───────────────────────────────────────────────────────

    #[test]
    fn f_press_queues_exactly_one_redraw() {
        let mut app = app();
        let mut runtime = RuntimeCtx::default();

        let control = app.on_key_pressed(Key::F, &mut runtime);

        assert_eq!(control, AppControl::Continue);
        assert!(runtime.has_redraw_request());
        assert!(!runtime.has_exit_request());
    }

    #[test]
    fn other_keys_queue_nothing() {
        let mut app = app();

        for key in [Key::G, Key::A, Key::Space, Key::Escape, Key::Digit5] {
            let mut runtime = RuntimeCtx::default();
            let control = app.on_key_pressed(key, &mut runtime);

            assert_eq!(control, AppControl::Continue);
            assert!(runtime.is_empty(), "key {key:?} queued a command");
        }
    }

    #[test]
    fn repeated_f_presses_each_queue_a_redraw() {
        let mut app = app();

        for _ in 0..3 {
            let mut runtime = RuntimeCtx::default();
            app.on_key_pressed(Key::F, &mut runtime);
            assert!(runtime.has_redraw_request());
        }
    }
}
