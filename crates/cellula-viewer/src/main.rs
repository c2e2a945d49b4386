mod app;
mod voronoi;

use anyhow::Result;
use winit::dpi::PhysicalSize;

use cellula_engine::device::GpuInit;
use cellula_engine::logging::init_logging;
use cellula_engine::window::{Runtime, RuntimeConfig};

use app::ViewerApp;

/// Fixed drawable size in physical pixels. Not resizable at runtime.
const CANVAS: PhysicalSize<u32> = PhysicalSize::new(1920, 1080);

/// Sites per frame. Must stay within `voronoi::MAX_SITE_NUM`.
const SITE_COUNT: u32 = 1024;

fn main() -> Result<()> {
    init_logging("info");

    log::info!(
        "cellula viewer: {}x{}, {} sites, press 'f' for a fresh diagram",
        CANVAS.width,
        CANVAS.height,
        SITE_COUNT
    );

    let config = RuntimeConfig {
        title: "cellula".to_string(),
        size: CANVAS,
    };

    Runtime::run(
        config,
        GpuInit::default(),
        ViewerApp::new(CANVAS, SITE_COUNT),
    )
}
