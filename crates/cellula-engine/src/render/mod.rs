//! GPU rendering seam.
//!
//! Renderers live in higher layers and own their GPU resources (pipelines,
//! buffers). The engine hands them a `RenderCtx` (device/queue/format) at
//! construction time and a `RenderTarget` (encoder + color view) per frame.

mod ctx;

pub use ctx::{RenderCtx, RenderTarget};
