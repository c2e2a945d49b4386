//! Core engine-facing contracts.
//!
//! Defines the stable interface between the runtime (platform loop) and the
//! application layer: a setup hook, a key-press hook, and a per-frame
//! context. Runtime internals never leak into application code.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
