//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single fixed-size Window, and wires
//! them to the GPU layer and the application contract.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
