//! Cellula engine crate.
//!
//! Platform + GPU runtime shared by cellula viewers: winit event loop,
//! wgpu device/surface ownership, keyboard input, seed clock, logging.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod logging;
pub mod render;
