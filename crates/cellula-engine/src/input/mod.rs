//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code is responsible for translating platform events into
//! `InputEvent`s. Only the keyboard is modeled; the viewer has no pointer
//! interactions, and since frames are drawn on demand there is no per-frame
//! polling — fresh presses are reported at event time.

mod state;
mod types;

pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
