//! Frame timing.
//!
//! The engine does not run an animation clock; frames are drawn on demand.
//! What each frame does need is a fresh, strictly-increasing seed value,
//! provided by `SeedClock`.

mod seed_clock;

pub use seed_clock::SeedClock;
