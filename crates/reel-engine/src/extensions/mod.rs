// extensions/mod.rs
//
// Pure-math helpers with no dependency on reels or sessions.

pub mod easing;

pub use easing::{ease, lerp, Easing};
