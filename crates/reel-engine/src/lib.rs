pub mod api;
pub mod components;
pub mod core;
pub mod extensions;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{strip_table_from_json, SlotConfig};
pub use api::types::{ReelId, ReelStopped, SessionEvent, SlotError, SymbolId};
pub use api::view::{NullView, SlotView};
pub use components::bounce::BounceAnimator;
pub use components::reel::{ReelRuntime, SpinPhase};
pub use core::strip::ReelStrip;
pub use core::time::StepClock;
pub use systems::scheduler::StartScheduler;
pub use systems::session::SpinSession;

// Extensions: pure math, no engine dependencies
pub use extensions::{ease, lerp, Easing};
