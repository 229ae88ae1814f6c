use glam::Vec2;

use crate::api::types::{ReelId, SymbolId};

/// Projection seam between the spin core and whatever renders it.
///
/// The core pushes slot positions and symbol ids through this trait after
/// every mutation; it never reads anything back. Hosts map `SymbolId` to an
/// actual visual inside `set_slot_symbol` and move their display nodes in
/// `set_slot_position`. Slot 0 is the topmost display slot.
pub trait SlotView {
    /// Position a visible slot. `pos.x` is always 0: reels scroll
    /// vertically, and horizontal placement is the host's layout concern.
    fn set_slot_position(&mut self, reel: ReelId, slot: usize, pos: Vec2);

    /// Show a symbol in a visible slot.
    fn set_slot_symbol(&mut self, reel: ReelId, slot: usize, symbol: SymbolId);
}

/// A view that discards everything. For headless runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl SlotView for NullView {
    fn set_slot_position(&mut self, _reel: ReelId, _slot: usize, _pos: Vec2) {}
    fn set_slot_symbol(&mut self, _reel: ReelId, _slot: usize, _symbol: SymbolId) {}
}
