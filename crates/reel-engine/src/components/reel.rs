use crate::api::config::SlotConfig;
use crate::api::types::{ReelId, ReelStopped, SlotError, SymbolId};
use crate::api::view::SlotView;
use crate::components::bounce::BounceAnimator;
use crate::core::strip::ReelStrip;
use crate::extensions::Easing;

/// One state of a reel's spin cycle. A spin always walks
/// Idle → Accelerating → Steady → Decelerating → Bouncing → Idle,
/// no phase skipped, none revisited within one spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinPhase {
    Idle,
    Accelerating,
    Steady,
    Decelerating,
    Bouncing,
}

/// The per-reel spin state machine.
///
/// Owns the reel's strip cursor, the visible symbol window, the continuous
/// scroll offset and the phase timers. Created once per reel at session setup
/// and reused across spins: `visible` and the strip cursor carry over from
/// spin to spin; only phase, speeds, timers and the offset reset on `spin()`.
#[derive(Debug, Clone)]
pub struct ReelRuntime {
    reel: ReelId,
    strip: ReelStrip,
    config: SlotConfig,
    /// What is currently shown, index 0 = topmost. Fixed length.
    visible: Vec<SymbolId>,
    phase: SpinPhase,
    phase_elapsed: f32,
    current_speed: f32,
    target_speed: f32,
    /// Fractional scroll progress in cell units. Held in [0, 1) during
    /// normal scrolling; the bounce runs it outside that range before the
    /// final snap to exactly 0.
    scroll_offset: f32,
    bounce: Option<BounceAnimator>,
}

impl ReelRuntime {
    /// Build a runtime over a strip. The visible window is seeded with the
    /// first `visible_rows` strip entries, which leaves the fill cursor at
    /// `visible_rows mod strip_len`.
    pub fn new(mut strip: ReelStrip, config: &SlotConfig) -> Result<Self, SlotError> {
        if strip.len() < config.visible_rows {
            return Err(SlotError::StripTooShort {
                reel: strip.reel().0,
                len: strip.len(),
                window: config.visible_rows,
            });
        }
        let visible: Vec<SymbolId> = (0..config.visible_rows).map(|_| strip.next_fill()).collect();
        Ok(Self {
            reel: strip.reel(),
            strip,
            config: config.clone(),
            visible,
            phase: SpinPhase::Idle,
            phase_elapsed: 0.0,
            current_speed: 0.0,
            target_speed: 0.0,
            scroll_offset: 0.0,
            bounce: None,
        })
    }

    /// Start a spin. At most one spin is in flight per reel: while not Idle
    /// this is a no-op, by design rather than an error.
    pub fn spin(&mut self) {
        if self.phase != SpinPhase::Idle {
            log::warn!("reel {}: spin requested while {:?}, ignored", self.reel.0, self.phase);
            return;
        }
        self.phase_elapsed = 0.0;
        self.current_speed = 0.0;
        self.target_speed = self.config.spin_speed;
        self.scroll_offset = 0.0;
        self.enter(SpinPhase::Accelerating);
    }

    /// Advance the state machine by one simulation step. Returns the stop
    /// event on the tick the bounce settles, `None` otherwise.
    pub fn tick(&mut self, dt: f32, view: &mut dyn SlotView) -> Option<ReelStopped> {
        match self.phase {
            SpinPhase::Idle => None,
            SpinPhase::Bouncing => self.tick_bounce(dt, view),
            _ => {
                self.tick_spin(dt, view);
                None
            }
        }
    }

    fn tick_spin(&mut self, dt: f32, view: &mut dyn SlotView) {
        self.phase_elapsed += dt;
        match self.phase {
            SpinPhase::Accelerating => {
                let t = (self.phase_elapsed / self.config.accel_duration).min(1.0);
                self.current_speed = self.target_speed * Easing::QuadOut.apply(t);
                if t >= 1.0 {
                    self.enter(SpinPhase::Steady);
                }
            }
            SpinPhase::Steady => {
                self.current_speed = self.target_speed;
                if self.phase_elapsed >= self.config.steady_duration() {
                    self.enter(SpinPhase::Decelerating);
                }
            }
            SpinPhase::Decelerating => {
                let t = (self.phase_elapsed / self.config.decel_duration).min(1.0);
                self.current_speed = (self.target_speed * (1.0 - Easing::QuadOut.apply(t))).max(0.0);
                if t >= 1.0 {
                    // Natural stop: the window is final, the residual offset
                    // is handed to the settle bounce.
                    self.current_speed = 0.0;
                    self.bounce = Some(BounceAnimator::new(
                        self.scroll_offset,
                        self.config.bounce_overshoot,
                        self.config.bounce_duration,
                    ));
                    self.enter(SpinPhase::Bouncing);
                    return;
                }
            }
            SpinPhase::Idle | SpinPhase::Bouncing => unreachable!("handled by tick"),
        }

        if self.current_speed > 0.0 {
            let cells_changed = self.advance(self.current_speed * dt / self.config.cell_height);
            if cells_changed {
                self.project(view);
            } else {
                self.project_positions(view);
            }
        }
    }

    fn tick_bounce(&mut self, dt: f32, view: &mut dyn SlotView) -> Option<ReelStopped> {
        let offset = self.bounce.as_mut().and_then(|b| b.tick(dt));
        match offset {
            Some(offset) => {
                self.scroll_offset = offset;
                self.project_positions(view);
                None
            }
            None => {
                self.bounce = None;
                self.scroll_offset = 0.0;
                self.enter(SpinPhase::Idle);
                self.project_positions(view);
                Some(ReelStopped {
                    reel: self.reel,
                    symbols: self.visible.clone(),
                })
            }
        }
    }

    /// Shift the scroll offset by `delta_cells` and consume whole cells.
    /// Forward consumption prepends the strip's next fill at the top and
    /// drops the bottom slot; the reverse branch is the mirror image using
    /// `previous_fill`. Returns whether the window contents changed.
    fn advance(&mut self, delta_cells: f32) -> bool {
        self.scroll_offset += delta_cells;
        let mut changed = false;
        while self.scroll_offset >= 1.0 {
            self.scroll_offset -= 1.0;
            self.visible.pop();
            self.visible.insert(0, self.strip.next_fill());
            changed = true;
        }
        while self.scroll_offset < 0.0 {
            self.scroll_offset += 1.0;
            self.visible.remove(0);
            let fill = self.strip.previous_fill();
            self.visible.push(fill);
            changed = true;
        }
        changed
    }

    /// Push positions and symbols for the whole window. Hosts call this once
    /// after construction to render the seeded window; the runtime calls it
    /// whenever a tick changed the window contents.
    pub fn project(&self, view: &mut dyn SlotView) {
        self.project_positions(view);
        for (slot, &symbol) in self.visible.iter().enumerate() {
            view.set_slot_symbol(self.reel, slot, symbol);
        }
    }

    /// Positions only, a pure projection of the current scroll offset. The
    /// center slot sits at `offset_y` when the offset is zero.
    fn project_positions(&self, view: &mut dyn SlotView) {
        let center = (self.visible.len() / 2) as f32;
        for slot in 0..self.visible.len() {
            let y = (center - slot as f32 - self.scroll_offset) * self.config.cell_spacing
                + self.config.offset_y;
            view.set_slot_position(self.reel, slot, glam::Vec2::new(0.0, y));
        }
    }

    fn enter(&mut self, phase: SpinPhase) {
        log::debug!("reel {}: {:?} -> {:?}", self.reel.0, self.phase, phase);
        self.phase = phase;
        self.phase_elapsed = 0.0;
    }

    /// Teardown: freeze the reel where it is so further ticks are no-ops.
    /// No stop event fires. The value-type analog of unsubscribing the
    /// per-frame callback at owner disposal.
    pub fn halt(&mut self) {
        self.phase = SpinPhase::Idle;
        self.phase_elapsed = 0.0;
        self.current_speed = 0.0;
        self.target_speed = 0.0;
        self.bounce = None;
    }

    pub fn reel(&self) -> ReelId {
        self.reel
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.phase != SpinPhase::Idle
    }

    pub fn visible(&self) -> &[SymbolId] {
        &self.visible
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// The strip position the next forward fill will come from.
    pub fn cursor(&self) -> usize {
        self.strip.cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::view::NullView;
    use glam::Vec2;

    fn symbols(ids: &[u32]) -> Vec<SymbolId> {
        ids.iter().map(|&s| SymbolId(s)).collect()
    }

    fn runtime_with(ids: &[u32], config: &SlotConfig) -> ReelRuntime {
        let strip = ReelStrip::new(ReelId(0), symbols(ids)).unwrap();
        ReelRuntime::new(strip, config).unwrap()
    }

    fn eight_symbol_runtime() -> ReelRuntime {
        runtime_with(&[0, 1, 2, 3, 4, 5, 6, 7], &SlotConfig::default())
    }

    /// Records the last pushed position and symbol per slot.
    #[derive(Default)]
    struct RecordingView {
        positions: Vec<(usize, Vec2)>,
        symbols: Vec<(usize, SymbolId)>,
    }

    impl SlotView for RecordingView {
        fn set_slot_position(&mut self, _reel: ReelId, slot: usize, pos: Vec2) {
            self.positions.push((slot, pos));
        }
        fn set_slot_symbol(&mut self, _reel: ReelId, slot: usize, symbol: SymbolId) {
            self.symbols.push((slot, symbol));
        }
    }

    #[test]
    fn window_seeds_from_strip_head() {
        let reel = eight_symbol_runtime();
        assert_eq!(reel.visible(), symbols(&[0, 1, 2]).as_slice());
        assert_eq!(reel.cursor(), 3);
    }

    #[test]
    fn window_seed_wraps_when_strip_equals_window() {
        let config = SlotConfig::default();
        let reel = runtime_with(&[4, 5, 6], &config);
        assert_eq!(reel.visible(), symbols(&[4, 5, 6]).as_slice());
        assert_eq!(reel.cursor(), 0);
    }

    #[test]
    fn short_strip_is_rejected() {
        let strip = ReelStrip::new(ReelId(3), symbols(&[1, 2])).unwrap();
        let err = ReelRuntime::new(strip, &SlotConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SlotError::StripTooShort { reel: 3, len: 2, window: 3 }
        ));
    }

    #[test]
    fn whole_cell_advance_pulls_from_cursor() {
        // Strip [0..8), window 3: one whole cell turns [0,1,2] into [3,0,1].
        let mut reel = eight_symbol_runtime();
        let changed = reel.advance(1.0);
        assert!(changed);
        assert_eq!(reel.visible(), symbols(&[3, 0, 1]).as_slice());
        assert_eq!(reel.cursor(), 4);
        assert!(reel.scroll_offset().abs() < 1e-6);
    }

    #[test]
    fn fractional_advance_keeps_window() {
        let mut reel = eight_symbol_runtime();
        let changed = reel.advance(0.75);
        assert!(!changed);
        assert_eq!(reel.visible(), symbols(&[0, 1, 2]).as_slice());
        assert!((reel.scroll_offset() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn cursor_tracks_fill_history() {
        // After k whole-cell advances the cursor sits at (window + k) mod len,
        // and the window matches a step-by-step reference model.
        let mut reel = eight_symbol_runtime();
        let mut model: Vec<SymbolId> = symbols(&[0, 1, 2]);
        for k in 1..=20usize {
            reel.advance(1.0);
            model.pop();
            model.insert(0, SymbolId(((3 + k - 1) % 8) as u32));
            assert_eq!(reel.visible(), model.as_slice(), "window after {k} advances");
            assert_eq!(reel.cursor(), (3 + k) % 8, "cursor after {k} advances");
        }
    }

    #[test]
    fn reverse_advance_restores_cursor() {
        let mut reel = eight_symbol_runtime();
        reel.advance(1.0);
        assert_eq!(reel.cursor(), 4);
        reel.advance(-1.0);
        // The cursor walks back; the top fill is dropped and the inverse
        // fill enters at the bottom.
        assert_eq!(reel.cursor(), 3);
        assert_eq!(reel.visible(), symbols(&[0, 1, 3]).as_slice());
    }

    #[test]
    fn phases_progress_in_order_without_skips() {
        let mut reel = eight_symbol_runtime();
        let mut view = NullView;
        reel.spin();
        let mut seen = vec![reel.phase()];
        let mut stop = None;
        for _ in 0..2000 {
            if let Some(event) = reel.tick(1.0 / 60.0, &mut view) {
                stop = Some(event);
            }
            if *seen.last().unwrap() != reel.phase() {
                seen.push(reel.phase());
            }
            if reel.phase() == SpinPhase::Idle {
                break;
            }
        }
        assert_eq!(
            seen,
            vec![
                SpinPhase::Accelerating,
                SpinPhase::Steady,
                SpinPhase::Decelerating,
                SpinPhase::Bouncing,
                SpinPhase::Idle,
            ]
        );
        let stop = stop.expect("spin must emit a stop event");
        assert_eq!(stop.reel, ReelId(0));
        assert_eq!(stop.symbols.len(), 3);
    }

    #[test]
    fn offset_is_exactly_zero_at_stop() {
        let mut reel = eight_symbol_runtime();
        let mut view = NullView;
        reel.spin();
        for _ in 0..2000 {
            if reel.tick(1.0 / 60.0, &mut view).is_some() {
                assert_eq!(reel.scroll_offset(), 0.0);
                assert_eq!(reel.phase(), SpinPhase::Idle);
                return;
            }
        }
        panic!("spin never completed");
    }

    #[test]
    fn offset_stays_in_unit_range_while_scrolling() {
        let mut reel = eight_symbol_runtime();
        let mut view = NullView;
        reel.spin();
        for _ in 0..2000 {
            reel.tick(1.0 / 60.0, &mut view);
            match reel.phase() {
                SpinPhase::Accelerating | SpinPhase::Steady | SpinPhase::Decelerating => {
                    let offset = reel.scroll_offset();
                    assert!((0.0..1.0).contains(&offset), "offset {offset} out of range");
                }
                SpinPhase::Bouncing => {}
                SpinPhase::Idle => return,
            }
        }
        panic!("spin never completed");
    }

    #[test]
    fn double_spin_is_single_cycle() {
        let mut reel = eight_symbol_runtime();
        let mut view = NullView;
        reel.spin();
        reel.spin();
        let mut stops = 0;
        for _ in 0..2000 {
            if reel.tick(1.0 / 60.0, &mut view).is_some() {
                stops += 1;
            }
            if reel.phase() == SpinPhase::Idle {
                break;
            }
        }
        assert_eq!(stops, 1);
        // A fresh spin is accepted again once idle.
        reel.spin();
        assert_eq!(reel.phase(), SpinPhase::Accelerating);
    }

    #[test]
    fn window_is_frozen_during_bounce() {
        let mut reel = eight_symbol_runtime();
        let mut view = NullView;
        reel.spin();
        let mut at_natural_stop = None;
        for _ in 0..2000 {
            let stop = reel.tick(1.0 / 60.0, &mut view);
            if reel.phase() == SpinPhase::Bouncing && at_natural_stop.is_none() {
                at_natural_stop = Some(reel.visible().to_vec());
            }
            if let Some(event) = stop {
                let frozen = at_natural_stop.expect("bounce phase must precede stop");
                assert_eq!(event.symbols, frozen);
                assert_eq!(reel.visible(), frozen.as_slice());
                return;
            }
        }
        panic!("spin never completed");
    }

    #[test]
    fn projection_centers_window() {
        // Window of 3, spacing 100: slots sit at +100, 0, -100 at rest.
        let reel = eight_symbol_runtime();
        let mut view = RecordingView::default();
        reel.project(&mut view);
        assert_eq!(view.positions.len(), 3);
        assert_eq!(view.positions[0], (0, Vec2::new(0.0, 100.0)));
        assert_eq!(view.positions[1], (1, Vec2::new(0.0, 0.0)));
        assert_eq!(view.positions[2], (2, Vec2::new(0.0, -100.0)));
        assert_eq!(view.symbols.len(), 3);
        assert_eq!(view.symbols[0], (0, SymbolId(0)));
    }

    #[test]
    fn projection_shifts_with_scroll_offset() {
        let mut reel = eight_symbol_runtime();
        reel.advance(0.5);
        let mut view = RecordingView::default();
        reel.project(&mut view);
        assert_eq!(view.positions[0], (0, Vec2::new(0.0, 50.0)));
        assert_eq!(view.positions[2], (2, Vec2::new(0.0, -150.0)));
    }

    #[test]
    fn halt_freezes_reel_without_stop_event() {
        let mut reel = eight_symbol_runtime();
        let mut view = NullView;
        reel.spin();
        for _ in 0..10 {
            reel.tick(1.0 / 60.0, &mut view);
        }
        reel.halt();
        assert_eq!(reel.phase(), SpinPhase::Idle);
        let offset = reel.scroll_offset();
        for _ in 0..10 {
            assert!(reel.tick(1.0 / 60.0, &mut view).is_none());
        }
        assert_eq!(reel.scroll_offset(), offset);
    }

    #[test]
    fn window_carries_over_between_spins() {
        let mut reel = eight_symbol_runtime();
        let mut view = NullView;
        reel.spin();
        for _ in 0..2000 {
            if reel.tick(1.0 / 60.0, &mut view).is_some() {
                break;
            }
        }
        let window = reel.visible().to_vec();
        let cursor = reel.cursor();
        reel.spin();
        assert_eq!(reel.visible(), window.as_slice());
        assert_eq!(reel.cursor(), cursor);
    }
}
