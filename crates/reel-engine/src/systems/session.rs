use crate::api::config::SlotConfig;
use crate::api::types::{ReelId, ReelStopped, SessionEvent, SlotError, SymbolId};
use crate::api::view::SlotView;
use crate::components::reel::ReelRuntime;
use crate::core::strip::ReelStrip;
use crate::systems::scheduler::StartScheduler;

/// Orchestrates one bank of reels: staggers their start commands, ticks
/// every runtime each simulation step, and aggregates their stop events
/// into a single "all stopped" signal.
///
/// Created once from a config and a strip table, then reused across spins.
/// Single-threaded by construction: the session is the only writer of
/// `active` and `outstanding`, and everything advances from the host's tick.
#[derive(Debug)]
pub struct SpinSession {
    config: SlotConfig,
    reels: Vec<ReelRuntime>,
    scheduler: StartScheduler,
    /// Session clock in seconds, advanced by every tick. Start commands are
    /// keyed against this, so it keeps running across spin cycles.
    clock: f32,
    active: bool,
    /// Reels of the current cycle that have not yet acknowledged their stop.
    outstanding: usize,
    events: Vec<SessionEvent>,
}

impl SpinSession {
    /// Build a session over one strip per reel, in reel order. Fails fast on
    /// a bad config or bad strip data; a misconfigured bank never runs.
    pub fn new(config: SlotConfig, strips: Vec<Vec<SymbolId>>) -> Result<Self, SlotError> {
        config.validate()?;
        let mut reels = Vec::with_capacity(strips.len());
        for (index, symbols) in strips.into_iter().enumerate() {
            let strip = ReelStrip::new(ReelId(index as u32), symbols)?;
            reels.push(ReelRuntime::new(strip, &config)?);
        }
        Ok(Self {
            config,
            reels,
            scheduler: StartScheduler::new(),
            clock: 0.0,
            active: false,
            outstanding: 0,
            events: Vec::new(),
        })
    }

    /// Kick off a spin cycle: reel `i` receives its start command after a
    /// delay of `i * stagger_interval`, so reels begin in index order.
    /// Ignored with a warning while a cycle is already running, or when the
    /// session has no reels.
    pub fn start(&mut self) {
        if self.active {
            log::warn!("spin session already active, start ignored");
            return;
        }
        if self.reels.is_empty() {
            log::warn!("spin session has no reels, start ignored");
            return;
        }
        self.active = true;
        self.outstanding = self.reels.len();
        for index in 0..self.reels.len() {
            let delay = index as f32 * self.config.stagger_interval;
            self.scheduler.schedule(index, self.clock + delay);
        }
        // Reel 0 has no delay; its command fires inside start() itself.
        self.pump_start_commands();
    }

    /// Advance the whole session by one simulation step: fire due start
    /// commands, tick every reel, and fold their stop events into the
    /// session-level aggregate.
    pub fn tick(&mut self, dt: f32, view: &mut dyn SlotView) {
        self.clock += dt;
        self.pump_start_commands();
        for reel in &mut self.reels {
            if let Some(stopped) = reel.tick(dt, view) {
                Self::acknowledge_stop(
                    &mut self.outstanding,
                    &mut self.active,
                    &mut self.events,
                    stopped,
                );
            }
        }
    }

    fn pump_start_commands(&mut self) {
        for index in self.scheduler.fire_due(self.clock) {
            if let Some(reel) = self.reels.get_mut(index) {
                reel.spin();
            }
        }
    }

    /// Stop acknowledgment: decrement the outstanding count (clamped at
    /// zero defensively) and, on the transition to zero, emit the
    /// session-level signal exactly once.
    fn acknowledge_stop(
        outstanding: &mut usize,
        active: &mut bool,
        events: &mut Vec<SessionEvent>,
        stopped: ReelStopped,
    ) {
        *outstanding = outstanding.saturating_sub(1);
        events.push(SessionEvent::ReelStopped(stopped));
        if *outstanding == 0 && *active {
            *active = false;
            events.push(SessionEvent::AllStopped);
        }
    }

    /// Take everything that happened since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Teardown: cancel pending start commands and freeze every reel so
    /// nothing fires against a disposed session. Safe to call repeatedly;
    /// the session can be started again afterwards.
    pub fn dispose(&mut self) {
        self.scheduler.cancel_all();
        for reel in &mut self.reels {
            reel.halt();
        }
        self.active = false;
        self.outstanding = 0;
        self.events.clear();
    }

    /// Push the seeded windows out to the view. Hosts call this once after
    /// construction so the bank renders before the first spin.
    pub fn project(&self, view: &mut dyn SlotView) {
        for reel in &self.reels {
            reel.project(view);
        }
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    pub fn reels(&self) -> &[ReelRuntime] {
        &self.reels
    }

    pub fn reel(&self, id: ReelId) -> Option<&ReelRuntime> {
        self.reels.iter().find(|reel| reel.reel() == id)
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }
}
