use std::time::{Duration, Instant};

use reel_engine::{
    ReelId, SessionEvent, SlotConfig, SlotView, SpinSession, StepClock, SymbolId,
};

/// Console-side view: remembers the last symbol pushed into every slot so
/// the final windows can be printed once the bank settles. Positions are
/// consumed and dropped; there is nothing to move on a terminal.
struct ConsoleView {
    windows: Vec<Vec<SymbolId>>,
}

impl ConsoleView {
    fn new(reels: usize, rows: usize) -> Self {
        Self {
            windows: vec![vec![SymbolId(0); rows]; reels],
        }
    }
}

impl SlotView for ConsoleView {
    fn set_slot_position(&mut self, _reel: ReelId, _slot: usize, _pos: glam::Vec2) {}

    fn set_slot_symbol(&mut self, reel: ReelId, slot: usize, symbol: SymbolId) {
        self.windows[reel.0 as usize][slot] = symbol;
    }
}

/// Five strips of ten symbols each, every reel a different rotation of the
/// symbol set so the bank never lines up trivially.
fn demo_strips() -> Vec<Vec<SymbolId>> {
    (0..5u32)
        .map(|reel| (0..10u32).map(|i| SymbolId((i * 3 + reel * 2) % 10)).collect())
        .collect()
}

fn main() -> Result<(), reel_engine::SlotError> {
    env_logger::init();
    log::info!("starting spin session");

    let mut session = SpinSession::new(SlotConfig::default(), demo_strips())?;
    let rows = session.config().visible_rows;
    let mut view = ConsoleView::new(session.reels().len(), rows);
    session.project(&mut view);
    session.start();

    let mut clock = StepClock::new(1.0 / 60.0);
    let mut last_frame = Instant::now();
    'running: loop {
        let now = Instant::now();
        let frame_dt = (now - last_frame).as_secs_f32();
        last_frame = now;

        for _ in 0..clock.accumulate(frame_dt) {
            session.tick(clock.step(), &mut view);
        }
        for event in session.drain_events() {
            match event {
                SessionEvent::ReelStopped(stopped) => {
                    log::info!("reel {} stopped on {:?}", stopped.reel.0, stopped.symbols);
                }
                SessionEvent::AllStopped => break 'running,
            }
        }
        std::thread::sleep(Duration::from_millis(4));
    }

    println!("final windows:");
    for row in 0..rows {
        let line: Vec<String> = view
            .windows
            .iter()
            .map(|window| format!("{:>2}", window[row].0))
            .collect();
        println!("  {}", line.join(" "));
    }
    Ok(())
}
