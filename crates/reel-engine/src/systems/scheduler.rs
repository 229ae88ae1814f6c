/// A start command waiting for its moment on the session clock.
#[derive(Debug, Clone, Copy)]
struct PendingStart {
    reel_index: usize,
    fire_at: f32,
}

/// One-shot deferred start commands, keyed by session-clock time.
///
/// The session schedules one command per reel at `start()` and pumps
/// `fire_due` every tick; commands fire at most once and disappear.
/// `cancel_all` is the disposal path; a cancelled command never fires.
#[derive(Debug, Default)]
pub struct StartScheduler {
    pending: Vec<PendingStart>,
}

impl StartScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a start command for `reel_index` at clock time `fire_at`.
    pub fn schedule(&mut self, reel_index: usize, fire_at: f32) {
        self.pending.push(PendingStart { reel_index, fire_at });
    }

    /// Remove and return every command due at `now`, in schedule order.
    pub fn fire_due(&mut self, now: f32) -> Vec<usize> {
        let mut fired = Vec::new();
        self.pending.retain(|command| {
            if command.fire_at <= now {
                fired.push(command.reel_index);
                false
            } else {
                true
            }
        });
        fired
    }

    /// Drop every pending command.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
