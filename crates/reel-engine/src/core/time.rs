/// Fixed-timestep accumulator for host frame loops.
/// The engine itself only ever consumes plain `dt` values; this converts
/// variable frame deltas into a whole number of fixed simulation steps.
pub struct StepClock {
    /// The fixed delta time per step.
    step: f32,
    /// Accumulated time from variable frame deltas.
    accumulated: f32,
    /// Most steps a single frame may run before the backlog is dropped.
    max_catch_up: u32,
}

impl StepClock {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulated: 0.0,
            max_catch_up: 5,
        }
    }

    /// Set how many steps one frame may catch up after a stall.
    pub fn with_max_catch_up(mut self, steps: u32) -> Self {
        self.max_catch_up = steps.max(1);
        self
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps
    /// to run. If a stall accumulated more than the catch-up budget, the
    /// remainder is dropped: a long pause must not burst the simulation.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulated += frame_dt;
        let steps = (self.accumulated / self.step) as u32;
        if steps > self.max_catch_up {
            self.accumulated = 0.0;
            self.max_catch_up
        } else {
            self.accumulated -= steps as f32 * self.step;
            steps
        }
    }

    /// Interpolation alpha between steps (0.0 to 1.0), for smooth rendering.
    pub fn alpha(&self) -> f32 {
        self.accumulated / self.step
    }

    /// The fixed step size.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Forget accumulated time. Call when resuming after a deliberate pause.
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}
