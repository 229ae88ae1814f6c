use serde::{Deserialize, Serialize};

use crate::api::types::{SlotError, SymbolId};

/// Tuning for a spin session, owned by the session that was built from it.
/// Hosts construct one (or deserialize it) and hand it over; nothing here is
/// global or mutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    /// Number of display slots per reel, index 0 = topmost.
    pub visible_rows: usize,
    /// Height of one symbol cell in world units. Scroll speed is normalized
    /// against this: one cell of travel consumes one strip symbol.
    pub cell_height: f32,
    /// Vertical distance between adjacent slot centers.
    pub cell_spacing: f32,
    /// Vertical offset applied to every projected slot position.
    pub offset_y: f32,
    /// Steady-phase scroll speed in world units per second.
    pub spin_speed: f32,
    /// Total spin time from start command to the beginning of the bounce.
    pub spin_duration: f32,
    /// Time spent ramping up to `spin_speed`.
    pub accel_duration: f32,
    /// Time spent ramping back down to rest.
    pub decel_duration: f32,
    /// Delay between successive reels' start commands within one session.
    pub stagger_interval: f32,
    /// Total duration of the settle bounce, split into three equal segments.
    pub bounce_duration: f32,
    /// Peak overshoot of the bounce, in cell units.
    pub bounce_overshoot: f32,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            visible_rows: 3,
            cell_height: 100.0,
            cell_spacing: 100.0,
            offset_y: 0.0,
            spin_speed: 1000.0,
            spin_duration: 2.0,
            accel_duration: 0.3,
            decel_duration: 0.3,
            stagger_interval: 0.15,
            bounce_duration: 0.3,
            bounce_overshoot: 0.2,
        }
    }
}

impl SlotConfig {
    /// Parse a configuration from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, SlotError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SlotError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check structural soundness. Called by session construction; a config
    /// that fails here never reaches a runtime.
    pub fn validate(&self) -> Result<(), SlotError> {
        if self.visible_rows == 0 {
            return Err(SlotError::InvalidConfig("visible_rows must be at least 1".into()));
        }
        for (name, value) in [
            ("cell_height", self.cell_height),
            ("spin_speed", self.spin_speed),
            ("spin_duration", self.spin_duration),
            ("accel_duration", self.accel_duration),
            ("decel_duration", self.decel_duration),
            ("bounce_duration", self.bounce_duration),
        ] {
            if !(value > 0.0) {
                return Err(SlotError::InvalidConfig(format!("{name} must be positive, got {value}")));
            }
        }
        for (name, value) in [
            ("stagger_interval", self.stagger_interval),
            ("bounce_overshoot", self.bounce_overshoot),
        ] {
            if !(value >= 0.0) {
                return Err(SlotError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if self.spin_duration < self.accel_duration + self.decel_duration {
            return Err(SlotError::InvalidConfig(format!(
                "spin_duration {} is shorter than accel + decel ({})",
                self.spin_duration,
                self.accel_duration + self.decel_duration
            )));
        }
        Ok(())
    }

    /// Time spent at full speed: whatever the ramps leave of the spin.
    pub fn steady_duration(&self) -> f32 {
        self.spin_duration - self.accel_duration - self.decel_duration
    }
}

/// Parse a strip table from JSON: one array of symbol ids per reel, in reel
/// order. The table is the session's read-only source of truth for refills.
pub fn strip_table_from_json(json: &str) -> Result<Vec<Vec<SymbolId>>, SlotError> {
    serde_json::from_str(json).map_err(|e| SlotError::InvalidConfig(e.to_string()))
}
