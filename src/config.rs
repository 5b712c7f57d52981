use glam::Vec3;

/// Tunables for the crane demo. Times are in seconds, lengths in scene units.
#[derive(Debug, Clone)]
pub struct CraneConfig {
    /// Time a bounded part takes to sweep its whole range.
    pub movement_time: f32,
    /// Radius of the claw's grabbing envelope, larger than the claw mesh.
    pub claw_reach: f32,
    /// Where a grabbed object hangs, relative to the claw.
    pub grab_offset: Vec3,
    /// Yaw error (radians) below which the claw counts as over the container.
    pub rotation_threshold: f32,
    /// Cable length at which a carried object is released.
    pub deposit_length: f32,
    /// A choreography stage running longer than this many movement times is
    /// treated as stalled.
    pub stage_timeout_factor: f32,
    pub placement_attempts: usize,
    /// Upper bound on a single frame's time delta.
    pub max_time_delta: f32,
    /// Fixed seed for cargo placement; random when unset.
    pub seed: Option<u64>,
}

impl Default for CraneConfig {
    fn default() -> Self {
        Self {
            movement_time: 4.0,
            claw_reach: 2.5,
            grab_offset: Vec3::new(0.0, -2.5, 0.0),
            rotation_threshold: 1e-1,
            deposit_length: 6.0,
            stage_timeout_factor: 3.0,
            placement_attempts: 10_000,
            max_time_delta: 0.1,
            seed: None,
        }
    }
}

impl CraneConfig {
    /// Defaults, with the placement seed taken from `CRANE_SEED` if set.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("CRANE_SEED") {
            match value.trim().parse() {
                Ok(seed) => config.seed = Some(seed),
                Err(err) => log::warn!("Ignoring CRANE_SEED={value:?}: {err}"),
            }
        }

        config
    }

    /// Watchdog limit for a single choreography stage. Scales with
    /// `movement_time` so slower sweeps are not cut short.
    pub fn stage_timeout(&self) -> f32 {
        self.movement_time * self.stage_timeout_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_timeout_follows_movement_time() {
        let mut config = CraneConfig::default();
        assert_eq!(config.stage_timeout(), 12.0);

        config.movement_time = 20.0;
        assert_eq!(config.stage_timeout(), 60.0);
        assert!(config.stage_timeout() > config.movement_time);
    }
}
