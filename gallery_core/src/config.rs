use crate::components::{Lane, TargetKind};
use crate::params::Params;

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub round_duration: f32,
    pub replay_prompt_delay: f32,
    pub spawn_interval_initial: f32,
    pub spawn_interval_step: f32,
    pub spawn_interval_floor: f32,
    pub ramp_threshold: u32,
    pub target_size_min: u32,
    pub target_size_max: u32,
    pub offscreen_boundary_x: f32,
    pub lanes: Vec<Lane>,             // One spawn per lane per tick
    pub target_kinds: Vec<TargetKind>, // Drawn uniformly; empty means no spawns
}

impl Default for Config {
    fn default() -> Self {
        Self {
            round_duration: Params::ROUND_DURATION,
            replay_prompt_delay: Params::REPLAY_PROMPT_DELAY,
            spawn_interval_initial: Params::SPAWN_INTERVAL_INITIAL,
            spawn_interval_step: Params::SPAWN_INTERVAL_STEP,
            spawn_interval_floor: Params::SPAWN_INTERVAL_FLOOR,
            ramp_threshold: Params::RAMP_THRESHOLD,
            target_size_min: Params::TARGET_SIZE_MIN,
            target_size_max: Params::TARGET_SIZE_MAX,
            offscreen_boundary_x: Params::OFFSCREEN_BOUNDARY_X,
            lanes: vec![
                Lane::left_to_right(Params::LANE_LOW_Y, Params::TARGET_SPEED),
                Lane::right_to_left(Params::LANE_MID_Y, Params::TARGET_SPEED),
                Lane::left_to_right(Params::LANE_HIGH_Y, Params::TARGET_SPEED),
            ],
            target_kinds: TargetKind::ALL.to_vec(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next spawn interval after one ramp step, clamped to the floor
    pub fn ramp_interval(&self, interval: f32) -> f32 {
        (interval - self.spawn_interval_step).max(self.spawn_interval_floor)
    }

    pub fn is_offscreen(&self, x: f32) -> bool {
        x < self.offscreen_boundary_x
    }
}
