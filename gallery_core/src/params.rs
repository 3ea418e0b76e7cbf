/// Game tuning parameters for the shooting gallery
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Round
    pub const ROUND_DURATION: f32 = 30.0; // seconds
    pub const REPLAY_PROMPT_DELAY: f32 = 5.0; // seconds after round end

    // Spawn ramp
    pub const SPAWN_INTERVAL_INITIAL: f32 = 1.5;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.1;
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.35;
    pub const RAMP_THRESHOLD: u32 = 5; // Spawns per ramp step

    // Targets
    pub const TARGET_SPEED: f32 = 400.0; // units per second
    pub const TARGET_SIZE_MIN: u32 = 75;
    pub const TARGET_SIZE_MAX: u32 = 200;
    pub const OFFSCREEN_BOUNDARY_X: f32 = -300.0;

    // Lanes
    pub const LANE_LEFT_X: f32 = -200.0;
    pub const LANE_RIGHT_X: f32 = 1200.0;
    pub const LANE_LOW_Y: f32 = 159.0;
    pub const LANE_MID_Y: f32 = 384.0;
    pub const LANE_HIGH_Y: f32 = 609.0;

    // Score
    pub const REWARD_POINTS: i32 = 1;
    pub const PENALTY_POINTS: i32 = -3;
}
