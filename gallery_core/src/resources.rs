use crate::components::{Sound, SpawnRequest};
use crate::targets::TargetHandle;

/// Per-round state, replaced whenever a new round starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundState {
    pub score: i32,             // May go negative
    pub spawn_interval: f32,    // Seconds between spawn ticks
    pub batch_spawn_count: u32, // Spawns since the last ramp step
    pub is_over: bool,
}

impl RoundState {
    pub fn new(spawn_interval: f32) -> Self {
        Self {
            score: 0,
            spawn_interval,
            batch_spawn_count: 0,
            is_over: false,
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Requests from the round controller to the host layer
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Spawn(SpawnRequest),
    Remove(TargetHandle),
    PlaySound(Sound),
    ScoreChanged(i32),
    RoundOver { final_score: i32, high_score: i32 },
    ShowRoundOverBanner,
    HideRoundOverBanner,
    ReplayPrompt { final_score: i32, high_score: i32 },
}

/// Effects emitted since the host last drained them
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub queue: Vec<Effect>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.queue.push(effect);
    }

    pub fn drain(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.queue)
    }
}
