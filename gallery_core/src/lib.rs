pub mod components;
pub mod config;
pub mod high_score;
pub mod params;
pub mod resources;
pub mod round;
pub mod scheduler;
pub mod systems;
pub mod targets;

pub use components::*;
pub use config::*;
pub use high_score::*;
pub use params::*;
pub use resources::*;
pub use round::*;
pub use scheduler::*;
pub use targets::*;

/// Helper to create a round controller over a freshly loaded high score
pub fn create_controller<S: HighScoreStore>(
    config: Config,
    store: S,
    seed: u64,
) -> RoundController<S> {
    RoundController::new(config, HighScore::load(store), GameRng::new(seed))
}
