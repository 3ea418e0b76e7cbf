//! Round Controller
//!
//! Owns the round state machine (`Idle -> Running -> Over -> Running`), the
//! three round timers and the high score. Hosts feed it frame ticks and taps
//! and execute the effects it emits.

use log::{debug, info};

use crate::components::{SpawnRequest, TargetKind};
use crate::config::Config;
use crate::high_score::{HighScore, HighScoreStore};
use crate::resources::{Effect, Effects, GameRng, RoundState};
use crate::scheduler::{Scheduler, Task, TaskHandle};
use crate::systems::{build_spawn_batch, offscreen_targets};
use crate::targets::{TargetHandle, TargetLayer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// No round started yet
    Idle,
    Running,
    /// Round ended, waiting for replay
    Over,
}

pub struct RoundController<S: HighScoreStore> {
    config: Config,
    phase: RoundPhase,
    state: RoundState,
    high_score: HighScore<S>,
    scheduler: Scheduler,
    rng: GameRng,
    effects: Effects,
    spawn_timer: Option<TaskHandle>,
    round_end_timer: Option<TaskHandle>,
    prompt_timer: Option<TaskHandle>,
    round: u32, // Rounds started so far
}

impl<S: HighScoreStore> RoundController<S> {
    pub fn new(config: Config, high_score: HighScore<S>, rng: GameRng) -> Self {
        let state = RoundState::new(config.spawn_interval_initial);
        Self {
            config,
            phase: RoundPhase::Idle,
            state,
            high_score,
            scheduler: Scheduler::new(),
            rng,
            effects: Effects::new(),
            spawn_timer: None,
            round_end_timer: None,
            prompt_timer: None,
            round: 0,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn score(&self) -> i32 {
        self.state.score
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn high_score(&self) -> &HighScore<S> {
        &self.high_score
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn spawn_timer(&self) -> Option<TaskHandle> {
        self.spawn_timer
    }

    pub fn round_end_timer(&self) -> Option<TaskHandle> {
        self.round_end_timer
    }

    pub fn prompt_timer(&self) -> Option<TaskHandle> {
        self.prompt_timer
    }

    /// Reset round state and arm the spawn and round-end timers
    pub fn start_round(&mut self) {
        self.cancel_timers();
        self.scheduler.rebase();

        self.state = RoundState::new(self.config.spawn_interval_initial);
        self.phase = RoundPhase::Running;
        self.round += 1;

        self.spawn_timer = Some(
            self.scheduler
                .schedule_repeating(Task::Spawn, self.state.spawn_interval),
        );
        self.round_end_timer = Some(
            self.scheduler
                .schedule_once(Task::RoundEnd, self.config.round_duration),
        );

        self.effects.push(Effect::ScoreChanged(self.state.score));
        info!(
            "Round {} started ({}s, spawn every {}s)",
            self.round, self.config.round_duration, self.state.spawn_interval
        );
    }

    /// Spawn one batch, then ramp the spawn cadence if enough targets went out
    pub fn on_spawn_tick(&mut self) -> Vec<SpawnRequest> {
        if self.phase != RoundPhase::Running {
            return Vec::new();
        }

        let batch = build_spawn_batch(&self.config, &mut self.rng);
        self.state.batch_spawn_count += batch.len() as u32;
        for req in &batch {
            self.effects.push(Effect::Spawn(*req));
        }

        // At-or-past threshold: batches of 3 overshoot 5
        while self.config.ramp_threshold > 0
            && self.state.batch_spawn_count >= self.config.ramp_threshold
        {
            self.ramp();
        }

        batch
    }

    fn ramp(&mut self) {
        let previous = self.state.spawn_interval;
        self.state.spawn_interval = self.config.ramp_interval(previous);
        self.state.batch_spawn_count -= self.config.ramp_threshold;

        if self.spawn_timer.is_some() {
            self.spawn_timer = Some(self.scheduler.replace(
                self.spawn_timer,
                Task::Spawn,
                self.state.spawn_interval,
            ));
        }

        debug!(
            "Spawn ramp: {previous}s -> {}s (carry {})",
            self.state.spawn_interval, self.state.batch_spawn_count
        );
    }

    /// Score a tapped target. Returns the applied score change.
    pub fn on_target_tapped(&mut self, target: TargetHandle, kind: TargetKind) -> i32 {
        if self.state.is_over || self.phase != RoundPhase::Running {
            return 0;
        }

        let delta = kind.score_delta();
        self.state.score += delta;

        self.effects.push(Effect::Remove(target));
        self.effects.push(Effect::PlaySound(kind.hit_sound()));
        self.effects.push(Effect::ScoreChanged(self.state.score));

        delta
    }

    /// One tap over possibly overlapping targets; each is scored independently
    pub fn on_tap(&mut self, hits: impl IntoIterator<Item = (TargetHandle, TargetKind)>) -> i32 {
        hits.into_iter()
            .map(|(target, kind)| self.on_target_tapped(target, kind))
            .sum()
    }

    /// End the round: stop spawning, record the high score, schedule the replay prompt
    pub fn on_round_end_tick(&mut self) {
        if self.phase != RoundPhase::Running {
            return;
        }

        self.phase = RoundPhase::Over;
        self.state.is_over = true;

        if let Some(handle) = self.spawn_timer.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.round_end_timer.take() {
            self.scheduler.cancel(handle);
        }

        let final_score = self.state.score;
        self.high_score.submit(final_score);
        let high_score = self.high_score.get();

        self.effects.push(Effect::RoundOver {
            final_score,
            high_score,
        });
        self.effects.push(Effect::ShowRoundOverBanner);

        self.prompt_timer = Some(self.scheduler.schedule_once(
            Task::ReplayPrompt {
                final_score,
                high_score,
            },
            self.config.replay_prompt_delay,
        ));

        info!("Round {} over: score {final_score}, high score {high_score}", self.round);
    }

    /// Start a new round from the round-over screen. Ignored in any other phase.
    pub fn on_replay_requested(&mut self) -> bool {
        if self.phase != RoundPhase::Over {
            debug!("Replay ignored in phase {:?}", self.phase);
            return false;
        }

        self.effects.push(Effect::HideRoundOverBanner);
        self.start_round();
        true
    }

    /// Per-frame entry point: fire due timers, then sweep offscreen targets
    pub fn on_frame_tick<T: TargetLayer + ?Sized>(&mut self, dt: f32, targets: &T) {
        self.advance(dt);
        self.sweep_offscreen(targets);
    }

    /// Advance the round clock and dispatch due timers one at a time
    pub fn advance(&mut self, dt: f32) {
        self.scheduler.advance(dt);
        while let Some((handle, task)) = self.scheduler.pop_due() {
            self.dispatch(handle, task);
        }
    }

    fn dispatch(&mut self, handle: TaskHandle, task: Task) {
        match task {
            Task::Spawn => {
                self.on_spawn_tick();
            }
            Task::RoundEnd => {
                if self.round_end_timer == Some(handle) {
                    self.round_end_timer = None;
                }
                self.on_round_end_tick();
            }
            Task::ReplayPrompt {
                final_score,
                high_score,
            } => {
                if self.prompt_timer == Some(handle) {
                    self.prompt_timer = None;
                }
                self.effects.push(Effect::ReplayPrompt {
                    final_score,
                    high_score,
                });
            }
        }
    }

    /// Request removal of every target past the left boundary
    pub fn sweep_offscreen<T: TargetLayer + ?Sized>(&mut self, targets: &T) {
        for handle in offscreen_targets(targets.positions(), &self.config) {
            self.effects.push(Effect::Remove(handle));
        }
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects.queue
    }

    pub fn drain_effects(&mut self) -> Vec<Effect> {
        self.effects.drain()
    }

    /// Flush any high score write that failed earlier
    pub fn shutdown(&mut self) {
        self.cancel_timers();
        self.high_score.flush();
    }

    fn cancel_timers(&mut self) {
        for handle in [
            self.spawn_timer.take(),
            self.round_end_timer.take(),
            self.prompt_timer.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.scheduler.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::high_score::MemoryStore;
    use crate::Sound;
    use approx::assert_relative_eq;

    fn controller() -> RoundController<MemoryStore> {
        RoundController::new(
            Config::new(),
            HighScore::load(MemoryStore::new()),
            GameRng::new(12345),
        )
    }

    fn running() -> RoundController<MemoryStore> {
        let mut rc = controller();
        rc.start_round();
        rc.drain_effects();
        rc
    }

    #[test]
    fn test_new_controller_is_idle() {
        let rc = controller();
        assert_eq!(rc.phase(), RoundPhase::Idle);
        assert_eq!(rc.round(), 0);
        assert!(rc.spawn_timer().is_none());
        assert_eq!(rc.scheduler().pending(), 0);
    }

    #[test]
    fn test_start_round_arms_timers() {
        let mut rc = controller();
        rc.start_round();

        assert_eq!(rc.phase(), RoundPhase::Running);
        assert_eq!(*rc.state(), RoundState::new(1.5));

        let spawn = rc.spawn_timer().unwrap();
        let end = rc.round_end_timer().unwrap();
        assert_eq!(rc.scheduler().time_until(spawn), Some(1.5));
        assert_eq!(rc.scheduler().time_until(end), Some(30.0));
        assert_eq!(rc.drain_effects(), vec![Effect::ScoreChanged(0)]);
    }

    #[test]
    fn test_spawn_tick_ignored_when_not_running() {
        let mut rc = controller();
        assert!(rc.on_spawn_tick().is_empty());
        assert_eq!(rc.state().batch_spawn_count, 0);
        assert!(rc.effects().is_empty());
    }

    #[test]
    fn test_spawn_tick_emits_three_spawns() {
        let mut rc = running();
        let batch = rc.on_spawn_tick();

        assert_eq!(batch.len(), 3);
        assert_eq!(rc.state().batch_spawn_count, 3);

        let effects = rc.drain_effects();
        let spawned: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::Spawn(req) => Some(*req),
                _ => None,
            })
            .collect();
        assert_eq!(spawned, batch);
    }

    #[test]
    fn test_second_batch_ramps_and_rearms() {
        let mut rc = running();
        let original = rc.spawn_timer().unwrap();

        rc.on_spawn_tick();
        assert_eq!(rc.spawn_timer(), Some(original), "No ramp after 3 spawns");

        rc.on_spawn_tick();
        assert_relative_eq!(rc.state().spawn_interval, 1.4, epsilon = 1e-6);
        assert_eq!(rc.state().batch_spawn_count, 1, "6 spawns carry 1 past the threshold");

        let rearmed = rc.spawn_timer().unwrap();
        assert_ne!(rearmed, original);
        assert!(!rc.scheduler().is_scheduled(original));
        assert_relative_eq!(
            rc.scheduler().time_until(rearmed).unwrap(),
            1.4,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_tap_scoring() {
        let mut rc = running();

        assert_eq!(rc.on_target_tapped(TargetHandle(1), TargetKind::RewardA), 1);
        assert_eq!(rc.on_target_tapped(TargetHandle(2), TargetKind::RewardB), 1);
        assert_eq!(rc.on_target_tapped(TargetHandle(3), TargetKind::Penalty), -3);
        assert_eq!(rc.score(), -1, "Score can go negative");

        let effects = rc.drain_effects();
        assert_eq!(
            &effects[6..],
            &[
                Effect::Remove(TargetHandle(3)),
                Effect::PlaySound(Sound::BadHit),
                Effect::ScoreChanged(-1),
            ]
        );
        assert_eq!(effects[1], Effect::PlaySound(Sound::Hit));
    }

    #[test]
    fn test_tap_ignored_when_idle_or_over() {
        let mut rc = controller();
        assert_eq!(rc.on_target_tapped(TargetHandle(1), TargetKind::RewardA), 0);

        rc.start_round();
        rc.on_round_end_tick();
        rc.drain_effects();

        assert_eq!(rc.on_target_tapped(TargetHandle(1), TargetKind::Penalty), 0);
        assert_eq!(rc.score(), 0);
        assert!(rc.effects().is_empty(), "No removal or sound after round end");
    }

    #[test]
    fn test_on_tap_processes_every_hit() {
        let mut rc = running();
        let delta = rc.on_tap(vec![
            (TargetHandle(1), TargetKind::RewardA),
            (TargetHandle(2), TargetKind::Penalty),
            (TargetHandle(3), TargetKind::RewardB),
        ]);
        assert_eq!(delta, -1);
        assert_eq!(rc.score(), -1);
    }

    #[test]
    fn test_round_end_cancels_spawning_and_schedules_prompt() {
        let mut rc = running();
        rc.on_target_tapped(TargetHandle(1), TargetKind::RewardA);
        rc.drain_effects();

        let spawn = rc.spawn_timer().unwrap();
        rc.on_round_end_tick();

        assert_eq!(rc.phase(), RoundPhase::Over);
        assert!(rc.state().is_over);
        assert!(!rc.scheduler().is_scheduled(spawn));
        assert!(rc.on_spawn_tick().is_empty());

        let prompt = rc.prompt_timer().unwrap();
        assert_eq!(rc.scheduler().time_until(prompt), Some(5.0));
        assert_eq!(
            rc.drain_effects(),
            vec![
                Effect::RoundOver {
                    final_score: 1,
                    high_score: 1
                },
                Effect::ShowRoundOverBanner,
            ]
        );
        assert_eq!(rc.high_score().get(), 1);
        assert_eq!(rc.high_score().store().writes, 1);
    }

    #[test]
    fn test_round_end_is_idempotent() {
        let mut rc = running();
        rc.on_target_tapped(TargetHandle(1), TargetKind::RewardA);
        rc.on_round_end_tick();
        rc.on_round_end_tick();
        assert_eq!(rc.high_score().store().writes, 1);
    }

    #[test]
    fn test_replay_only_from_over() {
        let mut rc = running();
        assert!(!rc.on_replay_requested());
        assert_eq!(rc.round(), 1);

        rc.on_round_end_tick();
        assert!(rc.on_replay_requested());
        assert_eq!(rc.round(), 2);
        assert_eq!(rc.phase(), RoundPhase::Running);
    }

    #[test]
    fn test_wide_batch_ramps_until_below_threshold() {
        let mut config = Config::new();
        config.lanes = vec![config.lanes[0]; 12];
        let mut rc = RoundController::new(
            config,
            HighScore::load(MemoryStore::new()),
            GameRng::new(7),
        );
        rc.start_round();

        // 12 spawns against a threshold of 5: two ramp steps, carry 2
        assert_eq!(rc.on_spawn_tick().len(), 12);
        assert_relative_eq!(rc.state().spawn_interval, 1.3, epsilon = 1e-6);
        assert_eq!(rc.state().batch_spawn_count, 2);

        for _ in 0..10 {
            rc.on_spawn_tick();
            assert!(rc.state().batch_spawn_count < rc.config().ramp_threshold);
        }
    }

    #[test]
    fn test_round_ends_on_time_after_long_uptime() {
        let mut rc = controller();
        rc.advance(1_048_576.0);
        rc.start_round();
        assert_eq!(rc.scheduler().now(), 0.0);

        let dt = 1.0 / 60.0;
        let mut frames = 0;
        while rc.phase() == RoundPhase::Running && frames < 2000 {
            frames += 1;
            rc.advance(dt);
        }
        assert_eq!(rc.phase(), RoundPhase::Over);
        assert!((1799..=1801).contains(&frames), "Round lasted {frames} frames");
    }

    #[test]
    fn test_replay_cancels_pending_prompt() {
        let mut rc = running();
        rc.on_round_end_tick();
        let prompt = rc.prompt_timer().unwrap();

        rc.on_replay_requested();
        assert!(rc.prompt_timer().is_none());
        assert!(!rc.scheduler().is_scheduled(prompt));
    }

    #[test]
    fn test_shutdown_cancels_timers() {
        let mut rc = running();
        rc.shutdown();
        assert_eq!(rc.scheduler().pending(), 0);
    }
}
