use gallery_core::*;
use glam::Vec2;
use log::{debug, info};
use proto::{SoundCue, UiMessage};

use crate::HostError;

/// Presentation layer receiving encoded `UiMessage`s
pub trait UiClient {
    fn send_bytes(&self, bytes: &[u8]) -> Result<(), HostError>;
}

/// Translate a controller effect into its UI message, if it has one
pub fn ui_message(effect: &Effect) -> Option<UiMessage> {
    match *effect {
        Effect::ScoreChanged(score) => Some(UiMessage::ScoreLabel { score }),
        Effect::PlaySound(sound) => Some(UiMessage::PlaySound {
            cue: match sound {
                Sound::Hit => SoundCue::Hit,
                Sound::BadHit => SoundCue::BadHit,
            },
        }),
        Effect::ShowRoundOverBanner => Some(UiMessage::RoundOverBanner),
        Effect::HideRoundOverBanner => Some(UiMessage::HideRoundOverBanner),
        Effect::ReplayPrompt {
            final_score,
            high_score,
        } => Some(UiMessage::ReplayPrompt {
            final_score,
            high_score,
        }),
        Effect::Spawn(_) | Effect::Remove(_) | Effect::RoundOver { .. } => None,
    }
}

/// Drives one round controller against the headless target world
pub struct Session<S: HighScoreStore> {
    pub controller: RoundController<S>,
    pub targets: TargetWorld,
    pub ui: Box<dyn UiClient>,
    pub frame: u64,
    pub last_prompt: Option<(i32, i32)>, // (final_score, high_score) of the latest prompt
}

impl<S: HighScoreStore> Session<S> {
    pub fn new(controller: RoundController<S>, ui: Box<dyn UiClient>) -> Self {
        Self {
            controller,
            targets: TargetWorld::new(),
            ui,
            frame: 0,
            last_prompt: None,
        }
    }

    pub fn start(&mut self) {
        self.targets.clear();
        self.last_prompt = None;
        self.controller.start_round();
        self.apply_effects();
    }

    /// One rendering frame: timers and sweep, then target motion
    pub fn frame(&mut self, dt: f32) {
        self.frame += 1;
        self.controller.on_frame_tick(dt, &self.targets);
        self.apply_effects();
        self.targets.step(dt);

        if self.frame % 600 == 0 {
            debug!(
                "Session: frame={}, targets={}, score={}",
                self.frame,
                self.targets.len(),
                self.controller.score()
            );
        }
    }

    /// Tap at a screen point. Returns the score change.
    pub fn tap(&mut self, point: Vec2) -> i32 {
        let hits = self.targets.hit_test(point);
        let delta = self.controller.on_tap(hits);
        self.apply_effects();
        delta
    }

    pub fn replay(&mut self) -> bool {
        let replayed = self.controller.on_replay_requested();
        if replayed {
            self.targets.clear();
            self.last_prompt = None;
        }
        self.apply_effects();
        replayed
    }

    /// Stop timers and flush any unsaved high score
    pub fn shutdown(&mut self) {
        self.controller.shutdown();
        self.apply_effects();
        info!("Session: shut down after {} frames", self.frame);
    }

    fn apply_effects(&mut self) {
        for effect in self.controller.drain_effects() {
            match effect {
                Effect::Spawn(req) => {
                    self.targets.spawn(&req);
                }
                Effect::Remove(handle) => {
                    self.targets.remove(handle);
                }
                Effect::ReplayPrompt {
                    final_score,
                    high_score,
                } => {
                    self.last_prompt = Some((final_score, high_score));
                }
                _ => {}
            }

            if let Some(msg) = ui_message(&effect) {
                self.send(&msg);
            }
        }
    }

    /// Delivery is best-effort
    fn send(&self, msg: &UiMessage) {
        match msg.to_bytes() {
            Ok(bytes) => {
                if let Err(err) = self.ui.send_bytes(&bytes) {
                    debug!("Session: dropped {msg:?}: {err}");
                }
            }
            Err(err) => debug!("Session: failed to encode {msg:?}: {err}"),
        }
    }
}
