//! Headless autoplay harness: plays one round with a bot and records the high score.
//! Usage: GALLERY_LOG=debug cargo run --bin autoplay

use gallery_core::*;
use gallery_host::{init_logging, FileStore, HostConfig, HostError, Session, UiClient};
use glam::Vec2;
use log::{debug, info};
use proto::UiMessage;
use rand::seq::SliceRandom;

/// Seconds between bot shots
const SHOT_COOLDOWN: f32 = 0.5;
/// Visible play field width
const SCREEN_WIDTH: f32 = 1024.0;

struct LogUi;

impl UiClient for LogUi {
    fn send_bytes(&self, bytes: &[u8]) -> Result<(), HostError> {
        let msg = UiMessage::from_bytes(bytes)?;
        debug!("[ui] {msg:?}");
        Ok(())
    }
}

/// Pick a random on-screen rewarding target
fn pick_target(session: &Session<FileStore>, rng: &mut GameRng) -> Option<Vec2> {
    let candidates: Vec<Vec2> = session
        .targets
        .positions()
        .into_iter()
        .filter(|(handle, pos)| {
            (0.0..=SCREEN_WIDTH).contains(&pos.x)
                && session
                    .targets
                    .kind(*handle)
                    .is_some_and(TargetKind::is_rewarding)
        })
        .map(|(_, pos)| pos)
        .collect();
    candidates.choose(&mut rng.0).copied()
}

fn main() -> Result<(), HostError> {
    init_logging();
    let host = HostConfig::from_env();
    let config = Config::new();
    let store = FileStore::new(&host.high_score_path);
    info!("[autoplay] high score file: {}", store.path().display());

    let max_frames = ((config.round_duration + config.replay_prompt_delay + 1.0)
        * host.frame_hz as f32) as u64;
    let controller = create_controller(config, store, host.seed);
    let mut session = Session::new(controller, Box::new(LogUi));
    let mut bot = GameRng::new(host.seed.wrapping_add(1));

    let dt = host.frame_dt();
    let mut cooldown = SHOT_COOLDOWN;
    let mut shots = 0u32;

    session.start();
    while session.last_prompt.is_none() && session.frame < max_frames {
        session.frame(dt);

        cooldown -= dt;
        if cooldown <= 0.0 && session.controller.phase() == RoundPhase::Running {
            cooldown = SHOT_COOLDOWN;
            if let Some(point) = pick_target(&session, &mut bot) {
                session.tap(point);
                shots += 1;
            }
        }
    }

    let (final_score, high_score) = session
        .last_prompt
        .unwrap_or((session.controller.score(), session.controller.high_score().get()));
    session.shutdown();

    println!("[autoplay] shots={shots} score={final_score} high_score={high_score}");
    Ok(())
}
