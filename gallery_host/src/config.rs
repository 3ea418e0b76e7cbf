use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use log::warn;

pub const DEFAULT_HIGH_SCORE_PATH: &str = "gallery_high_score.bin";
pub const DEFAULT_SEED: u64 = 12345;
pub const DEFAULT_FRAME_HZ: u32 = 60;

/// Host settings read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub high_score_path: PathBuf,
    pub seed: u64,
    pub frame_hz: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            high_score_path: PathBuf::from(DEFAULT_HIGH_SCORE_PATH),
            seed: DEFAULT_SEED,
            frame_hz: DEFAULT_FRAME_HZ,
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let high_score_path = lookup("GALLERY_HIGH_SCORE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HIGH_SCORE_PATH));

        let mut frame_hz = read_parsed(&lookup, "GALLERY_FRAME_HZ", DEFAULT_FRAME_HZ);
        if frame_hz == 0 {
            warn!("GALLERY_FRAME_HZ must be positive. Falling back to {DEFAULT_FRAME_HZ}.");
            frame_hz = DEFAULT_FRAME_HZ;
        }

        Self {
            high_score_path,
            seed: read_parsed(&lookup, "GALLERY_SEED", DEFAULT_SEED),
            frame_hz,
        }
    }

    /// Seconds per frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_hz as f32
    }
}

fn read_parsed<T: FromStr + Copy + std::fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{key}={raw:?} is not valid. Falling back to {default}.");
            default
        }),
        None => default,
    }
}
