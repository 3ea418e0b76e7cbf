//! UI and persistence formats for the shooting gallery
//!
//! Uses postcard for compact binary serialization

use postcard::{from_bytes, to_allocvec};

/// Current `HighScoreRecord` layout version
pub const HIGH_SCORE_VERSION: u8 = 1;

// ============================================================================
// UI Messages (Core to Presentation layer)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SoundCue {
    /// Rewarding target hit
    Hit,
    /// Penalty target hit
    BadHit,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UiMessage {
    /// Score label text changed
    ScoreLabel { score: i32 },

    /// Play an outcome sound
    PlaySound { cue: SoundCue },

    /// Show the round-over banner
    RoundOverBanner,

    /// Remove the round-over banner
    HideRoundOverBanner,

    /// "Play again" summary, shown a few seconds after the round ends
    ReplayPrompt { final_score: i32, high_score: i32 },
}

// ============================================================================
// Persisted State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HighScoreRecord {
    pub version: u8,
    pub high_score: i32,
}

impl HighScoreRecord {
    pub fn new(high_score: i32) -> Self {
        Self {
            version: HIGH_SCORE_VERSION,
            high_score,
        }
    }
}

// ============================================================================
// Serialization Helpers
// ============================================================================

impl UiMessage {
    /// Serialize UI message to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize UI message from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}

impl HighScoreRecord {
    /// Serialize record to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize record from bytes, rejecting unknown layout versions
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        let record: Self = from_bytes(bytes)?;
        if record.version != HIGH_SCORE_VERSION {
            return Err(postcard::Error::DeserializeBadEncoding);
        }
        Ok(record)
    }
}
