use glam::Vec2;

use crate::params::Params;

/// Kind of target sliding across the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    RewardA,
    RewardB,
    Penalty, // Must not be shot
}

impl TargetKind {
    pub const ALL: [TargetKind; 3] = [
        TargetKind::RewardA,
        TargetKind::RewardB,
        TargetKind::Penalty,
    ];

    pub fn is_rewarding(self) -> bool {
        match self {
            TargetKind::RewardA | TargetKind::RewardB => true,
            TargetKind::Penalty => false,
        }
    }

    /// Score change when this target is hit
    pub fn score_delta(self) -> i32 {
        match self {
            TargetKind::RewardA | TargetKind::RewardB => Params::REWARD_POINTS,
            TargetKind::Penalty => Params::PENALTY_POINTS,
        }
    }

    /// Sound cue played when this target is hit
    pub fn hit_sound(self) -> Sound {
        match self {
            TargetKind::RewardA | TargetKind::RewardB => Sound::Hit,
            TargetKind::Penalty => Sound::BadHit,
        }
    }
}

/// Outcome sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Hit,
    BadHit,
}

/// Fixed spawn origin and travel direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lane {
    pub origin: Vec2,
    pub velocity: Vec2,
}

impl Lane {
    pub fn new(origin: Vec2, velocity: Vec2) -> Self {
        Self { origin, velocity }
    }

    /// Lane entering from the left edge, travelling right
    pub fn left_to_right(y: f32, speed: f32) -> Self {
        Self::new(Vec2::new(Params::LANE_LEFT_X, y), Vec2::new(speed, 0.0))
    }

    /// Lane entering from the right edge, travelling left
    pub fn right_to_left(y: f32, speed: f32) -> Self {
        Self::new(Vec2::new(Params::LANE_RIGHT_X, y), Vec2::new(-speed, 0.0))
    }
}

/// One target to create, produced by a spawn tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub kind: TargetKind,
    pub lane: u8,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: u32, // Width and height; collision radius is half of it
}

impl SpawnRequest {
    pub fn radius(&self) -> f32 {
        self.size as f32 / 2.0
    }
}

/// Target component - a live target in the world
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub kind: TargetKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Target {
    pub fn new(kind: TargetKind, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            kind,
            pos,
            vel,
            radius,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance_squared(point) <= self.radius * self.radius
    }
}

impl From<&SpawnRequest> for Target {
    fn from(req: &SpawnRequest) -> Self {
        Self::new(req.kind, req.position, req.velocity, req.radius())
    }
}

/// Spawn order, used to keep hit-test results deterministic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpawnSeq(pub u64);
