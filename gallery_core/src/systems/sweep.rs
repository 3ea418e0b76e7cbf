use crate::{Config, TargetHandle};
use glam::Vec2;

/// Targets that drifted past the left-side boundary
pub fn offscreen_targets(
    positions: impl IntoIterator<Item = (TargetHandle, Vec2)>,
    config: &Config,
) -> Vec<TargetHandle> {
    positions
        .into_iter()
        .filter(|(_, pos)| config.is_offscreen(pos.x))
        .map(|(handle, _)| handle)
        .collect()
}
