//! Provides [`ViewPreset`], the fixed camera orientations a user can jump to.

use bevy_math::prelude::*;
use bevy_reflect::prelude::*;

/// A named camera orientation. Selecting anything other than [`ViewPreset::None`] overwrites the
/// orbit once; the preset then reads back as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum ViewPreset {
    /// Look at the left side of the scene.
    Left,
    /// Look at the right side of the scene.
    Right,
    /// Look down from above.
    Top,
    /// Look up from below.
    Bottom,
    /// Look along -Z.
    Front,
    /// Look along +Z.
    Back,
    /// No preset pending.
    #[default]
    None,
}

impl ViewPreset {
    /// Every preset that selects an orientation.
    pub const ORIENTATIONS: [ViewPreset; 6] = [
        ViewPreset::Left,
        ViewPreset::Right,
        ViewPreset::Top,
        ViewPreset::Bottom,
        ViewPreset::Front,
        ViewPreset::Back,
    ];

    /// Orbit angles (pitch, yaw, roll) in degrees for this preset.
    pub fn orbit(self) -> Option<Vec3> {
        let [pitch, yaw, roll] = match self {
            ViewPreset::Left => [0.0, -90.0, 0.0],
            ViewPreset::Right => [0.0, 90.0, 0.0],
            ViewPreset::Top => [-90.0, 0.0, 0.0],
            ViewPreset::Bottom => [90.0, 0.0, 0.0],
            ViewPreset::Front => [0.0, 0.0, 0.0],
            ViewPreset::Back => [0.0, 180.0, 0.0],
            ViewPreset::None => return None,
        };
        Some(Vec3::new(pitch, yaw, roll))
    }
}
