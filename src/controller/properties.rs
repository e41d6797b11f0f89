//! Provides [`NavigationIns`], the observable input surface of an
//! [`OrbitNavigation`](super::component::OrbitNavigation).
//!
//! Each input is a [`Property`]: a value plus a changed flag. Writes made with [`Property::set`]
//! raise the flag and are picked up by the next update pass. Writes made with
//! [`Property::set_silent`] only replace the value. The controller uses silent writes when it
//! mirrors its own state back into the properties, so the next pass does not read it back in.

use bevy_math::prelude::*;
use bevy_reflect::prelude::*;

use super::{presets::ViewPreset, projections::ProjectionMode};

/// A value with a changed flag.
#[derive(Debug, Clone, Reflect)]
pub struct Property<T> {
    value: T,
    changed: bool,
}

impl<T> Property<T> {
    /// A property holding `value` that is not yet marked as changed.
    pub fn new(value: T) -> Self {
        Self {
            value,
            changed: false,
        }
    }

    /// The current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and mark the property as changed.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.changed = true;
    }

    /// Replace the value without marking the property as changed.
    pub fn set_silent(&mut self, value: T) {
        self.value = value;
    }

    /// Mark the property as changed without replacing its value.
    pub fn touch(&mut self) {
        self.changed = true;
    }

    /// Has the property been written with [`Property::set`] since the last update pass?
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Returns the changed flag and clears it.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}

impl<T: Copy> Property<T> {
    /// A copy of the current value.
    pub fn value(&self) -> T {
        self.value
    }
}

/// A one-shot trigger. It carries no value. Firing it raises the flag until the next update pass.
#[derive(Debug, Clone, Copy, Default, Reflect)]
pub struct Signal {
    fired: bool,
}

impl Signal {
    /// Request the action bound to this signal on the next update pass.
    pub fn fire(&mut self) {
        self.fired = true;
    }

    /// Has the signal fired since the last update pass?
    pub fn is_fired(&self) -> bool {
        self.fired
    }

    /// Returns whether the signal fired and resets it.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.fired)
    }
}

/// The input properties of an orbit navigation, in the order the update pass evaluates them.
#[derive(Debug, Clone, Reflect)]
pub struct NavigationIns {
    /// `View.Preset`: one-shot orientation preset, reads back as [`ViewPreset::None`] once applied.
    pub preset: Property<ViewPreset>,
    /// `View.Projection`: projection of the bound camera.
    pub projection: Property<ProjectionMode>,
    /// `Manip.Enabled`: when false, input passes through and the camera is left alone.
    pub enabled: Property<bool>,
    /// `Manip.Setup`: fit the active scene into view.
    pub setup: Signal,
    /// `Manip.Orbit`: pitch, yaw and roll in degrees.
    pub orbit: Property<Vec3>,
    /// `Manip.Offset`: pan x, pan y and distance (or orthographic view height).
    pub offset: Property<Vec3>,
    /// `Manip.Min.Orbit`
    pub min_orbit: Property<Vec3>,
    /// `Manip.Min.Offset`
    pub min_offset: Property<Vec3>,
    /// `Manip.Max.Orbit`
    pub max_orbit: Property<Vec3>,
    /// `Manip.Max.Offset`
    pub max_offset: Property<Vec3>,
}

impl Default for NavigationIns {
    fn default() -> Self {
        Self {
            preset: Property::new(ViewPreset::None),
            projection: Property::new(ProjectionMode::Perspective),
            enabled: Property::new(true),
            setup: Signal::default(),
            orbit: Property::new(Vec3::new(-25.0, -25.0, 0.0)),
            offset: Property::new(Vec3::new(0.0, 0.0, 100.0)),
            min_orbit: Property::new(Vec3::new(-90.0, f32::NEG_INFINITY, f32::NEG_INFINITY)),
            min_offset: Property::new(Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, 0.1)),
            max_orbit: Property::new(Vec3::new(90.0, f32::INFINITY, f32::INFINITY)),
            max_offset: Property::new(Vec3::INFINITY),
        }
    }
}

impl NavigationIns {
    /// Property paths, in evaluation order.
    pub const PATHS: [&'static str; 10] = [
        "View.Preset",
        "View.Projection",
        "Manip.Enabled",
        "Manip.Setup",
        "Manip.Orbit",
        "Manip.Offset",
        "Manip.Min.Orbit",
        "Manip.Min.Offset",
        "Manip.Max.Orbit",
        "Manip.Max.Offset",
    ];

    fn flags(&self) -> [bool; 10] {
        [
            self.preset.is_changed(),
            self.projection.is_changed(),
            self.enabled.is_changed(),
            self.setup.is_fired(),
            self.orbit.is_changed(),
            self.offset.is_changed(),
            self.min_orbit.is_changed(),
            self.min_offset.is_changed(),
            self.max_orbit.is_changed(),
            self.max_offset.is_changed(),
        ]
    }

    /// Is any property pending for the next update pass?
    pub fn any_changed(&self) -> bool {
        self.flags().into_iter().any(|changed| changed)
    }

    /// Paths of the properties pending for the next update pass.
    pub fn changed_paths(&self) -> Vec<&'static str> {
        Self::PATHS
            .into_iter()
            .zip(self.flags())
            .filter_map(|(path, changed)| changed.then_some(path))
            .collect()
    }

    /// Were any of the clamp bounds written?
    pub fn bounds_changed(&self) -> bool {
        self.min_orbit.is_changed()
            || self.min_offset.is_changed()
            || self.max_orbit.is_changed()
            || self.max_offset.is_changed()
    }

    /// Clear every changed flag. Called at the end of each update pass.
    pub fn clear_changed(&mut self) {
        self.preset.take_changed();
        self.projection.take_changed();
        self.enabled.take_changed();
        self.setup.take();
        self.orbit.take_changed();
        self.offset.take_changed();
        self.min_orbit.take_changed();
        self.min_offset.take_changed();
        self.max_orbit.take_changed();
        self.max_offset.take_changed();
    }
}
