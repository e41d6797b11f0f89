//! A `bevy_orbit_navigation` extension that draws an indicator at the orbit pivot while the user is
//! rotating the camera. This makes it obvious what point the camera is rotating around.

use bevy_app::prelude::*;
use bevy_color::Color;
use bevy_ecs::prelude::*;
use bevy_gizmos::prelude::*;
use bevy_math::{prelude::*, Isometry3d};
use bevy_reflect::prelude::*;
use bevy_render::camera::Projection;

use crate::{
    controller::{
        component::OrbitNavigation,
        manipulator::{ManipMode, OrbitManipulator},
        NavigationSet,
    },
    scene::SceneAccess,
};

/// See the [module](self) docs.
pub struct PivotIndicatorPlugin;

impl Plugin for PivotIndicatorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, draw_pivot.after(NavigationSet::Tick))
            .register_type::<PivotIndicator>();
    }
}

/// Optional. Configures whether or not an [`OrbitNavigation`] should show a pivot indicator while
/// orbiting. The indicator is enabled if this component is not present.
#[derive(Debug, Component, Reflect)]
#[reflect(Component)]
pub struct PivotIndicator {
    /// Should the indicator be visible for this navigation?
    pub enabled: bool,
}

impl Default for PivotIndicator {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Radius of the indicator, scaled with what the camera actually shows so it keeps a constant
/// size on screen.
pub fn indicator_scale(manip: &OrbitManipulator, projection: &Projection) -> f32 {
    let extent = match projection {
        Projection::Perspective(perspective) => manip.offset().z * perspective.fov,
        _ => manip.pose().orthographic_height.unwrap_or(manip.offset().z),
    };
    extent * 0.01
}

/// Use gizmos to draw the orbit pivot in world space.
pub fn draw_pivot(
    navigations: Query<(&OrbitNavigation, Option<&PivotIndicator>)>,
    scenes: SceneAccess,
    projections: Query<&Projection>,
    mut gizmos: Gizmos,
) {
    for (navigation, _) in navigations
        .iter()
        .filter(|(_, indicator)| indicator.map(|i| i.enabled).unwrap_or(true))
    {
        let manip = navigation.manipulator();
        if manip.mode() != Some(ManipMode::Orbit) {
            continue;
        }
        let Some(projection) = navigation
            .bound_camera(&scenes)
            .and_then(|camera| projections.get(camera).ok())
        else {
            continue;
        };
        let pose = manip.pose();
        let pivot = manip.pivot();
        let scale = indicator_scale(manip, projection);

        let left = pose.rotation * Vec3::NEG_X;
        let up = pose.rotation * Vec3::Y;
        // Shift the indicator toward the camera so it does not clip the object it sits on.
        let pivot = pivot + (pose.translation - pivot).normalize_or_zero() * scale;

        let color = Color::WHITE;
        let arm_length = 0.4;
        let offset = 1.5 * scale;

        gizmos.circle(Isometry3d::new(pivot, pose.rotation), scale, color);
        for direction in [left, -left, up, -up] {
            gizmos.ray(pivot + offset * direction, offset * arm_length * direction, color);
        }
    }
}
