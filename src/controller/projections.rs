//! Provides [`ProjectionMode`] and the conversions between it and a Bevy [`Projection`].

use bevy_reflect::prelude::*;
use bevy_render::camera::{OrthographicProjection, PerspectiveProjection, Projection, ScalingMode};

/// Distance between an orthographic camera and its pivot. Orthographic zoom is expressed through
/// the view height, so the camera only needs to stay in front of the scene.
pub const ORTHOGRAPHIC_DISTANCE: f32 = 1000.0;

/// The projection type of the navigated camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum ProjectionMode {
    /// Perspective projection. The offset distance moves the camera.
    #[default]
    Perspective,
    /// Orthographic projection. The offset distance sets the view height.
    Orthographic,
}

impl ProjectionMode {
    /// The mode of an existing projection. Custom projections are treated as perspective.
    pub fn of(projection: &Projection) -> Self {
        match projection {
            Projection::Orthographic(_) => ProjectionMode::Orthographic,
            _ => ProjectionMode::Perspective,
        }
    }

    /// Is this the orthographic mode?
    pub fn is_orthographic(self) -> bool {
        self == ProjectionMode::Orthographic
    }
}

/// Settings used when the camera has a perspective [`Projection`].
#[derive(Debug, Clone, Default, Reflect)]
pub struct PerspectiveSettings {
    /// The projection restored when switching back from orthographic. Updated from the camera every
    /// time it switches away from perspective, so a custom field of view survives the round trip.
    pub projection: PerspectiveProjection,
}

/// Settings used when the camera has an orthographic [`Projection`].
#[derive(Debug, Clone, Reflect)]
pub struct OrthographicSettings {
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane. Must reach past the pivot, which sits [`ORTHOGRAPHIC_DISTANCE`] away.
    pub far: f32,
}

impl Default for OrthographicSettings {
    fn default() -> Self {
        Self {
            near: 0.0,
            far: 2.0 * ORTHOGRAPHIC_DISTANCE,
        }
    }
}

impl OrthographicSettings {
    /// An orthographic projection showing `view_height` world units vertically.
    pub fn projection(&self, view_height: f32) -> OrthographicProjection {
        OrthographicProjection {
            near: self.near,
            far: self.far,
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: view_height,
            },
            ..OrthographicProjection::default_3d()
        }
    }
}

/// Switch `projection` to `mode`. Switching away from perspective stashes the perspective settings
/// so they can be restored. Returns `false` if the projection was already in that mode.
pub fn switch_projection(
    projection: &mut Projection,
    mode: ProjectionMode,
    view_height: f32,
    perspective: &mut PerspectiveSettings,
    orthographic: &OrthographicSettings,
) -> bool {
    if ProjectionMode::of(projection) == mode {
        return false;
    }
    match mode {
        ProjectionMode::Orthographic => {
            if let Projection::Perspective(current) = projection {
                perspective.projection = current.clone();
            }
            *projection = Projection::Orthographic(orthographic.projection(view_height));
        }
        ProjectionMode::Perspective => {
            *projection = Projection::Perspective(perspective.projection.clone());
        }
    }
    true
}

/// Set the view height of an orthographic projection. Does nothing for other projections.
pub fn set_orthographic_height(projection: &mut Projection, view_height: f32) {
    if let Projection::Orthographic(ortho) = projection {
        ortho.scaling_mode = ScalingMode::FixedVertical {
            viewport_height: view_height,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_restores_field_of_view() {
        let mut projection = Projection::Perspective(PerspectiveProjection {
            fov: 0.5,
            ..Default::default()
        });
        let mut perspective = PerspectiveSettings::default();
        let orthographic = OrthographicSettings::default();

        assert!(switch_projection(
            &mut projection,
            ProjectionMode::Orthographic,
            42.0,
            &mut perspective,
            &orthographic,
        ));
        let Projection::Orthographic(ortho) = &projection else {
            panic!("expected orthographic projection");
        };
        assert!(matches!(
            ortho.scaling_mode,
            ScalingMode::FixedVertical { viewport_height } if viewport_height == 42.0
        ));

        assert!(switch_projection(
            &mut projection,
            ProjectionMode::Perspective,
            42.0,
            &mut perspective,
            &orthographic,
        ));
        let Projection::Perspective(persp) = &projection else {
            panic!("expected perspective projection");
        };
        assert_eq!(persp.fov, 0.5);
    }

    #[test]
    fn switching_to_current_mode_is_a_no_op() {
        let mut projection = Projection::Perspective(PerspectiveProjection::default());
        assert!(!switch_projection(
            &mut projection,
            ProjectionMode::Perspective,
            1.0,
            &mut PerspectiveSettings::default(),
            &OrthographicSettings::default(),
        ));
    }

    #[test]
    fn orthographic_height_ignores_perspective() {
        let mut projection = Projection::Perspective(PerspectiveProjection::default());
        set_orthographic_height(&mut projection, 3.0);
        assert_eq!(ProjectionMode::of(&projection), ProjectionMode::Perspective);
    }
}
