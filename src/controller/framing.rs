//! Fit-to-view: how far the camera must be from its pivot so a bounding box fills the viewport.

use bevy_math::{prelude::*, Mat3A, Vec3A};
use bevy_render::{camera::Projection, primitives::Aabb};

/// The parts of a camera projection that framing depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lens {
    /// A perspective camera.
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f32,
        /// Width divided by height.
        aspect: f32,
    },
    /// An orthographic camera.
    Orthographic,
}

impl Lens {
    /// Extract the lens of a Bevy projection. Custom projections cannot be framed.
    pub fn of(projection: &Projection) -> Option<Self> {
        match projection {
            Projection::Perspective(perspective) => Some(Lens::Perspective {
                fov_y: perspective.fov,
                aspect: perspective.aspect_ratio,
            }),
            Projection::Orthographic(_) => Some(Lens::Orthographic),
            Projection::Custom(_) => None,
        }
    }
}

/// Size of `aabb` once it has been rotated into the view space of a camera with orientation
/// `camera_rotation`. Translation does not change the size of the box, so it is not needed.
pub fn view_space_size(aabb: &Aabb, camera_rotation: Quat) -> Vec3 {
    let view_from_world = Mat3A::from_quat(camera_rotation.inverse());
    let center = aabb.center;
    let half = aabb.half_extents;

    let mut min = Vec3A::INFINITY;
    let mut max = Vec3A::NEG_INFINITY;
    for corner in 0..8 {
        let sign = Vec3A::new(
            if corner & 1 == 0 { -1.0 } else { 1.0 },
            if corner & 2 == 0 { -1.0 } else { 1.0 },
            if corner & 4 == 0 { -1.0 } else { 1.0 },
        );
        let point = view_from_world * (center + sign * half);
        min = min.min(point);
        max = max.max(point);
    }
    (max - min).into()
}

/// Distance from the pivot that keeps a box of view space `size` completely visible.
///
/// For perspective lenses the larger of the width (normalized by the aspect ratio) and the height
/// is fitted to the vertical field of view, then pushed back by the depth of the box. Orthographic
/// lenses only need to clear the depth of the box.
pub fn fit_distance(size: Vec3, lens: Lens) -> f32 {
    match lens {
        Lens::Perspective { fov_y, aspect } => {
            let aspect = if aspect.is_finite() && aspect > 0.0 {
                aspect
            } else {
                1.0
            };
            let size_xy = (size.x / aspect).max(size.y);
            size.z + size_xy * 0.5 + size_xy / (2.0 * (fov_y * 0.5).tan())
        }
        Lens::Orthographic => size.z * 2.0,
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn zero_sized_box_needs_no_distance() {
        let aabb = Aabb::from_min_max(Vec3::ZERO, Vec3::ZERO);
        let size = view_space_size(&aabb, Quat::IDENTITY);
        let lens = Lens::Perspective {
            fov_y: FRAC_PI_2,
            aspect: 1.0,
        };
        assert_eq!(fit_distance(size, lens), 0.0);
    }

    #[test]
    fn unit_cube_at_ninety_degrees() {
        let aabb = Aabb::from_min_max(Vec3::splat(-0.5), Vec3::splat(0.5));
        let size = view_space_size(&aabb, Quat::IDENTITY);
        assert!(size.abs_diff_eq(Vec3::ONE, 1e-6));

        // tan(45°) = 1: depth 1 + half size 0.5 + 1 / 2
        let lens = Lens::Perspective {
            fov_y: FRAC_PI_2,
            aspect: 1.0,
        };
        assert!((fit_distance(size, lens) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn wide_aspect_fits_height() {
        let size = Vec3::new(2.0, 1.0, 0.0);
        let narrow = fit_distance(
            size,
            Lens::Perspective {
                fov_y: FRAC_PI_2,
                aspect: 1.0,
            },
        );
        let wide = fit_distance(
            size,
            Lens::Perspective {
                fov_y: FRAC_PI_2,
                aspect: 2.0,
            },
        );
        assert!((narrow - 2.0).abs() < 1e-5);
        assert!((wide - 1.0).abs() < 1e-5);
    }

    #[test]
    fn rotation_changes_view_space_extent() {
        let aabb = Aabb::from_min_max(Vec3::new(-2.0, -0.5, -0.5), Vec3::new(2.0, 0.5, 0.5));
        let side = view_space_size(&aabb, Quat::from_rotation_y(FRAC_PI_2));
        assert!(side.abs_diff_eq(Vec3::new(1.0, 1.0, 4.0), 1e-5));
    }

    #[test]
    fn orthographic_doubles_depth() {
        assert_eq!(fit_distance(Vec3::new(5.0, 5.0, 3.0), Lens::Orthographic), 6.0);
    }
}
