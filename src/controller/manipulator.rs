//! Provides [`OrbitManipulator`], which turns pointer and wheel input into orbit angles and offsets.
//!
//! The manipulator owns the camera pose state:
//!
//! - `orbit`: pitch, yaw and roll in degrees, applied in YXZ order (yaw, then pitch, then roll).
//! - `offset`: pan in x and y, and the distance from the pivot in z. Orthographic cameras use the
//!   distance as the view height instead.
//!
//! Every write is clamped component-wise into the current bounds, and changing the bounds re-clamps
//! the state immediately.

use bevy_input::mouse::MouseButton;
use bevy_math::{prelude::*, EulerRot};
use bevy_reflect::prelude::*;
use bevy_transform::prelude::*;

use super::{
    inputs::{PointerEventKind, PointerInput, PointerSource, TriggerInput},
    projections::ORTHOGRAPHIC_DISTANCE,
};

/// How a drag manipulates the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ManipMode {
    /// Rotate around the pivot: horizontal motion changes yaw, vertical motion changes pitch.
    Orbit,
    /// Move the pivot in the view plane.
    Pan,
    /// Rotate around the view axis.
    Roll,
    /// Move toward or away from the pivot.
    Dolly,
    /// Two finger gesture: pan with the centroid, dolly with the pinch.
    PanDolly,
}

impl ManipMode {
    /// The mode a pointer press selects.
    pub fn for_pointer(event: &PointerInput) -> Option<Self> {
        match event.source {
            PointerSource::Mouse | PointerSource::Pen => match event.button? {
                MouseButton::Left if event.modifiers.ctrl => Some(ManipMode::Pan),
                MouseButton::Left if event.modifiers.alt => Some(ManipMode::Dolly),
                MouseButton::Left => Some(ManipMode::Orbit),
                MouseButton::Right if event.modifiers.alt => Some(ManipMode::Roll),
                MouseButton::Right => Some(ManipMode::Pan),
                MouseButton::Middle => Some(ManipMode::Dolly),
                _ => None,
            },
            PointerSource::Touch => Self::for_touch_count(event.pointer_count),
        }
    }

    fn for_touch_count(count: u32) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(ManipMode::Orbit),
            2 => Some(ManipMode::PanDolly),
            _ => Some(ManipMode::Pan),
        }
    }
}

/// Where the manipulator is in a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum DragPhase {
    /// No gesture.
    #[default]
    Idle,
    /// A pointer is down. Motion is applied every tick.
    Active,
    /// The pointer was released and the remaining motion is decaying.
    Release,
}

/// The sensitivity of the manipulator to inputs.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct Sensitivity {
    /// Degrees of rotation for a drag across the full viewport height.
    pub orbit: f32,
    /// Relative distance change per pixel of vertical dolly drag.
    pub dolly: f32,
    /// Relative distance change per wheel notch.
    pub wheel: f32,
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self {
            orbit: 300.0,
            dolly: 0.0075,
            wheel: 0.07,
        }
    }
}

/// Amount of motion that continues after a drag is released.
#[derive(Debug, Clone, Copy, Reflect)]
pub struct Momentum {
    /// When false, releasing the pointer stops the camera immediately.
    pub enabled: bool,
    /// Fraction of the motion kept from one tick to the next.
    pub decay: f32,
    /// Motion, in pixels per tick summed over both axes, below which the camera comes to rest.
    pub stop_threshold: f32,
}

impl Default for Momentum {
    fn default() -> Self {
        Self {
            enabled: true,
            decay: 0.85,
            stop_threshold: 0.1,
        }
    }
}

/// A camera transform produced by the manipulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPose {
    /// Camera position relative to the pivot origin.
    pub translation: Vec3,
    /// Camera orientation.
    pub rotation: Quat,
    /// View height, when the camera is orthographic.
    pub orthographic_height: Option<f32>,
}

impl OrbitPose {
    /// Write the position and orientation into a [`Transform`], leaving its scale alone.
    pub fn apply_to(&self, transform: &mut Transform) {
        transform.translation = self.translation;
        transform.rotation = self.rotation;
    }
}

/// Clamp bounds for orbit and offset. Either end of an axis may be infinite.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct OrbitBounds {
    /// Lower orbit bound, degrees.
    pub min_orbit: Vec3,
    /// Upper orbit bound, degrees.
    pub max_orbit: Vec3,
    /// Lower offset bound.
    pub min_offset: Vec3,
    /// Upper offset bound.
    pub max_offset: Vec3,
}

impl Default for OrbitBounds {
    fn default() -> Self {
        Self {
            min_orbit: Vec3::new(-90.0, f32::NEG_INFINITY, f32::NEG_INFINITY),
            max_orbit: Vec3::new(90.0, f32::INFINITY, f32::INFINITY),
            min_offset: Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, 0.1),
            max_offset: Vec3::INFINITY,
        }
    }
}

impl OrbitBounds {
    /// Swap any axis whose lower bound exceeds its upper bound. Returns true if anything was
    /// swapped.
    pub fn normalize(&mut self) -> bool {
        let orbit_inverted = self.min_orbit.cmpgt(self.max_orbit).any();
        let offset_inverted = self.min_offset.cmpgt(self.max_offset).any();
        let (min_orbit, max_orbit) = (self.min_orbit, self.max_orbit);
        let (min_offset, max_offset) = (self.min_offset, self.max_offset);
        self.min_orbit = min_orbit.min(max_orbit);
        self.max_orbit = min_orbit.max(max_orbit);
        self.min_offset = min_offset.min(max_offset);
        self.max_offset = min_offset.max(max_offset);
        orbit_inverted || offset_inverted
    }
}

fn clamp(value: Vec3, min: Vec3, max: Vec3) -> Vec3 {
    value.max(min).min(max)
}

/// Smallest distance multiplier a single tick of dolly input can apply.
const MIN_DOLLY_SCALE: f32 = 0.25;

/// Distance multiplier for a relative dolly `amount`. Never reaches zero, so a fast flick moves the
/// camera closer without crossing the pivot.
fn dolly_scale(amount: f32) -> f32 {
    (1.0 + amount).max(MIN_DOLLY_SCALE)
}

/// Accumulates pointer and wheel input and converts it into an orbit pose. See the
/// [module](self) docs.
#[derive(Debug, Clone, Reflect)]
pub struct OrbitManipulator {
    orbit: Vec3,
    offset: Vec3,
    bounds: OrbitBounds,
    /// Input sensitivity.
    pub sensitivity: Sensitivity,
    /// Motion after release.
    pub momentum: Momentum,
    orthographic: bool,
    mode: Option<ManipMode>,
    phase: DragPhase,
    delta: Vec2,
    pinch: f32,
    last_pinch_distance: Option<f32>,
    wheel: f32,
    viewport_size: Vec2,
}

impl Default for OrbitManipulator {
    fn default() -> Self {
        Self {
            orbit: Vec3::ZERO,
            offset: Vec3::new(0.0, 0.0, 100.0),
            bounds: OrbitBounds::default(),
            sensitivity: Sensitivity::default(),
            momentum: Momentum::default(),
            orthographic: false,
            mode: None,
            phase: DragPhase::Idle,
            delta: Vec2::ZERO,
            pinch: 1.0,
            last_pinch_distance: None,
            wheel: 0.0,
            viewport_size: Vec2::splat(100.0),
        }
    }
}

impl OrbitManipulator {
    /// Orbit angles (pitch, yaw, roll) in degrees.
    pub fn orbit(&self) -> Vec3 {
        self.orbit
    }

    /// Pan x, pan y and distance.
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    /// Current clamp bounds.
    pub fn bounds(&self) -> &OrbitBounds {
        &self.bounds
    }

    /// Set the orbit angles, clamped into bounds.
    pub fn set_orbit(&mut self, orbit: Vec3) {
        self.orbit = clamp(orbit, self.bounds.min_orbit, self.bounds.max_orbit);
    }

    /// Set the offset, clamped into bounds.
    pub fn set_offset(&mut self, offset: Vec3) {
        self.offset = clamp(offset, self.bounds.min_offset, self.bounds.max_offset);
    }

    /// Replace the clamp bounds and re-clamp the current state. Inverted axes are swapped; the
    /// return value reports whether that happened.
    pub fn set_bounds(&mut self, mut bounds: OrbitBounds) -> bool {
        let normalized = bounds.normalize();
        self.bounds = bounds;
        self.set_orbit(self.orbit);
        self.set_offset(self.offset);
        normalized
    }

    /// Is the offset distance interpreted as an orthographic view height?
    pub fn is_orthographic(&self) -> bool {
        self.orthographic
    }

    /// Switch between distance (perspective) and view height (orthographic) mapping.
    pub fn set_orthographic(&mut self, orthographic: bool) {
        self.orthographic = orthographic;
    }

    /// The size of the viewport input arrives from, used to scale pixel deltas.
    pub fn set_viewport_size(&mut self, size: Vec2) {
        if size.cmpgt(Vec2::ZERO).all() && size.is_finite() {
            self.viewport_size = size;
        }
    }

    /// Current drag phase.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Current manipulation mode, if a gesture is in progress.
    pub fn mode(&self) -> Option<ManipMode> {
        self.mode
    }

    /// Is a pointer currently dragging the camera?
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Active
    }

    /// Abort any gesture, momentum and pending wheel input.
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
        self.mode = None;
        self.delta = Vec2::ZERO;
        self.pinch = 1.0;
        self.last_pinch_distance = None;
        self.wheel = 0.0;
    }

    /// Feed a pointer event. Motion is accumulated and applied by [`OrbitManipulator::advance`].
    pub fn on_pointer(&mut self, event: &PointerInput) {
        match event.kind {
            PointerEventKind::Down => {
                if event.is_primary {
                    self.phase = DragPhase::Active;
                    self.delta = Vec2::ZERO;
                    self.pinch = 1.0;
                }
                self.mode = ManipMode::for_pointer(event);
                self.last_pinch_distance = event.pinch_distance;
            }
            PointerEventKind::Move => {
                if self.phase != DragPhase::Active {
                    return;
                }
                self.delta += event.delta;
                if let (Some(distance), Some(previous)) =
                    (event.pinch_distance, self.last_pinch_distance)
                {
                    if previous > 0.0 {
                        self.pinch *= distance / previous;
                    }
                }
                self.last_pinch_distance = event.pinch_distance;
            }
            PointerEventKind::Up => {
                self.last_pinch_distance = None;
                if event.is_primary {
                    self.phase = if self.momentum.enabled && self.mode.is_some() {
                        DragPhase::Release
                    } else {
                        self.mode = None;
                        DragPhase::Idle
                    };
                } else if event.source == PointerSource::Touch {
                    self.mode = ManipMode::for_touch_count(event.pointer_count.saturating_sub(1));
                }
            }
        }
    }

    /// Feed a wheel event. Each event contributes at most one notch.
    pub fn on_trigger(&mut self, event: &TriggerInput) {
        if event.wheel.is_finite() {
            self.wheel += event.wheel.clamp(-1.0, 1.0);
        }
    }

    /// Apply a drag of `delta` pixels in `mode` right away.
    pub fn apply_pointer_delta(&mut self, delta: Vec2, mode: ManipMode) {
        self.apply_motion(delta, 1.0, mode);
    }

    /// Dolly by `notches` wheel notches right away. Positive values move away from the pivot.
    pub fn apply_wheel_delta(&mut self, notches: f32) {
        self.update_pose(Vec2::ZERO, dolly_scale(notches * self.sensitivity.wheel), Vec3::ZERO);
    }

    /// Apply the input accumulated since the last tick, and any momentum. Returns true if the
    /// orbit or offset changed.
    pub fn advance(&mut self) -> bool {
        let before = (self.orbit, self.offset);

        if self.wheel != 0.0 {
            let wheel = std::mem::take(&mut self.wheel);
            self.apply_wheel_delta(wheel);
        }

        match self.phase {
            DragPhase::Idle => {}
            DragPhase::Active => {
                if self.delta != Vec2::ZERO || self.pinch != 1.0 {
                    if let Some(mode) = self.mode {
                        self.apply_motion(self.delta, self.pinch, mode);
                    }
                    self.delta = Vec2::ZERO;
                    self.pinch = 1.0;
                }
            }
            DragPhase::Release => {
                self.delta *= self.momentum.decay;
                self.pinch = 1.0;
                let remaining = self.delta.x.abs() + self.delta.y.abs();
                match self.mode {
                    Some(mode) if remaining >= self.momentum.stop_threshold => {
                        self.apply_motion(self.delta, 1.0, mode);
                    }
                    _ => {
                        self.phase = DragPhase::Idle;
                        self.mode = None;
                        self.delta = Vec2::ZERO;
                    }
                }
            }
        }

        before != (self.orbit, self.offset)
    }

    fn apply_motion(&mut self, delta: Vec2, pinch: f32, mode: ManipMode) {
        match mode {
            ManipMode::Orbit => self.update_pose(Vec2::ZERO, 1.0, Vec3::new(delta.y, delta.x, 0.0)),
            ManipMode::Pan => self.update_pose(delta, 1.0, Vec3::ZERO),
            ManipMode::Roll => self.update_pose(Vec2::ZERO, 1.0, Vec3::new(0.0, 0.0, delta.x)),
            ManipMode::Dolly => self.update_pose(
                Vec2::ZERO,
                dolly_scale(delta.y * self.sensitivity.dolly),
                Vec3::ZERO,
            ),
            ManipMode::PanDolly => {
                let pinch_scale = (pinch - 1.0) * 0.5 + 1.0;
                let scale = if pinch_scale > 0.0 { pinch_scale.recip() } else { 1.0 };
                self.update_pose(delta, scale, Vec3::ZERO)
            }
        }
    }

    /// `pan` in pixels, `scale` as a distance multiplier, `rotate` as (pitch, yaw, roll) pixels.
    fn update_pose(&mut self, pan: Vec2, scale: f32, rotate: Vec3) {
        let height = self.viewport_size.y;

        // Dragging moves the scene, so the camera moves the opposite way.
        let degrees_per_pixel = self.sensitivity.orbit / height;
        self.set_orbit(self.orbit - rotate * degrees_per_pixel);

        let units_per_pixel = self.offset.z / height;
        let offset = Vec3::new(
            self.offset.x - pan.x * units_per_pixel,
            self.offset.y + pan.y * units_per_pixel,
            self.offset.z * scale,
        );
        if offset.is_finite() {
            self.set_offset(offset);
        }
    }

    /// The camera pose for the current state.
    ///
    /// The pivot sits at the origin of the navigation space, shifted by the pan offset in the
    /// camera's view plane. Perspective cameras sit `offset.z` behind the pivot; orthographic
    /// cameras sit a fixed distance behind it and show `offset.z` units vertically.
    pub fn pose(&self) -> OrbitPose {
        let rotation = orbit_rotation(self.orbit);
        let local = if self.orthographic {
            Vec3::new(self.offset.x, self.offset.y, ORTHOGRAPHIC_DISTANCE)
        } else {
            self.offset
        };
        OrbitPose {
            translation: rotation * local,
            rotation,
            orthographic_height: self.orthographic.then_some(self.offset.z),
        }
    }

    /// World position of the point the camera orbits around.
    pub fn pivot(&self) -> Vec3 {
        orbit_rotation(self.orbit) * Vec3::new(self.offset.x, self.offset.y, 0.0)
    }
}

/// Camera orientation for orbit angles (pitch, yaw, roll) in degrees.
pub fn orbit_rotation(orbit: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        orbit.y.to_radians(),
        orbit.x.to_radians(),
        orbit.z.to_radians(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::inputs::{Modifiers, ViewportInfo};

    fn viewport() -> ViewportInfo {
        ViewportInfo::new(Vec2::new(300.0, 300.0))
    }

    fn manipulator() -> OrbitManipulator {
        let mut manip = OrbitManipulator::default();
        manip.set_viewport_size(viewport().size);
        manip
    }

    fn press(manip: &mut OrbitManipulator, button: MouseButton, modifiers: Modifiers) {
        let event = PointerInput::mouse(viewport(), PointerEventKind::Down, button)
            .with_modifiers(modifiers);
        manip.on_pointer(&event);
    }

    fn drag(manip: &mut OrbitManipulator, delta: Vec2) {
        let event =
            PointerInput::mouse(viewport(), PointerEventKind::Move, MouseButton::Left).with_delta(delta);
        manip.on_pointer(&event);
    }

    fn release(manip: &mut OrbitManipulator) {
        manip.on_pointer(&PointerInput::mouse(
            viewport(),
            PointerEventKind::Up,
            MouseButton::Left,
        ));
    }

    #[test]
    fn left_drag_orbits() {
        let mut manip = manipulator();
        press(&mut manip, MouseButton::Left, Modifiers::default());
        drag(&mut manip, Vec2::new(30.0, 0.0));
        assert!(manip.advance());
        // 300 degrees per 300 pixel viewport height
        assert_eq!(manip.orbit(), Vec3::new(0.0, -30.0, 0.0));
        assert_eq!(manip.offset(), Vec3::new(0.0, 0.0, 100.0));
    }

    #[test]
    fn right_drag_pans() {
        let mut manip = manipulator();
        press(&mut manip, MouseButton::Right, Modifiers::default());
        drag(&mut manip, Vec2::new(6.0, 6.0));
        assert!(manip.advance());
        assert_eq!(manip.orbit(), Vec3::ZERO);
        // 100 units of distance over 300 pixels
        assert!(manip.offset().abs_diff_eq(Vec3::new(-2.0, 2.0, 100.0), 1e-4));
    }

    #[test]
    fn modifiers_select_mode() {
        let mut manip = manipulator();
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        press(&mut manip, MouseButton::Left, ctrl);
        assert_eq!(manip.mode(), Some(ManipMode::Pan));

        let alt = Modifiers {
            alt: true,
            ..Default::default()
        };
        press(&mut manip, MouseButton::Right, alt);
        assert_eq!(manip.mode(), Some(ManipMode::Roll));

        press(&mut manip, MouseButton::Middle, Modifiers::default());
        assert_eq!(manip.mode(), Some(ManipMode::Dolly));
    }

    #[test]
    fn zero_deltas_report_no_change() {
        let mut manip = manipulator();
        press(&mut manip, MouseButton::Left, Modifiers::default());
        for _ in 0..5 {
            drag(&mut manip, Vec2::ZERO);
            assert!(!manip.advance());
        }
        assert_eq!(manip.orbit(), Vec3::ZERO);
    }

    #[test]
    fn motion_without_press_is_ignored() {
        let mut manip = manipulator();
        drag(&mut manip, Vec2::new(10.0, 10.0));
        assert!(!manip.advance());
        assert_eq!(manip.phase(), DragPhase::Idle);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut manip = manipulator();
        press(&mut manip, MouseButton::Left, Modifiers::default());
        drag(&mut manip, Vec2::new(0.0, -10_000.0));
        assert!(manip.advance());
        assert_eq!(manip.orbit().x, 90.0);
    }

    #[test]
    fn momentum_decays_to_rest() {
        let mut manip = manipulator();
        press(&mut manip, MouseButton::Left, Modifiers::default());
        drag(&mut manip, Vec2::new(10.0, 0.0));
        manip.advance();
        drag(&mut manip, Vec2::new(10.0, 0.0));
        release(&mut manip);
        assert_eq!(manip.phase(), DragPhase::Release);

        let mut ticks = 0;
        while manip.advance() {
            ticks += 1;
            assert!(ticks < 100, "momentum never settled");
        }
        assert_eq!(manip.phase(), DragPhase::Idle);
        assert!(ticks > 1);
    }

    #[test]
    fn release_without_momentum_stops() {
        let mut manip = manipulator();
        manip.momentum.enabled = false;
        press(&mut manip, MouseButton::Left, Modifiers::default());
        drag(&mut manip, Vec2::new(10.0, 0.0));
        release(&mut manip);
        assert_eq!(manip.phase(), DragPhase::Idle);
        assert!(!manip.advance());
    }

    #[test]
    fn wheel_is_limited_per_event_and_clamped() {
        let mut manip = manipulator();
        manip.set_offset(Vec3::new(0.0, 0.0, 100.0));
        manip.on_trigger(&TriggerInput::wheel(viewport(), 50.0));
        assert!(manip.advance());
        assert!((manip.offset().z - 107.0).abs() < 1e-4);

        let mut bounds = *manip.bounds();
        bounds.max_offset.z = 110.0;
        manip.set_bounds(bounds);
        for _ in 0..10 {
            manip.on_trigger(&TriggerInput::wheel(viewport(), 1.0));
        }
        manip.advance();
        assert_eq!(manip.offset().z, 110.0);
    }

    #[test]
    fn fast_dolly_flick_moves_closer_without_snapping() {
        let mut manip = manipulator();
        press(&mut manip, MouseButton::Middle, Modifiers::default());
        drag(&mut manip, Vec2::new(0.0, -200.0));
        assert!(manip.advance());
        let z = manip.offset().z;
        assert!(z > manip.bounds().min_offset.z && z < 100.0, "{z}");
    }

    #[test]
    fn fast_dolly_never_crosses_the_pivot() {
        let mut manip = manipulator();
        let mut bounds = *manip.bounds();
        bounds.min_offset.z = f32::NEG_INFINITY;
        manip.set_bounds(bounds);

        press(&mut manip, MouseButton::Middle, Modifiers::default());
        drag(&mut manip, Vec2::new(0.0, -10_000.0));
        manip.advance();
        assert!(manip.offset().z > 0.0);

        for _ in 0..40 {
            manip.on_trigger(&TriggerInput::wheel(viewport(), -1.0));
        }
        manip.advance();
        assert!(manip.offset().z > 0.0);
    }

    #[test]
    fn changing_bounds_reclamps() {
        let mut manip = manipulator();
        manip.set_orbit(Vec3::new(45.0, 200.0, 0.0));
        let mut bounds = *manip.bounds();
        bounds.max_orbit = Vec3::new(30.0, 180.0, 0.0);
        manip.set_bounds(bounds);
        assert_eq!(manip.orbit(), Vec3::new(30.0, 180.0, 0.0));
    }

    #[test]
    fn inverted_bounds_are_swapped() {
        let mut manip = manipulator();
        let bounds = OrbitBounds {
            min_offset: Vec3::new(0.0, 0.0, 20.0),
            max_offset: Vec3::new(0.0, 0.0, 10.0),
            ..Default::default()
        };
        assert!(manip.set_bounds(bounds));
        assert_eq!(manip.bounds().min_offset.z, 10.0);
        assert_eq!(manip.bounds().max_offset.z, 20.0);
        assert_eq!(manip.offset().z, 20.0);
    }

    #[test]
    fn pose_places_camera_behind_pivot() {
        let mut manip = manipulator();
        manip.set_offset(Vec3::new(0.0, 0.0, 10.0));
        let pose = manip.pose();
        assert!(pose.translation.abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), 1e-5));
        assert_eq!(pose.orthographic_height, None);

        // Looking down from above.
        manip.set_orbit(Vec3::new(-90.0, 0.0, 0.0));
        let pose = manip.pose();
        assert!(pose.translation.abs_diff_eq(Vec3::new(0.0, 10.0, 0.0), 1e-4));
        let forward = pose.rotation * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(Vec3::NEG_Y, 1e-5));
    }

    #[test]
    fn orthographic_pose_uses_offset_as_height() {
        let mut manip = manipulator();
        manip.set_offset(Vec3::new(1.0, 2.0, 8.0));
        manip.set_orthographic(true);
        let pose = manip.pose();
        assert_eq!(pose.orthographic_height, Some(8.0));
        assert!(pose
            .translation
            .abs_diff_eq(Vec3::new(1.0, 2.0, ORTHOGRAPHIC_DISTANCE), 1e-3));
        assert!(manip.pivot().abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-5));
    }

    #[test]
    fn pinch_out_moves_closer() {
        let mut manip = manipulator();
        let touch = |kind, is_primary, pointer_count, pinch| PointerInput {
            source: PointerSource::Touch,
            button: None,
            is_primary,
            pointer_count,
            pinch_distance: pinch,
            ..PointerInput::mouse(viewport(), kind, MouseButton::Left)
        };
        manip.on_pointer(&touch(PointerEventKind::Down, true, 1, None));
        manip.on_pointer(&touch(PointerEventKind::Down, false, 2, Some(100.0)));
        assert_eq!(manip.mode(), Some(ManipMode::PanDolly));
        manip.on_pointer(&touch(PointerEventKind::Move, true, 2, Some(200.0)));
        assert!(manip.advance());
        // pinch ratio 2 -> scale 1 / 1.5
        assert!((manip.offset().z - 100.0 / 1.5).abs() < 1e-3);

        manip.on_pointer(&touch(PointerEventKind::Up, false, 2, None));
        assert_eq!(manip.mode(), Some(ManipMode::Orbit));
    }

    #[test]
    fn cancel_stops_gesture() {
        let mut manip = manipulator();
        press(&mut manip, MouseButton::Left, Modifiers::default());
        drag(&mut manip, Vec2::new(10.0, 0.0));
        manip.cancel();
        assert!(!manip.advance());
        assert!(!manip.is_dragging());
    }
}
