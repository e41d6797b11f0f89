//! The primary [`Component`] of the controller, [`OrbitNavigation`].

use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_reflect::prelude::*;
use bevy_render::{camera::Projection, primitives::Aabb};
use bevy_transform::prelude::*;
use bevy_window::RequestRedraw;

use super::{
    framing::{fit_distance, view_space_size, Lens},
    inputs::{Routing, UnconsumedInput, ViewportInput},
    manipulator::{orbit_rotation, Momentum, OrbitBounds, OrbitManipulator, Sensitivity},
    presets::ViewPreset,
    projections::{
        set_orthographic_height, switch_projection, OrthographicSettings, PerspectiveSettings,
    },
    properties::NavigationIns,
};
use crate::scene::{ActiveScene, ActiveSceneChanged, CameraBinding, SceneAccess};

/// Orbit navigation of the active scene's camera.
///
/// The navigation is controlled in two directions:
///
/// - Input: [`ViewportInput`] events drag, pan and dolly the camera. Events that are consumed here
///   are not forwarded as [`UnconsumedInput`].
/// - Properties: writes to [`OrbitNavigation::ins`] with `set` are applied on the next update pass,
///   in the order the fields are declared. While the user drags, the current orbit and offset are
///   mirrored back into the same properties without marking them as changed.
///
/// The camera itself is not stored. The navigation binds to the [`ActiveScene`] and looks up the
/// scene's camera whenever it needs it, so a missing scene or camera simply means nothing moves.
///
/// # Usage
///
/// ```rust,ignore
/// let camera = commands
///     .spawn((Camera3d::default(), Transform::default()))
///     .id();
/// let scene = commands
///     .spawn((
///         ExplorerScene { active_camera: Some(camera) },
///         SceneBounds::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0)),
///     ))
///     .id();
/// commands.insert_resource(ActiveScene::new(scene));
///
/// let mut navigation = OrbitNavigation::default();
/// navigation.ins.setup.fire(); // frame the scene on the first frame
/// commands.spawn(navigation);
/// ```
#[derive(Debug, Clone, Component, Reflect)]
#[reflect(Component)]
pub struct OrbitNavigation {
    /// The observable input properties.
    pub ins: NavigationIns,
    /// Settings used when the camera has a perspective [`Projection`].
    pub perspective: PerspectiveSettings,
    /// Settings used when the camera has an orthographic [`Projection`].
    pub orthographic: OrthographicSettings,
    manip: OrbitManipulator,
    binding: Option<CameraBinding>,
    refresh_camera: bool,
}

impl Default for OrbitNavigation {
    fn default() -> Self {
        let ins = NavigationIns::default();
        let mut manip = OrbitManipulator::default();
        manip.set_bounds(OrbitBounds {
            min_orbit: ins.min_orbit.value(),
            max_orbit: ins.max_orbit.value(),
            min_offset: ins.min_offset.value(),
            max_offset: ins.max_offset.value(),
        });
        manip.set_orbit(ins.orbit.value());
        manip.set_offset(ins.offset.value());
        manip.set_orthographic(ins.projection.value().is_orthographic());
        Self {
            ins,
            perspective: Default::default(),
            orthographic: Default::default(),
            manip,
            binding: None,
            refresh_camera: true,
        }
    }
}

impl OrbitNavigation {
    /// Replace the input sensitivity.
    pub fn with_sensitivity(mut self, sensitivity: Sensitivity) -> Self {
        self.manip.sensitivity = sensitivity;
        self
    }

    /// Replace the momentum settings.
    pub fn with_momentum(mut self, momentum: Momentum) -> Self {
        self.manip.momentum = momentum;
        self
    }

    /// The manipulator holding the current orbit state.
    pub fn manipulator(&self) -> &OrbitManipulator {
        &self.manip
    }

    /// Input sensitivity.
    pub fn sensitivity_mut(&mut self) -> &mut Sensitivity {
        &mut self.manip.sensitivity
    }

    /// Momentum settings.
    pub fn momentum_mut(&mut self) -> &mut Momentum {
        &mut self.manip.momentum
    }

    /// The scene this navigation is bound to.
    pub fn binding(&self) -> Option<CameraBinding> {
        self.binding
    }

    /// The camera of the bound scene.
    pub fn bound_camera(&self, scenes: &SceneAccess) -> Option<Entity> {
        self.binding?.camera(scenes)
    }

    fn rebind(&mut self, entity: Entity, binding: Option<CameraBinding>) {
        if self.binding == binding {
            return;
        }
        match binding {
            Some(binding) => info!("Orbit navigation {entity} bound to scene {}", binding.scene),
            None => info!("Orbit navigation {entity} has no active scene"),
        }
        self.binding = binding;
        // The new camera has not seen the current projection or pose yet.
        self.ins.projection.touch();
        self.refresh_camera = true;
    }

    fn handle_input(&mut self, input: &ViewportInput) {
        self.manip.set_viewport_size(input.viewport().size);
        match input {
            ViewportInput::Pointer(pointer) => self.manip.on_pointer(pointer),
            ViewportInput::Trigger(trigger) => self.manip.on_trigger(trigger),
        }
    }

    /// Apply pending property changes to the manipulator and camera projection.
    fn apply_ins(&mut self, mut projection: Option<&mut Projection>, bounds: Option<Aabb>) {
        let Self {
            ins,
            perspective,
            orthographic,
            manip,
            refresh_camera,
            ..
        } = self;

        if ins.enabled.is_changed() && !ins.enabled.value() {
            manip.cancel();
        }

        if ins.projection.is_changed() {
            let mode = ins.projection.value();
            manip.set_orthographic(mode.is_orthographic());
            if let Some(projection) = projection.as_deref_mut() {
                switch_projection(
                    projection,
                    mode,
                    manip.offset().z,
                    perspective,
                    orthographic,
                );
            }
        }

        if ins.preset.is_changed() {
            if let Some(orbit) = ins.preset.value().orbit() {
                ins.orbit.set(orbit);
            }
            ins.preset.set_silent(ViewPreset::None);
        }

        if ins.setup.is_fired() {
            let lens = projection.as_deref().and_then(Lens::of);
            match (lens, bounds) {
                (Some(lens), Some(bounds)) => {
                    let size = view_space_size(&bounds, orbit_rotation(ins.orbit.value()));
                    let mut offset = ins.offset.value();
                    offset.z = fit_distance(size, lens);
                    debug!("Fit to view: scene size {size}, distance {}", offset.z);
                    ins.offset.set(offset);
                }
                _ => warn!("Fit to view requested without an active scene camera"),
            }
        }

        if ins.orbit.is_changed() || ins.offset.is_changed() {
            manip.set_orbit(ins.orbit.value());
            manip.set_offset(ins.offset.value());
        }

        if ins.bounds_changed() {
            let normalized = manip.set_bounds(OrbitBounds {
                min_orbit: ins.min_orbit.value(),
                max_orbit: ins.max_orbit.value(),
                min_offset: ins.min_offset.value(),
                max_offset: ins.max_offset.value(),
            });
            if normalized {
                let bounds = *manip.bounds();
                warn!("Inverted navigation bounds were swapped: {bounds:?}");
                ins.min_orbit.set_silent(bounds.min_orbit);
                ins.max_orbit.set_silent(bounds.max_orbit);
                ins.min_offset.set_silent(bounds.min_offset);
                ins.max_offset.set_silent(bounds.max_offset);
            }
            // Values written in this pass are clamped against the new bounds, not the old ones.
            manip.set_orbit(ins.orbit.value());
            manip.set_offset(ins.offset.value());
        }

        ins.orbit.set_silent(manip.orbit());
        ins.offset.set_silent(manip.offset());
        ins.clear_changed();
        *refresh_camera = true;
    }

    /// Advance the manipulator and mirror any motion into the properties. Returns whether the
    /// orbit or offset changed.
    fn advance(&mut self) -> bool {
        let moved = self.manip.advance();
        if moved {
            self.ins.orbit.set_silent(self.manip.orbit());
            self.ins.offset.set_silent(self.manip.offset());
            self.ins.preset.set_silent(ViewPreset::None);
        }
        moved
    }

    /// Bind newly created navigations to the active scene.
    pub fn on_create(
        mut navigations: Query<(Entity, &mut OrbitNavigation), Added<OrbitNavigation>>,
        active: Res<ActiveScene>,
        scenes: SceneAccess,
    ) {
        for (entity, mut navigation) in &mut navigations {
            debug!("Orbit navigation {entity} created");
            navigation.rebind(entity, CameraBinding::resolve(active.scene, &scenes));
        }
    }

    /// Replace the binding of every navigation when the active scene changes.
    pub fn on_active_scene(
        mut changes: EventReader<ActiveSceneChanged>,
        mut navigations: Query<(Entity, &mut OrbitNavigation)>,
        scenes: SceneAccess,
    ) {
        let Some(change) = changes.read().last() else {
            return;
        };
        let binding = CameraBinding::resolve(change.next, &scenes);
        if change.next.is_some() && binding.is_none() {
            warn!(
                "Active scene {:?} has no camera or bounds; navigation is unbound",
                change.next
            );
        }
        for (entity, mut navigation) in &mut navigations {
            navigation.rebind(entity, binding);
        }
    }

    /// Log navigations that were removed. Their input and tick processing ends with the component.
    pub fn on_dispose(mut removed: RemovedComponents<OrbitNavigation>) {
        for entity in removed.read() {
            debug!("Orbit navigation {entity} disposed");
        }
    }

    /// Forward viewport input to every navigation that accepts it, and pass the rest on.
    pub fn route_input(
        mut inputs: EventReader<ViewportInput>,
        mut navigations: Query<&mut OrbitNavigation>,
        scenes: SceneAccess,
        cameras: Query<(), (With<Transform>, With<Projection>)>,
        mut unconsumed: EventWriter<UnconsumedInput>,
    ) {
        for input in inputs.read() {
            let mut consumed = false;
            for mut navigation in &mut navigations {
                let has_camera = navigation
                    .bound_camera(&scenes)
                    .is_some_and(|camera| cameras.contains(camera));
                let enabled = navigation.ins.enabled.value();
                if Routing::decide(input.viewport(), enabled, has_camera) == Routing::Consume {
                    navigation.handle_input(input);
                    consumed = true;
                }
            }
            if !consumed {
                unconsumed.write(UnconsumedInput(input.clone()));
            }
        }
    }

    /// Apply property changes. Runs once per frame, after input routing and before [`Self::tick`].
    pub fn update(
        mut navigations: Query<&mut OrbitNavigation>,
        scenes: SceneAccess,
        mut projections: Query<&mut Projection>,
    ) {
        for mut navigation in &mut navigations {
            if !navigation.ins.any_changed() {
                continue;
            }
            trace!("Navigation properties changed: {:?}", navigation.ins.changed_paths());
            let binding = navigation.binding;
            let bounds = binding.and_then(|binding| binding.bounds(&scenes));
            let mut projection = binding
                .and_then(|binding| binding.camera(&scenes))
                .and_then(|camera| projections.get_mut(camera).ok());
            navigation.apply_ins(projection.as_deref_mut(), bounds);
        }
    }

    /// Advance every enabled navigation and move its camera when the pose changed.
    pub fn tick(
        mut navigations: Query<&mut OrbitNavigation>,
        scenes: SceneAccess,
        mut cameras: Query<(&mut Transform, &mut Projection)>,
        mut redraw: EventWriter<RequestRedraw>,
    ) {
        for mut navigation in &mut navigations {
            if !navigation.ins.enabled.value() {
                continue;
            }
            let moved = navigation.advance();
            if !moved && !navigation.refresh_camera {
                continue;
            }
            let Some(camera) = navigation.bound_camera(&scenes) else {
                continue;
            };
            let Ok((mut transform, mut projection)) = cameras.get_mut(camera) else {
                warn_once!("Navigated camera {camera} needs a Transform and a Projection");
                continue;
            };
            let pose = navigation.manip.pose();
            pose.apply_to(&mut transform);
            if let Some(height) = pose.orthographic_height {
                set_orthographic_height(&mut projection, height);
            }
            navigation.refresh_camera = false;
            redraw.write(RequestRedraw);
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy_math::prelude::*;
    use bevy_render::camera::PerspectiveProjection;

    use super::*;
    use crate::controller::projections::ProjectionMode;

    fn perspective(fov: f32) -> Projection {
        Projection::Perspective(PerspectiveProjection {
            fov,
            aspect_ratio: 1.0,
            ..Default::default()
        })
    }

    #[test]
    fn default_state_matches_properties() {
        let navigation = OrbitNavigation::default();
        assert_eq!(navigation.manipulator().orbit(), navigation.ins.orbit.value());
        assert_eq!(navigation.manipulator().offset(), navigation.ins.offset.value());
        assert!(!navigation.ins.any_changed());
    }

    #[test]
    fn preset_overwrites_orbit_and_resets() {
        let mut navigation = OrbitNavigation::default();
        navigation.ins.preset.set(ViewPreset::Back);
        navigation.apply_ins(None, None);
        assert_eq!(navigation.ins.orbit.value(), Vec3::new(0.0, 180.0, 0.0));
        assert_eq!(navigation.manipulator().orbit(), Vec3::new(0.0, 180.0, 0.0));
        assert_eq!(navigation.ins.preset.value(), ViewPreset::None);
        assert!(!navigation.ins.any_changed());
    }

    #[test]
    fn external_values_are_clamped_and_mirrored() {
        let mut navigation = OrbitNavigation::default();
        navigation.ins.orbit.set(Vec3::new(120.0, 0.0, 0.0));
        navigation.ins.offset.set(Vec3::new(0.0, 0.0, -5.0));
        navigation.apply_ins(None, None);
        assert_eq!(navigation.ins.orbit.value().x, 90.0);
        assert_eq!(navigation.ins.offset.value().z, 0.1);
    }

    #[test]
    fn bounds_and_values_written_together() {
        let mut navigation = OrbitNavigation::default();
        navigation.ins.min_offset.set(Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, 0.0));
        navigation.ins.offset.set(Vec3::ZERO);
        navigation.apply_ins(None, None);
        assert_eq!(navigation.manipulator().offset(), Vec3::ZERO);
    }

    #[test]
    fn fit_to_view_sets_distance() {
        let mut navigation = OrbitNavigation::default();
        navigation.ins.orbit.set(Vec3::ZERO);
        navigation.ins.setup.fire();
        let mut projection = perspective(std::f32::consts::FRAC_PI_2);
        let bounds = Aabb::from_min_max(Vec3::splat(-0.5), Vec3::splat(0.5));
        navigation.apply_ins(Some(&mut projection), Some(bounds));
        assert!((navigation.ins.offset.value().z - 2.0).abs() < 1e-5);
        assert!((navigation.manipulator().offset().z - 2.0).abs() < 1e-5);
    }

    #[test]
    fn fit_to_view_without_camera_keeps_offset() {
        let mut navigation = OrbitNavigation::default();
        navigation.ins.setup.fire();
        navigation.apply_ins(None, None);
        assert_eq!(navigation.ins.offset.value().z, 100.0);
        assert!(!navigation.ins.setup.is_fired());
    }

    #[test]
    fn projection_switch_keeps_orbit_and_pan() {
        let mut navigation = OrbitNavigation::default();
        navigation.ins.offset.set(Vec3::new(3.0, -2.0, 40.0));
        navigation.apply_ins(None, None);
        let orbit = navigation.ins.orbit.value();

        let mut projection = perspective(0.7);
        navigation.ins.projection.set(ProjectionMode::Orthographic);
        navigation.apply_ins(Some(&mut projection), None);
        assert_eq!(ProjectionMode::of(&projection), ProjectionMode::Orthographic);
        assert!(navigation.manipulator().is_orthographic());

        navigation.ins.projection.set(ProjectionMode::Perspective);
        navigation.apply_ins(Some(&mut projection), None);
        let Projection::Perspective(restored) = &projection else {
            panic!("expected perspective projection");
        };
        assert_eq!(restored.fov, 0.7);
        assert_eq!(navigation.ins.orbit.value(), orbit);
        assert_eq!(navigation.ins.offset.value(), Vec3::new(3.0, -2.0, 40.0));
    }
}
