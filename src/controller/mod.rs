//! Orbit navigation: the component, its manipulator, and the systems that drive them.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_transform::TransformSystem;
use bevy_window::RequestRedraw;

use crate::scene::{ActiveScene, ActiveSceneChanged, ExplorerScene, SceneBounds};

pub mod component;
pub mod framing;
pub mod inputs;
pub mod manipulator;
pub mod presets;
pub mod projections;
pub mod properties;

use component::OrbitNavigation;
use inputs::{UnconsumedInput, ViewportInput};

/// The order navigation systems run in, every frame in [`PostUpdate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum NavigationSet {
    /// Announce active scene changes and (re)bind navigations.
    Scene,
    /// Route [`ViewportInput`] to navigations.
    Input,
    /// Apply property changes.
    Update,
    /// Advance manipulators and move cameras.
    Tick,
}

/// Adds orbit navigation to an app. Navigation is inert until an [`OrbitNavigation`] is spawned
/// and the [`ActiveScene`] points at a scene with a camera.
pub struct OrbitNavigationPlugin;

impl Plugin for OrbitNavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveScene>()
            .add_event::<ActiveSceneChanged>()
            .add_event::<ViewportInput>()
            .add_event::<UnconsumedInput>()
            .add_event::<RequestRedraw>()
            .configure_sets(
                PostUpdate,
                (
                    NavigationSet::Scene,
                    NavigationSet::Input,
                    NavigationSet::Update,
                    NavigationSet::Tick,
                )
                    .chain()
                    .before(TransformSystem::TransformPropagate),
            )
            .add_systems(
                PostUpdate,
                (
                    (
                        ActiveScene::announce,
                        OrbitNavigation::on_create,
                        OrbitNavigation::on_active_scene,
                        OrbitNavigation::on_dispose,
                    )
                        .chain()
                        .in_set(NavigationSet::Scene),
                    OrbitNavigation::route_input.in_set(NavigationSet::Input),
                    OrbitNavigation::update.in_set(NavigationSet::Update),
                    OrbitNavigation::tick.in_set(NavigationSet::Tick),
                ),
            )
            .register_type::<OrbitNavigation>()
            .register_type::<ActiveScene>()
            .register_type::<ExplorerScene>()
            .register_type::<SceneBounds>();
    }
}
