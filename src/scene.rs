//! The render host seen by navigation: which scene is active, which camera it renders through, and
//! how large it is.
//!
//! A scene is any entity with both an [`ExplorerScene`] and a [`SceneBounds`]. Activating a scene
//! means writing its entity into the [`ActiveScene`] resource. Every change to the resource is
//! announced with an [`ActiveSceneChanged`] event.

use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;
use bevy_render::primitives::Aabb;

/// The scene currently shown by the renderer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Resource, Reflect)]
#[reflect(Resource)]
pub struct ActiveScene {
    /// The active scene entity, if any.
    pub scene: Option<Entity>,
    #[reflect(ignore)]
    announced: Option<Entity>,
}

impl ActiveScene {
    /// An active scene resource pointing at `scene`.
    pub fn new(scene: Entity) -> Self {
        Self {
            scene: Some(scene),
            announced: None,
        }
    }

    /// Make `scene` the active scene.
    pub fn activate(&mut self, scene: Option<Entity>) {
        self.scene = scene;
    }

    /// Announce changes of the active scene. Runs every frame before navigation.
    pub fn announce(mut active: ResMut<Self>, mut changed: EventWriter<ActiveSceneChanged>) {
        if active.scene == active.announced {
            return;
        }
        let event = ActiveSceneChanged {
            previous: active.announced,
            next: active.scene,
        };
        debug!("Active scene changed from {:?} to {:?}", event.previous, event.next);
        active.announced = active.scene;
        changed.write(event);
    }
}

/// Sent when the [`ActiveScene`] changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Event)]
pub struct ActiveSceneChanged {
    /// The scene that was active before.
    pub previous: Option<Entity>,
    /// The scene that is active now.
    pub next: Option<Entity>,
}

/// Marks an entity as an explorable scene and names the camera it renders through.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Component, Reflect)]
#[reflect(Component)]
pub struct ExplorerScene {
    /// The camera entity the scene is viewed through. The camera needs a `Transform` and a
    /// `Projection`.
    pub active_camera: Option<Entity>,
}

/// Axis aligned bounds of everything in a scene, in world space. Maintained by whoever loads the
/// scene's models.
#[derive(Debug, Clone, Copy, Component, Reflect)]
#[reflect(Component)]
pub struct SceneBounds(pub Aabb);

impl SceneBounds {
    /// Bounds spanning `min` to `max`.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self(Aabb::from_min_max(min, max))
    }
}

/// The scene capabilities navigation needs: a camera accessor and bounds.
pub type SceneAccess<'w, 's> = Query<'w, 's, (&'static ExplorerScene, &'static SceneBounds)>;

/// A navigation's reference to the active scene. Does not own the scene; the camera is looked up
/// anew every time it is needed, so switching the scene's camera takes effect immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct CameraBinding {
    /// The bound scene.
    pub scene: Entity,
}

impl CameraBinding {
    /// Bind to `scene` if it offers the scene capabilities.
    pub fn resolve(scene: Option<Entity>, scenes: &SceneAccess) -> Option<Self> {
        let scene = scene?;
        scenes.contains(scene).then_some(CameraBinding { scene })
    }

    /// The scene's current camera, if both still exist.
    pub fn camera(&self, scenes: &SceneAccess) -> Option<Entity> {
        scenes.get(self.scene).ok()?.0.active_camera
    }

    /// The scene's current bounds, if the scene still exists.
    pub fn bounds(&self, scenes: &SceneAccess) -> Option<Aabb> {
        scenes.get(self.scene).ok().map(|(_, bounds)| bounds.0)
    }
}
