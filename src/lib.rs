//! Orbit camera navigation for Bevy 3D object explorers.
//!
//! An [`OrbitNavigation`](controller::component::OrbitNavigation) turns pointer drags and wheel
//! input into an orbit around a pivot: yaw and pitch from dragging, pan with the secondary button,
//! and dolly with the wheel. It moves the camera of whichever scene is currently active. The same
//! state is exposed as a set of reactive properties, so documents and UI can drive the camera
//! declaratively through view presets, explicit orbit values, clamp bounds and fit-to-view.
//!
//! ```rust,ignore
//! App::new()
//!     .add_plugins((DefaultPlugins, DefaultOrbitNavigationPlugins))
//!     .run();
//! ```

use bevy_app::{PluginGroup, PluginGroupBuilder};

pub mod config;
pub mod controller;
pub mod extensions;
pub mod scene;

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        config::{ConfigError, ConfigResult, NavigationData, OrbitLimits},
        controller::{
            component::OrbitNavigation,
            inputs::{
                DefaultInputPlugin, Modifiers, PointerEventKind, PointerInput, PointerSource,
                TriggerInput, UnconsumedInput, ViewportInfo, ViewportInput,
            },
            manipulator::{ManipMode, Momentum, OrbitBounds, Sensitivity},
            presets::ViewPreset,
            projections::ProjectionMode,
            NavigationSet, OrbitNavigationPlugin,
        },
        scene::{ActiveScene, ActiveSceneChanged, ExplorerScene, SceneBounds},
        DefaultOrbitNavigationPlugins,
    };
}

/// The navigation plugin, the default `bevy_input` provider, and the enabled extensions.
pub struct DefaultOrbitNavigationPlugins;

impl PluginGroup for DefaultOrbitNavigationPlugins {
    fn build(self) -> PluginGroupBuilder {
        let group = PluginGroupBuilder::start::<Self>()
            .add(controller::OrbitNavigationPlugin)
            .add(controller::inputs::DefaultInputPlugin);

        #[cfg(feature = "extension_pivot_indicator")]
        let group = group.add(extensions::pivot_indicator::PivotIndicatorPlugin);

        group
    }
}
