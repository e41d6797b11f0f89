//! Viewport input events consumed by [`OrbitNavigation`](super::component::OrbitNavigation), and
//! [`DefaultInputPlugin`], which produces them from `bevy_input` for the primary window.
//!
//! Any source can drive navigation by writing [`ViewportInput`] events. Events that no navigation
//! consumes are forwarded as [`UnconsumedInput`], so other handlers, e.g. object picking, should read
//! those instead of the raw stream.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_input::{
    keyboard::KeyCode,
    mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseButton, MouseScrollUnit},
    touch::Touches,
    ButtonInput, InputSystem,
};
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;
use bevy_window::{PrimaryWindow, Window};

/// The viewport an input event originated from.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ViewportInfo {
    /// Logical size of the viewport in pixels.
    pub size: Vec2,
    /// Set when the viewport renders through its own camera rather than the active scene camera.
    /// Navigation ignores input from such viewports.
    pub viewport_camera: Option<Entity>,
}

impl ViewportInfo {
    /// A viewport of the given size showing the active scene camera.
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            viewport_camera: None,
        }
    }
}

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum PointerEventKind {
    /// A pointer was pressed.
    Down,
    /// A pressed pointer moved.
    Move,
    /// A pointer was released.
    Up,
}

/// The device behind a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum PointerSource {
    /// A mouse.
    #[default]
    Mouse,
    /// A finger on a touch screen.
    Touch,
    /// A stylus.
    Pen,
}

/// Keyboard modifiers held while the event happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct Modifiers {
    /// Either control key.
    pub ctrl: bool,
    /// Either alt key.
    pub alt: bool,
    /// Either shift key.
    pub shift: bool,
}

/// A pointer press, motion or release.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct PointerInput {
    /// Originating viewport.
    pub viewport: ViewportInfo,
    /// Press, motion or release.
    pub kind: PointerEventKind,
    /// Device type.
    pub source: PointerSource,
    /// The mouse button involved. `None` for touch input.
    pub button: Option<MouseButton>,
    /// Keyboard modifiers.
    pub modifiers: Modifiers,
    /// Is this the first pointer of the gesture?
    pub is_primary: bool,
    /// Number of pointers down, including the one this event is about.
    pub pointer_count: u32,
    /// Position in viewport pixels.
    pub position: Vec2,
    /// Motion since the previous event in pixels. Y grows downward.
    pub delta: Vec2,
    /// Distance between the first two pointers of a touch gesture.
    pub pinch_distance: Option<f32>,
}

impl PointerInput {
    /// A primary mouse event with no modifiers.
    pub fn mouse(viewport: ViewportInfo, kind: PointerEventKind, button: MouseButton) -> Self {
        Self {
            viewport,
            kind,
            source: PointerSource::Mouse,
            button: Some(button),
            modifiers: Modifiers::default(),
            is_primary: true,
            pointer_count: 1,
            position: viewport.size / 2.0,
            delta: Vec2::ZERO,
            pinch_distance: None,
        }
    }

    /// Set the motion delta.
    pub fn with_delta(mut self, delta: Vec2) -> Self {
        self.position += delta;
        self.delta = delta;
        self
    }

    /// Set the keyboard modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A wheel or other single-shot trigger.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct TriggerInput {
    /// Originating viewport.
    pub viewport: ViewportInfo,
    /// Wheel notches. Positive values move the camera away from the pivot.
    pub wheel: f32,
    /// Keyboard modifiers.
    pub modifiers: Modifiers,
}

impl TriggerInput {
    /// A wheel event with no modifiers.
    pub fn wheel(viewport: ViewportInfo, wheel: f32) -> Self {
        Self {
            viewport,
            wheel,
            modifiers: Modifiers::default(),
        }
    }
}

/// Input addressed to a viewport.
#[derive(Debug, Clone, PartialEq, Event, Reflect)]
pub enum ViewportInput {
    /// Pointer press, motion or release.
    Pointer(PointerInput),
    /// Wheel trigger.
    Trigger(TriggerInput),
}

impl ViewportInput {
    /// The viewport this input came from.
    pub fn viewport(&self) -> &ViewportInfo {
        match self {
            ViewportInput::Pointer(pointer) => &pointer.viewport,
            ViewportInput::Trigger(trigger) => &trigger.viewport,
        }
    }
}

impl From<PointerInput> for ViewportInput {
    fn from(value: PointerInput) -> Self {
        ViewportInput::Pointer(value)
    }
}

impl From<TriggerInput> for ViewportInput {
    fn from(value: TriggerInput) -> Self {
        ViewportInput::Trigger(value)
    }
}

/// A [`ViewportInput`] that no navigation consumed.
#[derive(Debug, Clone, PartialEq, Event)]
pub struct UnconsumedInput(pub ViewportInput);

/// The decision the input router makes for one navigation and one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    /// The viewport renders through its own camera. The event is not meant for this navigation.
    Foreign,
    /// Navigation is disabled or has no camera. The event continues to other handlers.
    PassThrough,
    /// The event drives this navigation and stops here.
    Consume,
}

impl Routing {
    /// Decide what to do with an event from `viewport`.
    pub fn decide(viewport: &ViewportInfo, enabled: bool, has_camera: bool) -> Self {
        if viewport.viewport_camera.is_some() {
            Routing::Foreign
        } else if !enabled || !has_camera {
            Routing::PassThrough
        } else {
            Routing::Consume
        }
    }
}

/// Translates mouse, keyboard and touch input on the primary window into [`ViewportInput`].
pub struct DefaultInputPlugin;

impl Plugin for DefaultInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ViewportInput>()
            .init_resource::<PointerTracker>()
            .add_systems(
                PreUpdate,
                (emit_mouse_input, emit_touch_input).after(InputSystem),
            );
    }
}

/// Buttons and touches the input plugin is tracking as the current gesture.
#[derive(Debug, Default, Resource)]
pub struct PointerTracker {
    mouse_button: Option<MouseButton>,
    primary_touch: Option<u64>,
    /// Touch count and centroid seen on the previous frame.
    last_centroid: Option<(u32, Vec2)>,
}

const TRACKED_BUTTONS: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

/// Pixels per wheel notch for high-resolution scroll devices.
const PIXELS_PER_NOTCH: f32 = 100.0;

fn modifiers(keys: &ButtonInput<KeyCode>) -> Modifiers {
    Modifiers {
        ctrl: keys.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]),
        alt: keys.any_pressed([KeyCode::AltLeft, KeyCode::AltRight]),
        shift: keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
    }
}

/// Emit pointer events for the first mouse button of a drag, and triggers for the scroll wheel.
pub fn emit_mouse_input(
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    mut tracker: ResMut<PointerTracker>,
    mut input: EventWriter<ViewportInput>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let viewport = ViewportInfo::new(window.size());
    let modifiers = modifiers(&keys);
    let position = window.cursor_position().unwrap_or(viewport.size / 2.0);
    let pointer = |kind, button| PointerInput {
        position,
        modifiers,
        ..PointerInput::mouse(viewport, kind, button)
    };

    if tracker.mouse_button.is_none() {
        if let Some(button) = TRACKED_BUTTONS.into_iter().find(|b| buttons.just_pressed(*b)) {
            tracker.mouse_button = Some(button);
            input.write(pointer(PointerEventKind::Down, button).into());
        }
    }

    if let Some(button) = tracker.mouse_button {
        if motion.delta != Vec2::ZERO {
            let event = PointerInput {
                delta: motion.delta,
                ..pointer(PointerEventKind::Move, button)
            };
            input.write(event.into());
        }
        if !buttons.pressed(button) {
            tracker.mouse_button = None;
            input.write(pointer(PointerEventKind::Up, button).into());
        }
    }

    if scroll.delta.y != 0.0 {
        let notches = match scroll.unit {
            MouseScrollUnit::Line => scroll.delta.y,
            MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_NOTCH,
        };
        // Scrolling up brings the camera closer.
        let trigger = TriggerInput {
            modifiers,
            ..TriggerInput::wheel(viewport, -notches)
        };
        input.write(trigger.into());
    }
}

/// Emit pointer events for touch gestures. Two finger gestures carry a pinch distance.
pub fn emit_touch_input(
    windows: Query<&Window, With<PrimaryWindow>>,
    touches: Res<Touches>,
    mut tracker: ResMut<PointerTracker>,
    mut input: EventWriter<ViewportInput>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let viewport = ViewportInfo::new(window.size());
    let pressed = touches.iter().count() as u32;
    let pinch_distance = {
        let mut active = touches.iter();
        match (active.next(), active.next()) {
            (Some(a), Some(b)) => Some(a.position().distance(b.position())),
            _ => None,
        }
    };
    let pointer = |kind, is_primary, pointer_count, position, delta| PointerInput {
        viewport,
        kind,
        source: PointerSource::Touch,
        button: None,
        modifiers: Modifiers::default(),
        is_primary,
        pointer_count,
        position,
        delta,
        pinch_distance,
    };

    for touch in touches.iter_just_pressed() {
        let is_primary = tracker.primary_touch.is_none();
        if is_primary {
            tracker.primary_touch = Some(touch.id());
        }
        input.write(
            pointer(
                PointerEventKind::Down,
                is_primary,
                pressed,
                touch.position(),
                Vec2::ZERO,
            )
            .into(),
        );
    }

    // Motion is the centroid shift while the touch count is stable. A finger landing or lifting
    // moves the centroid without any motion.
    if pressed > 0 {
        let centroid = touches.iter().map(|touch| touch.position()).sum::<Vec2>() / pressed as f32;
        if let Some((count, previous)) = tracker.last_centroid {
            let delta = centroid - previous;
            if count == pressed && delta != Vec2::ZERO {
                let is_primary = tracker.primary_touch.is_some();
                input.write(
                    pointer(PointerEventKind::Move, is_primary, pressed, centroid, delta).into(),
                );
            }
        }
        tracker.last_centroid = Some((pressed, centroid));
    } else {
        tracker.last_centroid = None;
    }

    for touch in touches.iter_just_released().chain(touches.iter_just_canceled()) {
        let is_primary = tracker.primary_touch == Some(touch.id());
        if is_primary {
            tracker.primary_touch = None;
        }
        input.write(
            pointer(
                PointerEventKind::Up,
                is_primary,
                pressed + 1,
                touch.position(),
                Vec2::ZERO,
            )
            .into(),
        );
    }
}
