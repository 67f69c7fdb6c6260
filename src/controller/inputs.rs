//! Host-neutral input delivered to an [`OrbitCam`](super::component::OrbitCam).
//!
//! The host translates whatever its windowing layer produces into [`SurfaceEvent`]s. The
//! controller keeps a [`Listeners`] set describing which kinds of events it is currently
//! registered for; events of any other kind are ignored without side effects. This is how a
//! pointer drag only receives moves while a button is held, and how a disposed controller goes
//! silent.

use bevy_derive::{Deref, DerefMut};
use bevy_input::{keyboard::KeyCode, mouse::MouseButton};
use bevy_math::prelude::*;
use bevy_reflect::Reflect;

use super::motion::{MouseAction, OneTouchAction, TwoTouchAction};

/// Modifier keys held during a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct Modifiers {
    /// Either control key.
    pub ctrl: bool,
    /// Either meta (command / super) key.
    pub meta: bool,
    /// Either shift key.
    pub shift: bool,
}

impl Modifiers {
    /// Is any modifier held?
    pub fn any(&self) -> bool {
        self.ctrl || self.meta || self.shift
    }
}

/// A pointer button press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    /// Position in logical pixels, origin top-left.
    pub position: Vec2,
    /// The button that went down.
    pub button: MouseButton,
    /// Modifier keys held at the time.
    pub modifiers: Modifiers,
}

/// The touch points currently on the surface, in logical pixels.
#[derive(Debug, Clone, Default, PartialEq, Deref, DerefMut)]
pub struct TouchPoints(pub Vec<Vec2>);

impl TouchPoints {
    /// The single touch point, or the midpoint of the first two.
    pub fn focus(&self) -> Option<Vec2> {
        match self.0.as_slice() {
            [] => None,
            [only] => Some(*only),
            [a, b, ..] => Some((*a + *b) * 0.5),
        }
    }

    /// The distance between the first two touch points.
    pub fn pinch_distance(&self) -> Option<f32> {
        match self.0.as_slice() {
            [a, b, ..] => Some(a.distance(*b)),
            _ => None,
        }
    }
}

impl From<Vec<Vec2>> for TouchPoints {
    fn from(points: Vec<Vec2>) -> Self {
        Self(points)
    }
}

/// An input event from the surface the controller is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// The host is about to open a context menu.
    ContextMenu,
    /// A pointer button was pressed.
    PointerDown(PointerPress),
    /// The pointer moved to this position.
    PointerMove(Vec2),
    /// The pointer button was released.
    PointerUp,
    /// The wheel turned. Negative `delta_y` scrolls up, which dollies in.
    Wheel {
        /// Vertical scroll amount; only the sign is used.
        delta_y: f32,
    },
    /// A finger touched down. Carries every touch now on the surface.
    TouchStart(TouchPoints),
    /// Fingers moved. Carries every touch now on the surface.
    TouchMove(TouchPoints),
    /// A finger lifted. Carries the touches that remain.
    TouchEnd(TouchPoints),
    /// A key was pressed.
    KeyDown(KeyCode),
}

impl SurfaceEvent {
    /// The listener registration this event is delivered through.
    pub fn kind(&self) -> ListenerKind {
        match self {
            SurfaceEvent::ContextMenu => ListenerKind::ContextMenu,
            SurfaceEvent::PointerDown(_) => ListenerKind::PointerDown,
            SurfaceEvent::PointerMove(_) => ListenerKind::PointerMove,
            SurfaceEvent::PointerUp => ListenerKind::PointerUp,
            SurfaceEvent::Wheel { .. } => ListenerKind::Wheel,
            SurfaceEvent::TouchStart(_) => ListenerKind::TouchStart,
            SurfaceEvent::TouchMove(_) => ListenerKind::TouchMove,
            SurfaceEvent::TouchEnd(_) => ListenerKind::TouchEnd,
            SurfaceEvent::KeyDown(_) => ListenerKind::KeyDown,
        }
    }
}

/// The kinds of surface events a controller can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ListenerKind {
    /// Context menu requests.
    ContextMenu,
    /// Pointer presses.
    PointerDown,
    /// Pointer moves.
    PointerMove,
    /// Pointer releases.
    PointerUp,
    /// Wheel turns.
    Wheel,
    /// Touches starting.
    TouchStart,
    /// Touches moving.
    TouchMove,
    /// Touches ending.
    TouchEnd,
    /// Key presses.
    KeyDown,
}

impl ListenerKind {
    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// The set of [`ListenerKind`]s a controller is registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct Listeners(u16);

impl Listeners {
    /// No registrations.
    pub const NONE: Self = Self(0);

    /// Registered for the lifetime of an attached controller.
    pub const SURFACE: Self = Self::of(&[
        ListenerKind::ContextMenu,
        ListenerKind::PointerDown,
        ListenerKind::Wheel,
        ListenerKind::TouchStart,
        ListenerKind::TouchMove,
        ListenerKind::TouchEnd,
        ListenerKind::KeyDown,
    ]);

    /// Registered only while a pointer drag is in progress.
    pub const DRAG: Self = Self::of(&[ListenerKind::PointerMove, ListenerKind::PointerUp]);

    /// Build a set from a list of kinds.
    pub const fn of(kinds: &[ListenerKind]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < kinds.len() {
            bits |= kinds[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Is this kind registered?
    pub fn contains(&self, kind: ListenerKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Register every kind in `other`.
    pub fn insert(&mut self, other: Listeners) {
        self.0 |= other.0;
    }

    /// Unregister every kind in `other`.
    pub fn remove(&mut self, other: Listeners) {
        self.0 &= !other.0;
    }

    /// Is nothing registered?
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// How the host should treat an event after the controller has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[must_use]
pub struct InputResponse {
    /// The controller acted on the event.
    pub handled: bool,
    /// The host should suppress its native behavior, e.g. scrolling or a context menu.
    pub prevent_default: bool,
    /// The host should not forward the event to other consumers.
    pub stop_propagation: bool,
}

impl InputResponse {
    /// The controller did nothing with the event.
    pub const IGNORED: Self = Self {
        handled: false,
        prevent_default: false,
        stop_propagation: false,
    };
    /// Acted on, native behavior left alone.
    pub const HANDLED: Self = Self {
        handled: true,
        prevent_default: false,
        stop_propagation: false,
    };
    /// Acted on, native behavior suppressed.
    pub const PREVENT_DEFAULT: Self = Self {
        handled: true,
        prevent_default: true,
        stop_propagation: false,
    };
    /// Acted on and owned entirely by the controller.
    pub const CAPTURED: Self = Self {
        handled: true,
        prevent_default: true,
        stop_propagation: true,
    };
}

/// Which action each mouse button triggers. `None` leaves the button unbound.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct MouseBindings {
    /// Primary button.
    pub left: Option<MouseAction>,
    /// Wheel button.
    pub middle: Option<MouseAction>,
    /// Secondary button.
    pub right: Option<MouseAction>,
}

impl Default for MouseBindings {
    fn default() -> Self {
        Self {
            left: Some(MouseAction::Rotate),
            middle: Some(MouseAction::Pan),
            right: Some(MouseAction::Pan),
        }
    }
}

impl MouseBindings {
    /// The action bound to `button`.
    pub fn action(&self, button: MouseButton) -> Option<MouseAction> {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            _ => None,
        }
    }
}

/// Which action one and two fingers trigger.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct TouchBindings {
    /// One finger.
    pub one: Option<OneTouchAction>,
    /// Two fingers.
    pub two: Option<TwoTouchAction>,
}

impl Default for TouchBindings {
    fn default() -> Self {
        Self {
            one: Some(OneTouchAction::Rotate),
            two: Some(TwoTouchAction::DollyPan),
        }
    }
}

/// The four keys that pan the camera.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct KeyBindings {
    /// Pans the view left.
    pub left: KeyCode,
    /// Pans the view up.
    pub up: KeyCode,
    /// Pans the view right.
    pub right: KeyCode,
    /// Pans the view down.
    pub down: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: KeyCode::ArrowLeft,
            up: KeyCode::ArrowUp,
            right: KeyCode::ArrowRight,
            down: KeyCode::ArrowDown,
        }
    }
}

impl KeyBindings {
    /// The pan direction for `key`, in screen pixels of `speed` length. Positive `x` pans the
    /// view left, positive `y` pans it up.
    pub fn pan_direction(&self, key: KeyCode, speed: f32) -> Option<Vec2> {
        if key == self.up {
            Some(Vec2::new(0.0, speed))
        } else if key == self.down {
            Some(Vec2::new(0.0, -speed))
        } else if key == self.left {
            Some(Vec2::new(speed, 0.0))
        } else if key == self.right {
            Some(Vec2::new(-speed, 0.0))
        } else {
            None
        }
    }
}

/// All input remapping tables.
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct InputBindings {
    /// Mouse button to action.
    pub mouse: MouseBindings,
    /// Touch count to action.
    pub touches: TouchBindings,
    /// Panning keys.
    pub keys: KeyBindings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_listeners_are_separate_from_surface() {
        let mut listeners = Listeners::SURFACE;
        assert!(listeners.contains(ListenerKind::PointerDown));
        assert!(!listeners.contains(ListenerKind::PointerMove));

        listeners.insert(Listeners::DRAG);
        assert!(listeners.contains(ListenerKind::PointerMove));
        assert!(listeners.contains(ListenerKind::PointerUp));

        listeners.remove(Listeners::DRAG);
        assert_eq!(listeners, Listeners::SURFACE);

        listeners.remove(Listeners::SURFACE);
        assert!(listeners.is_empty());
    }

    #[test]
    fn touch_focus_uses_midpoint_of_first_two() {
        let none = TouchPoints::default();
        assert_eq!(none.focus(), None);
        assert_eq!(none.pinch_distance(), None);

        let one = TouchPoints::from(vec![Vec2::new(3.0, 4.0)]);
        assert_eq!(one.focus(), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(one.pinch_distance(), None);

        let three = TouchPoints::from(vec![Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::splat(99.0)]);
        assert_eq!(three.focus(), Some(Vec2::new(5.0, 0.0)));
        assert_eq!(three.pinch_distance(), Some(10.0));
    }

    #[test]
    fn arrow_keys_map_to_pan_directions() {
        let keys = KeyBindings::default();
        assert_eq!(
            keys.pan_direction(KeyCode::ArrowUp, 7.0),
            Some(Vec2::new(0.0, 7.0))
        );
        assert_eq!(
            keys.pan_direction(KeyCode::ArrowRight, 7.0),
            Some(Vec2::new(-7.0, 0.0))
        );
        assert_eq!(keys.pan_direction(KeyCode::KeyW, 7.0), None);
    }

    #[test]
    fn unbound_buttons_have_no_action() {
        let mouse = MouseBindings {
            right: None,
            ..Default::default()
        };
        assert_eq!(mouse.action(MouseButton::Left), Some(MouseAction::Rotate));
        assert_eq!(mouse.action(MouseButton::Right), None);
        assert_eq!(mouse.action(MouseButton::Back), None);
    }
}
