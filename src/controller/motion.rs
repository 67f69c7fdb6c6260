//! The gesture state machine. Exactly one [`Gesture`] is active at a time; it starts from a pointer
//! press or a touch, and returns to [`Gesture::None`] when that input ends.
//!
//! Which gesture a press resolves to, and which capabilities a gesture needs, are kept as tables
//! so every combination can be tested directly.

use bevy_reflect::Reflect;

use super::component::EnabledMotion;

/// The motion the controller is currently performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum Gesture {
    /// No gesture is active.
    #[default]
    None,
    /// Mouse drag orbiting the camera around its target.
    Rotate,
    /// Mouse drag moving the camera toward or away from its target.
    Dolly,
    /// Mouse drag translating the target.
    Pan,
    /// One or two fingers orbiting the camera.
    TouchRotate,
    /// One or two fingers translating the target.
    TouchPan,
    /// Two fingers pinching to dolly while their midpoint pans.
    TouchDollyPan,
    /// Two fingers pinching to dolly while their midpoint orbits.
    TouchDollyRotate,
}

/// A kind of motion that can be switched off in [`EnabledMotion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Capability {
    /// Orbiting.
    Rotate,
    /// Panning.
    Pan,
    /// Dollying and zooming.
    Zoom,
}

/// A gesture may start, and keeps receiving moves, while at least one of its capabilities is
/// enabled.
const GESTURE_CAPABILITIES: [(Gesture, &[Capability]); 8] = [
    (Gesture::None, &[]),
    (Gesture::Rotate, &[Capability::Rotate]),
    (Gesture::Dolly, &[Capability::Zoom]),
    (Gesture::Pan, &[Capability::Pan]),
    (Gesture::TouchRotate, &[Capability::Rotate]),
    (Gesture::TouchPan, &[Capability::Pan]),
    (Gesture::TouchDollyPan, &[Capability::Zoom, Capability::Pan]),
    (Gesture::TouchDollyRotate, &[Capability::Zoom, Capability::Rotate]),
];

impl Gesture {
    /// The capabilities this gesture drives.
    pub fn capabilities(self) -> &'static [Capability] {
        GESTURE_CAPABILITIES
            .iter()
            .find(|(gesture, _)| *gesture == self)
            .map(|(_, capabilities)| *capabilities)
            .unwrap_or(&[])
    }

    /// Can this gesture start, or keep going, with the given capabilities?
    pub fn is_permitted(self, enabled: &EnabledMotion) -> bool {
        self.capabilities()
            .iter()
            .any(|capability| enabled.allows(*capability))
    }

    /// Is any gesture in progress?
    pub fn is_active(self) -> bool {
        self != Gesture::None
    }

    /// Was this gesture started by touch input?
    pub fn is_touch(self) -> bool {
        matches!(
            self,
            Gesture::TouchRotate
                | Gesture::TouchPan
                | Gesture::TouchDollyPan
                | Gesture::TouchDollyRotate
        )
    }
}

/// What a mouse button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum MouseAction {
    /// Orbit; pans instead while a modifier is held.
    Rotate,
    /// Dolly by dragging vertically.
    Dolly,
    /// Pan; orbits instead while a modifier is held.
    Pan,
}

/// What a single finger does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum OneTouchAction {
    /// Orbit.
    Rotate,
    /// Pan.
    Pan,
}

/// What two fingers do together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum TwoTouchAction {
    /// Pinch to dolly, drag the midpoint to pan.
    DollyPan,
    /// Pinch to dolly, drag the midpoint to orbit.
    DollyRotate,
}

/// `(action, modifier held) -> gesture`. Modifiers swap the roles of rotate and pan so a single
/// button can do both.
const MOUSE_GESTURES: [(MouseAction, bool, Gesture); 6] = [
    (MouseAction::Rotate, false, Gesture::Rotate),
    (MouseAction::Rotate, true, Gesture::Pan),
    (MouseAction::Pan, false, Gesture::Pan),
    (MouseAction::Pan, true, Gesture::Rotate),
    (MouseAction::Dolly, false, Gesture::Dolly),
    (MouseAction::Dolly, true, Gesture::Dolly),
];

/// Resolve a pressed mouse action into a gesture.
pub fn resolve_mouse(action: MouseAction, modifier: bool) -> Gesture {
    MOUSE_GESTURES
        .iter()
        .find(|(a, m, _)| *a == action && *m == modifier)
        .map(|(.., gesture)| *gesture)
        .unwrap_or_default()
}

/// Resolve a single-finger action into a gesture.
pub fn resolve_one_touch(action: OneTouchAction) -> Gesture {
    match action {
        OneTouchAction::Rotate => Gesture::TouchRotate,
        OneTouchAction::Pan => Gesture::TouchPan,
    }
}

/// Resolve a two-finger action into a gesture.
pub fn resolve_two_touch(action: TwoTouchAction) -> Gesture {
    match action {
        TwoTouchAction::DollyPan => Gesture::TouchDollyPan,
        TwoTouchAction::DollyRotate => Gesture::TouchDollyRotate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Gesture; 8] = [
        Gesture::None,
        Gesture::Rotate,
        Gesture::Dolly,
        Gesture::Pan,
        Gesture::TouchRotate,
        Gesture::TouchPan,
        Gesture::TouchDollyPan,
        Gesture::TouchDollyRotate,
    ];

    fn enabled(rotate: bool, pan: bool, zoom: bool) -> EnabledMotion {
        EnabledMotion {
            rotate,
            pan,
            zoom,
            ..Default::default()
        }
    }

    #[test]
    fn every_gesture_has_a_capability_entry() {
        for gesture in ALL {
            assert!(GESTURE_CAPABILITIES.iter().any(|(g, _)| *g == gesture));
        }
    }

    #[test]
    fn permission_follows_capability_table() {
        for mask in 0..8u8 {
            let (rotate, pan, zoom) = (mask & 1 != 0, mask & 2 != 0, mask & 4 != 0);
            let enabled = enabled(rotate, pan, zoom);
            for gesture in ALL {
                let expected = match gesture {
                    Gesture::None => false,
                    Gesture::Rotate | Gesture::TouchRotate => rotate,
                    Gesture::Pan | Gesture::TouchPan => pan,
                    Gesture::Dolly => zoom,
                    Gesture::TouchDollyPan => zoom || pan,
                    Gesture::TouchDollyRotate => zoom || rotate,
                };
                assert_eq!(
                    gesture.is_permitted(&enabled),
                    expected,
                    "{gesture:?} with rotate={rotate} pan={pan} zoom={zoom}"
                );
            }
        }
    }

    #[test]
    fn modifier_swaps_rotate_and_pan() {
        assert_eq!(resolve_mouse(MouseAction::Rotate, false), Gesture::Rotate);
        assert_eq!(resolve_mouse(MouseAction::Rotate, true), Gesture::Pan);
        assert_eq!(resolve_mouse(MouseAction::Pan, false), Gesture::Pan);
        assert_eq!(resolve_mouse(MouseAction::Pan, true), Gesture::Rotate);
        assert_eq!(resolve_mouse(MouseAction::Dolly, true), Gesture::Dolly);
    }

    #[test]
    fn touch_gestures_are_flagged() {
        assert!(resolve_one_touch(OneTouchAction::Pan).is_touch());
        assert!(resolve_two_touch(TwoTouchAction::DollyRotate).is_touch());
        assert!(!Gesture::Rotate.is_touch());
        assert!(!Gesture::None.is_active());
    }
}
