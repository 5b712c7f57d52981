use itertools::Itertools;
use winit::keyboard::KeyCode;

use crate::animation::Direction;
use crate::camera::CameraKind;
use crate::crane::CABLE_PARTS;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    SelectCamera(CameraKind),
    ToggleWireframe,
    /// Held-key movement of one or more parts.
    Drive {
        parts: &'static [&'static str],
        direction: Direction,
    },
    /// Key-down switches a part's motion on or off.
    ToggleMotion(&'static str),
}

impl Action {
    /// Whether key-up events matter for this action.
    pub fn is_held(&self) -> bool {
        matches!(self, Action::Drive { .. })
    }
}

/// Numpad digits act like the digit row.
pub fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Numpad0 => KeyCode::Digit0,
        KeyCode::Numpad1 => KeyCode::Digit1,
        KeyCode::Numpad2 => KeyCode::Digit2,
        KeyCode::Numpad3 => KeyCode::Digit3,
        KeyCode::Numpad4 => KeyCode::Digit4,
        KeyCode::Numpad5 => KeyCode::Digit5,
        KeyCode::Numpad6 => KeyCode::Digit6,
        KeyCode::Numpad7 => KeyCode::Digit7,
        KeyCode::Numpad8 => KeyCode::Digit8,
        KeyCode::Numpad9 => KeyCode::Digit9,
        other => other,
    }
}

fn drive(parts: &'static [&'static str], direction: Direction) -> Option<Action> {
    Some(Action::Drive { parts, direction })
}

pub fn crane_binding(code: KeyCode) -> Option<Action> {
    match normalize_key(code) {
        KeyCode::Digit1 => Some(Action::SelectCamera(CameraKind::Front)),
        KeyCode::Digit2 => Some(Action::SelectCamera(CameraKind::Side)),
        KeyCode::Digit3 => Some(Action::SelectCamera(CameraKind::Top)),
        KeyCode::Digit4 => Some(Action::SelectCamera(CameraKind::Orthographic)),
        KeyCode::Digit5 => Some(Action::SelectCamera(CameraKind::Perspective)),
        KeyCode::Digit6 => Some(Action::SelectCamera(CameraKind::Mobile)),
        KeyCode::Digit7 => Some(Action::ToggleWireframe),

        KeyCode::KeyQ => drive(&["top"], Direction::YPositive),
        KeyCode::KeyA => drive(&["top"], Direction::YNegative),
        KeyCode::KeyW => drive(&["trolley"], Direction::XPositive),
        KeyCode::KeyS => drive(&["trolley"], Direction::XNegative),
        KeyCode::KeyE => drive(&CABLE_PARTS, Direction::YPositive),
        KeyCode::KeyD => drive(&CABLE_PARTS, Direction::YNegative),
        KeyCode::KeyR => drive(&["fingers"], Direction::ZPositive),
        KeyCode::KeyF => drive(&["fingers"], Direction::ZNegative),
        _ => None,
    }
}

pub fn carousel_binding(code: KeyCode) -> Option<Action> {
    match normalize_key(code) {
        KeyCode::Digit1 => Some(Action::ToggleMotion("innerRing")),
        KeyCode::Digit2 => Some(Action::ToggleMotion("centralRing")),
        KeyCode::Digit3 => Some(Action::ToggleMotion("outerRing")),
        KeyCode::Digit7 => Some(Action::ToggleWireframe),
        _ => None,
    }
}

/// Keys currently down, in the order they were pressed.
#[derive(Debug, Default)]
pub struct HeldKeys {
    keys: Vec<KeyCode>,
}

impl HeldKeys {
    pub fn update(&mut self, code: KeyCode, pressed: bool) {
        let code = normalize_key(code);
        if pressed {
            if !self.keys.contains(&code) {
                self.keys.push(code);
            }
        } else {
            self.keys.retain(|held| *held != code);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn label(&self) -> String {
        self.keys.iter().map(|code| key_label(*code)).join(" ")
    }
}

fn key_label(code: KeyCode) -> String {
    let name = format!("{code:?}");
    name.strip_prefix("Key")
        .or_else(|| name.strip_prefix("Digit"))
        .unwrap_or(&name)
        .to_string()
}
