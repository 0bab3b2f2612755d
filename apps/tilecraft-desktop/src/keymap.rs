//! Translation from winit events to backend-free `RawEvent`s.

use tilecraft_input::{Key, PointerButton, RawEvent};
use winit::dpi::LogicalPosition;
use winit::event::MouseButton;
use winit::keyboard::{Key as WinitKey, NamedKey};

/// Map a logical key to the game's key symbol. Letters keep the case winit
/// reports; classification is case-insensitive.
pub fn translate_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(NamedKey::Escape) => Key::Escape,
        WinitKey::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                _ => Key::Other,
            }
        }
        _ => Key::Other,
    }
}

pub fn translate_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Back => PointerButton::Other(3),
        MouseButton::Forward => PointerButton::Other(4),
        MouseButton::Other(n) => PointerButton::Other(n),
    }
}

/// A press at a logical cursor position. World pixels are logical pixels.
pub fn pointer_event(position: LogicalPosition<f64>, button: MouseButton) -> RawEvent {
    RawEvent::PointerDown {
        x: position.x.floor() as i32,
        y: position.y.floor() as i32,
        button: translate_button(button),
    }
}
