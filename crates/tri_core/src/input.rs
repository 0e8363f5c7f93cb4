//! Physical keys, the fixed binding table, and the raw-input → event mapper.
//!
//! `Key` is the engine's own key identifier; the platform layer translates
//! windowing-library key codes into it. Only eight keys are bound. The rest
//! exist so unbound input can still be represented (and ignored).

use crate::event::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    ControlLeft,
    Space,
    Escape,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Tab,
    F1,
    F3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// One record from the platform input queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    /// The window system asked the application to quit.
    Quit,
    Key { key: Key, state: KeyState },
}

impl RawInput {
    pub fn pressed(key: Key) -> Self {
        Self::Key {
            key,
            state: KeyState::Pressed,
        }
    }

    pub fn released(key: Key) -> Self {
        Self::Key {
            key,
            state: KeyState::Released,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: Key,
    pub name: &'static str,
    pub pressed: Event,
    pub released: Event,
}

impl KeyBinding {
    pub fn event_for(&self, state: KeyState) -> Event {
        match state {
            KeyState::Pressed => self.pressed,
            KeyState::Released => self.released,
        }
    }
}

pub static KEY_BINDINGS: [KeyBinding; 8] = [
    KeyBinding {
        key: Key::W,
        name: "up",
        pressed: Event::UpPressed,
        released: Event::UpReleased,
    },
    KeyBinding {
        key: Key::A,
        name: "left",
        pressed: Event::LeftPressed,
        released: Event::LeftReleased,
    },
    KeyBinding {
        key: Key::S,
        name: "down",
        pressed: Event::DownPressed,
        released: Event::DownReleased,
    },
    KeyBinding {
        key: Key::D,
        name: "right",
        pressed: Event::RightPressed,
        released: Event::RightReleased,
    },
    KeyBinding {
        key: Key::ControlLeft,
        name: "button1",
        pressed: Event::Button1Pressed,
        released: Event::Button1Released,
    },
    KeyBinding {
        key: Key::Space,
        name: "button2",
        pressed: Event::Button2Pressed,
        released: Event::Button2Released,
    },
    KeyBinding {
        key: Key::Escape,
        name: "select",
        pressed: Event::SelectPressed,
        released: Event::SelectReleased,
    },
    KeyBinding {
        key: Key::Enter,
        name: "start",
        pressed: Event::StartPressed,
        released: Event::StartReleased,
    },
];

pub fn binding_for(key: Key) -> Option<&'static KeyBinding> {
    KEY_BINDINGS.iter().find(|b| b.key == key)
}

pub fn binding_named(name: &str) -> Option<&'static KeyBinding> {
    KEY_BINDINGS.iter().find(|b| b.name == name)
}

/// Translates one raw record into at most one logical event.
pub fn map_input(input: RawInput) -> Option<Event> {
    match input {
        RawInput::Quit => Some(Event::TurnOff),
        RawInput::Key { key, state } => binding_for(key).map(|b| b.event_for(state)),
    }
}
