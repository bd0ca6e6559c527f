//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into engine PlatformEvents.
//
// Architecture:
//   WindowEvent → translate() → PlatformEvent → EventSender
//
// Key repeats are dropped (held state comes from KeyDown/KeyUp pairs),
// but the text they produce is kept so typing mode repeats characters.
// Unmapped keys (F13-F24, exotic keyboards) are filtered.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::{
    event::{ElementState, MouseButton as WinitMouseButton, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyCode, MouseButton, PlatformEvent};

//=== translate() =========================================================

/// Emits the engine events for one window event, in order.
pub(crate) fn translate(event: &WindowEvent, mut emit: impl FnMut(PlatformEvent)) {
    match event {
        WindowEvent::CloseRequested | WindowEvent::Destroyed => emit(PlatformEvent::Quit),

        WindowEvent::KeyboardInput { event: key_event, .. } => {
            if let Some(event) = key_event_for(key_event.physical_key, key_event.state, key_event.repeat) {
                emit(event);
            } else {
                trace!(target: "platform::input", "Unmapped or repeated key ignored");
            }
            for event in text_events(key_event.text.as_deref(), key_event.state) {
                emit(event);
            }
        }

        WindowEvent::MouseInput { state, button, .. } => emit(mouse_button_event(*button, *state)),

        WindowEvent::CursorMoved { position, .. } => emit(PlatformEvent::MouseMoved {
            x: position.x as f32,
            y: position.y as f32,
        }),

        WindowEvent::Resized(size) => emit(PlatformEvent::Resized {
            width: size.width,
            height: size.height,
        }),

        WindowEvent::Focused(focused) => emit(PlatformEvent::FocusChanged(*focused)),

        _ => {}
    }
}

//--- Event Helpers -------------------------------------------------------

fn key_event_for(physical: PhysicalKey, state: ElementState, repeat: bool) -> Option<PlatformEvent> {
    let key = match physical {
        PhysicalKey::Code(code) => KeyCode::from(code),
        _ => return None,
    };

    if matches!(key, KeyCode::Unidentified) {
        return None;
    }

    match state {
        ElementState::Pressed if repeat => None,
        ElementState::Pressed => Some(PlatformEvent::KeyDown(key)),
        ElementState::Released => Some(PlatformEvent::KeyUp(key)),
    }
}

/// Printable characters produced by a key press.
fn text_events(text: Option<&str>, state: ElementState) -> impl Iterator<Item = PlatformEvent> + '_ {
    let pressed = state == ElementState::Pressed;
    text.into_iter()
        .flat_map(str::chars)
        .filter(move |c| pressed && !c.is_control())
        .map(PlatformEvent::Text)
}

fn mouse_button_event(button: WinitMouseButton, state: ElementState) -> PlatformEvent {
    let button = MouseButton::from(button);
    match state {
        ElementState::Pressed => PlatformEvent::MouseButtonDown(button),
        ElementState::Released => PlatformEvent::MouseButtonUp(button),
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Maps A-Z, 0-9, arrows, modifiers and the keys the menus use. Unmapped
/// keys (F13-F24, numpad, media keys) return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Modifiers ----------------------------------------------------

            ShiftLeft => KeyCode::ShiftLeft,
            ShiftRight => KeyCode::ShiftRight,
            ControlLeft => KeyCode::ControlLeft,
            ControlRight => KeyCode::ControlRight,
            AltLeft => KeyCode::AltLeft,
            AltRight => KeyCode::AltRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,
            F9 => KeyCode::F9,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

/// Converts Winit mouse buttons to engine buttons.
///
/// Left/Right/Middle mapped directly; Back/Forward/Other → Other.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
