//=========================================================================
// Platform Event Types
//
// Defines the internal representation of low-level platform events.
//
// This module abstracts away platform-specific input (e.g. Winit, SDL)
// into a unified, engine-friendly format consumed by the frame loop.
//
// Responsibilities:
// - Represent keyboard, mouse and joystick input in a stable, portable way
// - Carry window-level notifications (quit, resize, focus) to the loop
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    PlatformEvent (this module)
//         ↓
//    FrameLoop::tick ─► InputControls::update ─► Display::update
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, macro buttons, and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// For example, `KeyA` is always the same physical key regardless of
/// keyboard layout (QWERTY vs AZERTY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Modifier Keys ----------------------------------------------------

    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    F9,

    /// Fallback for keys not explicitly mapped by the platform layer.
    Unidentified,
}

//=== PlatformEvent =======================================================

/// One event drained from the platform queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    /// User or OS asked the application to close.
    Quit,

    KeyDown(KeyCode),
    KeyUp(KeyCode),

    /// Character produced by a key press (typing mode).
    Text(char),

    MouseButtonDown(MouseButton),
    MouseButtonUp(MouseButton),

    /// Cursor position in window pixels, top-left origin.
    MouseMoved { x: f32, y: f32 },

    JoystickButtonDown(u8),
    JoystickButtonUp(u8),

    /// Axis position, full range of `i16`.
    JoystickAxis { axis: u8, value: i16 },

    /// Window client area changed size.
    Resized { width: u32, height: u32 },

    FocusChanged(bool),
}

impl PlatformEvent {
    pub fn is_quit(&self) -> bool {
        matches!(self, Self::Quit)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
