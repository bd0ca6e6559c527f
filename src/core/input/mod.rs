//=========================================================================
// Input Controls
//
// Turns drained platform events into game-control state.
//
// Responsibilities:
// - Map keys and joystick buttons onto abstract `Control`s
// - Capture raw input in the key/joystick configuration and typing modes
// - Finalize continuous state (held controls, axes) once per frame
//
// Notes:
// The frame loop calls `update()` once per drained event and
// `finish_frame()` exactly once after the drain, so held-input state is
// never processed per queued event.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;

//=== Standard Library Imports ============================================

use std::collections::{HashMap, HashSet};

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::LoopOutcome;

//=== Public API ==========================================================

pub use event::{KeyCode, MouseButton, PlatformEvent};

//=== LoopMode ============================================================

/// How the current caller wants input interpreted this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoopMode {
    /// Events update control state.
    #[default]
    Normal,

    /// Characters and editing keys are captured (name entry, addresses).
    Typing,

    /// The next key press is captured for rebinding.
    SetKey,

    /// The next joystick button press is captured for rebinding.
    SetJoystick,
}

//=== Capture =============================================================

/// Raw input captured in one of the configuration sub-modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    Key(KeyCode),
    JoystickButton(u8),
    Char(char),
}

//=== Control =============================================================

/// Abstract game control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Jump,
    Swim,
    Fire,
    ChangeWeapon,
    Enter,
    Escape,
    Stats,
    Pause,
}

//=== ControlState ========================================================

/// Per-frame control snapshot readable by stages.
#[derive(Debug, Clone, Default)]
pub struct ControlState {
    held: HashSet<Control>,
    pressed: HashSet<Control>,
}

impl ControlState {
    /// Returns `true` while the control is held down.
    pub fn is_held(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    /// Returns `true` if the control went down since it was last released.
    pub fn was_pressed(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }

    /// Clears the press latch so one press is handled once.
    pub fn release(&mut self, control: Control) {
        self.pressed.remove(&control);
    }

    /// Drops every pending press; held controls stay held.
    pub fn clear_presses(&mut self) {
        self.pressed.clear();
    }
}

//=== InputControls =======================================================

/// Input-controls collaborator driven by the frame loop.
pub trait InputControls {
    /// Handles one discrete event. Anything but `Continue` ends the drain.
    fn update(&mut self, event: &PlatformEvent, mode: LoopMode) -> LoopOutcome;

    /// Updates continuous state once per frame, after the drain.
    fn finish_frame(&mut self);

    fn state(&self) -> &ControlState;

    fn state_mut(&mut self) -> Option<&mut ControlState> {
        None
    }
}

//=== Controls ============================================================

/// Axis deflection beyond which a joystick axis counts as a direction.
const AXIS_THRESHOLD: i16 = 16384;

/// Default keyboard/joystick implementation of [`InputControls`].
pub struct Controls {
    keys: HashMap<KeyCode, Control>,
    buttons: HashMap<u8, Control>,
    keys_down: HashSet<Control>,
    buttons_down: HashSet<Control>,
    axes: (i16, i16),
    state: ControlState,
}

impl Controls {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        let keys = HashMap::from([
            (KeyCode::ArrowUp, Control::Up),
            (KeyCode::ArrowDown, Control::Down),
            (KeyCode::ArrowLeft, Control::Left),
            (KeyCode::ArrowRight, Control::Right),
            (KeyCode::Space, Control::Jump),
            (KeyCode::ShiftLeft, Control::Swim),
            (KeyCode::AltLeft, Control::Fire),
            (KeyCode::ControlRight, Control::ChangeWeapon),
            (KeyCode::Enter, Control::Enter),
            (KeyCode::Escape, Control::Escape),
            (KeyCode::F9, Control::Stats),
            (KeyCode::KeyP, Control::Pause),
        ]);

        let buttons = HashMap::from([
            (0, Control::Jump),
            (1, Control::Fire),
            (2, Control::ChangeWeapon),
            (3, Control::Enter),
            (4, Control::Escape),
        ]);

        Self {
            keys,
            buttons,
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
            axes: (0, 0),
            state: ControlState::default(),
        }
    }

    //--- Bindings ---------------------------------------------------------

    /// Binds `key` to `control`, replacing the control's previous key.
    pub fn bind_key(&mut self, key: KeyCode, control: Control) {
        self.keys.retain(|_, bound| *bound != control);
        self.keys.insert(key, control);
    }

    /// Binds joystick `button` to `control`, replacing its previous button.
    pub fn bind_button(&mut self, button: u8, control: Control) {
        self.buttons.retain(|_, bound| *bound != control);
        self.buttons.insert(button, control);
    }

    pub fn key_for(&self, control: Control) -> Option<KeyCode> {
        self.keys
            .iter()
            .find(|(_, bound)| **bound == control)
            .map(|(key, _)| *key)
    }

    //--- Internal Helpers -------------------------------------------------

    fn capture(event: &PlatformEvent, mode: LoopMode) -> Option<Capture> {
        match (mode, *event) {
            (LoopMode::SetKey, PlatformEvent::KeyDown(key)) => Some(Capture::Key(key)),
            (LoopMode::SetJoystick, PlatformEvent::JoystickButtonDown(button)) => {
                Some(Capture::JoystickButton(button))
            }
            (LoopMode::Typing, PlatformEvent::Text(ch)) => Some(Capture::Char(ch)),
            (
                LoopMode::Typing,
                PlatformEvent::KeyDown(key @ (KeyCode::Enter | KeyCode::Escape | KeyCode::Backspace)),
            ) => Some(Capture::Key(key)),
            _ => None,
        }
    }

    fn axis_controls(&self) -> impl Iterator<Item = Control> {
        let (x, y) = self.axes;
        [
            (x < -AXIS_THRESHOLD, Control::Left),
            (x > AXIS_THRESHOLD, Control::Right),
            (y < -AXIS_THRESHOLD, Control::Up),
            (y > AXIS_THRESHOLD, Control::Down),
        ]
        .into_iter()
        .filter_map(|(active, control)| active.then_some(control))
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

impl InputControls for Controls {
    fn update(&mut self, event: &PlatformEvent, mode: LoopMode) -> LoopOutcome {
        if let Some(capture) = Self::capture(event, mode) {
            trace!(target: "input", "Captured {:?} in {:?} mode", capture, mode);
            return LoopOutcome::Captured(capture);
        }

        match *event {
            PlatformEvent::KeyDown(key) => {
                if let Some(&control) = self.keys.get(&key) {
                    self.keys_down.insert(control);
                }
            }
            PlatformEvent::KeyUp(key) => {
                if let Some(control) = self.keys.get(&key) {
                    self.keys_down.remove(control);
                }
            }
            PlatformEvent::JoystickButtonDown(button) => {
                if let Some(&control) = self.buttons.get(&button) {
                    self.buttons_down.insert(control);
                }
            }
            PlatformEvent::JoystickButtonUp(button) => {
                if let Some(control) = self.buttons.get(&button) {
                    self.buttons_down.remove(control);
                }
            }
            PlatformEvent::JoystickAxis { axis: 0, value } => self.axes.0 = value,
            PlatformEvent::JoystickAxis { axis: 1, value } => self.axes.1 = value,
            PlatformEvent::FocusChanged(false) => {
                self.keys_down.clear();
                self.buttons_down.clear();
            }
            _ => {}
        }

        LoopOutcome::Continue
    }

    fn finish_frame(&mut self) {
        let held: HashSet<Control> = self
            .keys_down
            .iter()
            .chain(self.buttons_down.iter())
            .copied()
            .chain(self.axis_controls())
            .collect();

        for control in held.difference(&self.state.held) {
            self.state.pressed.insert(*control);
        }

        self.state.held = held;
    }

    fn state(&self) -> &ControlState {
        &self.state
    }

    fn state_mut(&mut self) -> Option<&mut ControlState> {
        Some(&mut self.state)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
