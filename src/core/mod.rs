//=========================================================================
// Core Systems
//
// Platform-independent half of the runtime.
//
// Responsibilities:
// - Resolve how the program was launched (arguments, paths, profile)
// - Own every process-wide resource through the `Session`
// - Pace frames and drain platform events (`frame`)
// - Sequence the top-level stages (`stage`)
//
// Notes:
// Everything here runs on the main thread. Platform backends reach core
// only through the traits in `platform_bridge`, `resources`, `config`
// and `frame::Clock`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod config;
pub mod error;
pub mod frame;
pub mod input;
pub mod launch;
pub mod paths;
pub mod platform_bridge;
pub mod profile;
pub mod resources;
pub mod session;
pub mod stage;

//=== Internal Dependencies ===============================================

use error::ErrorCode;
use input::Capture;

//=== LoopOutcome =========================================================

/// Result of one frame, one event, or one stage run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopOutcome {
    /// Keep going.
    #[default]
    Continue,

    /// The user asked to leave the program.
    Quit,

    /// Something failed; the caller decides how far to unwind.
    Error(ErrorCode),

    /// Raw input captured in a configuration or typing sub-mode.
    Captured(Capture),
}

impl LoopOutcome {
    /// Whether the current loop should stop and hand this outcome up.
    pub fn is_interrupt(self) -> bool {
        self != Self::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
