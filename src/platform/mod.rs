//=========================================================================
// Platform Subsystem
//
// Concrete backends for the collaborator traits in `core`.
//
// Architecture:
// ```text
//  Main Thread (only thread):
//  ┌──────────────────────────────────────────────┐
//  │  FrameLoop::tick                             │
//  │   ├─ WinitDisplay::flip ─► pump_app_events   │
//  │   │                          ↓               │
//  │   │                       translate()        │
//  │   │                          ↓               │
//  │   └─ poll_event ◄──────── EventQueue         │
//  │                                              │
//  │  Session ─► RodioAudio / SilentAudio         │
//  │          ─► FileSystemLoader, TomlConfigStore│
//  │          ─► SystemClock                      │
//  └──────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Pumped, not run**: Winit is pumped once per flip so the frame loop
//   owns pacing and can return from any frame
// - **Window on first resume**: created inside `init()` by pumping until
//   the handler reports a window or an error
// - **Sound is a feature**: without `sound`, audio opens a silent device
//
//=========================================================================

//=== Submodules ==========================================================

mod audio;
mod input_processor;
mod window;

//=== Public API ==========================================================

pub use audio::{default_audio, SilentAudio};
pub use window::WinitDisplay;

#[cfg(feature = "sound")]
pub use audio::RodioAudio;

//=== Internal Imports ====================================================

use log::info;

use crate::core::config::TomlConfigStore;
use crate::core::frame::SystemClock;
use crate::core::resources::FileSystemLoader;
use crate::core::session::Backends;

//=== desktop_backends() ==================================================

/// Real backends: Winit window, default audio, disk resources and
/// settings, wall clock.
pub fn desktop_backends() -> Backends {
    info!(target: "platform", "Platform subsystem initialized");
    Backends {
        display: Box::new(WinitDisplay::new()),
        audio: default_audio(),
        clock: Box::new(SystemClock::new()),
        resources: Box::new(FileSystemLoader),
        config_store: Box::new(TomlConfigStore::new()),
    }
}
