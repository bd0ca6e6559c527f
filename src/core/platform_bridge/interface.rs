//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Collaborator contracts implemented by platform backends.
//
// Defines what the lifecycle and the frame loop need from the display,
// audio and clock, so backends can be swapped (winit, rodio, mocks)
// without touching core code.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::{AudioError, VideoError};
use crate::core::frame::palette::PaletteEffect;
use crate::core::input::PlatformEvent;

//=== Display =============================================================

/// Display surface plus the platform event source behind it.
pub trait Display {
    /// Opens the display surface.
    fn init(&mut self, width: u32, height: u32, fullscreen: bool) -> Result<(), VideoError>;

    fn set_scale_factor(&mut self, scale: u32);

    /// Binds the first physical input device, returning its name.
    fn bind_input_device(&mut self) -> Option<String> {
        None
    }

    /// Presents the last drawn frame with palette effects advanced by
    /// `delta_ticks`.
    fn flip(&mut self, delta_ticks: u32, effects: Option<&mut dyn PaletteEffect>);

    /// Next pending platform event, without blocking.
    fn poll_event(&mut self) -> Option<PlatformEvent>;

    /// Platform-level bookkeeping for an event (resize, focus).
    fn update(&mut self, event: &PlatformEvent);

    /// Tears the surface down. Calling it on a closed display is a no-op.
    fn close(&mut self);
}

//=== Audio ===============================================================

/// Audio output device.
pub trait Audio {
    fn open(&mut self, music_volume: u8) -> Result<(), AudioError>;

    fn set_volume(&mut self, music_volume: u8);

    fn close(&mut self);
}
