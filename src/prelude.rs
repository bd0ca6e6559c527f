//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use stagehand::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Launch and lifecycle
pub use crate::core::launch::Launch;
pub use crate::core::session::{Backends, Session};

// Errors and outcomes
pub use crate::core::error::{ErrorCode, InitError, RuntimeError, StageError};
pub use crate::core::LoopOutcome;

// Frame loop
pub use crate::core::frame::palette::{Fade, FadeDirection, PaletteEffect};
pub use crate::core::frame::{Clock, FrameLoop};

// Input
pub use crate::core::input::{Control, Controls, InputControls, KeyCode, LoopMode, PlatformEvent};

// Stages
pub use crate::core::stage::{FrameContext, Stage, StageFactory, StageKind, StageOrchestrator};
pub use crate::stages::StandardStages;

// Backends
pub use crate::platform::desktop_backends;
