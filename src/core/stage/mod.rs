//=========================================================================
// Stage System
//=========================================================================
//
// Top-level program sequence: opening cutscene, main menu, closing
// cutscene.
//
// Architecture:
//   StageOrchestrator
//     ├─ factory: Box<dyn StageFactory>
//     └─ SEQUENCE: [OpeningCutscene, MainMenu, ClosingCutscene]
//
// Flow:
//   run() → StageFactory::build() → Stage::run(FrameContext) → drop
//
//=========================================================================

//=== Module Declarations =================================================

mod orchestrator;

//=== Public API ==========================================================

pub use orchestrator::StageOrchestrator;

//=== Internal Dependencies ===============================================

use crate::core::error::StageError;
use crate::core::frame::palette::PaletteEffect;
use crate::core::frame::FrameLoop;
use crate::core::input::{Control, InputControls, LoopMode};
use crate::core::session::Session;
use crate::core::LoopOutcome;

//=== StageKind ===========================================================

/// Identifies a top-level stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    OpeningCutscene,
    MainMenu,
    ClosingCutscene,
}

impl StageKind {
    /// Order in which the orchestrator runs the stages.
    pub const SEQUENCE: [StageKind; 3] = [Self::OpeningCutscene, Self::MainMenu, Self::ClosingCutscene];
}

//=== FrameContext ========================================================

/// What a running stage can reach: the session and the shared frame loop.
pub struct FrameContext<'a> {
    session: &'a mut Session,
    frame_loop: &'a mut FrameLoop,
}

impl<'a> FrameContext<'a> {
    /// Presses latched before the stage started are dropped.
    pub fn new(session: &'a mut Session, frame_loop: &'a mut FrameLoop) -> Self {
        if let Some(state) = frame_loop.controls_mut().state_mut() {
            state.clear_presses();
        }
        Self { session, frame_loop }
    }

    /// Runs one paced frame. See [`FrameLoop::tick`].
    pub fn tick(&mut self, mode: LoopMode, effects: Option<&mut dyn PaletteEffect>) -> LoopOutcome {
        self.frame_loop.tick(&mut *self.session, mode, effects)
    }

    pub fn session(&self) -> &Session {
        &*self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut *self.session
    }

    pub fn controls(&self) -> &dyn InputControls {
        self.frame_loop.controls()
    }

    pub fn controls_mut(&mut self) -> &mut dyn InputControls {
        self.frame_loop.controls_mut()
    }

    /// Consumes a pending press of `control`, if there is one.
    pub fn take_press(&mut self, control: Control) -> bool {
        if !self.controls().state().was_pressed(control) {
            return false;
        }
        if let Some(state) = self.controls_mut().state_mut() {
            state.release(control);
        }
        true
    }
}

//=== Stage Trait =========================================================

/// A self-contained top-level activity.
///
/// A stage drives its own frames through [`FrameContext::tick`] and
/// returns when it is done. `Quit` and `Error` outcomes seen by the stage
/// are expected to be returned unchanged.
pub trait Stage {
    fn run(&mut self, ctx: &mut FrameContext<'_>) -> LoopOutcome;
}

//=== StageFactory ========================================================

/// Builds stages on demand; each one is dropped before the next is built.
pub trait StageFactory {
    fn build(&mut self, kind: StageKind, session: &mut Session) -> Result<Box<dyn Stage>, StageError>;
}
