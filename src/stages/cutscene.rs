//=========================================================================
// Cutscene Stage
//=========================================================================
//
// Plays a scene file: fade in, hold, fade out. Enter or Escape skips to
// the end.
//
// The scene file is opened when the stage is built, so a missing file
// is a construction failure. Its contents are held for the stage's
// lifetime and released with it.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::error::{ErrorCode, StageError};
use crate::core::frame::palette::{Fade, FadeDirection};
use crate::core::input::{Control, LoopMode};
use crate::core::resources::ResourceFile;
use crate::core::session::Session;
use crate::core::stage::{FrameContext, Stage};
use crate::core::LoopOutcome;

//=== Constants ===========================================================

pub const OPENING_SCENE: &str = "startup.0sc";
pub const CLOSING_SCENE: &str = "end.0sc";

pub(crate) const FADE_TICKS: u32 = 500;
pub(crate) const HOLD_TICKS: u32 = 2_000;

//=== Phase ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    FadeIn,
    Hold,
    FadeOut,
}

impl Phase {
    fn duration(self) -> u32 {
        match self {
            Self::FadeIn | Self::FadeOut => FADE_TICKS,
            Self::Hold => HOLD_TICKS,
        }
    }
}

//=== Cutscene ============================================================

pub struct Cutscene {
    scene: ResourceFile,
    phase: Phase,

    /// Frame tick at which the current phase began; set on the first frame.
    phase_start: Option<u32>,
    fade: Fade,
}

impl Cutscene {
    pub fn load(session: &Session, name: &str) -> Result<Self, StageError> {
        let scene = session.open_resource(name)?;
        if scene.is_empty() {
            return Err(StageError::new(ErrorCode::Data, format!("{name} is empty")));
        }

        debug!(target: "stage", "Scene {} loaded ({} bytes)", name, scene.len());
        Ok(Self {
            scene,
            phase: Phase::FadeIn,
            phase_start: None,
            fade: Fade::new(FadeDirection::In, FADE_TICKS),
        })
    }

    pub fn name(&self) -> &str {
        self.scene.name()
    }

    /// Moves to the next phase once the current one has lasted its
    /// duration in frame ticks. Returns `true` when the scene is over.
    fn advance(&mut self, now: u32) -> bool {
        let since = *self.phase_start.get_or_insert(now);
        if now.wrapping_sub(since) < self.phase.duration() {
            return false;
        }

        self.phase = match self.phase {
            Phase::FadeIn => Phase::Hold,
            Phase::Hold => {
                self.fade = Fade::new(FadeDirection::Out, FADE_TICKS);
                Phase::FadeOut
            }
            Phase::FadeOut => return true,
        };
        self.phase_start = Some(now);
        false
    }
}

impl Stage for Cutscene {
    fn run(&mut self, ctx: &mut FrameContext<'_>) -> LoopOutcome {
        info!(target: "stage", "Playing {}", self.name());

        loop {
            let outcome = ctx.tick(LoopMode::Normal, Some(&mut self.fade));
            if outcome.is_interrupt() {
                return outcome;
            }

            if ctx.take_press(Control::Enter) || ctx.take_press(Control::Escape) {
                debug!(target: "stage", "{} skipped", self.name());
                return LoopOutcome::Continue;
            }

            if self.advance(ctx.session().frame_ticks()) {
                return LoopOutcome::Continue;
            }
        }
    }
}

impl Drop for Cutscene {
    fn drop(&mut self) {
        debug!(target: "stage", "Scene {} released", self.scene.name());

        #[cfg(test)]
        crate::testing::record(format!("release scene {}", self.scene.name()));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
