//=========================================================================
// Stages
//=========================================================================
//
// The stock stage set run by the binary.
//
// Architecture:
//   StandardStages (StageFactory)
//     ├─ OpeningCutscene → Cutscene(startup.0sc)
//     ├─ MainMenu        → MainMenu
//     └─ ClosingCutscene → Cutscene(end.0sc)
//
//=========================================================================

//=== Module Declarations =================================================

mod cutscene;
mod menu;

//=== Public API ==========================================================

pub use cutscene::{Cutscene, CLOSING_SCENE, OPENING_SCENE};
pub use menu::{MainMenu, MenuEntry};

//=== Internal Dependencies ===============================================

use crate::core::error::StageError;
use crate::core::session::Session;
use crate::core::stage::{Stage, StageFactory, StageKind};

//=== StandardStages ======================================================

/// Builds the stock cutscenes and menu.
#[derive(Debug, Default)]
pub struct StandardStages;

impl StandardStages {
    pub fn new() -> Self {
        Self
    }
}

impl StageFactory for StandardStages {
    fn build(&mut self, kind: StageKind, session: &mut Session) -> Result<Box<dyn Stage>, StageError> {
        Ok(match kind {
            StageKind::OpeningCutscene => Box::new(Cutscene::load(session, OPENING_SCENE)?),
            StageKind::MainMenu => Box::new(MainMenu::new(session)?),
            StageKind::ClosingCutscene => Box::new(Cutscene::load(session, CLOSING_SCENE)?),
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorCode;
    use crate::core::frame::FrameLoop;
    use crate::core::input::{Controls, KeyCode, PlatformEvent};
    use crate::core::profile::PlatformProfile;
    use crate::core::stage::StageOrchestrator;
    use crate::testing::{
        mock_backends, take_journal, test_launch, MockAudio, MockConfigStore, MockDisplay, MockLoader, MockRig,
    };

    fn run_program(loader: MockLoader, frames: Vec<Vec<PlatformEvent>>) -> (Result<(), StageError>, Vec<String>, MockRig) {
        let (backends, rig) = mock_backends(
            MockDisplay::default(),
            MockAudio::default(),
            loader,
            MockConfigStore::default(),
        );
        let mut session = Session::acquire(test_launch(&["stagehand"]), backends).expect("session");
        let mut frame_loop = FrameLoop::new(Box::new(Controls::new()), &PlatformProfile::desktop());
        let mut orchestrator = StageOrchestrator::new(Box::new(StandardStages::new()));
        rig.script_frames(frames);

        take_journal();
        let result = orchestrator.run(&mut session, &mut frame_loop);
        (result, take_journal(), rig)
    }

    fn full_data() -> MockLoader {
        MockLoader::complete()
            .with_file(OPENING_SCENE, vec![1])
            .with_file(CLOSING_SCENE, vec![2])
    }

    /// Enter pressed on frames 1, 3, 5... and released in between.
    fn enter_presses(count: usize) -> Vec<Vec<PlatformEvent>> {
        let mut frames = Vec::new();
        for press in 0..count {
            if press > 0 {
                frames.push(vec![PlatformEvent::KeyUp(KeyCode::Enter)]);
            }
            frames.push(vec![PlatformEvent::KeyDown(KeyCode::Enter)]);
        }
        frames
    }

    #[test]
    fn skipping_through_all_stages_succeeds() {
        // Opening skipped, menu "Continue" picked, closing skipped.
        let (result, journal, rig) = run_program(full_data(), enter_presses(3));

        assert!(result.is_ok(), "{result:?}");
        assert!(journal.contains(&format!("release scene {OPENING_SCENE}")));
        assert!(journal.contains(&format!("release scene {CLOSING_SCENE}")));
        assert_eq!(rig.flips.borrow().len(), 5);
    }

    #[test]
    fn missing_closing_scene_surfaces_after_the_menu() {
        let loader = MockLoader::complete().with_file(OPENING_SCENE, vec![1]);
        let (result, journal, _) = run_program(loader, enter_presses(2));

        assert_eq!(result.err().map(|e| e.code), Some(ErrorCode::File));
        assert!(journal.contains(&format!("release scene {OPENING_SCENE}")));
    }

    #[test]
    fn missing_opening_scene_aborts_immediately() {
        let (result, _, rig) = run_program(MockLoader::complete(), Vec::new());

        assert_eq!(result.err().map(|e| e.code), Some(ErrorCode::File));
        assert!(rig.flips.borrow().is_empty());
    }

    #[test]
    fn quit_during_opening_skips_the_rest() {
        let (result, journal, _) = run_program(full_data(), vec![vec![PlatformEvent::Quit]]);

        assert!(result.is_ok());
        assert!(!journal.contains(&format!("release scene {CLOSING_SCENE}")));
    }

    #[test]
    fn presses_from_the_opening_do_not_reach_the_menu() {
        // Down goes in alongside the Enter that skips the opening. A stale
        // Down would move the menu to Quit and skip the closing scene.
        let mut frames = vec![vec![
            PlatformEvent::KeyDown(KeyCode::ArrowDown),
            PlatformEvent::KeyDown(KeyCode::Enter),
        ]];
        frames.extend(enter_presses(3).into_iter().skip(1));

        let (result, journal, _) = run_program(full_data(), frames);

        assert!(result.is_ok());
        assert!(journal.contains(&format!("release scene {CLOSING_SCENE}")));
    }

    #[test]
    fn escape_in_menu_skips_closing_scene() {
        let frames = vec![
            vec![PlatformEvent::KeyDown(KeyCode::Enter)],
            vec![PlatformEvent::KeyDown(KeyCode::Escape)],
        ];
        let (result, journal, _) = run_program(full_data(), frames);

        assert!(result.is_ok());
        assert!(!journal.contains(&format!("release scene {CLOSING_SCENE}")));
    }
}
