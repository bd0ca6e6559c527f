//=========================================================================
// Stage Orchestrator
//=========================================================================
//
// Runs the fixed stage sequence, one stage alive at a time.
//
// Outcome handling:
//   build fails          → abort with that error
//   Quit (opening/menu)  → Ok, remaining stages skipped
//   Error (opening/menu) → logged, sequence continues
//   closing outcome      → ignored
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{FrameContext, StageFactory, StageKind};
use crate::core::error::StageError;
use crate::core::frame::FrameLoop;
use crate::core::session::Session;
use crate::core::LoopOutcome;

//=== StageOrchestrator ===================================================

pub struct StageOrchestrator {
    factory: Box<dyn StageFactory>,
}

impl StageOrchestrator {
    pub fn new(factory: Box<dyn StageFactory>) -> Self {
        Self { factory }
    }

    //--- run() -----------------------------------------------------------
    //
    // Builds, runs and drops each stage in `StageKind::SEQUENCE`. The
    // closing cutscene is always attempted unless an earlier stage ended
    // the program.
    //
    pub fn run(&mut self, session: &mut Session, frame_loop: &mut FrameLoop) -> Result<(), StageError> {
        for kind in StageKind::SEQUENCE {
            debug!(target: "stage", "Building {:?}", kind);
            let mut stage = self.factory.build(kind, session)?;

            info!(target: "stage", "Entering {:?}", kind);
            let outcome = stage.run(&mut FrameContext::new(session, frame_loop));
            drop(stage);

            if kind == StageKind::ClosingCutscene {
                debug!(target: "stage", "Closing cutscene ended with {:?}", outcome);
                break;
            }

            match outcome {
                LoopOutcome::Quit => {
                    info!(target: "stage", "Quit during {:?}", kind);
                    return Ok(());
                }
                LoopOutcome::Error(code) => {
                    warn!(target: "stage", "{:?} ended with a {} error, continuing", kind, code);
                }
                LoopOutcome::Continue | LoopOutcome::Captured(_) => {}
            }
        }

        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::core::error::ErrorCode;
    use crate::core::profile::PlatformProfile;
    use crate::core::stage::Stage;
    use crate::testing::{healthy_backends, record, take_journal, test_launch, CountingControls};

    #[derive(Debug, Clone, Copy)]
    enum Script {
        Returns(LoopOutcome),
        BuildFails(ErrorCode),
    }

    struct ScriptedStage {
        kind: StageKind,
        outcome: LoopOutcome,
    }

    impl Stage for ScriptedStage {
        fn run(&mut self, ctx: &mut FrameContext<'_>) -> LoopOutcome {
            record(format!("run {:?}", self.kind));
            ctx.tick(Default::default(), None);
            self.outcome
        }
    }

    impl Drop for ScriptedStage {
        fn drop(&mut self) {
            record(format!("drop {:?}", self.kind));
        }
    }

    struct ScriptedFactory {
        scripts: HashMap<StageKind, Script>,
    }

    impl StageFactory for ScriptedFactory {
        fn build(&mut self, kind: StageKind, _session: &mut Session) -> Result<Box<dyn Stage>, StageError> {
            record(format!("build {:?}", kind));
            match self.scripts.get(&kind).copied().unwrap_or(Script::Returns(LoopOutcome::Continue)) {
                Script::Returns(outcome) => Ok(Box::new(ScriptedStage { kind, outcome })),
                Script::BuildFails(code) => Err(StageError::new(code, format!("{kind:?} missing"))),
            }
        }
    }

    fn run_script(scripts: &[(StageKind, Script)]) -> (Result<(), StageError>, Vec<String>) {
        let (backends, _rig) = healthy_backends();
        let mut session = Session::acquire(test_launch(&["stagehand"]), backends).expect("session");
        let mut frame_loop = FrameLoop::new(Box::new(CountingControls::default()), &PlatformProfile::desktop());
        let mut orchestrator = StageOrchestrator::new(Box::new(ScriptedFactory {
            scripts: scripts.iter().copied().collect(),
        }));

        take_journal();
        let result = orchestrator.run(&mut session, &mut frame_loop);
        let journal = take_journal()
            .into_iter()
            .filter(|entry| ["build", "run", "drop"].iter().any(|p| entry.starts_with(p)))
            .collect();
        (result, journal)
    }

    fn steps(kinds: &[(&str, StageKind)]) -> Vec<String> {
        kinds.iter().map(|(verb, kind)| format!("{verb} {kind:?}")).collect()
    }

    use StageKind::{ClosingCutscene as Closing, MainMenu as Menu, OpeningCutscene as Opening};

    #[test]
    fn full_sequence_runs_each_stage_once() {
        let (result, journal) = run_script(&[]);

        assert!(result.is_ok());
        assert_eq!(
            journal,
            steps(&[
                ("build", Opening),
                ("run", Opening),
                ("drop", Opening),
                ("build", Menu),
                ("run", Menu),
                ("drop", Menu),
                ("build", Closing),
                ("run", Closing),
                ("drop", Closing),
            ])
        );
    }

    #[test]
    fn sequencing_table() {
        // (script, expected Ok, stages that were run)
        let table: Vec<(Vec<(StageKind, Script)>, bool, Vec<StageKind>)> = vec![
            (vec![(Opening, Script::Returns(LoopOutcome::Quit))], true, vec![Opening]),
            (vec![(Menu, Script::Returns(LoopOutcome::Quit))], true, vec![Opening, Menu]),
            (
                vec![(Opening, Script::Returns(LoopOutcome::Error(ErrorCode::File)))],
                true,
                vec![Opening, Menu, Closing],
            ),
            (
                vec![(Menu, Script::Returns(LoopOutcome::Error(ErrorCode::Data)))],
                true,
                vec![Opening, Menu, Closing],
            ),
            (vec![(Opening, Script::BuildFails(ErrorCode::File))], false, vec![]),
            (vec![(Menu, Script::BuildFails(ErrorCode::File))], false, vec![Opening]),
            (vec![(Closing, Script::BuildFails(ErrorCode::File))], false, vec![Opening, Menu]),
            (
                vec![(Closing, Script::Returns(LoopOutcome::Error(ErrorCode::Unknown)))],
                true,
                vec![Opening, Menu, Closing],
            ),
            (vec![(Closing, Script::Returns(LoopOutcome::Quit))], true, vec![Opening, Menu, Closing]),
        ];

        for (script, ok, ran) in table {
            let (result, journal) = run_script(&script);
            let ran_actual: Vec<String> = journal.into_iter().filter(|e| e.starts_with("run")).collect();
            let ran_expected: Vec<String> = ran.iter().map(|kind| format!("run {kind:?}")).collect();

            assert_eq!(result.is_ok(), ok, "script {script:?}");
            assert_eq!(ran_actual, ran_expected, "script {script:?}");
        }
    }

    #[test]
    fn run_error_moves_on_to_the_next_stage() {
        let (result, journal) = run_script(&[(Opening, Script::Returns(LoopOutcome::Error(ErrorCode::Data)))]);

        assert!(result.is_ok());
        assert_eq!(
            journal,
            steps(&[
                ("build", Opening),
                ("run", Opening),
                ("drop", Opening),
                ("build", Menu),
                ("run", Menu),
                ("drop", Menu),
                ("build", Closing),
                ("run", Closing),
                ("drop", Closing),
            ])
        );
    }

    #[test]
    fn construction_error_is_forwarded_unchanged() {
        let (result, journal) = run_script(&[(Menu, Script::BuildFails(ErrorCode::Video))]);

        let err = result.err().expect("build failure");
        assert_eq!(err.code, ErrorCode::Video);
        assert_eq!(err.message, "MainMenu missing");
        assert!(!journal.iter().any(|entry| entry.contains("Closing")));
    }

    #[test]
    fn previous_stage_is_dropped_before_next_is_built() {
        let (_, journal) = run_script(&[]);

        let drop_opening = journal.iter().position(|e| e == "drop OpeningCutscene");
        let build_menu = journal.iter().position(|e| e == "build MainMenu");
        assert!(drop_opening < build_menu);
    }

    #[test]
    fn captured_outcome_does_not_stop_the_sequence() {
        use crate::core::input::{Capture, KeyCode};

        let captured = LoopOutcome::Captured(Capture::Key(KeyCode::Escape));
        let (result, journal) = run_script(&[(Opening, Script::Returns(captured))]);

        assert!(result.is_ok());
        assert!(journal.contains(&"run ClosingCutscene".to_string()));
    }
}
