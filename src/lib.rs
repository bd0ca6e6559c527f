//=========================================================================
// Stagehand — Library Root
//
// Startup/shutdown lifecycle and paced frame loop for a 2D game
// presentation client.
//
// Responsibilities:
// - Expose the session, frame loop and stage sequence (`core`)
// - Provide the stock Winit/rodio backends (`platform`)
// - Provide the stock cutscene and menu stages (`stages`)
//
// Typical usage:
// ```no_run
// use stagehand::prelude::*;
//
// let launch = Launch::from_process();
// let mut frame_loop = FrameLoop::new(Box::new(Controls::new()), &launch.profile);
// let mut session = Session::acquire(launch, desktop_backends()).expect("startup");
// let result = StageOrchestrator::new(Box::new(StandardStages::new()))
//     .run(&mut session, &mut frame_loop);
// session.release();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds every platform-independent system: launch arguments,
// search paths, configuration, resources, the session, the frame loop
// and the stage orchestrator.
//
pub mod core;

//--- Backends and Stages -------------------------------------------------
//
// `platform` implements the collaborator traits over Winit, rodio and
// the filesystem. `stages` holds the stock stage set the binary runs.
//
pub mod platform;
pub mod stages;

pub mod prelude;

//--- Test Support --------------------------------------------------------

#[cfg(test)]
mod testing;
