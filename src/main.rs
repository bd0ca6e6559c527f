//=========================================================================
// Stagehand Binary
//
// Process boundary: installs logging, brings the session up, runs the
// stage sequence and maps the result to an exit status.
//
// Exit status:
//   0        normal end, including a deliberate quit
//   1        startup failure
//   3, 4, 1  stage failure (file, video, data)
//
//=========================================================================

use std::process::ExitCode;

use log::{error, info};

use stagehand::core::error::RuntimeError;
use stagehand::prelude::*;

fn run() -> Result<(), RuntimeError> {
    let launch = Launch::from_process();
    let mut frame_loop = FrameLoop::new(Box::new(Controls::new()), &launch.profile);

    let mut session = Session::acquire(launch, desktop_backends())?;
    let result = StageOrchestrator::new(Box::new(StandardStages::new())).run(&mut session, &mut frame_loop);
    session.release();

    result.map_err(RuntimeError::from)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => {
            info!("Exiting normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_status())
        }
    }
}
