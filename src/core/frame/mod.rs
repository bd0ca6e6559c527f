//=========================================================================
// Frame Loop
//
// One paced frame of the single-threaded game loop.
//
// Responsibilities:
// - Hold a soft lower bound on frame duration (no catch-up)
// - Present the frame with palette effects driven by elapsed ticks
// - Drain every pending platform event through the input controls
// - Finalize continuous control state exactly once per frame
//
// Notes:
// `tick()` is the only place the loop blocks, and only for the remainder
// of `T_ACTIVE_FRAME`. A slow frame is never compensated for.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod palette;

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputControls, LoopMode, PlatformEvent};
use crate::core::profile::{PlatformProfile, VolumeButtons, MAX_VOLUME};
use crate::core::session::Session;
use crate::core::LoopOutcome;
use palette::PaletteEffect;

//=== Constants ===========================================================

/// Minimum frame duration in ticks (milliseconds); 50 frames per second.
pub const T_ACTIVE_FRAME: u32 = 20;

//=== Clock ===============================================================

/// Monotonic millisecond tick source.
pub trait Clock {
    fn ticks(&self) -> u32;

    /// Blocks for `ticks` milliseconds.
    fn delay(&mut self, ticks: u32);
}

/// Wall clock measured from process start.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn ticks(&self) -> u32 {
        // Wraps after ~49 days; every consumer uses wrapping arithmetic.
        self.origin.elapsed().as_millis() as u32
    }

    fn delay(&mut self, ticks: u32) {
        thread::sleep(Duration::from_millis(u64::from(ticks)));
    }
}

//=== GlobalClock =========================================================

/// Tick count at the start of the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalClock {
    ticks: u32,
}

impl GlobalClock {
    /// Seeds one frame in the past so the first frame does not stall.
    pub fn seeded(now: u32) -> Self {
        Self {
            ticks: now.wrapping_sub(T_ACTIVE_FRAME),
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Moves the frame start to `now`, returning the elapsed ticks.
    fn advance(&mut self, now: u32) -> u32 {
        let delta = now.wrapping_sub(self.ticks);
        self.ticks = now;
        delta
    }
}

//=== FrameLoop ===========================================================

/// Per-frame driver shared by every stage.
pub struct FrameLoop {
    controls: Box<dyn InputControls>,
    frame_interval: u32,
    volume_buttons: Option<VolumeButtons>,
    volume_direction: i8,
}

impl FrameLoop {
    pub fn new(controls: Box<dyn InputControls>, profile: &PlatformProfile) -> Self {
        Self {
            controls,
            frame_interval: T_ACTIVE_FRAME,
            volume_buttons: profile.volume_buttons,
            volume_direction: 0,
        }
    }

    /// Overrides the minimum frame duration.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` is zero.
    pub fn with_frame_interval(mut self, ticks: u32) -> Self {
        assert!(ticks > 0, "frame interval must be positive");
        self.frame_interval = ticks;
        self
    }

    pub fn controls(&self) -> &dyn InputControls {
        self.controls.as_ref()
    }

    pub fn controls_mut(&mut self) -> &mut dyn InputControls {
        self.controls.as_mut()
    }

    //--- tick() ----------------------------------------------------------
    //
    // Runs one frame:
    //  1. Waits out the remainder of the frame interval
    //  2. Presents the frame, advancing palette effects by elapsed ticks
    //  3. Drains all pending events (Quit and captures short-circuit)
    //  4. Finalizes held-control state once
    //
    pub fn tick(
        &mut self,
        session: &mut Session,
        mode: LoopMode,
        effects: Option<&mut dyn PaletteEffect>,
    ) -> LoopOutcome {
        //--- Step 1: Pacing -----------------------------------------------
        let mut now = session.clock.ticks();
        let elapsed = now.wrapping_sub(session.global_clock.ticks());
        if elapsed < self.frame_interval {
            session.clock.delay(self.frame_interval - elapsed);
            now = session.clock.ticks();
        }
        let delta = session.global_clock.advance(now);

        //--- Step 2: Present ----------------------------------------------
        session.display.flip(delta, effects);

        //--- Step 3: Drain events -----------------------------------------
        while let Some(event) = session.display.poll_event() {
            if event.is_quit() {
                debug!(target: "frame", "Quit received");
                return LoopOutcome::Quit;
            }

            trace!(target: "frame", "Event {:?}", event);
            self.track_volume_buttons(&event);

            let outcome = self.controls.update(&event, mode);
            if outcome.is_interrupt() {
                return outcome;
            }

            session.display.update(&event);
        }

        //--- Step 4: Continuous state -------------------------------------
        self.controls.finish_frame();
        self.nudge_volume(session);

        LoopOutcome::Continue
    }

    fn track_volume_buttons(&mut self, event: &PlatformEvent) {
        let Some(buttons) = self.volume_buttons else { return };

        match *event {
            PlatformEvent::JoystickButtonDown(b) if b == buttons.up => self.volume_direction = 1,
            PlatformEvent::JoystickButtonDown(b) if b == buttons.down => self.volume_direction = -1,
            PlatformEvent::JoystickButtonUp(b) if b == buttons.up || b == buttons.down => {
                self.volume_direction = 0
            }
            _ => {}
        }
    }

    fn nudge_volume(&self, session: &mut Session) {
        let Some(buttons) = self.volume_buttons else { return };

        let current = session.config.music_volume;
        let next = match self.volume_direction {
            1 => current.saturating_add(buttons.step).min(MAX_VOLUME),
            -1 => current.saturating_sub(buttons.step),
            _ => return,
        };

        if next != current {
            session.config.music_volume = next;
            session.audio.set_volume(next);
            trace!(target: "frame", "Music volume {}", next);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
