//=========================================================================
// Winit Display
//=========================================================================
//
// `Display` backend over a Winit window.
//
// Architecture:
// ```text
//  FrameLoop::tick
//    ├─ flip()       → request_redraw + pump_app_events(0)
//    │                    ↓
//    │                 WindowHandler (ApplicationHandler)
//    │                    ├─ creates window on first resume
//    │                    └─ translate() → EventSender
//    │                                        ↓
//    └─ poll_event() ←────────────────── EventQueue
// ```
//
// The event loop is pumped, never run: each flip gives Winit one
// non-blocking pass, so the frame loop stays the only loop and keeps
// its own pacing.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== External Dependencies ===============================================

use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Fullscreen, Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use super::input_processor::translate;
use crate::core::error::VideoError;
use crate::core::frame::palette::{Palette, PaletteEffect};
use crate::core::input::PlatformEvent;
use crate::core::platform_bridge::{Display, EventQueue, EventSender};

//=== Constants ===========================================================

const WINDOW_TITLE: &str = "Stagehand";

/// Pumps allowed for the window to appear during `init()`.
const STARTUP_PUMPS: usize = 8;

//=== WindowHandler =======================================================

/// Winit callback target; owns the window once it exists.
struct WindowHandler {
    attributes: Option<WindowAttributes>,
    window: Option<Window>,
    sender: EventSender,
    creation_error: Option<String>,
}

impl WindowHandler {
    fn ensure_window(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (resume?)");
            return;
        }
        let Some(attributes) = self.attributes.take() else { return };

        match event_loop.create_window(attributes) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.creation_error = Some(e.to_string());
            }
        }
    }
}

impl ApplicationHandler for WindowHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.ensure_window(event_loop);
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if matches!(event, WindowEvent::CloseRequested) {
            info!(target: "platform", "Window close requested");
        }
        translate(&event, |translated| self.sender.push(translated));
    }
}

//=== WinitDisplay ========================================================

/// Windowed or fullscreen display backed by Winit.
pub struct WinitDisplay {
    event_loop: Option<EventLoop<()>>,
    handler: WindowHandler,
    queue: EventQueue,
    palette: Palette,
    shown: Palette,
    logical_size: PhysicalSize<u32>,
    fullscreen: bool,
}

impl WinitDisplay {
    pub fn new() -> Self {
        let (sender, queue) = EventQueue::new();
        Self {
            event_loop: None,
            handler: WindowHandler {
                attributes: None,
                window: None,
                sender,
                creation_error: None,
            },
            queue,
            palette: Palette::default(),
            shown: Palette::default(),
            logical_size: PhysicalSize::new(0, 0),
            fullscreen: false,
        }
    }

    /// Palette as presented by the last flip, effects applied.
    pub fn shown_palette(&self) -> &Palette {
        &self.shown
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    //--- Internal Helpers -------------------------------------------------

    /// Gives Winit one non-blocking pass over its pending events.
    fn pump(&mut self) {
        let Some(event_loop) = self.event_loop.as_mut() else { return };

        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), &mut self.handler) {
            warn!(target: "platform", "Event loop exited with status {}", code);
            self.handler.sender.push(PlatformEvent::Quit);
            self.handler.window = None;
            self.event_loop = None;
        }
    }
}

impl Default for WinitDisplay {
    fn default() -> Self {
        Self::new()
    }
}

//=== Display Implementation ==============================================

impl Display for WinitDisplay {
    fn init(&mut self, width: u32, height: u32, fullscreen: bool) -> Result<(), VideoError> {
        let fail = |reason: String| VideoError { width, height, reason };

        let event_loop = EventLoop::new().map_err(|e| fail(e.to_string()))?;
        self.event_loop = Some(event_loop);
        self.logical_size = PhysicalSize::new(width, height);
        self.fullscreen = fullscreen;

        let mut attributes = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(self.logical_size)
            .with_min_inner_size(self.logical_size);
        if fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        self.handler.attributes = Some(attributes);

        for _ in 0..STARTUP_PUMPS {
            self.pump();
            if let Some(reason) = self.handler.creation_error.take() {
                self.event_loop = None;
                return Err(fail(reason));
            }
            if self.handler.window.is_some() {
                return Ok(());
            }
        }

        self.event_loop = None;
        Err(fail("window was never created".to_string()))
    }

    fn set_scale_factor(&mut self, scale: u32) {
        if self.fullscreen {
            return;
        }
        let Some(window) = &self.handler.window else { return };

        let size = PhysicalSize::new(self.logical_size.width * scale, self.logical_size.height * scale);
        let _ = window.request_inner_size(size);
        debug!(target: "platform", "Scale factor {} ({}x{})", scale, size.width, size.height);
    }

    fn flip(&mut self, delta_ticks: u32, effects: Option<&mut dyn PaletteEffect>) {
        self.shown = self.palette.clone();
        if let Some(effect) = effects {
            effect.apply(&mut self.shown, delta_ticks);
        }

        if let Some(window) = &self.handler.window {
            window.request_redraw();
        }
        self.pump();
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.queue.poll()
    }

    fn update(&mut self, event: &PlatformEvent) {
        match *event {
            PlatformEvent::Resized { width, height } => {
                trace!(target: "platform", "Window resized to {}x{}", width, height);
            }
            PlatformEvent::FocusChanged(focused) => {
                trace!(target: "platform", "Window focus: {}", focused);
            }
            _ => {}
        }
    }

    fn close(&mut self) {
        if self.handler.window.take().is_some() {
            info!(target: "platform", "Window closed");
        }
        self.event_loop = None;
    }
}
