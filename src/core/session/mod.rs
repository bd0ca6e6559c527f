//=========================================================================
// Session
//=========================================================================
//
// Owns every process-wide resource between startup and shutdown.
//
// Architecture:
// ```text
//     Launch + Backends ──acquire()──> Session ──release()──> (empty)
//                           │                      │
//                           ├─ paths, config       ├─ network
//                           ├─ display, input      ├─ fonts (newest first)
//                           ├─ audio               ├─ audio
//                           ├─ panel, fonts        ├─ config save
//                           └─ clock, trig, net    └─ display
// ```
//
// A failure at any acquisition step returns early; dropping the partly
// built session releases exactly what was acquired, newest first.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::config::{Config, ConfigStore};
use crate::core::error::{InitError, ResourceError};
use crate::core::frame::{Clock, GlobalClock};
use crate::core::launch::{Launch, LaunchArgs};
use crate::core::paths::SearchPaths;
use crate::core::platform_bridge::{Audio, Display};
use crate::core::profile::PlatformProfile;
use crate::core::resources::font::load_fonts;
use crate::core::resources::{FontSet, Network, ResourceFile, ResourceLoader, TrigTable};

//=== Backends ============================================================

/// Platform collaborators handed to the session at startup.
pub struct Backends {
    pub display: Box<dyn Display>,
    pub audio: Box<dyn Audio>,
    pub clock: Box<dyn Clock>,
    pub resources: Box<dyn ResourceLoader>,
    pub config_store: Box<dyn ConfigStore>,
}

//=== Session =============================================================

/// Process-wide state: configuration, presentation, fonts, clock,
/// lookup table and network handle.
///
/// Stages borrow the session; only the session frees resources.
pub struct Session {
    args: LaunchArgs,
    profile: PlatformProfile,
    paths: SearchPaths,
    pub(crate) config: Config,
    config_store: Box<dyn ConfigStore>,
    resources: Box<dyn ResourceLoader>,

    pub(crate) clock: Box<dyn Clock>,
    pub(crate) global_clock: GlobalClock,

    pub(crate) display: Box<dyn Display>,
    display_open: bool,
    input_device: Option<String>,

    pub(crate) audio: Box<dyn Audio>,
    audio_open: bool,

    fonts: Option<FontSet>,
    trig: TrigTable,
    network: Option<Network>,

    /// Set once every step succeeded; gates the config save.
    committed: bool,
}

impl Session {
    //--- acquire() -------------------------------------------------------
    //
    // Brings the session up in dependency order:
    //  1. Search paths and options
    //  2. Configuration (defaults, persisted, `-f`)
    //  3. Display, scale factor and input device
    //  4. Audio
    //  5. Panel and fonts
    //  6. Clock, lookup table and network
    //
    pub fn acquire(launch: Launch, backends: Backends) -> Result<Self, InitError> {
        let Launch { args, env, profile } = launch;
        let Backends {
            display,
            audio,
            clock,
            resources,
            mut config_store,
        } = backends;

        //--- Step 1: Paths ------------------------------------------------
        let paths = SearchPaths::resolve(&args, &env, &profile);
        debug!(
            target: "session",
            "{} data paths, {} config paths",
            paths.data.len(),
            paths.config.len()
        );

        //--- Step 2: Configuration ----------------------------------------
        let config = Self::load_config(&args, &profile, &paths, config_store.as_mut());

        let global_clock = GlobalClock::seeded(clock.ticks());
        let mut session = Self {
            args,
            profile,
            paths,
            config,
            config_store,
            resources,
            clock,
            global_clock,
            display,
            display_open: false,
            input_device: None,
            audio,
            audio_open: false,
            fonts: None,
            trig: TrigTable::new(),
            network: None,
            committed: false,
        };

        //--- Step 3: Display ----------------------------------------------
        session.display.init(
            session.config.display_width,
            session.config.display_height,
            session.config.fullscreen,
        )?;
        session.display_open = true;
        info!(
            target: "session",
            "Display {}x{} (fullscreen: {})",
            session.config.display_width,
            session.config.display_height,
            session.config.fullscreen
        );

        if session.profile.supports_scaling {
            session.display.set_scale_factor(session.config.scale_factor);
        }

        session.input_device = session.display.bind_input_device();
        match &session.input_device {
            Some(name) => info!(target: "session", "Input device: {}", name),
            None => warn!(target: "session", "No input device found"),
        }

        //--- Step 4: Audio ------------------------------------------------
        session.audio.open(session.config.music_volume)?;
        session.audio_open = true;

        //--- Step 5: Fonts ------------------------------------------------
        session.fonts = Some(load_fonts(session.resources.as_ref(), &session.paths.data)?);

        //--- Step 6: Clock, lookup table, network -------------------------
        session.global_clock = GlobalClock::seeded(session.clock.ticks());
        session.network = Some(Network::new(session.config.network_address.clone()));

        session.committed = true;
        info!(target: "session", "Session ready");
        Ok(session)
    }

    fn load_config(
        args: &LaunchArgs,
        profile: &PlatformProfile,
        paths: &SearchPaths,
        store: &mut dyn ConfigStore,
    ) -> Config {
        let mut config = Config::defaults(profile);

        match store.load(&paths.config, &mut config) {
            Ok(true) => debug!(target: "config", "Persisted settings applied"),
            Ok(false) => warn!(target: "config", "No saved settings, using defaults"),
            Err(e) => {
                warn!(target: "config", "Ignoring saved settings: {}", e);
                config = Config::defaults(profile);
            }
        }

        if args.force_fullscreen() && !profile.fullscreen_only {
            config.fullscreen = true;
        }
        if profile.fullscreen_only {
            config.fullscreen = true;
        }

        config
    }

    //--- release() -------------------------------------------------------
    //
    // Releases whatever is held, newest first. Safe to call on a partial
    // session and safe to call more than once.
    //
    pub fn release(&mut self) {
        if self.network.take().is_some() {
            debug!(target: "session", "Network released");
        }

        if let Some(fonts) = self.fonts.take() {
            drop(fonts);
            debug!(target: "session", "Fonts released");
        }

        if self.audio_open {
            self.audio.close();
            self.audio_open = false;
        }

        if self.committed {
            self.committed = false;
            if let Err(e) = self.config_store.save(&self.paths.config, &self.config) {
                warn!(target: "config", "Settings not saved: {}", e);
            }
        }

        if self.display_open {
            self.display.close();
            self.display_open = false;
            info!(target: "session", "Session released");
        }
    }

    //--- Accessors -------------------------------------------------------

    pub fn args(&self) -> &LaunchArgs {
        &self.args
    }

    pub fn profile(&self) -> &PlatformProfile {
        &self.profile
    }

    pub fn paths(&self) -> &SearchPaths {
        &self.paths
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Changes here are persisted at clean shutdown.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// `None` once the session has been released.
    pub fn fonts(&self) -> Option<&FontSet> {
        self.fonts.as_ref()
    }

    pub fn trig(&self) -> &TrigTable {
        &self.trig
    }

    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }

    pub fn network_mut(&mut self) -> Option<&mut Network> {
        self.network.as_mut()
    }

    pub fn input_device(&self) -> Option<&str> {
        self.input_device.as_deref()
    }

    /// Tick count at the start of the current frame.
    pub fn frame_ticks(&self) -> u32 {
        self.global_clock.ticks()
    }

    /// Opens a data resource through the session's search paths.
    pub fn open_resource(&self, name: &str) -> Result<ResourceFile, ResourceError> {
        self.resources.open(&self.paths.data, name)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.release();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
