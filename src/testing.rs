//=========================================================================
// Test Support
//=========================================================================
//
// Mock collaborators and a per-thread release journal shared by the
// lifecycle, frame loop and stage tests.
//
// Every mock (and every font / network handle under `cfg(test)`) writes
// one line per acquire or release into the journal, so tests can assert
// on exact ordering across collaborators.
//
//=========================================================================

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use crate::core::config::{Config, ConfigError, ConfigStore};
use crate::core::error::{AudioError, ResourceError, VideoError};
use crate::core::frame::palette::{Palette, PaletteEffect};
use crate::core::frame::Clock;
use crate::core::input::{ControlState, InputControls, LoopMode, PlatformEvent};
use crate::core::launch::{Launch, LaunchArgs};
use crate::core::paths::{PathEnvironment, SearchPathList};
use crate::core::platform_bridge::{Audio, Display};
use crate::core::profile::PlatformProfile;
use crate::core::resources::font::{FontSlot, PANEL_BLOCK_SIZE, PANEL_FILE, PANEL_WIDTH};
use crate::core::resources::{ResourceFile, ResourceLoader};
use crate::core::session::Backends;
use crate::core::LoopOutcome;

//=== Journal =============================================================

thread_local! {
    static JOURNAL: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

pub(crate) fn record(entry: impl Into<String>) {
    JOURNAL.with(|journal| journal.borrow_mut().push(entry.into()));
}

/// Returns and clears everything recorded on this thread.
pub(crate) fn take_journal() -> Vec<String> {
    JOURNAL.with(|journal| std::mem::take(&mut *journal.borrow_mut()))
}

/// Journal entries that start with "release" / "close" / "save",
/// i.e. the teardown half of the journal.
pub(crate) fn releases(journal: &[String]) -> Vec<String> {
    journal
        .iter()
        .filter(|entry| {
            entry.starts_with("release") || entry.starts_with("close") || entry.starts_with("save")
        })
        .cloned()
        .collect()
}

//=== Panel Data ==========================================================

/// RLE-encoded panel whose font rows are filled, optionally leaving the
/// small-font rows blank.
pub(crate) fn encoded_panel(small_font_rows: bool) -> Vec<u8> {
    let filled = if small_font_rows { 56 } else { 48 };
    let mut codes = Vec::new();
    let mut push_run = |value: u8, mut count: usize| {
        while count > 0 {
            let chunk = count.min(127);
            codes.push(0x80 | chunk as u8);
            codes.push(value);
            count -= chunk;
        }
    };

    push_run(1, filled * PANEL_WIDTH);
    push_run(0, PANEL_BLOCK_SIZE - filled * PANEL_WIDTH);

    let mut data = (codes.len() as u16).to_le_bytes().to_vec();
    data.extend_from_slice(&codes);
    data
}

//=== MockLoader ==========================================================

/// In-memory data set; names listed in `failing` report `NotFound`.
#[derive(Debug, Clone)]
pub(crate) struct MockLoader {
    pub files: HashMap<String, Vec<u8>>,
    pub failing: HashSet<String>,
}

impl MockLoader {
    /// A complete, valid data set.
    pub fn complete() -> Self {
        let mut files = HashMap::new();
        files.insert(PANEL_FILE.to_string(), encoded_panel(true));
        for slot in FontSlot::ALL {
            if let Some(name) = slot.file_name() {
                files.insert(name.to_string(), vec![8, 1, 2, 3]);
            }
        }

        Self {
            files,
            failing: HashSet::new(),
        }
    }

    pub fn failing_on(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn with_file(mut self, name: &str, data: Vec<u8>) -> Self {
        self.files.insert(name.to_string(), data);
        self
    }
}

impl ResourceLoader for MockLoader {
    fn open(&self, _paths: &SearchPathList, name: &str) -> Result<ResourceFile, ResourceError> {
        if self.failing.contains(name) {
            return Err(ResourceError::NotFound { name: name.to_string() });
        }

        self.files
            .get(name)
            .map(|data| ResourceFile::from_bytes(name, data.clone()))
            .ok_or_else(|| ResourceError::NotFound { name: name.to_string() })
    }
}

//=== MockDisplay =========================================================

/// Display with a scripted event queue.
///
/// `frames` holds per-frame batches: each flip moves the next batch into
/// `events`, so a script can spread presses over several frames.
#[derive(Debug, Default)]
pub(crate) struct MockDisplay {
    pub fail_init: bool,
    pub input_device: Option<String>,
    pub events: Rc<RefCell<VecDeque<PlatformEvent>>>,
    pub frames: Rc<RefCell<VecDeque<Vec<PlatformEvent>>>>,
    pub flips: Rc<RefCell<Vec<u32>>>,
    pub updates: Rc<RefCell<usize>>,
    pub open: bool,
}

impl Display for MockDisplay {
    fn init(&mut self, width: u32, height: u32, fullscreen: bool) -> Result<(), VideoError> {
        if self.fail_init {
            return Err(VideoError {
                width,
                height,
                reason: "mock refused".into(),
            });
        }
        record(format!("open display {width}x{height} fullscreen={fullscreen}"));
        self.open = true;
        Ok(())
    }

    fn set_scale_factor(&mut self, scale: u32) {
        record(format!("scale display {scale}"));
    }

    fn bind_input_device(&mut self) -> Option<String> {
        self.input_device.clone()
    }

    fn flip(&mut self, delta_ticks: u32, effects: Option<&mut dyn PaletteEffect>) {
        self.flips.borrow_mut().push(delta_ticks);
        if let Some(effect) = effects {
            effect.apply(&mut Palette::greyscale(), delta_ticks);
        }
        if let Some(batch) = self.frames.borrow_mut().pop_front() {
            self.events.borrow_mut().extend(batch);
        }
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.events.borrow_mut().pop_front()
    }

    fn update(&mut self, _event: &PlatformEvent) {
        *self.updates.borrow_mut() += 1;
    }

    fn close(&mut self) {
        if self.open {
            record("close display");
            self.open = false;
        }
    }
}

//=== MockAudio ===========================================================

#[derive(Debug, Default)]
pub(crate) struct MockAudio {
    pub fail_open: bool,
    pub volume: Rc<RefCell<Option<u8>>>,
}

impl Audio for MockAudio {
    fn open(&mut self, music_volume: u8) -> Result<(), AudioError> {
        if self.fail_open {
            return Err(AudioError { reason: "mock refused".into() });
        }
        record("open audio");
        *self.volume.borrow_mut() = Some(music_volume);
        Ok(())
    }

    fn set_volume(&mut self, music_volume: u8) {
        *self.volume.borrow_mut() = Some(music_volume);
    }

    fn close(&mut self) {
        record("close audio");
    }
}

//=== MockConfigStore =====================================================

#[derive(Debug, Default)]
pub(crate) struct MockConfigStore {
    pub persisted: Option<Config>,
    pub saved: Rc<RefCell<Option<Config>>>,
}

impl ConfigStore for MockConfigStore {
    fn load(&mut self, _paths: &SearchPathList, config: &mut Config) -> Result<bool, ConfigError> {
        match &self.persisted {
            Some(persisted) => {
                *config = Config {
                    network_address: config.network_address.clone(),
                    ..persisted.clone()
                };
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn save(&mut self, _paths: &SearchPathList, config: &Config) -> Result<(), ConfigError> {
        record("save config");
        *self.saved.borrow_mut() = Some(config.clone());
        Ok(())
    }
}

//=== SimulatedClock ======================================================

/// Clock that only advances when told to or when delayed.
#[derive(Debug, Clone, Default)]
pub(crate) struct SimulatedClock {
    pub now: Rc<RefCell<u32>>,
    pub delays: Rc<RefCell<Vec<u32>>>,
}

impl SimulatedClock {
    pub fn starting_at(ticks: u32) -> Self {
        let clock = Self::default();
        *clock.now.borrow_mut() = ticks;
        clock
    }

    pub fn advance(&self, ticks: u32) {
        *self.now.borrow_mut() += ticks;
    }
}

impl Clock for SimulatedClock {
    fn ticks(&self) -> u32 {
        *self.now.borrow()
    }

    fn delay(&mut self, ticks: u32) {
        self.delays.borrow_mut().push(ticks);
        *self.now.borrow_mut() += ticks;
    }
}

//=== CountingControls ====================================================

/// Controls updater that counts calls; `interrupt_on` makes one event
/// return a non-`Continue` outcome.
#[derive(Debug, Default)]
pub(crate) struct CountingControls {
    pub updates: Rc<RefCell<usize>>,
    pub finishes: Rc<RefCell<usize>>,
    pub interrupt_on: Option<(PlatformEvent, LoopOutcome)>,
    pub state: ControlState,
}

impl InputControls for CountingControls {
    fn update(&mut self, event: &PlatformEvent, _mode: LoopMode) -> LoopOutcome {
        *self.updates.borrow_mut() += 1;
        match &self.interrupt_on {
            Some((trigger, outcome)) if trigger == event => *outcome,
            _ => LoopOutcome::Continue,
        }
    }

    fn finish_frame(&mut self) {
        *self.finishes.borrow_mut() += 1;
    }

    fn state(&self) -> &ControlState {
        &self.state
    }
}

//=== Launch / Backends ===================================================

pub(crate) fn test_launch(args: &[&str]) -> Launch {
    Launch {
        args: LaunchArgs::parse(args.iter().copied()),
        env: PathEnvironment::default(),
        profile: PlatformProfile::desktop(),
    }
}

/// Backends over mocks; the returned handles observe them.
pub(crate) struct MockRig {
    pub events: Rc<RefCell<VecDeque<PlatformEvent>>>,
    pub frames: Rc<RefCell<VecDeque<Vec<PlatformEvent>>>>,
    pub flips: Rc<RefCell<Vec<u32>>>,
    pub clock: SimulatedClock,
    pub saved: Rc<RefCell<Option<Config>>>,
    pub volume: Rc<RefCell<Option<u8>>>,
}

pub(crate) fn mock_backends(
    display: MockDisplay,
    audio: MockAudio,
    loader: MockLoader,
    store: MockConfigStore,
) -> (Backends, MockRig) {
    let clock = SimulatedClock::starting_at(1_000);
    let rig = MockRig {
        events: display.events.clone(),
        frames: display.frames.clone(),
        flips: display.flips.clone(),
        clock: clock.clone(),
        saved: store.saved.clone(),
        volume: audio.volume.clone(),
    };

    let backends = Backends {
        display: Box::new(display),
        audio: Box::new(audio),
        clock: Box::new(clock),
        resources: Box::new(loader),
        config_store: Box::new(store),
    };

    (backends, rig)
}

impl MockRig {
    /// Queues one batch of events per upcoming frame.
    pub fn script_frames(&self, frames: Vec<Vec<PlatformEvent>>) {
        self.frames.borrow_mut().extend(frames);
    }
}

/// Backends where every collaborator succeeds.
pub(crate) fn healthy_backends() -> (Backends, MockRig) {
    mock_backends(
        MockDisplay::default(),
        MockAudio::default(),
        MockLoader::complete(),
        MockConfigStore::default(),
    )
}
