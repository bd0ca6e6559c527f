//=========================================================================
// Audio Backends
//=========================================================================
//
// `Audio` implementations: a rodio output device when built with the
// `sound` feature, and a silent device otherwise.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::error::AudioError;
use crate::core::platform_bridge::Audio;
use crate::core::profile::MAX_VOLUME;

/// Maps 0..=MAX_VOLUME onto rodio's 0.0..=1.0 gain.
#[cfg_attr(not(feature = "sound"), allow(dead_code))]
fn gain(volume: u8) -> f32 {
    f32::from(volume.min(MAX_VOLUME)) / f32::from(MAX_VOLUME)
}

//=== SilentAudio =========================================================

/// Accepts every request and plays nothing.
#[derive(Debug, Default)]
pub struct SilentAudio {
    open: bool,
    volume: u8,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Audio for SilentAudio {
    fn open(&mut self, music_volume: u8) -> Result<(), AudioError> {
        info!(target: "platform", "Audio disabled in this build");
        self.open = true;
        self.volume = music_volume;
        Ok(())
    }

    fn set_volume(&mut self, music_volume: u8) {
        self.volume = music_volume;
    }

    fn close(&mut self) {
        self.open = false;
    }
}

//=== RodioAudio ==========================================================

#[cfg(feature = "sound")]
pub use rodio_backend::RodioAudio;

#[cfg(feature = "sound")]
mod rodio_backend {
    use log::{debug, info};
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::gain;
    use crate::core::error::AudioError;
    use crate::core::platform_bridge::Audio;

    struct Device {
        _stream: OutputStream,
        _handle: OutputStreamHandle,
        music: Sink,
    }

    /// Default output device with one music sink.
    #[derive(Default)]
    pub struct RodioAudio {
        device: Option<Device>,
    }

    impl RodioAudio {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl Audio for RodioAudio {
        fn open(&mut self, music_volume: u8) -> Result<(), AudioError> {
            let (stream, handle) = OutputStream::try_default().map_err(|e| AudioError { reason: e.to_string() })?;
            let music = Sink::try_new(&handle).map_err(|e| AudioError { reason: e.to_string() })?;
            music.set_volume(gain(music_volume));

            info!(target: "platform", "Audio device opened");
            self.device = Some(Device {
                _stream: stream,
                _handle: handle,
                music,
            });
            Ok(())
        }

        fn set_volume(&mut self, music_volume: u8) {
            if let Some(device) = &self.device {
                device.music.set_volume(gain(music_volume));
            }
        }

        fn close(&mut self) {
            if let Some(device) = self.device.take() {
                device.music.stop();
                debug!(target: "platform", "Audio device closed");
            }
        }
    }
}

//=== default_audio() =====================================================

/// The best audio backend this build offers.
pub fn default_audio() -> Box<dyn Audio> {
    #[cfg(feature = "sound")]
    {
        debug!(target: "platform", "Using rodio audio");
        Box::new(RodioAudio::new())
    }

    #[cfg(not(feature = "sound"))]
    {
        debug!(target: "platform", "Using silent audio");
        Box::new(SilentAudio::new())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_spans_unit_range() {
        assert_eq!(gain(0), 0.0);
        assert_eq!(gain(MAX_VOLUME), 1.0);
        assert_eq!(gain(MAX_VOLUME / 2), 0.5);
        assert_eq!(gain(u8::MAX), 1.0);
    }

    #[test]
    fn silent_audio_tracks_state() {
        let mut audio = SilentAudio::new();

        audio.open(40).expect("silent audio always opens");
        assert!(audio.is_open());
        assert_eq!(audio.volume(), 40);

        audio.set_volume(60);
        assert_eq!(audio.volume(), 60);

        audio.close();
        audio.close();
        assert!(!audio.is_open());
    }
}
