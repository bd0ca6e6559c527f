//=========================================================================
// Platform Profile
//=========================================================================
//
// Capability flags resolved once at startup.
//
// Everything that differs between targets (path separator, fixed data
// locations, fullscreen-only displays, hardware volume buttons) lives
// here, so the lifecycle and the frame loop never branch on the target
// themselves.
//
//=========================================================================

//=== Constants ===========================================================

/// Application directory name used for FHS-style data locations.
pub const APP_DIR_NAME: &str = "Stagehand";

/// Upper bound for both volume settings.
pub const MAX_VOLUME: u8 = 100;

//=== VolumeButtons =======================================================

/// Joystick buttons that drive the music volume directly (handhelds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeButtons {
    pub up: u8,
    pub down: u8,

    /// Volume change applied once per frame while a button is held.
    pub step: u8,
}

//=== PlatformProfile =====================================================

/// Target-specific capabilities consulted by the lifecycle and frame loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformProfile {
    /// Directory separator appended to user-supplied search paths.
    pub path_separator: char,

    /// Data directories baked in for this target, highest priority first.
    pub fixed_data_paths: Vec<String>,

    /// Whether the user's home directory is searched for data and config.
    pub home_search_path: bool,

    /// Whether the FHS layout (`/usr/share/games`, `~/.local/share`,
    /// `~/.config`) is searched.
    pub fhs_layout: bool,

    /// Displays that cannot run windowed; `-f` has no effect there.
    pub fullscreen_only: bool,

    /// Whether the configured scale factor is applied to the display.
    pub supports_scaling: bool,

    pub default_music_volume: u8,

    pub volume_buttons: Option<VolumeButtons>,
}

impl PlatformProfile {
    /// Resolves the profile for the compilation target. Building with
    /// `STAGEHAND_PROFILE=handheld` selects the handheld profile.
    pub fn detect() -> Self {
        let mut profile = Self::named(option_env!("STAGEHAND_PROFILE"));

        if cfg!(windows) {
            profile.path_separator = '\\';
            profile.home_search_path = false;
        }

        if let Some(path) = option_env!("STAGEHAND_PLATFORM_DATA_PATH") {
            profile.fixed_data_paths.push(path.to_string());
        }

        profile.fhs_layout = cfg!(target_os = "linux") && option_env!("STAGEHAND_FHS").is_some();
        profile
    }

    /// Base profile for a build-time profile name; unknown names fall
    /// back to the desktop.
    pub fn named(name: Option<&str>) -> Self {
        match name {
            Some("handheld") => Self::handheld(),
            _ => Self::desktop(),
        }
    }

    /// Windowed desktop with a keyboard.
    pub fn desktop() -> Self {
        Self {
            path_separator: '/',
            fixed_data_paths: Vec::new(),
            home_search_path: true,
            fhs_layout: false,
            fullscreen_only: false,
            supports_scaling: true,
            default_music_volume: MAX_VOLUME >> 1,
            volume_buttons: None,
        }
    }

    /// Fullscreen handheld with hardware volume keys on the gamepad.
    pub fn handheld() -> Self {
        Self {
            path_separator: '/',
            fixed_data_paths: Vec::new(),
            home_search_path: false,
            fhs_layout: false,
            fullscreen_only: true,
            supports_scaling: false,
            default_music_volume: 40,
            volume_buttons: Some(VolumeButtons { up: 16, down: 17, step: 2 }),
        }
    }
}

impl Default for PlatformProfile {
    fn default() -> Self {
        Self::detect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_name_selects_base_profile() {
        assert_eq!(PlatformProfile::named(Some("handheld")), PlatformProfile::handheld());
        assert_eq!(PlatformProfile::named(Some("toaster")), PlatformProfile::desktop());
        assert_eq!(PlatformProfile::named(None), PlatformProfile::desktop());
    }

    #[test]
    fn desktop_allows_windowed_mode() {
        let profile = PlatformProfile::desktop();
        assert!(!profile.fullscreen_only);
        assert!(profile.volume_buttons.is_none());
    }

    #[test]
    fn handheld_has_volume_buttons() {
        let profile = PlatformProfile::handheld();
        assert!(profile.fullscreen_only);
        assert_eq!(profile.default_music_volume, 40);
        assert!(profile.volume_buttons.is_some());
    }

    #[test]
    fn detected_separator_matches_target() {
        let profile = PlatformProfile::detect();
        assert_eq!(profile.path_separator, std::path::MAIN_SEPARATOR);
    }
}
