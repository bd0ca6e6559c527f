//=========================================================================
// Launch Arguments
//=========================================================================
//
// Splits the raw command line into search directories and options.
//
//   argv[0]          → program path (its directory becomes a search path)
//   "-..." arguments → option set (only `-f` has an effect)
//   everything else  → extra data directories, in order
//
// Unknown options are kept in the set and otherwise ignored.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::BTreeSet;
use std::ffi::OsString;

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::paths::PathEnvironment;
use crate::core::profile::PlatformProfile;

//=== Constants ===========================================================

/// Forces fullscreen regardless of the persisted setting.
pub const FULLSCREEN_FLAG: &str = "-f";

const KNOWN_OPTIONS: &[&str] = &[FULLSCREEN_FLAG];

//=== LaunchArgs ==========================================================

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchArgs {
    program: String,
    directories: Vec<String>,
    options: BTreeSet<String>,
}

impl LaunchArgs {
    /// Parses an argv-style sequence; the first item is the program path.
    pub fn parse<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut iter = args.into_iter().map(Into::into);
        let program = iter.next().unwrap_or_default();

        let mut directories = Vec::new();
        let mut options = BTreeSet::new();

        for argument in iter {
            if argument.is_empty() {
                continue;
            }

            if argument.starts_with('-') {
                if !KNOWN_OPTIONS.contains(&argument.as_str()) {
                    debug!(target: "session", "Ignoring unknown option {}", argument);
                }
                options.insert(argument);
            } else {
                directories.push(argument);
            }
        }

        Self {
            program,
            directories,
            options,
        }
    }

    /// Parses raw OS arguments. Bytes that are not valid UTF-8 are
    /// replaced rather than rejected.
    pub fn parse_os<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::parse(args.into_iter().map(|arg| arg.to_string_lossy().into_owned()))
    }

    /// Parses the current process arguments.
    pub fn from_env() -> Self {
        Self::parse_os(std::env::args_os())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// User-supplied data directories, as given (not yet normalized).
    pub fn directories(&self) -> &[String] {
        &self.directories
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.contains(option)
    }

    pub fn force_fullscreen(&self) -> bool {
        self.has_option(FULLSCREEN_FLAG)
    }
}

//=== Launch ==============================================================

/// Everything the lifecycle needs to know about how it was started.
#[derive(Debug, Clone)]
pub struct Launch {
    pub args: LaunchArgs,
    pub env: PathEnvironment,
    pub profile: PlatformProfile,
}

impl Launch {
    /// Reads arguments, environment and profile from the running process.
    pub fn from_process() -> Self {
        let profile = PlatformProfile::detect();
        Self {
            args: LaunchArgs::from_env(),
            env: PathEnvironment::detect(&profile),
            profile,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
