//=========================================================================
// Search Paths
//=========================================================================
//
// Builds the ordered directory lists consulted when a data or config
// file is looked up by name.
//
// Priority (highest first):
// ```text
//   compiled-in data path
//   platform fixed paths
//   user-supplied directories (separator appended)
//   program directory
//   home directory                  (profile-gated, data + config)
//   FHS data / config directories   (profile-gated)
//   ""  (current working directory, always last)
// ```
//
// Lists are only appended to while resolving and are frozen afterwards.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::PathBuf;

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::launch::LaunchArgs;
use crate::core::profile::{PlatformProfile, APP_DIR_NAME};

//=== SearchPathList ======================================================

/// Priority-ordered directory prefixes. Each entry is either empty (the
/// working directory) or ends with a path separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPathList {
    dirs: Vec<String>,
}

impl SearchPathList {
    pub fn as_slice(&self) -> &[String] {
        &self.dirs
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.dirs.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Candidate file locations for `name`, in priority order.
    pub fn candidates<'a>(&'a self, name: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
        self.dirs.iter().map(move |dir| PathBuf::from(format!("{dir}{name}")))
    }

    fn push(&mut self, dir: String) {
        self.dirs.push(dir);
    }
}

//=== PathEnvironment =====================================================

/// Process-environment inputs to path resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathEnvironment {
    /// Data path baked in at build time.
    pub compiled_data_path: Option<String>,

    /// User home directory, without a trailing separator requirement.
    pub home_dir: Option<String>,
}

impl PathEnvironment {
    pub fn detect(profile: &PlatformProfile) -> Self {
        let home_dir = if profile.home_search_path || profile.fhs_layout {
            dirs::home_dir().map(|home| home.to_string_lossy().into_owned())
        } else {
            None
        };

        Self {
            compiled_data_path: option_env!("STAGEHAND_DATA_PATH").map(str::to_string),
            home_dir,
        }
    }
}

//=== SearchPaths =========================================================

/// Data and config search lists for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPaths {
    pub data: SearchPathList,
    pub config: SearchPathList,
}

impl SearchPaths {
    /// Resolves both lists from the launch inputs.
    pub fn resolve(args: &LaunchArgs, env: &PathEnvironment, profile: &PlatformProfile) -> Self {
        let sep = profile.path_separator;
        let mut paths = Self::default();

        if let Some(path) = &env.compiled_data_path {
            paths.add_search_path(path.clone());
        }

        for path in &profile.fixed_data_paths {
            paths.add_search_path(path.clone());
        }

        for dir in args.directories() {
            paths.add_data_path(normalize_directory(dir, sep));
        }

        if let Some(dir) = program_directory(args.program(), sep) {
            paths.add_data_path(dir);
        }

        if let Some(home) = &env.home_dir {
            let home = normalize_directory(home, sep);

            if profile.home_search_path {
                paths.add_search_path(home.clone());
            }

            if profile.fhs_layout {
                paths.add_data_path(format!("/usr/share/games/{APP_DIR_NAME}/"));
                paths.add_data_path(format!("{home}.local{sep}share{sep}{APP_DIR_NAME}{sep}"));
                paths.add_config_path(format!("{home}.config{sep}"));
            }
        }

        // Working directory: lowest priority, always searched.
        paths.add_search_path(String::new());

        debug!(target: "session", "Data search paths: {:?}", paths.data.as_slice());
        debug!(target: "session", "Config search paths: {:?}", paths.config.as_slice());

        paths
    }

    //--- Internal Helpers -------------------------------------------------

    fn add_search_path(&mut self, dir: String) {
        self.config.push(dir.clone());
        self.data.push(dir);
    }

    fn add_data_path(&mut self, dir: String) {
        self.data.push(dir);
    }

    fn add_config_path(&mut self, dir: String) {
        self.config.push(dir);
    }
}

//=== Helpers =============================================================

/// Appends `sep` unless the directory already ends with it.
pub fn normalize_directory(dir: &str, sep: char) -> String {
    if dir.ends_with(sep) {
        dir.to_string()
    } else {
        format!("{dir}{sep}")
    }
}

/// Directory portion of the program path, separator included.
pub fn program_directory(program: &str, sep: char) -> Option<String> {
    program
        .rfind(sep)
        .map(|index| program[..index + sep.len_utf8()].to_string())
}

//=========================================================================
// Unit Tests
//=========================================================================
