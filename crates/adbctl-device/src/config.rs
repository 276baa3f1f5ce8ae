use std::{path::PathBuf, time::Duration};

use adbctl_util::{env_flag, env_secs, env_value};

pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Startup settings. Built once in `main` and handed to whatever needs them;
/// nothing below this reads the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub adb_path: PathBuf,
    pub command_timeout: Duration,
    pub probe_timeout: Duration,
    pub verbose: bool,
    pub show_icons: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adb_path: PathBuf::from("adb"),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            verbose: false,
            show_icons: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            adb_path: adb_path(),
            command_timeout: env_secs("ADBCTL_TIMEOUT_SECS").unwrap_or(DEFAULT_COMMAND_TIMEOUT),
            probe_timeout: env_secs("ADBCTL_PROBE_TIMEOUT_SECS").unwrap_or(DEFAULT_PROBE_TIMEOUT),
            verbose: env_flag("ADBCTL_DEBUG") || env_value("DEBUG").is_some(),
            show_icons: env_flag("ADBCTL_ICONS"),
        }
    }
}

pub fn adb_path() -> PathBuf {
    if let Some(path) = env_value("ADBCTL_ADB_PATH") {
        return PathBuf::from(path);
    }
    if let Some(path) = env_value("ADB_PATH") {
        return PathBuf::from(path);
    }
    if let Some(sdk_root) = env_value("ANDROID_SDK_ROOT").or_else(|| env_value("ANDROID_HOME")) {
        let tools = PathBuf::from(&sdk_root).join("platform-tools");
        for name in ["adb", "adb.exe"] {
            let candidate = tools.join(name);
            if candidate.is_file() {
                return candidate;
            }
        }
    }
    PathBuf::from("adb")
}
