//! Cache root resolution.
//!
//! The root is a pure function of an optional override and a captured
//! [`PlatformEnv`]. Callers resolve it once at startup and pass the resulting
//! path around explicitly.

use std::path::PathBuf;

use crate::Error;

/// Directory created under the platform cache location.
pub const CACHE_SUBDIR: &str = "ragdocs";

/// Host operating system family, as far as cache placement is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    MacOs,
    Windows,
    Posix,
}

impl HostOs {
    /// Map a `std::env::consts::OS` identifier.
    pub fn from_os_str(os: &str) -> Self {
        match os {
            "macos" => HostOs::MacOs,
            "windows" => HostOs::Windows,
            _ => HostOs::Posix,
        }
    }

    pub fn current() -> Self {
        Self::from_os_str(std::env::consts::OS)
    }
}

/// Snapshot of the environment inputs used to locate the cache.
#[derive(Debug, Clone)]
pub struct PlatformEnv {
    pub os: HostOs,
    pub home: Option<PathBuf>,
    pub xdg_cache_home: Option<PathBuf>,
    pub local_app_data: Option<PathBuf>,
}

impl PlatformEnv {
    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self {
            os: HostOs::current(),
            home: dirs::home_dir(),
            xdg_cache_home: non_empty_var("XDG_CACHE_HOME"),
            local_app_data: non_empty_var("LOCALAPPDATA"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<PathBuf> {
    std::env::var_os(name).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Resolve the cache root.
///
/// Precedence: explicit override, then the platform default:
/// - macOS: `~/Library/Caches/ragdocs`
/// - Windows: `%LOCALAPPDATA%\ragdocs`
/// - elsewhere: `$XDG_CACHE_HOME/ragdocs` or `~/.cache/ragdocs`
///
/// # Errors
///
/// Returns `Error::InvalidInput` when the platform default needs a home
/// directory or `LOCALAPPDATA` that is not available.
pub fn resolve_cache_root(override_dir: Option<PathBuf>, env: &PlatformEnv) -> Result<PathBuf, Error> {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }

    let home = || {
        env.home
            .clone()
            .ok_or_else(|| Error::InvalidInput("failed to determine home directory".into()))
    };

    let root = match env.os {
        HostOs::MacOs => home()?.join("Library").join("Caches").join(CACHE_SUBDIR),
        HostOs::Windows => env
            .local_app_data
            .as_ref()
            .ok_or_else(|| Error::InvalidInput("LOCALAPPDATA environment variable not set".into()))?
            .join(CACHE_SUBDIR),
        HostOs::Posix => match &env.xdg_cache_home {
            Some(xdg) => xdg.join(CACHE_SUBDIR),
            None => home()?.join(".cache").join(CACHE_SUBDIR),
        },
    };

    Ok(root)
}
