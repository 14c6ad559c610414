//! Browser manager errors and launch settings.

use std::path::PathBuf;

use thiserror::Error;

use director_protocols::StageError;

use crate::cdp::CdpError;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error(transparent)]
    Cdp(#[from] CdpError),

    #[error("Browser not connected")]
    NotConnected,

    #[error("Chrome not found. Install Google Chrome or set browser.chrome_path.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),
}

impl From<BrowserError> for StageError {
    fn from(e: BrowserError) -> Self {
        match e {
            BrowserError::Cdp(e) => e.into(),
            other => StageError::Host(other.to_string()),
        }
    }
}

/// How the recording browser is found or started.
#[derive(Debug, Clone)]
pub struct BrowserManagerConfig {
    pub debug_port: u16,
    /// Window size in CSS pixels.
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Persistent profile; `~/.director/browser-profile` when unset.
    pub profile_dir: Option<PathBuf>,
    /// Searched in well-known install locations when unset.
    pub chrome_path: Option<PathBuf>,
    pub headless: bool,
}

impl Default for BrowserManagerConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            viewport_width: 1280,
            viewport_height: 720,
            profile_dir: None,
            chrome_path: None,
            headless: false,
        }
    }
}

impl BrowserManagerConfig {
    pub fn get_profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".director")
                .join("browser-profile")
        })
    }

    /// DevTools HTTP endpoint on localhost.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }
}
