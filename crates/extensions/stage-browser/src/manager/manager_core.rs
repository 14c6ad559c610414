//! BrowserManager: Chrome process lifecycle and page creation.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cdp::{CdpClient, PageSession};

use super::{BrowserError, BrowserManagerConfig};

const LAUNCH_POLL: Duration = Duration::from_millis(200);
const LAUNCH_ATTEMPTS: u32 = 30;

/// Owns the Chrome process (when launched by us) and the CDP connection.
pub struct BrowserManager {
    config: BrowserManagerConfig,
    client: RwLock<Option<Arc<CdpClient>>>,
    chrome_process: RwLock<Option<Child>>,
}

impl BrowserManager {
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
            chrome_process: RwLock::new(None),
        }
    }

    /// Look for a Chrome-family executable in well-known locations.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// Command-line flags for a recording browser.
    pub(super) fn launch_args(&self, profile_dir: &std::path::Path) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.config.debug_port),
            format!("--user-data-dir={}", profile_dir.display()),
            format!(
                "--window-size={},{}",
                self.config.viewport_width, self.config.viewport_height
            ),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-background-networking".to_string(),
            "--disable-sync".to_string(),
            "--disable-translate".to_string(),
            "--metrics-recording-only".to_string(),
            "--hide-scrollbars".to_string(),
        ];

        if self.config.headless {
            args.push("--headless=new".to_string());
        }

        args
    }

    async fn is_chrome_running(&self) -> bool {
        reqwest::get(&format!("{}/json/version", self.config.endpoint()))
            .await
            .is_ok()
    }

    async fn launch_chrome(&self) -> Result<Child, BrowserError> {
        let chrome_path = match &self.config.chrome_path {
            Some(path) => path.clone(),
            None => Self::find_chrome().ok_or(BrowserError::ChromeNotFound)?,
        };
        let profile_dir = self.config.get_profile_dir();

        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!("Launching Chrome with profile at: {}", profile_dir.display());

        let child = Command::new(&chrome_path)
            .args(self.launch_args(&profile_dir))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(format!("{}: {}", chrome_path.display(), e)))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Connect to Chrome, launching it first when nothing listens on the port.
    pub async fn connect(&self) -> Result<(), BrowserError> {
        if self.client.read().await.is_some() {
            return Ok(());
        }

        if !self.is_chrome_running().await {
            info!("Chrome not running on port {}, launching...", self.config.debug_port);

            let child = self.launch_chrome().await?;
            *self.chrome_process.write().await = Some(child);

            let mut ready = false;
            for _ in 0..LAUNCH_ATTEMPTS {
                tokio::time::sleep(LAUNCH_POLL).await;
                if self.is_chrome_running().await {
                    ready = true;
                    break;
                }
            }

            if !ready {
                return Err(BrowserError::LaunchFailed(
                    "Chrome failed to start within timeout".to_string(),
                ));
            }
        } else {
            info!("Chrome already running on port {}", self.config.debug_port);
        }

        let client = CdpClient::connect(&self.config.endpoint()).await?;
        *self.client.write().await = Some(Arc::new(client));

        info!("Connected to Chrome at {}", self.config.endpoint());
        Ok(())
    }

    async fn client(&self) -> Result<Arc<CdpClient>, BrowserError> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(BrowserError::NotConnected)
    }

    /// Open a blank tab and attach to it.
    pub async fn open_page(&self) -> Result<Arc<PageSession>, BrowserError> {
        self.connect().await?;
        let client = self.client().await?;
        let session = client.new_page().await?;
        debug!("Opened page {}", session.target_id());
        Ok(Arc::new(session))
    }

    /// Close a tab opened with [`open_page`](Self::open_page).
    pub async fn close_page(&self, session: &PageSession) -> Result<(), BrowserError> {
        let client = self.client().await?;
        client.close_page(session.target_id()).await?;
        Ok(())
    }

    /// Drop the CDP connection, leaving the browser running.
    pub async fn close(&self) -> Result<(), BrowserError> {
        let _ = self.client.write().await.take();
        info!("Browser connection closed");
        Ok(())
    }

    /// Close the connection and kill Chrome if this manager launched it.
    pub async fn shutdown(&self) -> Result<(), BrowserError> {
        self.close().await?;
        if let Some(mut child) = self.chrome_process.write().await.take() {
            info!("Shutting down Chrome...");
            let _ = child.kill().await;
        }
        Ok(())
    }
}
