//! BrowserManager core: struct definition, lazy connection, Chrome process management.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::process::{Child, Command};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cdp::CdpClient;
use super::{BrowserError, BrowserManagerConfig};

/// Owns the process-wide Chrome connection.
pub struct BrowserManager {
    pub(super) config: BrowserManagerConfig,
    pub(super) client: RwLock<Option<Arc<CdpClient>>>,
    /// Serializes first-time initialization so concurrent callers share one launch.
    init_lock: Mutex<()>,
    /// Chrome process handle (if we launched it).
    chrome_process: Mutex<Option<Child>>,
}

impl BrowserManager {
    /// Create a new browser manager. Nothing is launched until first use.
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
            init_lock: Mutex::new(()),
            chrome_process: Mutex::new(None),
        }
    }

    /// Find Chrome executable path.
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

    /// Check if Chrome is already running on the debug port.
    async fn is_chrome_running(&self) -> bool {
        reqwest::get(&format!("{}/json/version", self.config.endpoint()))
            .await
            .is_ok()
    }

    /// Launch Chrome with remote debugging enabled.
    async fn launch_chrome(&self) -> Result<Child, BrowserError> {
        let chrome_path = match self.config.chrome_path.clone() {
            Some(path) => path,
            None => Self::find_chrome().ok_or(BrowserError::ChromeNotFound)?,
        };
        let profile_dir = self.config.get_profile_dir();

        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Failed to create profile directory: {}", e);
        }

        info!(
            "Launching Chrome {} with profile at: {}",
            chrome_path.display(),
            profile_dir.display()
        );

        let mut cmd = Command::new(&chrome_path);
        cmd.arg(format!("--remote-debugging-port={}", self.config.debug_port))
            .arg(format!("--user-data-dir={}", profile_dir.display()))
            .arg(format!(
                "--window-size={},{}",
                self.config.viewport_width, self.config.viewport_height
            ))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--disable-extensions")
            .arg("--disable-dev-shm-usage")
            .arg("--metrics-recording-only")
            .arg("--mute-audio")
            .kill_on_drop(true)
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        if self.config.headless {
            cmd.arg("--headless=new");
        }

        let child = cmd
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Connect to a running Chrome or launch one, then open the CDP connection.
    async fn start(&self) -> Result<CdpClient, BrowserError> {
        if !self.is_chrome_running().await {
            info!("Chrome not running on port {}, launching...", self.config.debug_port);

            let child = self.launch_chrome().await?;
            *self.chrome_process.lock().await = Some(child);

            let started = Instant::now();
            loop {
                tokio::time::sleep(Duration::from_millis(200)).await;
                if self.is_chrome_running().await {
                    break;
                }
                if started.elapsed() >= self.config.launch_timeout {
                    return Err(BrowserError::LaunchFailed(format!(
                        "Chrome did not expose {} within {} ms",
                        self.config.endpoint(),
                        self.config.launch_timeout.as_millis()
                    )));
                }
            }
        } else {
            info!("Chrome already running on port {}", self.config.debug_port);
        }

        let client = CdpClient::connect(&self.config.endpoint()).await?;
        info!("Connected to {} at {}", client.product(), self.config.endpoint());
        Ok(client)
    }

    /// Get the shared CDP client, creating it on first use.
    ///
    /// Concurrent first callers queue on `init_lock`; only one of them starts
    /// Chrome and the rest reuse its connection. A connection whose socket has
    /// dropped is replaced.
    pub(super) async fn client(&self) -> Result<Arc<CdpClient>, BrowserError> {
        if let Some(client) = self.live_client().await {
            return Ok(client);
        }

        let _guard = self.init_lock.lock().await;
        if let Some(client) = self.live_client().await {
            return Ok(client);
        }

        let client = match self.start().await {
            Ok(client) => Arc::new(client),
            Err(e) => {
                warn!("Shared browser could not be started: {}", e);
                return Err(match e {
                    BrowserError::Unavailable(_) => e,
                    other => BrowserError::Unavailable(other.to_string()),
                });
            }
        };

        *self.client.write().await = Some(client.clone());
        Ok(client)
    }

    async fn live_client(&self) -> Option<Arc<CdpClient>> {
        self.client
            .read()
            .await
            .as_ref()
            .filter(|c| c.is_connected())
            .cloned()
    }

    /// Whether the shared connection exists and is open.
    pub async fn is_connected(&self) -> bool {
        self.live_client().await.is_some()
    }

    /// Drop the shared connection and kill Chrome if this manager launched it.
    ///
    /// Idempotent. A later `acquire_session` starts a new instance.
    pub async fn shutdown(&self) -> Result<(), BrowserError> {
        let _guard = self.init_lock.lock().await;

        if self.client.write().await.take().is_some() {
            info!("Browser connection closed");
        }

        if let Some(mut child) = self.chrome_process.lock().await.take() {
            info!("Shutting down Chrome...");
            if let Err(e) = child.kill().await {
                debug!("Chrome already exited: {}", e);
            }
        }
        Ok(())
    }
}
