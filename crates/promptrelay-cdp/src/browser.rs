//! Browser discovery, launch and connection management.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::{Child, Command};
use tokio::sync::RwLock;
use tracing::info;

use crate::client::CdpClient;
use crate::error::CdpError;

/// Browser connection configuration.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Chrome debugging port.
    pub debug_port: u16,
    /// Profile directory for persistent login state.
    pub profile_dir: Option<PathBuf>,
    /// Whether to run a launched Chrome in headless mode.
    pub headless: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            profile_dir: None,
            headless: false,
        }
    }
}

impl BrowserConfig {
    /// CDP endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }

    /// Profile directory, defaulting under the user's home.
    pub fn get_profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".promptrelay")
                .join("browser-profile")
        })
    }
}

/// Manages the Chrome connection, launching the browser when absent.
pub struct Browser {
    config: BrowserConfig,
    client: RwLock<Option<Arc<CdpClient>>>,
    /// Chrome process handle, if we launched it.
    chrome_process: RwLock<Option<Child>>,
}

impl Browser {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
            chrome_process: RwLock::new(None),
        }
    }

    /// Find a Chrome/Chromium executable.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        let paths = [
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths = [
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths = [
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    async fn is_chrome_running(&self) -> bool {
        reqwest::get(format!("{}/json/version", self.config.endpoint()))
            .await
            .is_ok()
    }

    async fn launch_chrome(&self) -> Result<Child, CdpError> {
        let chrome_path = Self::find_chrome().ok_or(CdpError::ChromeNotFound)?;
        let profile_dir = self.config.get_profile_dir();
        std::fs::create_dir_all(&profile_dir)
            .map_err(|e| CdpError::LaunchFailed(format!("profile dir: {}", e)))?;

        info!("Launching Chrome with profile at: {}", profile_dir.display());

        let mut cmd = Command::new(&chrome_path);
        cmd.arg(format!("--remote-debugging-port={}", self.config.debug_port))
            .arg(format!("--user-data-dir={}", profile_dir.display()))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        if self.config.headless {
            cmd.arg("--headless=new");
        }

        let child = cmd
            .spawn()
            .map_err(|e| CdpError::LaunchFailed(e.to_string()))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Connect to the browser, launching it if necessary.
    pub async fn connect(&self) -> Result<(), CdpError> {
        if self.client.read().await.is_some() {
            return Ok(());
        }

        if !self.is_chrome_running().await {
            info!(
                "Chrome not running on port {}, launching...",
                self.config.debug_port
            );

            let child = self.launch_chrome().await?;
            *self.chrome_process.write().await = Some(child);

            let mut attempts = 0;
            let max_attempts = 30;
            while attempts < max_attempts {
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                if self.is_chrome_running().await {
                    break;
                }
                attempts += 1;
            }

            if attempts >= max_attempts {
                return Err(CdpError::LaunchFailed(
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

    /// Get the CDP client, connecting first when needed.
    pub async fn client(&self) -> Result<Arc<CdpClient>, CdpError> {
        if self.client.read().await.is_none() {
            self.connect().await?;
        }
        self.client
            .read()
            .await
            .clone()
            .ok_or(CdpError::SessionClosed)
    }

    /// Drop the connection. A Chrome we launched keeps running so the
    /// opened chat tab stays visible to the user.
    pub async fn close(&self) {
        let _ = self.client.write().await.take();
        info!("Browser connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = BrowserConfig::default();
        assert_eq!(config.debug_port, 9222);
        assert!(!config.headless);
    }

    #[test]
    fn test_config_endpoint() {
        let config = BrowserConfig {
            debug_port: 9333,
            ..BrowserConfig::default()
        };
        assert_eq!(config.endpoint(), "http://localhost:9333");
    }

    #[test]
    fn test_config_profile_dir_default() {
        let config = BrowserConfig::default();
        let profile = config.get_profile_dir();
        assert!(profile.ends_with(".promptrelay/browser-profile"));
    }

    #[test]
    fn test_config_profile_dir_override() {
        let config = BrowserConfig {
            profile_dir: Some(PathBuf::from("/tmp/profile")),
            ..BrowserConfig::default()
        };
        assert_eq!(config.get_profile_dir(), PathBuf::from("/tmp/profile"));
    }

    #[test]
    fn test_find_chrome_does_not_panic() {
        let _result = Browser::find_chrome();
    }

    #[tokio::test]
    async fn test_close_without_connect() {
        let browser = Browser::new(BrowserConfig::default());
        browser.close().await;
    }
}
