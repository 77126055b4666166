use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{SmokeBuilder, SmokeConfig};
use crate::error::{Error, Result};
use crate::session::Session;

/// What a passing run observed.
#[derive(Debug)]
pub struct SmokeReport {
    /// Title retrieved from the loaded page.
    pub title: String,
    /// Where the screenshot landed.
    pub screenshot_path: PathBuf,
    /// Size of the written screenshot.
    pub screenshot_bytes: usize,
}

/// Runs the smoke sequence against a remote browser over a single session.
pub struct SmokeRunner {
    config: SmokeConfig,
}

impl SmokeRunner {
    pub fn new(config: SmokeConfig) -> Self {
        Self { config }
    }

    /// Create a new SmokeBuilder for configuring a runner.
    pub fn builder() -> SmokeBuilder {
        SmokeBuilder::new()
    }

    pub fn config(&self) -> &SmokeConfig {
        &self.config
    }

    /// Execute the smoke sequence once.
    ///
    /// The session opened here is closed on every path out of this function,
    /// including assertion failures and capture errors. A failed close is
    /// logged and does not change the outcome.
    pub async fn run(&self) -> Result<SmokeReport> {
        let session = Session::open(&self.config).await?;
        info!(target: "smoke", webdriver_url = %self.config.webdriver_url, "session open");

        clear_stale_screenshot(&self.config.screenshot_path);

        let outcome = self.drive(&session).await;

        if let Err(e) = session.close().await {
            warn!(target: "smoke", error = %e, "session close failed");
        }

        outcome
    }

    /// The steps between session open and session close, split out so `run`
    /// can close the session no matter which step failed.
    async fn drive(&self, session: &Session) -> Result<SmokeReport> {
        info!(target: "smoke", url = %self.config.target_url, "navigating");
        session.navigate(&self.config.target_url).await?;

        let title = session.title().await?;
        info!(target: "smoke", %title, "page loaded");

        let png = session.screenshot().await?;
        let screenshot_bytes = png.len();
        self.persist_screenshot(&png)?;
        info!(
            target: "smoke",
            path = %self.config.screenshot_path.display(),
            bytes = screenshot_bytes,
            "screenshot saved"
        );

        if !title.contains(&self.config.expected_title) {
            return Err(Error::AssertionFailure {
                expected: self.config.expected_title.clone(),
                title,
            });
        }

        Ok(SmokeReport {
            title,
            screenshot_path: self.config.screenshot_path.clone(),
            screenshot_bytes,
        })
    }

    /// Write the capture to the configured path, creating missing parent
    /// directories and overwriting any prior file.
    fn persist_screenshot(&self, png: &[u8]) -> Result<()> {
        let path = &self.config.screenshot_path;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, png)?;
        Ok(())
    }
}

/// Best-effort removal of a screenshot left over from an earlier run.
/// Absence is the normal case; any failure here is logged and never fails
/// the run.
fn clear_stale_screenshot(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => info!(target: "smoke", path = %path.display(), "removed stale screenshot"),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(target: "smoke", path = %path.display(), "no stale screenshot to remove");
        }
        Err(e) => warn!(
            target: "smoke",
            path = %path.display(),
            error = %e,
            "could not remove stale screenshot"
        ),
    }
}
