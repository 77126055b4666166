use std::env;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::runner::SmokeRunner;

/// Which browser engine the automation server should provide for the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BrowserKind {
    Chrome,
    Firefox,
    Edge,
}

impl BrowserKind {
    /// The `browserName` value this kind puts on the wire.
    pub fn browser_name(self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
            BrowserKind::Edge => "MicrosoftEdge",
        }
    }
}

pub struct SmokeConfig {
    /// Base URL of the WebDriver server, e.g. "http://localhost:4444".
    pub webdriver_url: String,
    /// Page the session navigates to.
    pub target_url: String,
    /// Substring the page title must contain (case-sensitive).
    pub expected_title: String,
    /// Where the screenshot is written. A stale file at this path is removed
    /// before the run and the new capture overwrites whatever remains.
    pub screenshot_path: PathBuf,
    pub browser: BrowserKind,
    pub headless: bool,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_string(),
            target_url: "https://www.example.com".to_string(),
            expected_title: "Example Domain".to_string(),
            screenshot_path: env::temp_dir().join("browser-smoke.png"),
            browser: BrowserKind::Chrome,
            headless: false,
        }
    }
}

pub struct SmokeBuilder {
    config: SmokeConfig,
}

impl SmokeBuilder {
    pub fn new() -> Self {
        Self {
            config: SmokeConfig::default(),
        }
    }

    pub fn webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.config.webdriver_url = url.into();
        self
    }

    pub fn target_url(mut self, url: impl Into<String>) -> Self {
        self.config.target_url = url.into();
        self
    }

    /// Set the substring the page title must contain for the run to pass.
    pub fn expected_title(mut self, substring: impl Into<String>) -> Self {
        self.config.expected_title = substring.into();
        self
    }

    pub fn screenshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.screenshot_path = path.into();
        self
    }

    pub fn browser(mut self, kind: BrowserKind) -> Self {
        self.config.browser = kind;
        self
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn build_config(self) -> SmokeConfig {
        self.config
    }

    pub fn build(self) -> SmokeRunner {
        SmokeRunner::new(self.build_config())
    }
}

impl Default for SmokeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
