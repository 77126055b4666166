use fantoccini::{Client, ClientBuilder};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::{BrowserKind, SmokeConfig};
use crate::error::{Error, Result};

/// Switches handed to Chromium-family browsers when headless operation is
/// requested. Passed verbatim inside the vendor options, so the `--` prefix
/// stays.
const CHROMIUM_HEADLESS_ARGS: &[&str] = &["--headless=new", "--disable-gpu"];

/// Firefox takes a single switch instead.
const FIREFOX_HEADLESS_ARGS: &[&str] = &["-headless"];

/// One live session on a remote automation server.
///
/// [`Session::close`] consumes the handle, so a session cannot be reused or
/// closed twice.
pub struct Session {
    client: Client,
}

impl Session {
    /// Open a session against the configured endpoint, requesting the
    /// configured browser capability set.
    pub async fn open(config: &SmokeConfig) -> Result<Self> {
        let caps = capabilities(config);
        debug!(target: "smoke", webdriver_url = %config.webdriver_url, "opening session");

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&config.webdriver_url)
            .await
            .map_err(|e| Error::ConnectionError(e.to_string()))?;

        Ok(Self { client })
    }

    /// Navigate to the given URL and wait for the page to load.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .map_err(|e| Error::NavigationError(e.to_string()))
    }

    /// Rendered title of the current page.
    pub async fn title(&self) -> Result<String> {
        self.client
            .title()
            .await
            .map_err(|e| Error::CaptureError(e.to_string()))
    }

    /// Screenshot of the current page as PNG bytes. The base64 transit
    /// encoding is already decoded by the client.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        self.client
            .screenshot()
            .await
            .map_err(|e| Error::CaptureError(e.to_string()))
    }

    /// Delete the remote session.
    pub async fn close(self) -> Result<()> {
        self.client
            .close()
            .await
            .map_err(|e| Error::ConnectionError(e.to_string()))
    }
}

/// Translate the configured browser kind into a W3C capability object.
/// Headless mode rides on the vendor options, since the standard set has no
/// portable switch for it.
fn capabilities(config: &SmokeConfig) -> Map<String, Value> {
    let mut caps = Map::new();
    caps.insert(
        "browserName".to_string(),
        json!(config.browser.browser_name()),
    );

    if config.headless {
        match config.browser {
            BrowserKind::Chrome => {
                caps.insert(
                    "goog:chromeOptions".to_string(),
                    json!({ "args": CHROMIUM_HEADLESS_ARGS }),
                );
            }
            BrowserKind::Firefox => {
                caps.insert(
                    "moz:firefoxOptions".to_string(),
                    json!({ "args": FIREFOX_HEADLESS_ARGS }),
                );
            }
            BrowserKind::Edge => {
                caps.insert(
                    "ms:edgeOptions".to_string(),
                    json!({ "args": CHROMIUM_HEADLESS_ARGS }),
                );
            }
        }
    }

    caps
}
