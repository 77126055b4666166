use std::path::PathBuf;

use clap::Parser;
use tracing::error;

use browser_smoke::{logging, BrowserKind, SmokeConfig, SmokeRunner};

/// Smoke-test a remote browser through a WebDriver automation server.
#[derive(Parser, Debug)]
#[command(name = "browser-smoke", version)]
struct Cli {
    /// WebDriver server to open the session against
    #[arg(long, env = "WEBDRIVER_URL", default_value = "http://localhost:4444")]
    webdriver_url: String,

    /// Page to load
    #[arg(long, default_value = "https://www.example.com")]
    url: String,

    /// Substring the page title must contain (case-sensitive)
    #[arg(long, default_value = "Example Domain")]
    expect: String,

    /// Screenshot destination; defaults to browser-smoke.png in the system
    /// temp directory
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Browser engine to request in the session capabilities
    #[arg(long, value_enum, default_value = "chrome")]
    browser: BrowserKind,

    /// Ask for a headless browser
    #[arg(long)]
    headless: bool,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> SmokeConfig {
        let defaults = SmokeConfig::default();
        SmokeConfig {
            webdriver_url: self.webdriver_url,
            target_url: self.url,
            expected_title: self.expect,
            screenshot_path: self.output.unwrap_or(defaults.screenshot_path),
            browser: self.browser,
            headless: self.headless,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let runner = SmokeRunner::new(cli.into_config());
    match runner.run().await {
        Ok(report) => {
            println!("{}", report.title);
        }
        Err(err) => {
            error!(target: "smoke", error = %err, "smoke test failed");
            std::process::exit(1);
        }
    }
}
