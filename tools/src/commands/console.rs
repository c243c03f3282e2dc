//! Console monitoring command - loads the app and reports what it logged

use anyhow::Result;
use crate::cdp::{BrowserSession, LaunchOptions};
use crate::console_log::ConsoleRecorder;
use std::time::Duration;

pub fn run(url: &str, wait_secs: u64, errors_only: bool) -> Result<()> {
    tokio::runtime::Runtime::new()?.block_on(async {
        println!("Launching browser...");
        let session = BrowserSession::launch(&LaunchOptions::default()).await?;
        let page = session.navigate("about:blank").await?;
        let mut recorder = ConsoleRecorder::attach(&page).await?;

        println!("Navigating to: {}", url);
        BrowserSession::goto(&page, url).await?;

        println!("Collecting console messages for {} seconds...", wait_secs);
        tokio::time::sleep(Duration::from_secs(wait_secs)).await;

        let report = recorder.drain();
        report.print(errors_only);

        if !report.unexpected_errors().is_empty() {
            std::process::exit(1);
        }

        Ok(())
    })
}
