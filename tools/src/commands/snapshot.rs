//! Prints the page state the frontend publishes on `window.testingApp`

use anyhow::{Context, Result};
use crate::cdp::{BrowserSession, LaunchOptions};
use crate::dom::Dom;
use std::time::Duration;

pub fn run(url: &str) -> Result<()> {
    tokio::runtime::Runtime::new()?.block_on(async {
        let session = BrowserSession::launch(&LaunchOptions::default()).await?;
        let page = session.navigate(url).await?;

        let dom = Dom::new(&page);
        dom.wait_for_app(Duration::from_secs(15)).await?;
        let snapshot = dom.snapshot().await?;

        let json = serde_json::to_string_pretty(&snapshot).context("Failed to format snapshot")?;
        println!("{}", json);

        Ok(())
    })
}
