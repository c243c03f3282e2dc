//! Screenshot capture command

use anyhow::{Context, Result};
use crate::cdp::{BrowserSession, LaunchOptions};
use crate::dom::Dom;
use std::fs;
use std::time::Duration;

pub fn run(url: &str, output: &str, width: u32, height: u32) -> Result<()> {
    tokio::runtime::Runtime::new()?.block_on(async {
        println!("Launching browser ({}x{})...", width, height);
        let session = BrowserSession::launch(&LaunchOptions {
            width,
            height,
            ..LaunchOptions::default()
        })
        .await?;

        println!("Navigating to: {}", url);
        let page = session.navigate(url).await?;

        // Set exact viewport dimensions
        BrowserSession::set_viewport(&page, width, height).await?;

        println!("Waiting for page to render...");
        Dom::new(&page).wait_for_app(Duration::from_secs(15)).await?;

        println!("Capturing screenshot...");
        let data = BrowserSession::screenshot(&page).await?;

        fs::write(output, &data)
            .with_context(|| format!("Failed to write screenshot to {}", output))?;

        println!("Screenshot saved: {} ({} bytes)", output, data.len());

        Ok(())
    })
}
