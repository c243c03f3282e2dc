//! Chrome DevTools Protocol utilities for browser automation.

use anyhow::{anyhow, Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType, InsertTextParams, MouseButton,
};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;

/// Pause between synthesized input events
const INPUT_EVENT_GAP: Duration = Duration::from_millis(50);

/// How to start the browser
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            width: 1280,
            height: 800,
        }
    }
}

/// Find a Chromium or Chrome binary in PATH. `None` lets chromiumoxide use
/// its own detection.
fn find_browser_binary() -> Option<PathBuf> {
    let candidates = [
        "chromium-browser", // Debian/Ubuntu
        "chromium",         // Arch/Fedora
        "google-chrome",
    ];
    candidates.into_iter().find_map(|name| {
        let path = which::which(name).ok()?;
        log::info!("Found browser at: {}", path.display());
        Some(path)
    })
}

/// Browser session for automation
pub struct BrowserSession {
    pub browser: Browser,
}

impl BrowserSession {
    pub async fn launch(opts: &LaunchOptions) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(opts.width, opts.height)
            .args(vec![
                "--disable-dev-shm-usage",
                "--no-sandbox",
                "--hide-scrollbars",
                "--disable-session-crashed-bubble",
                "--hide-crash-restore-bubble",
                "--disable-application-cache",
                "--disk-cache-size=0",
                "--incognito",
            ]);
        if !opts.headless {
            builder = builder.with_head();
        }
        if let Some(binary) = find_browser_binary() {
            builder = builder.chrome_executable(binary);
        }
        let cfg = builder
            .build()
            .map_err(|e| anyhow!("Failed to build browser config: {}", e))?;

        let (browser, mut handler) = Browser::launch(cfg)
            .await
            .context("Failed to launch Chromium")?;

        // Spawn handler task to process Chrome events
        tokio::spawn(async move {
            while handler.next().await.is_some() {
                // Handler events are processed by chromiumoxide internally
            }
        });

        Ok(Self { browser })
    }

    /// Load `url` in an existing page
    pub async fn goto(page: &Page, url: &str) -> Result<()> {
        page.goto(url)
            .await
            .with_context(|| format!("Failed to open {}", url))?;
        Ok(())
    }

    /// Navigate to URL and return page handle
    pub async fn navigate(&self, url: &str) -> Result<Page> {
        let page = self
            .browser
            .new_page(url)
            .await
            .with_context(|| format!("Failed to open {}", url))?;

        Ok(page)
    }

    /// Set viewport dimensions
    pub async fn set_viewport(page: &Page, width: u32, height: u32) -> Result<()> {
        page.execute(SetDeviceMetricsOverrideParams::new(
            width as i64,
            height as i64,
            1.0,   // device_scale_factor
            false, // mobile
        ))
        .await
        .context("Failed to set viewport dimensions")?;
        Ok(())
    }

    /// Take a screenshot
    pub async fn screenshot(page: &Page) -> Result<Vec<u8>> {
        let data = page
            .screenshot(CaptureScreenshotParams::default())
            .await
            .context("Failed to capture screenshot")?;
        Ok(data)
    }

    /// Reload the page and wait until navigation finishes
    pub async fn reload(page: &Page) -> Result<()> {
        page.reload().await.context("Failed to reload page")?;
        page.wait_for_navigation()
            .await
            .context("Page did not finish loading after reload")?;
        Ok(())
    }

    /// Evaluate JavaScript and return result
    pub async fn evaluate<T: serde::de::DeserializeOwned>(page: &Page, js: &str) -> Result<T> {
        let result = page
            .evaluate(js)
            .await
            .context("Failed to evaluate JavaScript")?;
        result
            .into_value()
            .map_err(|e| anyhow!("Failed to deserialize JS result: {:?}", e))
    }

    async fn mouse_event(
        page: &Page,
        kind: DispatchMouseEventType,
        x: f64,
        y: f64,
        pressed: bool,
    ) -> Result<()> {
        let mut builder = DispatchMouseEventParams::builder().r#type(kind).x(x).y(y);
        if pressed {
            builder = builder.button(MouseButton::Left).click_count(1);
        }
        let params = builder
            .build()
            .map_err(|e| anyhow!("Invalid mouse event: {}", e))?;
        page.execute(params)
            .await
            .context("Failed to dispatch mouse event")?;
        Ok(())
    }

    /// Move the pointer without pressing anything (triggers hover)
    pub async fn move_mouse(page: &Page, x: f64, y: f64) -> Result<()> {
        Self::mouse_event(page, DispatchMouseEventType::MouseMoved, x, y, false).await
    }

    /// Click at specific coordinates using CDP Input domain
    pub async fn click_at(page: &Page, x: f64, y: f64) -> Result<()> {
        Self::move_mouse(page, x, y).await?;
        sleep(INPUT_EVENT_GAP).await;
        Self::mouse_event(page, DispatchMouseEventType::MousePressed, x, y, true).await?;
        sleep(INPUT_EVENT_GAP).await;
        Self::mouse_event(page, DispatchMouseEventType::MouseReleased, x, y, true).await?;
        Ok(())
    }

    /// Type text into the focused element, as an IME commit would
    pub async fn insert_text(page: &Page, text: &str) -> Result<()> {
        page.execute(InsertTextParams::new(text))
            .await
            .context("Failed to insert text")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_launch_is_headless() {
        let opts = LaunchOptions::default();
        assert!(opts.headless);
        assert_eq!((opts.width, opts.height), (1280, 800));
    }
}
