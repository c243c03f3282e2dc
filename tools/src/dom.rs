//! Element lookups and synthesized input on the testing page.
//!
//! Every query goes through `document.getElementById`; a missing element is
//! reported as an error naming its id instead of a JS exception.

use anyhow::{anyhow, bail, Context, Result};
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared::PageSnapshot;
use std::time::{Duration, Instant};

use crate::cdp::BrowserSession;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Quote a Rust string as a JS string literal.
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Wrap `expr` (which may use `el`) so the result reports whether `id` exists.
pub fn lookup_js(id: &str, expr: &str) -> String {
    format!(
        "(() => {{ const el = document.getElementById({}); \
         if (!el) return {{ found: false }}; \
         return {{ found: true, value: {} }}; }})()",
        js_string(id),
        expr
    )
}

pub fn property_js(id: &str, property: &str) -> String {
    lookup_js(id, &format!("el[{}]", js_string(property)))
}

pub fn computed_style_js(id: &str, css_property: &str) -> String {
    lookup_js(
        id,
        &format!("getComputedStyle(el).getPropertyValue({})", js_string(css_property)),
    )
}

pub fn displayed_js(id: &str) -> String {
    lookup_js(
        id,
        "(() => { const s = getComputedStyle(el); \
         return s.display !== 'none' && s.visibility !== 'hidden' && el.getClientRects().length > 0; })()",
    )
}

/// Scrolls the element into view first so the rect is in viewport coordinates.
pub fn rect_js(id: &str) -> String {
    lookup_js(
        id,
        "(() => { el.scrollIntoView({ block: 'center' }); \
         const r = el.getBoundingClientRect(); \
         return { x: r.left, y: r.top, width: r.width, height: r.height }; })()",
    )
}

/// Assign `value` and fire `event` the way a user edit would.
pub fn set_value_js(id: &str, value: &str, event: &str) -> String {
    lookup_js(
        id,
        &format!(
            "(() => {{ el.value = {}; el.dispatchEvent(new Event({}, {{ bubbles: true }})); return true; }})()",
            js_string(value),
            js_string(event)
        ),
    )
}

pub fn focus_js(id: &str) -> String {
    lookup_js(id, "(() => { el.focus(); return document.activeElement === el; })()")
}

pub const TITLE_JS: &str = "document.title";
pub const APP_READY_JS: &str =
    "Boolean(window.testingApp && typeof window.testingApp.isReady === 'function' && window.testingApp.isReady())";
pub const SNAPSHOT_JS: &str = "window.testingApp ? window.testingApp.snapshot() : null";

/// `#rrggbb` as the `rgb(r, g, b)` form computed styles report.
pub fn css_rgb(hex: &str) -> Option<String> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some(format!(
        "rgb({}, {}, {})",
        channel(0..2)?,
        channel(2..4)?,
        channel(4..6)?
    ))
}

#[derive(Deserialize)]
struct Lookup<T> {
    found: bool,
    value: Option<T>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Point at the given fraction of the width and height.
    pub fn point_at(&self, fx: f64, fy: f64) -> (f64, f64) {
        (self.x + self.width * fx, self.y + self.height * fy)
    }

    pub fn center(&self) -> (f64, f64) {
        self.point_at(0.5, 0.5)
    }
}

/// Typed view of the page the automation suite drives.
pub struct Dom<'a> {
    page: &'a Page,
}

impl<'a> Dom<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    async fn lookup<T: DeserializeOwned>(&self, id: &str, js: String) -> Result<T> {
        let lookup: Lookup<T> = BrowserSession::evaluate(self.page, &js).await?;
        if !lookup.found {
            bail!("Element #{} not found", id);
        }
        lookup
            .value
            .ok_or_else(|| anyhow!("Element #{} returned no value", id))
    }

    pub async fn property<T: DeserializeOwned>(&self, id: &str, property: &str) -> Result<T> {
        self.lookup(id, property_js(id, property)).await
    }

    pub async fn text(&self, id: &str) -> Result<String> {
        self.property(id, "textContent").await
    }

    pub async fn value(&self, id: &str) -> Result<String> {
        self.property(id, "value").await
    }

    pub async fn checked(&self, id: &str) -> Result<bool> {
        self.property(id, "checked").await
    }

    pub async fn css(&self, id: &str, css_property: &str) -> Result<String> {
        self.lookup(id, computed_style_js(id, css_property)).await
    }

    pub async fn is_displayed(&self, id: &str) -> Result<bool> {
        self.lookup(id, displayed_js(id)).await
    }

    pub async fn rect(&self, id: &str) -> Result<Rect> {
        self.lookup(id, rect_js(id)).await
    }

    pub async fn title(&self) -> Result<String> {
        BrowserSession::evaluate(self.page, TITLE_JS).await
    }

    pub async fn click(&self, id: &str) -> Result<()> {
        self.click_at_fraction(id, 0.5, 0.5).await
    }

    /// Real pointer click at a fraction of the element's box.
    pub async fn click_at_fraction(&self, id: &str, fx: f64, fy: f64) -> Result<()> {
        let (x, y) = self.rect(id).await?.point_at(fx, fy);
        BrowserSession::click_at(self.page, x, y).await
    }

    pub async fn hover(&self, id: &str) -> Result<()> {
        let (x, y) = self.rect(id).await?.center();
        BrowserSession::move_mouse(self.page, x, y).await
    }

    pub async fn move_mouse_to(&self, x: f64, y: f64) -> Result<()> {
        BrowserSession::move_mouse(self.page, x, y).await
    }

    /// Click into the element and type, as a keyboard user would.
    pub async fn type_text(&self, id: &str, text: &str) -> Result<()> {
        self.click(id).await?;
        let focused: bool = self.lookup(id, focus_js(id)).await?;
        if !focused {
            bail!("Element #{} did not take focus", id);
        }
        BrowserSession::insert_text(self.page, text).await
    }

    pub async fn clear(&self, id: &str) -> Result<()> {
        self.set_value(id, "", "input").await
    }

    pub async fn set_value(&self, id: &str, value: &str, event: &str) -> Result<()> {
        let _: bool = self.lookup(id, set_value_js(id, value, event)).await?;
        Ok(())
    }

    pub async fn snapshot(&self) -> Result<PageSnapshot> {
        let json: Option<String> = BrowserSession::evaluate(self.page, SNAPSHOT_JS).await?;
        let json = json.ok_or_else(|| anyhow!("window.testingApp is not installed"))?;
        serde_json::from_str(&json).context("Failed to parse page snapshot")
    }

    pub async fn wait_for_app(&self, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        loop {
            let ready: bool = BrowserSession::evaluate(self.page, APP_READY_JS)
                .await
                .unwrap_or(false);
            if ready {
                return Ok(());
            }
            if start.elapsed() > timeout {
                bail!("Testing app not ready after {:?}", timeout);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    pub async fn wait_for_displayed(&self, id: &str, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        loop {
            if let Ok(true) = self.is_displayed(id).await {
                return Ok(());
            }
            if start.elapsed() > timeout {
                bail!("Element #{} not displayed after {:?}", id, timeout);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_guards_missing_element() {
        let js = property_js("Slider", "value");
        assert!(js.contains(r#"document.getElementById("Slider")"#));
        assert!(js.contains("if (!el) return { found: false };"));
        assert!(js.contains(r#"el["value"]"#));
    }

    #[test]
    fn ids_and_values_are_quoted() {
        let js = set_value_js("we\"ird", "50%", "change");
        assert!(js.contains(r#"getElementById("we\"ird")"#));
        assert!(js.contains(r#"el.value = "50%";"#));
        assert!(js.contains(r#"new Event("change", { bubbles: true })"#));
    }

    #[test]
    fn computed_style_reads_requested_property() {
        let js = computed_style_js("dropdownContent", "pointer-events");
        assert!(js.contains(r#"getPropertyValue("pointer-events")"#));
    }

    #[test]
    fn hex_colors_convert_to_computed_form() {
        assert_eq!(css_rgb("#000000").as_deref(), Some("rgb(0, 0, 0)"));
        assert_eq!(css_rgb("#ff0000").as_deref(), Some("rgb(255, 0, 0)"));
        assert_eq!(css_rgb("ff0000"), None);
        assert_eq!(css_rgb("#fff"), None);
        assert_eq!(css_rgb("#gg0000"), None);
    }

    #[test]
    fn rect_points() {
        let rect = Rect {
            x: 10.0,
            y: 20.0,
            width: 200.0,
            height: 40.0,
        };
        assert_eq!(rect.center(), (110.0, 40.0));
        assert_eq!(rect.point_at(0.25, 0.5), (60.0, 40.0));
    }

    #[test]
    fn lookup_without_value_deserializes() {
        let missing: Lookup<String> = serde_json::from_str(r#"{"found":false}"#).unwrap();
        assert!(!missing.found);
        assert!(missing.value.is_none());
    }
}
