//! End-to-end suite: drives the testing page in Chromium and checks every
//! control against the shared page model.

use anyhow::{bail, ensure, Context, Result};
use chromiumoxide::Page;
use shared::dropdown::OverlayInteractivity;
use shared::{
    click_toggle, ids, page, progress_for, DropdownTrigger, PageSnapshot, Percentage, SliderValue,
};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::cdp::{BrowserSession, LaunchOptions};
use crate::console_log::ConsoleRecorder;
use crate::dom::{css_rgb, Dom};
use crate::report::{self, TestLog};

const APP_READY_TIMEOUT: Duration = Duration::from_secs(15);
/// Time for signals to reach the DOM after an input event
const SETTLE: Duration = Duration::from_millis(200);

/// Options for the test command
pub struct E2eOptions {
    pub url: String,
    pub cases: Vec<u32>,
    pub headed: bool,
    pub screenshots_dir: PathBuf,
    pub logs_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Case {
    pub number: u32,
    pub name: &'static str,
}

pub const CASES: [Case; 20] = [
    Case { number: 1, name: "page_title" },
    Case { number: 2, name: "main_table" },
    Case { number: 3, name: "header_text" },
    Case { number: 4, name: "dropdown_hover" },
    Case { number: 5, name: "dropdown_options" },
    Case { number: 6, name: "text_fields" },
    Case { number: 7, name: "placeholder" },
    Case { number: 8, name: "toggle_colour" },
    Case { number: 9, name: "read_only_field" },
    Case { number: 10, name: "prefilled_field" },
    Case { number: 11, name: "radio_buttons" },
    Case { number: 12, name: "checkbox_prechecked" },
    Case { number: 13, name: "checkbox_check" },
    Case { number: 14, name: "checkbox_double_click" },
    Case { number: 15, name: "checkbox_flip_all" },
    Case { number: 16, name: "slider_value" },
    Case { number: 17, name: "slider_click" },
    Case { number: 18, name: "meter_select" },
    Case { number: 19, name: "meter_click" },
    Case { number: 20, name: "reload" },
];

/// Cases to run, in suite order. An empty request means all of them.
pub fn select_cases(requested: &[u32]) -> Result<Vec<Case>> {
    if requested.is_empty() {
        return Ok(CASES.to_vec());
    }
    if let Some(unknown) = requested
        .iter()
        .find(|number| !CASES.iter().any(|case| case.number == **number))
    {
        bail!("Unknown test case {} (cases are 1-{})", unknown, CASES.len());
    }
    Ok(CASES
        .into_iter()
        .filter(|case| requested.contains(&case.number))
        .collect())
}

/// Result of a single case
#[derive(Debug)]
pub struct TestResult {
    pub case: Case,
    pub passed: bool,
    pub duration: Duration,
    pub error: Option<String>,
    pub console_errors: Vec<String>,
    pub screenshot: Option<PathBuf>,
}

/// A case whose checks pass still fails when the page logged an error.
fn console_failure(console_errors: &[String]) -> Option<String> {
    match console_errors {
        [] => None,
        [only] => Some(format!("console error: {}", only)),
        [first, rest @ ..] => Some(format!(
            "console error: {} (+{} more)",
            first,
            rest.len()
        )),
    }
}

pub fn run(opts: E2eOptions) -> Result<()> {
    let results = tokio::runtime::Runtime::new()?.block_on(run_suite(&opts))?;

    if results.iter().any(|result| !result.passed) {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_suite(opts: &E2eOptions) -> Result<Vec<TestResult>> {
    let cases = select_cases(&opts.cases)?;
    check_server(&opts.url).await?;

    fs::create_dir_all(&opts.screenshots_dir).with_context(|| {
        format!(
            "Failed to create screenshot directory {}",
            opts.screenshots_dir.display()
        )
    })?;
    let mut log = TestLog::create(&opts.logs_dir)?;
    log.line(&format!("Testing {} ({} case(s))", opts.url, cases.len()));

    let launch = LaunchOptions {
        headless: !opts.headed,
        ..LaunchOptions::default()
    };
    let session = BrowserSession::launch(&launch).await?;
    let page = session.navigate("about:blank").await?;
    let mut console = ConsoleRecorder::attach(&page).await?;
    BrowserSession::goto(&page, &opts.url).await?;
    BrowserSession::set_viewport(&page, launch.width, launch.height).await?;

    let dom = Dom::new(&page);
    dom.wait_for_app(APP_READY_TIMEOUT).await?;
    dom.wait_for_displayed(ids::MAIN_TABLE, APP_READY_TIMEOUT)
        .await?;
    let startup = console.drain();
    for entry in startup.unexpected_errors() {
        log.line(&format!("Console during startup: {}", entry));
    }

    let mut results = Vec::new();
    for case in cases {
        let start = Instant::now();
        let outcome = run_case(case, &page, &dom).await;
        let screenshot = save_screenshot(&page, &opts.screenshots_dir, case).await;

        let console_report = console.drain();
        for diagnostic in console_report.diagnostics() {
            log.line(&format!("Case {:02} page diagnostic: {}", case.number, diagnostic));
        }
        let console_errors: Vec<String> = console_report
            .unexpected_errors()
            .iter()
            .map(|entry| entry.to_string())
            .collect();
        let error = match outcome {
            Err(e) => Some(format!("{:#}", e)),
            Ok(()) => console_failure(&console_errors),
        };

        let result = TestResult {
            case,
            passed: error.is_none(),
            duration: start.elapsed(),
            error,
            console_errors,
            screenshot,
        };
        match &result.error {
            None => log.line(&report::passed_line(case.number)),
            Some(reason) => log.line(&report::failed_line(case.number, reason)),
        }
        results.push(result);
    }

    print_summary(&results);
    log.line(&format!("Log written to {}", log.path().display()));

    Ok(results)
}

/// Pre-flight check: the dev server must answer before a browser is started
async fn check_server(url: &str) -> Result<()> {
    match reqwest::get(url).await {
        Ok(response) if response.status().is_success() => Ok(()),
        Ok(response) => bail!("{} answered with status {}", url, response.status()),
        Err(e) => {
            eprintln!("ERROR: Cannot reach the testing app at {}!", url);
            eprintln!();
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("Start the app first:");
            eprintln!("  mzoon start");
            bail!("Testing app not running")
        }
    }
}

async fn save_screenshot(page: &Page, dir: &std::path::Path, case: Case) -> Option<PathBuf> {
    let path = report::screenshot_path(dir, case.number, case.name);
    let saved = async {
        let data = BrowserSession::screenshot(page).await?;
        fs::write(&path, &data)
            .with_context(|| format!("Failed to write screenshot to {}", path.display()))
    };
    match saved.await {
        Ok(()) => Some(path),
        Err(e) => {
            log::warn!("Screenshot for case {:02} failed: {:#}", case.number, e);
            None
        }
    }
}

fn print_summary(results: &[TestResult]) {
    println!("\n==================");
    for result in results {
        let status = if result.passed { "[PASS]" } else { "[FAIL]" };
        println!(
            "  {} {:02} {} ({:.0?})",
            status, result.case.number, result.case.name, result.duration
        );
        if let Some(ref error) = result.error {
            println!("         Error: {}", error);
        }
        for console_error in &result.console_errors {
            println!("         Console: {}", console_error);
        }
        if let Some(ref screenshot) = result.screenshot {
            println!("         Screenshot: {}", screenshot.display());
        }
    }
    let passed = results.iter().filter(|r| r.passed).count();
    println!("{}/{} passed", passed, results.len());
}

async fn settle() {
    tokio::time::sleep(SETTLE).await;
}

async fn run_case(case: Case, page: &Page, dom: &Dom<'_>) -> Result<()> {
    match case.number {
        1 => page_title(dom).await,
        2 => main_table(dom).await,
        3 => header_text(dom).await,
        4 => dropdown_hover(dom).await,
        5 => dropdown_options(dom).await,
        6 => text_fields(dom).await,
        7 => placeholder(dom).await,
        8 => toggle_colour(dom).await,
        9 => read_only_field(dom).await,
        10 => prefilled_field(dom).await,
        11 => radio_buttons(dom).await,
        12 => checkbox_prechecked(dom).await,
        13 => checkbox_check(dom).await,
        14 => checkbox_double_click(dom).await,
        15 => checkbox_flip_all(dom).await,
        16 => slider_value(dom).await,
        17 => slider_click(dom).await,
        18 => meter_select(dom).await,
        19 => meter_click(dom).await,
        20 => reload(page, dom).await,
        other => bail!("Unknown test case {}", other),
    }
}

async fn page_title(dom: &Dom<'_>) -> Result<()> {
    let title = dom.title().await?;
    ensure!(title == page::TITLE, "title is {:?}", title);
    Ok(())
}

async fn main_table(dom: &Dom<'_>) -> Result<()> {
    ensure!(dom.is_displayed(ids::MAIN_TABLE).await?, "main table is hidden");
    Ok(())
}

async fn header_text(dom: &Dom<'_>) -> Result<()> {
    let text = dom.text(ids::HEADER).await?;
    ensure!(text.trim() == page::HEADER_TEXT, "header is {:?}", text);
    Ok(())
}

async fn dropdown_hover(dom: &Dom<'_>) -> Result<()> {
    dom.hover(ids::DROPDOWN_BUTTON).await?;
    settle().await;
    ensure!(
        dom.is_displayed(ids::DROPDOWN_OVERLAY).await?,
        "overlay hidden while hovering"
    );

    let (x, y) = dom.rect(ids::MAIN_TABLE).await?.center();
    dom.move_mouse_to(x, y).await?;
    settle().await;
    ensure!(
        !dom.is_displayed(ids::DROPDOWN_OVERLAY).await?,
        "overlay still shown after moving away"
    );
    Ok(())
}

async fn check_heading(dom: &Dom<'_>, expected: &PageSnapshot) -> Result<()> {
    let heading = dom.text(ids::HEADING).await?;
    ensure!(
        heading == expected.dropdown.heading,
        "heading is {:?}, expected {:?}",
        heading,
        expected.dropdown.heading
    );
    let pointer_events = dom.css(ids::DROPDOWN_OVERLAY, "pointer-events").await?;
    ensure!(
        pointer_events == OverlayInteractivity::Enabled.pointer_events(),
        "overlay pointer-events is {:?}",
        pointer_events
    );
    let live = dom.snapshot().await?;
    ensure!(
        live.dropdown == expected.dropdown,
        "page state {:?}, expected {:?}",
        live.dropdown,
        expected.dropdown
    );
    Ok(())
}

async fn dropdown_options(dom: &Dom<'_>) -> Result<()> {
    let mut expected = dom.snapshot().await?;
    for trigger in DropdownTrigger::OPTIONS {
        dom.hover(ids::DROPDOWN_BUTTON).await?;
        settle().await;
        dom.click(trigger.element_id()).await?;
        settle().await;
        expected.click_dropdown(trigger);
        check_heading(dom, &expected)
            .await
            .with_context(|| format!("after {}", trigger.caption()))?;
    }

    dom.click(ids::DROPDOWN_BUTTON).await?;
    settle().await;
    expected.click_dropdown(DropdownTrigger::OpenMenu);
    check_heading(dom, &expected)
        .await
        .context("after the dropdown button")
}

async fn retype(dom: &Dom<'_>, id: &str, text: &str) -> Result<()> {
    dom.clear(id).await?;
    dom.type_text(id, text).await?;
    let value = dom.value(id).await?;
    ensure!(value == text, "#{} holds {:?} after typing {:?}", id, value, text);
    Ok(())
}

async fn text_fields(dom: &Dom<'_>) -> Result<()> {
    retype(dom, ids::SINGLE_LINE_TEXTBOX, "Single line of text").await?;
    retype(dom, ids::MULTI_LINE_TEXTBOX, "First line\nSecond line").await
}

async fn placeholder(dom: &Dom<'_>) -> Result<()> {
    let text: String = dom.property(ids::PLACEHOLDER_TEXTBOX, "placeholder").await?;
    ensure!(text == page::PLACEHOLDER_TEXT, "placeholder is {:?}", text);
    Ok(())
}

async fn toggle_colour(dom: &Dom<'_>) -> Result<()> {
    let before = dom.snapshot().await?;
    dom.click(ids::TOGGLE_BUTTON).await?;
    settle().await;

    let (color, display) = click_toggle(before.toggle);
    let live = dom.snapshot().await?;
    ensure!(live.toggle == color, "toggle is {:?}, expected {:?}", live.toggle, color);

    let hex = color
        .hex()
        .context("a clicked toggle always has a colour")?;
    let rgb = css_rgb(hex).with_context(|| format!("bad colour literal {}", hex))?;
    for id in [ids::TOGGLE_BUTTON, ids::TOGGLE_LABEL, ids::READ_ONLY_FIELD] {
        let actual = dom.css(id, "color").await?;
        ensure!(actual == rgb, "#{} colour is {}, expected {}", id, actual, rgb);
    }

    let field = dom.value(ids::READ_ONLY_FIELD).await?;
    ensure!(field == display.field_value, "field value is {:?}", field);
    let label = dom.text(ids::TOGGLE_LABEL).await?;
    ensure!(label == display.label_text, "label text is {:?}", label);
    Ok(())
}

async fn read_only_field(dom: &Dom<'_>) -> Result<()> {
    let before = dom.value(ids::READ_ONLY_FIELD).await?;
    dom.type_text(ids::READ_ONLY_FIELD, "typed").await?;
    let after = dom.value(ids::READ_ONLY_FIELD).await?;
    ensure!(after == before, "read-only field changed to {:?}", after);
    Ok(())
}

async fn prefilled_field(dom: &Dom<'_>) -> Result<()> {
    retype(dom, ids::SINGLE_LINE_TEXTBOX, "Other field").await?;
    let value = dom.value(ids::PREFILLED_TEXTBOX).await?;
    ensure!(value == page::PREFILLED_TEXT, "prefilled field is {:?}", value);
    Ok(())
}

async fn radio_buttons(dom: &Dom<'_>) -> Result<()> {
    let radios = [ids::RADIO_BUTTON_1, ids::RADIO_BUTTON_2];
    for (index, id) in radios.into_iter().enumerate() {
        dom.click(id).await?;
        for (other_index, other) in radios.into_iter().enumerate() {
            let checked = dom.checked(other).await?;
            ensure!(
                checked == (index == other_index),
                "after clicking #{}, #{} checked = {}",
                id,
                other,
                checked
            );
        }
    }
    Ok(())
}

async fn checkbox_prechecked(dom: &Dom<'_>) -> Result<()> {
    let id = ids::CHECKBOXES[page::PRECHECKED_CHECKBOX];
    ensure!(dom.checked(id).await?, "#{} is not checked", id);
    Ok(())
}

async fn checkbox_check(dom: &Dom<'_>) -> Result<()> {
    let id = ids::CHECKBOXES[2];
    if dom.checked(id).await? {
        dom.click(id).await?;
    }
    dom.click(id).await?;
    ensure!(dom.checked(id).await?, "#{} is not checked after clicking", id);
    Ok(())
}

async fn checkbox_double_click(dom: &Dom<'_>) -> Result<()> {
    let id = ids::CHECKBOXES[1];
    let before = dom.checked(id).await?;
    dom.click(id).await?;
    dom.click(id).await?;
    let after = dom.checked(id).await?;
    ensure!(after == before, "#{} went from {} to {}", id, before, after);
    Ok(())
}

async fn checkbox_flip_all(dom: &Dom<'_>) -> Result<()> {
    for id in &ids::CHECKBOXES[1..] {
        let before = dom.checked(id).await?;
        dom.click(id).await?;
        let after = dom.checked(id).await?;
        ensure!(after != before, "#{} stayed {}", id, after);
    }
    Ok(())
}

async fn check_progress(dom: &Dom<'_>, value: SliderValue) -> Result<()> {
    let expected = progress_for(value);
    let bar: f64 = dom.property(ids::PROGRESS_BAR, "value").await?;
    ensure!(
        bar == f64::from(expected.value.0),
        "progress bar is {}, expected {}",
        bar,
        expected.value
    );
    let label = dom.text(ids::PROGRESS_LABEL).await?;
    ensure!(label == expected.label, "progress label is {:?}", label);
    let live = dom.snapshot().await?;
    ensure!(live.progress == expected, "page state {:?}", live.progress);
    Ok(())
}

async fn slider_value(dom: &Dom<'_>) -> Result<()> {
    dom.set_value(ids::SLIDER, "37", "input").await?;
    settle().await;
    check_progress(dom, SliderValue(37)).await
}

async fn slider_click(dom: &Dom<'_>) -> Result<()> {
    let start = SliderValue(80);
    dom.set_value(ids::SLIDER, &start.to_string(), "input").await?;
    settle().await;

    dom.click_at_fraction(ids::SLIDER, 0.25, 0.5).await?;
    settle().await;

    let raw = dom.value(ids::SLIDER).await?;
    let value: SliderValue = raw.parse()?;
    ensure!(value != start, "slider did not move from {}", start);
    check_progress(dom, value).await
}

async fn meter_select(dom: &Dom<'_>) -> Result<()> {
    let percentage = Percentage::Fifty;
    dom.set_value(ids::SELECT, percentage.option_value(), "change")
        .await?;
    settle().await;

    let expected = percentage.meter();
    let bar: f64 = dom.property(ids::METER_BAR, "value").await?;
    ensure!(bar == expected.value, "meter is {}, expected {}", bar, expected.value);
    let label = dom.text(ids::METER_LABEL).await?;
    ensure!(label == expected.label, "meter label is {:?}", label);
    let live = dom.snapshot().await?;
    ensure!(live.meter == expected, "page state {:?}", live.meter);
    Ok(())
}

async fn meter_click(dom: &Dom<'_>) -> Result<()> {
    let before = dom.snapshot().await?;
    let bar_before: f64 = dom.property(ids::METER_BAR, "value").await?;
    dom.click(ids::METER_BAR).await?;
    settle().await;
    let bar_after: f64 = dom.property(ids::METER_BAR, "value").await?;
    ensure!(bar_after == bar_before, "meter moved to {}", bar_after);
    let after = dom.snapshot().await?;
    ensure!(after == before, "page state changed to {:?}", after);
    Ok(())
}

async fn reload(page: &Page, dom: &Dom<'_>) -> Result<()> {
    BrowserSession::reload(page).await?;
    dom.wait_for_app(APP_READY_TIMEOUT).await?;
    dom.wait_for_displayed(ids::MAIN_TABLE, APP_READY_TIMEOUT)
        .await?;
    let live = dom.snapshot().await?;
    ensure!(
        live == PageSnapshot::default(),
        "state survived the reload: {:?}",
        live
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cases_are_numbered_in_order() {
        for (index, case) in CASES.iter().enumerate() {
            assert_eq!(case.number as usize, index + 1);
        }
    }

    #[test]
    fn empty_selection_runs_everything() {
        assert_eq!(select_cases(&[]).unwrap().len(), CASES.len());
    }

    #[test]
    fn selection_keeps_suite_order() {
        let cases = select_cases(&[18, 3, 18]).unwrap();
        let numbers: Vec<_> = cases.iter().map(|case| case.number).collect();
        assert_eq!(numbers, [3, 18]);
    }

    #[test]
    fn console_errors_fail_a_passing_case() {
        assert_eq!(console_failure(&[]), None);
        assert_eq!(
            console_failure(&["[exception] boom".to_owned()]).as_deref(),
            Some("console error: [exception] boom")
        );
        let many = ["[error] a".to_owned(), "[error] b".to_owned(), "[error] c".to_owned()];
        assert_eq!(
            console_failure(&many).as_deref(),
            Some("console error: [error] a (+2 more)")
        );
    }

    #[test]
    fn unknown_case_is_rejected() {
        let error = select_cases(&[4, 21]).unwrap_err();
        assert!(error.to_string().contains("21"));
    }
}
