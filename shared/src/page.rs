//! Static content of the testing page.

pub const TITLE: &str = "Testing App";
pub const HEADER_TEXT: &str = "Testing web application";

pub const PLACEHOLDER_TEXT: &str = "Enter text here";
pub const PREFILLED_TEXT: &str = "Prefilled text";

pub const TOGGLE_BUTTON_CAPTION: &str = "Change colour";

/// Index of the checkbox that starts checked.
pub const PRECHECKED_CHECKBOX: usize = 0;

pub const TABLE_HEADER: [&str; 3] = ["Tool", "Language", "Driver"];
pub const TABLE_ROWS: [[&str; 3]; 3] = [
    ["Selenium", "Python", "WebDriver"],
    ["Playwright", "Python", "CDP"],
    ["Splinter", "Python", "WebDriver"],
];
