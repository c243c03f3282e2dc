//! Console messages the page writes when a handler declines an input.
//!
//! The frontend formats them, the automation tools recognise them in the
//! browser console.

use std::fmt;

const SLIDER_REJECTED: &str = "Progress bar not updated: ";
const SELECT_UNMATCHED: &str = "Meter left unchanged: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageDiagnostic {
    /// The slider reported a value that is not a whole number.
    SliderRejected(String),
    /// The select reported a value outside the percentage table.
    SelectUnmatched(String),
}

impl PageDiagnostic {
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(reason) = text.strip_prefix(SLIDER_REJECTED) {
            return Some(Self::SliderRejected(reason.to_owned()));
        }
        text.strip_prefix(SELECT_UNMATCHED)
            .map(|reason| Self::SelectUnmatched(reason.to_owned()))
    }
}

impl fmt::Display for PageDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SliderRejected(reason) => write!(f, "{SLIDER_REJECTED}{reason}"),
            Self::SelectUnmatched(reason) => write!(f, "{SELECT_UNMATCHED}{reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meter::{Percentage, UnknownPercentage};
    use crate::progress::SliderValue;

    #[test]
    fn handler_errors_read_back() {
        let slider_error = "abc".parse::<SliderValue>().unwrap_err();
        let select_error: UnknownPercentage = "75%".parse::<Percentage>().unwrap_err();
        for diagnostic in [
            PageDiagnostic::SliderRejected(slider_error.to_string()),
            PageDiagnostic::SelectUnmatched(select_error.to_string()),
        ] {
            assert_eq!(PageDiagnostic::parse(&diagnostic.to_string()), Some(diagnostic));
        }
    }

    #[test]
    fn other_messages_are_not_diagnostics() {
        assert_eq!(PageDiagnostic::parse("panicked at frontend/src/main.rs"), None);
        assert_eq!(PageDiagnostic::parse(""), None);
    }
}
