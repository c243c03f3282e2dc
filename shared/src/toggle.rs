//! Colour toggle button and the label and read-only field that mirror it.

use serde::{Deserialize, Serialize};

pub const BLACK_HEX: &str = "#000000";
pub const RED_HEX: &str = "#ff0000";

/// Colour of the controls before the first click.
pub const UNSET_COLOR: &str = "gray";
pub const UNSET_LABEL_TEXT: &str = "Click the button to change the colour";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleColor {
    /// Nothing has been applied yet.
    #[default]
    Unset,
    Black,
    Red,
}

impl ToggleColor {
    /// Anything that is not black turns black; black turns red.
    pub fn next(self) -> Self {
        match self {
            Self::Black => Self::Red,
            Self::Unset | Self::Red => Self::Black,
        }
    }

    pub fn css_name(self) -> &'static str {
        match self {
            Self::Unset => UNSET_COLOR,
            Self::Black => "black",
            Self::Red => "red",
        }
    }

    pub fn hex(self) -> Option<&'static str> {
        match self {
            Self::Unset => None,
            Self::Black => Some(BLACK_HEX),
            Self::Red => Some(RED_HEX),
        }
    }

    pub fn display(self) -> ToggleDisplay {
        let color = self.css_name();
        ToggleDisplay {
            button_color: color,
            label_text: self.hex().unwrap_or(UNSET_LABEL_TEXT),
            label_color: color,
            field_value: self.hex().unwrap_or_default(),
            field_color: color,
        }
    }
}

/// Everything the toggle handler writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleDisplay {
    pub button_color: &'static str,
    pub label_text: &'static str,
    pub label_color: &'static str,
    pub field_value: &'static str,
    pub field_color: &'static str,
}

/// Click handler of the toggle button.
pub fn click_toggle(current: ToggleColor) -> (ToggleColor, ToggleDisplay) {
    let next = current.next();
    (next, next.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_click_from_unset_is_black() {
        let (color, display) = click_toggle(ToggleColor::Unset);
        assert_eq!(color, ToggleColor::Black);
        assert_eq!(
            display,
            ToggleDisplay {
                button_color: "black",
                label_text: "#000000",
                label_color: "black",
                field_value: "#000000",
                field_color: "black",
            }
        );
    }

    #[test]
    fn black_turns_red() {
        let (color, display) = click_toggle(ToggleColor::Black);
        assert_eq!(color, ToggleColor::Red);
        assert_eq!(display.button_color, "red");
        assert_eq!(display.label_text, "#ff0000");
        assert_eq!(display.label_color, "red");
        assert_eq!(display.field_value, "#ff0000");
        assert_eq!(display.field_color, "red");
    }

    #[test]
    fn click_parity() {
        let mut color = ToggleColor::Unset;
        for clicks in 1..=9 {
            color = click_toggle(color).0;
            let expected = if clicks % 2 == 1 { ToggleColor::Black } else { ToggleColor::Red };
            assert_eq!(color, expected, "after {clicks} clicks");
        }
    }

    #[test]
    fn unset_display_differs_from_both_colors() {
        let unset = ToggleColor::Unset.display();
        for color in [ToggleColor::Black, ToggleColor::Red] {
            let display = color.display();
            assert_ne!(unset.button_color, display.button_color);
            assert_ne!(unset.label_text, display.label_text);
            assert_ne!(unset.field_value, display.field_value);
        }
        assert_eq!(unset.field_value, "");
    }
}
