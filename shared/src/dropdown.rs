//! Hover dropdown that rewrites the page heading.

use crate::ids;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropdownTrigger {
    OpenMenu,
    Option1,
    Option2,
    Option3,
}

impl DropdownTrigger {
    pub const OPTIONS: [DropdownTrigger; 3] = [Self::Option1, Self::Option2, Self::Option3];

    pub fn heading_text(self) -> &'static str {
        match self {
            Self::OpenMenu => "Default text",
            Self::Option1 => "Text 1",
            Self::Option2 => "Text 2",
            Self::Option3 => "Text 3",
        }
    }

    pub fn element_id(self) -> &'static str {
        match self {
            Self::OpenMenu => ids::DROPDOWN_BUTTON,
            Self::Option1 => ids::DROPDOWN_OPTION_1,
            Self::Option2 => ids::DROPDOWN_OPTION_2,
            Self::Option3 => ids::DROPDOWN_OPTION_3,
        }
    }

    /// Caption shown on the control itself.
    pub fn caption(self) -> &'static str {
        match self {
            Self::OpenMenu => "Dropdown",
            Self::Option1 => "Option 1",
            Self::Option2 => "Option 2",
            Self::Option3 => "Option 3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayInteractivity {
    Enabled,
    Disabled,
}

impl OverlayInteractivity {
    /// Value of the overlay's `pointer-events` style.
    pub fn pointer_events(self) -> &'static str {
        match self {
            Self::Enabled => "auto",
            Self::Disabled => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownState {
    pub heading: String,
    pub overlay: OverlayInteractivity,
}

/// The options inside the overlay must take clicks as soon as hovering
/// shows them, so the overlay starts enabled.
impl Default for DropdownState {
    fn default() -> Self {
        Self {
            heading: DropdownTrigger::OpenMenu.heading_text().to_owned(),
            overlay: OverlayInteractivity::Enabled,
        }
    }
}

impl DropdownState {
    /// Click handler shared by the dropdown button and its three options.
    /// Nothing ever disables the overlay again.
    pub fn select(&mut self, trigger: DropdownTrigger) {
        self.heading.clear();
        self.heading.push_str(trigger.heading_text());
        self.overlay = OverlayInteractivity::Enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_trigger_writes_its_literal_and_enables_overlay() {
        let expected = [
            (DropdownTrigger::OpenMenu, "Default text"),
            (DropdownTrigger::Option1, "Text 1"),
            (DropdownTrigger::Option2, "Text 2"),
            (DropdownTrigger::Option3, "Text 3"),
        ];
        for (trigger, heading) in expected {
            let mut state = DropdownState::default();
            state.select(trigger);
            assert_eq!(state.heading, heading);
            assert_eq!(state.overlay, OverlayInteractivity::Enabled);
        }
    }

    #[test]
    fn selection_does_not_depend_on_prior_state() {
        let mut state = DropdownState {
            heading: "anything".to_owned(),
            overlay: OverlayInteractivity::Enabled,
        };
        state.select(DropdownTrigger::Option2);
        state.select(DropdownTrigger::Option2);
        assert_eq!(state.heading, "Text 2");
        assert_eq!(state.overlay, OverlayInteractivity::Enabled);

        state.select(DropdownTrigger::OpenMenu);
        assert_eq!(state, DropdownState {
            heading: "Default text".to_owned(),
            overlay: OverlayInteractivity::Enabled,
        });
    }

    #[test]
    fn initial_state() {
        let state = DropdownState::default();
        assert_eq!(state.heading, "Default text");
        assert_eq!(state.overlay, OverlayInteractivity::Enabled);
    }

    #[test]
    fn options_take_clicks_before_any_selection() {
        // Option buttons inherit the overlay's pointer-events.
        assert_ne!(DropdownState::default().overlay.pointer_events(), "none");
    }

    #[test]
    fn disabled_overlay_passes_clicks_through() {
        assert_eq!(OverlayInteractivity::Disabled.pointer_events(), "none");
        assert_eq!(OverlayInteractivity::Enabled.pointer_events(), "auto");
    }

    #[test]
    fn triggers_map_to_distinct_elements() {
        let mut element_ids: Vec<_> = DropdownTrigger::OPTIONS
            .into_iter()
            .chain([DropdownTrigger::OpenMenu])
            .map(DropdownTrigger::element_id)
            .collect();
        element_ids.sort_unstable();
        element_ids.dedup();
        assert_eq!(element_ids.len(), 4);
    }
}
