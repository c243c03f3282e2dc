//! Observable state of every handler-driven element.
//!
//! The frontend publishes it as JSON on `window.testingApp.snapshot()`.
//! Applying the same interactions to a `PageSnapshot` gives the state the
//! live page must reach.

use crate::dropdown::{DropdownState, DropdownTrigger};
use crate::meter::{MeterIndicator, Percentage, UnknownPercentage};
use crate::progress::{
    InvalidSliderValue, ProgressIndicator, SLIDER_INITIAL, SliderValue, progress_for,
};
use crate::toggle::{ToggleColor, click_toggle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub toggle: ToggleColor,
    pub progress: ProgressIndicator,
    pub selected: String,
    pub meter: MeterIndicator,
    pub dropdown: DropdownState,
}

impl Default for PageSnapshot {
    fn default() -> Self {
        Self {
            toggle: ToggleColor::default(),
            progress: progress_for(SLIDER_INITIAL),
            selected: Percentage::ALL[0].option_value().to_owned(),
            meter: MeterIndicator::default(),
            dropdown: DropdownState::default(),
        }
    }
}

impl PageSnapshot {
    pub fn click_toggle(&mut self) {
        self.toggle = click_toggle(self.toggle).0;
    }

    /// On a parse error nothing is written.
    pub fn input_slider(&mut self, raw: &str) -> Result<(), InvalidSliderValue> {
        let value: SliderValue = raw.parse()?;
        self.progress = progress_for(value);
        Ok(())
    }

    /// The select box always shows the chosen option; the meter follows only
    /// for the three known values.
    pub fn change_select(&mut self, raw: &str) -> Result<(), UnknownPercentage> {
        self.selected = raw.to_owned();
        let percentage: Percentage = raw.parse()?;
        self.meter = percentage.meter();
        Ok(())
    }

    pub fn click_dropdown(&mut self, trigger: DropdownTrigger) {
        self.dropdown.select(trigger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dropdown::OverlayInteractivity;

    #[test]
    fn initial_state_is_consistent() {
        let snapshot = PageSnapshot::default();
        assert_eq!(snapshot.progress.value, SLIDER_INITIAL);
        assert_eq!(Some(snapshot.meter.clone()), crate::meter_for(&snapshot.selected));
        assert_eq!(snapshot.dropdown.overlay, OverlayInteractivity::Enabled);
    }

    #[test]
    fn rejected_slider_input_keeps_state() {
        let mut snapshot = PageSnapshot::default();
        let before = snapshot.clone();
        assert!(snapshot.input_slider("NaN").is_err());
        assert_eq!(snapshot, before);
    }

    #[test]
    fn unknown_select_value_keeps_meter() {
        let mut snapshot = PageSnapshot::default();
        snapshot.change_select("100%").unwrap();
        let meter = snapshot.meter.clone();
        assert!(snapshot.change_select("75%").is_err());
        assert_eq!(snapshot.meter, meter);
        assert_eq!(snapshot.selected, "75%");
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_value(PageSnapshot::default()).unwrap();
        assert_eq!(json["toggle"], "unset");
        assert!(json.get("slider").is_none());
        assert_eq!(json["progress"]["value"], 50);
        assert_eq!(json["progress"]["label"], "Progress bar: (50%)");
        assert_eq!(json["selected"], "1%");
        assert_eq!(json["meter"]["value"], 0.01);
        assert_eq!(json["dropdown"]["heading"], "Default text");
        assert_eq!(json["dropdown"]["overlay"], "enabled");
    }
}
