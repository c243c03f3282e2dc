//! Slider driving the progress bar.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SLIDER_MIN: u32 = 0;
pub const SLIDER_MAX: u32 = 100;
pub const SLIDER_INITIAL: SliderValue = SliderValue(50);

/// Slider position as reported by the host. Not clamped here; the range
/// input's `min`/`max` attributes bound it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SliderValue(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("slider reported a non-numeric value '{0}'")]
pub struct InvalidSliderValue(pub String);

impl FromStr for SliderValue {
    type Err = InvalidSliderValue;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.trim()
            .parse()
            .map(SliderValue)
            .map_err(|_| InvalidSliderValue(raw.to_owned()))
    }
}

impl fmt::Display for SliderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressIndicator {
    pub value: SliderValue,
    pub label: String,
}

/// Input handler of the slider.
pub fn progress_for(value: SliderValue) -> ProgressIndicator {
    ProgressIndicator {
        value,
        label: format!("Progress bar: ({value}%)"),
    }
}

impl Default for ProgressIndicator {
    fn default() -> Self {
        progress_for(SLIDER_INITIAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_embeds_value() {
        let indicator = progress_for(SliderValue(37));
        assert_eq!(indicator.value, SliderValue(37));
        assert_eq!(indicator.label, "Progress bar: (37%)");
    }

    #[test]
    fn bounds() {
        assert_eq!(progress_for(SliderValue(SLIDER_MIN)).label, "Progress bar: (0%)");
        assert_eq!(progress_for(SliderValue(SLIDER_MAX)).label, "Progress bar: (100%)");
    }

    #[test]
    fn host_values_are_not_clamped() {
        let value: SliderValue = "150".parse().unwrap();
        assert_eq!(progress_for(value).label, "Progress bar: (150%)");
    }

    #[test]
    fn parse_host_strings() {
        assert_eq!(" 42 ".parse::<SliderValue>(), Ok(SliderValue(42)));
        assert_eq!(
            "forty".parse::<SliderValue>(),
            Err(InvalidSliderValue("forty".to_owned()))
        );
        assert!("".parse::<SliderValue>().is_err());
        assert!("-1".parse::<SliderValue>().is_err());
    }

    #[test]
    fn initial_indicator_matches_initial_slider() {
        assert_eq!(ProgressIndicator::default().value, SLIDER_INITIAL);
    }
}
