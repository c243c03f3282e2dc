//! Select box driving the percentage meter.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Percentage {
    #[serde(rename = "1%")]
    One,
    #[serde(rename = "50%")]
    Fifty,
    #[serde(rename = "100%")]
    Hundred,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized percentage option '{0}'")]
pub struct UnknownPercentage(pub String);

impl Percentage {
    /// Options in the order they appear in the select box.
    pub const ALL: [Percentage; 3] = [Self::One, Self::Fifty, Self::Hundred];

    pub fn option_value(self) -> &'static str {
        match self {
            Self::One => "1%",
            Self::Fifty => "50%",
            Self::Hundred => "100%",
        }
    }

    pub fn meter(self) -> MeterIndicator {
        let value = match self {
            Self::One => 0.01,
            Self::Fifty => 0.5,
            Self::Hundred => 1.0,
        };
        MeterIndicator {
            value,
            label: format!("Percentage indicator: ({})", self.option_value()),
        }
    }
}

impl FromStr for Percentage {
    type Err = UnknownPercentage;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|percentage| percentage.option_value() == raw)
            .ok_or_else(|| UnknownPercentage(raw.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterIndicator {
    pub value: f64,
    pub label: String,
}

impl MeterIndicator {
    /// Value as written to the `<meter>` element: `0.01`, `0.5`, `1.0`.
    pub fn dom_value(&self) -> String {
        if self.value.fract() == 0.0 {
            format!("{:.1}", self.value)
        } else {
            self.value.to_string()
        }
    }
}

impl Default for MeterIndicator {
    fn default() -> Self {
        Percentage::ALL[0].meter()
    }
}

/// Change handler of the select box. `None` means the meter keeps its
/// previous state.
pub fn meter_for(selected: &str) -> Option<MeterIndicator> {
    selected.parse().ok().map(Percentage::meter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_table() {
        let cases = [
            ("1%", 0.01, "Percentage indicator: (1%)"),
            ("50%", 0.5, "Percentage indicator: (50%)"),
            ("100%", 1.0, "Percentage indicator: (100%)"),
        ];
        for (selected, value, label) in cases {
            let meter = meter_for(selected).unwrap();
            assert_eq!(meter.value, value, "{selected}");
            assert_eq!(meter.label, label);
        }
    }

    #[test]
    fn unmatched_values_do_nothing() {
        for selected in ["", "0%", "50", " 50%", "100 %", "75%"] {
            assert_eq!(meter_for(selected), None, "{selected:?}");
        }
        assert_eq!(
            "75%".parse::<Percentage>(),
            Err(UnknownPercentage("75%".to_owned()))
        );
    }

    #[test]
    fn dom_values_are_exact_literals() {
        let values: Vec<_> = Percentage::ALL
            .into_iter()
            .map(|percentage| percentage.meter().dom_value())
            .collect();
        assert_eq!(values, ["0.01", "0.5", "1.0"]);
    }

    #[test]
    fn serde_uses_option_values() {
        assert_eq!(serde_json::to_string(&Percentage::Fifty).unwrap(), "\"50%\"");
    }
}
