//! Behaviour of the testing page, independent of any DOM.
//!
//! Each handler is a pure function of the triggering control's current value.
//! `frontend` owns the view tree and writes the results into it, `tools` uses
//! the same functions as the reference model when driving a real browser.

pub mod diagnostics;
pub mod dropdown;
pub mod ids;
pub mod meter;
pub mod page;
pub mod progress;
pub mod snapshot;
pub mod toggle;

pub use diagnostics::PageDiagnostic;
pub use dropdown::{DropdownState, DropdownTrigger, OverlayInteractivity};
pub use meter::{MeterIndicator, Percentage, UnknownPercentage, meter_for};
pub use progress::{InvalidSliderValue, ProgressIndicator, SliderValue, progress_for};
pub use snapshot::PageSnapshot;
pub use toggle::{ToggleColor, ToggleDisplay, click_toggle};
