//! Element ids of the testing page. The automation suite addresses elements
//! only through these.

pub const HEADER: &str = "header";
pub const HEADING: &str = "heading";
pub const MAIN_TABLE: &str = "mainTable";

pub const DROPDOWN: &str = "dropdown";
pub const DROPDOWN_BUTTON: &str = "dropdownButton";
pub const DROPDOWN_OVERLAY: &str = "dropdownContent";
pub const DROPDOWN_OPTION_1: &str = "dropdownOption1";
pub const DROPDOWN_OPTION_2: &str = "dropdownOption2";
pub const DROPDOWN_OPTION_3: &str = "dropdownOption3";

pub const SINGLE_LINE_TEXTBOX: &str = "singleLineTextbox";
pub const MULTI_LINE_TEXTBOX: &str = "multiLineTextbox";
pub const PLACEHOLDER_TEXTBOX: &str = "placeholderTextbox";
pub const PREFILLED_TEXTBOX: &str = "prefilledTextbox";

pub const TOGGLE_BUTTON: &str = "Button";
pub const TOGGLE_LABEL: &str = "pText";
pub const READ_ONLY_FIELD: &str = "readOnlyText";

pub const RADIO_BUTTON_1: &str = "radioButton1";
pub const RADIO_BUTTON_2: &str = "radioButton2";
pub const RADIO_GROUP: &str = "radioGroup";

pub const CHECKBOXES: [&str; 4] = ["checkbox0", "checkbox1", "checkbox2", "checkbox3"];

pub const SLIDER: &str = "Slider";
pub const PROGRESS_BAR: &str = "progressBar";
pub const PROGRESS_LABEL: &str = "progressLabel";

pub const SELECT: &str = "Select";
pub const METER_BAR: &str = "meterBar";
pub const METER_LABEL: &str = "meterLabel";
