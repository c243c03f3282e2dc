//! Whole-page interaction sequences against the reference model.

use shared::{
    DropdownTrigger, OverlayInteractivity, PageSnapshot, SliderValue, ToggleColor, meter_for,
    progress_for,
};

#[test]
fn slider_select_then_option_two() {
    let mut page = PageSnapshot::default();

    page.input_slider("37").unwrap();
    assert_eq!(page.progress.value.to_string(), "37");
    assert_eq!(page.progress.label, "Progress bar: (37%)");

    page.change_select("50%").unwrap();
    assert_eq!(page.meter.value, 0.5);
    assert_eq!(page.meter.label, "Percentage indicator: (50%)");

    page.click_dropdown(DropdownTrigger::Option2);
    assert_eq!(page.dropdown.heading, "Text 2");
    assert_eq!(page.dropdown.overlay, OverlayInteractivity::Enabled);
}

#[test]
fn slider_and_select_are_idempotent() {
    let mut once = PageSnapshot::default();
    once.input_slider("12").unwrap();
    once.change_select("100%").unwrap();

    let mut twice = PageSnapshot::default();
    for _ in 0..2 {
        twice.input_slider("12").unwrap();
        twice.change_select("100%").unwrap();
    }

    assert_eq!(once, twice);
}

#[test]
fn every_slider_position_maps_verbatim() {
    for value in 0..=100 {
        let indicator = progress_for(SliderValue(value));
        assert_eq!(indicator.value, SliderValue(value));
        assert_eq!(indicator.label, format!("Progress bar: ({value}%)"));
    }
}

#[test]
fn toggle_sequence_alternates_after_first_click() {
    let mut page = PageSnapshot::default();
    assert_eq!(page.toggle, ToggleColor::Unset);

    let mut seen = Vec::new();
    for _ in 0..4 {
        page.click_toggle();
        seen.push(page.toggle.display().field_value);
    }
    assert_eq!(seen, ["#000000", "#ff0000", "#000000", "#ff0000"]);
}

#[test]
fn handlers_do_not_touch_each_other() {
    let mut page = PageSnapshot::default();
    page.click_toggle();
    page.input_slider("80").unwrap();
    let before = page.clone();

    page.click_dropdown(DropdownTrigger::Option3);
    page.change_select("1%").unwrap();

    assert_eq!(page.toggle, before.toggle);
    assert_eq!(page.progress, before.progress);
    assert_eq!(Some(page.meter.clone()), meter_for("1%"));
}

#[test]
fn option_reachable_on_fresh_page() {
    let mut page = PageSnapshot::default();
    assert_eq!(page.dropdown.overlay.pointer_events(), "auto");

    page.click_dropdown(DropdownTrigger::Option1);
    assert_eq!(page.dropdown.heading, "Text 1");
    assert_eq!(page.dropdown.overlay, OverlayInteractivity::Enabled);
}
