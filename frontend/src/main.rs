use shared::progress::{SLIDER_INITIAL, SLIDER_MAX, SLIDER_MIN};
use shared::toggle::ToggleDisplay;
use shared::{
    DropdownState, DropdownTrigger, MeterIndicator, PageDiagnostic, PageSnapshot, Percentage,
    ProgressIndicator, SliderValue, ToggleColor, click_toggle, ids, page, progress_for,
};
use zoon::{eprintln, println, *};

mod automation;
mod form;

fn main() {
    start_app("app", TestingPage::new);
}

#[derive(Clone)]
struct TestingPage {
    toggle: Mutable<ToggleColor>,
    /// Mirrors the slider; the range input itself is left uncontrolled.
    progress: Mutable<ProgressIndicator>,
    selected: Mutable<String>,
    meter: Mutable<MeterIndicator>,
    dropdown: Mutable<DropdownState>,
    dropdown_hovered: Mutable<bool>,
}

impl TestingPage {
    fn new() -> impl Element {
        let initial = PageSnapshot::default();
        let page = Self {
            toggle: Mutable::new(initial.toggle),
            progress: Mutable::new(initial.progress),
            selected: Mutable::new(initial.selected),
            meter: Mutable::new(initial.meter),
            dropdown: Mutable::new(initial.dropdown),
            dropdown_hovered: Mutable::new(false),
        };
        automation::install(page.clone());
        page.root()
    }

    fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            toggle: self.toggle.get(),
            progress: self.progress.get_cloned(),
            selected: self.selected.get_cloned(),
            meter: self.meter.get_cloned(),
            dropdown: self.dropdown.get_cloned(),
        }
    }

    // -- handlers --

    fn on_toggle_click(&self) {
        self.toggle.update(|color| click_toggle(color).0);
    }

    fn on_slider_input(&self, raw: &str) {
        match raw.parse::<SliderValue>() {
            Ok(value) => self.progress.set(progress_for(value)),
            Err(error) => eprintln!("{}", PageDiagnostic::SliderRejected(error.to_string())),
        }
    }

    fn on_select_change(&self, raw: String) {
        match raw.parse::<Percentage>() {
            Ok(percentage) => self.meter.set(percentage.meter()),
            Err(error) => println!("{}", PageDiagnostic::SelectUnmatched(error.to_string())),
        }
        self.selected.set(raw);
    }

    fn on_dropdown_click(&self, trigger: DropdownTrigger) {
        self.dropdown.lock_mut().select(trigger);
    }

    // -- view --

    fn root(&self) -> impl Element + use<> {
        Column::new()
            .s(Width::fill().max(720))
            .s(Align::new().center_x())
            .s(Padding::all(20))
            .s(Gap::new().y(18))
            .s(Font::new().size(16).color(color!("#1b1b1b")))
            .item(self.header())
            .item(self.dropdown_section())
            .item(form::main_table())
            .item(form::text_fields())
            .item(self.toggle_section())
            .item(form::choices())
            .item(self.slider_section())
            .item(self.select_section())
    }

    fn header(&self) -> impl Element + use<> {
        Column::new()
            .s(Gap::new().y(6))
            .item(
                RawHtmlEl::new("h1")
                    .attr("id", ids::HEADER)
                    .child(page::HEADER_TEXT),
            )
            .item(
                RawHtmlEl::new("h3")
                    .attr("id", ids::HEADING)
                    .child_signal(self.dropdown.signal_ref(|dropdown| dropdown.heading.clone())),
            )
    }

    fn dropdown_section(&self) -> impl Element + use<> {
        El::new()
            .update_raw_el(|raw_el| raw_el.attr("id", ids::DROPDOWN))
            .on_hovered_change({
                let hovered = self.dropdown_hovered.clone();
                move |is_hovered| hovered.set_neq(is_hovered)
            })
            .child(
                Column::new()
                    .item(self.dropdown_button(DropdownTrigger::OpenMenu))
                    .item(self.dropdown_overlay()),
            )
    }

    fn dropdown_overlay(&self) -> impl Element + use<> {
        Column::new()
            .s(Background::new().color(color!("#f4f4f4")))
            .s(Shadows::new([
                Shadow::new()
                    .color(color!("rgba(0, 0, 0, 0.2)"))
                    .y(8)
                    .blur(16),
            ]))
            .update_raw_el({
                let hovered = self.dropdown_hovered.clone();
                let dropdown = self.dropdown.clone();
                move |raw_el| {
                    raw_el
                        .attr("id", ids::DROPDOWN_OVERLAY)
                        .class("dropdown-content")
                        .style_signal("display", hovered.signal().map_bool(|| "flex", || "none"))
                        .style_signal(
                            "pointer-events",
                            dropdown.signal_ref(|dropdown| dropdown.overlay.pointer_events()),
                        )
                }
            })
            .items(DropdownTrigger::OPTIONS.map(|trigger| self.dropdown_button(trigger)))
    }

    fn dropdown_button(&self, trigger: DropdownTrigger) -> impl Element + use<> {
        let hovered = Mutable::new(false);
        Button::new()
            .s(Padding::new().x(14).y(8))
            .s(Background::new().color_signal(
                hovered
                    .signal()
                    .map_bool(|| color!("#dcdcdc"), || color!("#f4f4f4")),
            ))
            .label(trigger.caption())
            .update_raw_el(move |raw_el| raw_el.attr("id", trigger.element_id()))
            .on_hovered_change(move |is_hovered| hovered.set_neq(is_hovered))
            .on_press({
                let this = self.clone();
                move || this.on_dropdown_click(trigger)
            })
    }

    fn toggle_display_signal<T: 'static>(
        &self,
        field: fn(ToggleDisplay) -> T,
    ) -> impl Signal<Item = T> + Unpin + use<T> {
        self.toggle.signal().map(move |color| field(color.display()))
    }

    fn toggle_section(&self) -> impl Element + use<> {
        Column::new()
            .s(Gap::new().y(8))
            .item(
                Button::new()
                    .s(Padding::new().x(14).y(8))
                    .s(RoundedCorners::all(4))
                    .s(Borders::all(Border::new().color(color!("#999999")).width(1)))
                    .label(page::TOGGLE_BUTTON_CAPTION)
                    .update_raw_el({
                        let color = self.toggle_display_signal(|display| display.button_color);
                        move |raw_el| {
                            raw_el
                                .attr("id", ids::TOGGLE_BUTTON)
                                .style_signal("color", color)
                        }
                    })
                    .on_press({
                        let this = self.clone();
                        move || this.on_toggle_click()
                    }),
            )
            .item(
                RawHtmlEl::new("p")
                    .attr("id", ids::TOGGLE_LABEL)
                    .style_signal("color", self.toggle_display_signal(|display| display.label_color))
                    .child_signal(self.toggle_display_signal(|display| display.label_text)),
            )
            .item(
                RawHtmlEl::new("input")
                    .attr("id", ids::READ_ONLY_FIELD)
                    .attr("type", "text")
                    .attr("readonly", "")
                    .style_signal("color", self.toggle_display_signal(|display| display.field_color))
                    .prop_signal("value", self.toggle_display_signal(|display| display.field_value)),
            )
    }

    fn slider_section(&self) -> impl Element + use<> {
        Column::new()
            .s(Gap::new().y(8))
            .item(
                RawHtmlEl::new("input")
                    .attr("id", ids::SLIDER)
                    .attr("type", "range")
                    .attr("min", &SLIDER_MIN.to_string())
                    .attr("max", &SLIDER_MAX.to_string())
                    .attr("value", &SLIDER_INITIAL.to_string())
                    .event_handler({
                        let this = self.clone();
                        move |event: events::Input| {
                            if let Some(input) = event.dyn_target::<web_sys::HtmlInputElement>() {
                                this.on_slider_input(&input.value());
                            }
                        }
                    }),
            )
            .item(
                RawHtmlEl::new("progress")
                    .attr("id", ids::PROGRESS_BAR)
                    .attr("max", &SLIDER_MAX.to_string())
                    .prop_signal(
                        "value",
                        self.progress.signal_ref(|progress| progress.value.to_string()),
                    ),
            )
            .item(
                RawHtmlEl::new("label")
                    .attr("id", ids::PROGRESS_LABEL)
                    .attr("for", ids::PROGRESS_BAR)
                    .child_signal(self.progress.signal_ref(|progress| progress.label.clone())),
            )
    }

    fn select_section(&self) -> impl Element + use<> {
        Column::new()
            .s(Gap::new().y(8))
            .item(
                RawHtmlEl::new("select")
                    .attr("id", ids::SELECT)
                    .children(Percentage::ALL.map(|percentage| {
                        RawHtmlEl::new("option")
                            .attr("value", percentage.option_value())
                            .child(percentage.option_value())
                    }))
                    .event_handler({
                        let this = self.clone();
                        move |event: events::Change| {
                            if let Some(select) = event.dyn_target::<web_sys::HtmlSelectElement>() {
                                this.on_select_change(select.value());
                            }
                        }
                    }),
            )
            .item(
                RawHtmlEl::new("meter")
                    .attr("id", ids::METER_BAR)
                    .attr("min", "0")
                    .attr("max", "1")
                    .prop_signal("value", self.meter.signal_ref(MeterIndicator::dom_value)),
            )
            .item(
                RawHtmlEl::new("label")
                    .attr("id", ids::METER_LABEL)
                    .attr("for", ids::METER_BAR)
                    .child_signal(self.meter.signal_ref(|meter| meter.label.clone())),
            )
    }
}
