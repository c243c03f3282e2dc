//! Controls without handlers of their own. The browser keeps their state.

use shared::{ids, page};
use zoon::*;

pub fn main_table() -> impl Element {
    RawHtmlEl::new("table")
        .attr("id", ids::MAIN_TABLE)
        .style("border-collapse", "collapse")
        .child(table_row("th", page::TABLE_HEADER))
        .children(page::TABLE_ROWS.map(|cells| table_row("td", cells)))
}

fn table_row(cell_tag: &'static str, cells: [&'static str; 3]) -> impl Element {
    RawHtmlEl::new("tr").children(cells.map(|cell| {
        RawHtmlEl::new(cell_tag)
            .style("border", "1px solid #999999")
            .style("padding", "4px 10px")
            .child(cell)
    }))
}

pub fn text_fields() -> impl Element {
    Column::new()
        .s(Gap::new().y(8))
        .item(labeled(
            "Single line",
            ids::SINGLE_LINE_TEXTBOX,
            RawHtmlEl::new("input")
                .attr("id", ids::SINGLE_LINE_TEXTBOX)
                .attr("type", "text"),
        ))
        .item(labeled(
            "Multi line",
            ids::MULTI_LINE_TEXTBOX,
            RawHtmlEl::new("textarea")
                .attr("id", ids::MULTI_LINE_TEXTBOX)
                .attr("rows", "3"),
        ))
        .item(labeled(
            "Placeholder",
            ids::PLACEHOLDER_TEXTBOX,
            RawHtmlEl::new("input")
                .attr("id", ids::PLACEHOLDER_TEXTBOX)
                .attr("type", "text")
                .attr("placeholder", page::PLACEHOLDER_TEXT),
        ))
        .item(labeled(
            "Prefilled",
            ids::PREFILLED_TEXTBOX,
            RawHtmlEl::new("input")
                .attr("id", ids::PREFILLED_TEXTBOX)
                .attr("type", "text")
                .attr("value", page::PREFILLED_TEXT),
        ))
}

fn labeled(caption: &'static str, for_id: &'static str, control: impl Element) -> impl Element {
    Row::new()
        .s(Gap::new().x(10))
        .item(
            RawHtmlEl::new("label")
                .attr("for", for_id)
                .style("min-width", "100px")
                .child(caption),
        )
        .item(control)
}

pub fn choices() -> impl Element {
    let radios = [ids::RADIO_BUTTON_1, ids::RADIO_BUTTON_2]
        .into_iter()
        .enumerate()
        .map(|(index, id)| choice("radio", id, format!("Radio {}", index + 1), false));
    let checkboxes = ids::CHECKBOXES
        .into_iter()
        .enumerate()
        .map(|(index, id)| {
            choice(
                "checkbox",
                id,
                format!("Checkbox {index}"),
                index == page::PRECHECKED_CHECKBOX,
            )
        });
    Column::new()
        .s(Gap::new().y(8))
        .item(Row::new().s(Gap::new().x(16)).items(radios))
        .item(Row::new().s(Gap::new().x(16)).items(checkboxes))
}

fn choice(input_type: &'static str, id: &'static str, caption: String, checked: bool) -> impl Element {
    let mut input = RawHtmlEl::new("input")
        .attr("id", id)
        .attr("type", input_type);
    if input_type == "radio" {
        input = input.attr("name", ids::RADIO_GROUP);
    }
    if checked {
        input = input.attr("checked", "");
    }
    Row::new()
        .s(Gap::new().x(4))
        .item(input)
        .item(RawHtmlEl::new("label").attr("for", id).child(caption))
}
