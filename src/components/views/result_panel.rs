use super::highlight::highlight_json;
use crate::components::backend::EventRecord;

/// Render the parsed record with its export controls, or nothing without a record
pub fn render_result_panel(
    record: Option<&EventRecord>,
    calendar_link: Option<&str>,
    highlight: bool,
) -> Option<String> {
    let record = record?;

    let value = record.to_value();
    let body = if highlight {
        highlight_json(&value)
    } else {
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
    };

    let mut out = String::new();
    out.push_str(&t!("result_heading"));
    out.push('\n');
    out.push_str(&body);
    out.push('\n');
    out.push_str(&format!(
        "[ {} (:ics) ]  [ {} (:link) ]",
        t!("download_button"),
        t!("calendar_button")
    ));

    if let Some(link) = calendar_link.filter(|link| !link.is_empty()) {
        out.push('\n');
        out.push_str(&t!("calendar_link_label", link = link));
    }

    Some(out)
}
