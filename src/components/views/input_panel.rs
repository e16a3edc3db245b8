/// Render the draft and the convert control.
///
/// The control is shown disabled while converting or when the draft is blank.
pub fn render_input_panel(draft: &str, converting: bool) -> String {
    let mut out = String::new();
    out.push_str(&t!("input_label"));
    out.push('\n');

    if draft.is_empty() {
        out.push_str(&format!("> {}\n", t!("input_placeholder")));
    } else {
        for line in draft.lines() {
            out.push_str(&format!("> {}\n", line));
        }
    }

    let label = if converting {
        t!("converting_button")
    } else {
        t!("convert_button")
    };
    out.push_str(&format!("[ {} (:convert) ]", label));
    if convert_disabled(draft, converting) {
        out.push_str(&format!(" ({})", t!("control_disabled")));
    }
    out
}

/// Whether the convert control is disabled
pub fn convert_disabled(draft: &str, converting: bool) -> bool {
    converting || draft.trim().is_empty()
}
