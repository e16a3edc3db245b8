mod error_panel;
mod highlight;
mod input_panel;
mod result_panel;

pub use error_panel::render_error_panel;
pub use highlight::highlight_json;
pub use input_panel::{convert_disabled, render_input_panel};
pub use result_panel::render_result_panel;

use crate::components::session::SessionState;

/// Render the whole screen for a state snapshot
pub fn render_page(state: &SessionState, highlight: bool) -> String {
    let mut sections = vec![
        format!("{}\n{}", t!("app_title"), t!("app_tagline")),
        render_input_panel(&state.draft, state.converting),
    ];
    sections.extend(render_error_panel(state.error.as_deref()));
    sections.extend(render_result_panel(
        state.record.as_ref(),
        state.calendar_link.as_deref(),
        highlight,
    ));
    sections.join("\n\n")
}
