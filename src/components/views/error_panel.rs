/// Render the error message, or nothing when there is none
pub fn render_error_panel(error: Option<&str>) -> Option<String> {
    let message = error.filter(|message| !message.is_empty())?;
    Some(t!("error_panel", message = message).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_panel() {
        assert_eq!(render_error_panel(None), None);
        assert_eq!(render_error_panel(Some("")), None);
        assert_eq!(
            render_error_panel(Some("could not parse date")),
            Some("Error: could not parse date".to_string())
        );
    }
}
