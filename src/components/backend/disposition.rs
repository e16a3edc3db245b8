/// Filename used when the backend does not suggest one
pub const DEFAULT_ICS_FILENAME: &str = "event.ics";

const FILENAME_MARKER: &str = "filename=\"";

/// Extract the quoted `filename="..."` parameter of a `content-disposition` header.
///
/// Matches greedily up to the last double quote on the line, so
/// `attachment; filename="a.ics"; x="y"` yields `a.ics"; x="y`. The name must
/// be at least one character long.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let start = header.find(FILENAME_MARKER)? + FILENAME_MARKER.len();
    let rest = &header[start..];
    let rest = rest.split(['\r', '\n']).next().unwrap_or(rest);
    let end = rest.rfind('"')?;
    if end == 0 {
        return None;
    }
    Some(rest[..end].to_string())
}

/// Resolve the download filename from an optional header value
pub fn resolve_filename(header: Option<&str>) -> String {
    header
        .and_then(filename_from_disposition)
        .unwrap_or_else(|| DEFAULT_ICS_FILENAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_disposition() {
        assert_eq!(
            filename_from_disposition("attachment; filename=\"lunch.ics\""),
            Some("lunch.ics".to_string())
        );
        assert_eq!(
            filename_from_disposition("inline;filename=\"Team Lunch.ics\""),
            Some("Team Lunch.ics".to_string())
        );

        // Greedy up to the last quote
        assert_eq!(
            filename_from_disposition("attachment; filename=\"a.ics\"; size=\"10\""),
            Some("a.ics\"; size=\"10".to_string())
        );
    }

    #[test]
    fn test_unparseable_disposition() {
        assert_eq!(filename_from_disposition("attachment"), None);
        assert_eq!(filename_from_disposition("attachment; filename=lunch.ics"), None);
        assert_eq!(filename_from_disposition("attachment; filename=\"\""), None);
        assert_eq!(filename_from_disposition("attachment; filename=\"lunch.ics"), None);
    }

    #[test]
    fn test_resolve_filename_fallback() {
        assert_eq!(resolve_filename(None), DEFAULT_ICS_FILENAME);
        assert_eq!(resolve_filename(Some("attachment")), DEFAULT_ICS_FILENAME);
        assert_eq!(
            resolve_filename(Some("attachment; filename=\"lunch.ics\"")),
            "lunch.ics"
        );
    }
}
