use owo_colors::OwoColorize;
use serde_json::Value;

const INDENT: &str = "  ";

/// Pretty-print JSON like `serde_json::to_string_pretty`, with ANSI colors
pub fn highlight_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str(&"null".magenta().to_string()),
        Value::Bool(b) => out.push_str(&b.magenta().to_string()),
        Value::Number(n) => out.push_str(&n.yellow().to_string()),
        Value::String(s) => out.push_str(&quoted(s).green().to_string()),
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(out, depth + 1);
                write_value(out, item, depth + 1);
            }
            newline(out, depth);
            out.push(']');
        }
        Value::Object(fields) => {
            if fields.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            for (i, (key, item)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(out, depth + 1);
                out.push_str(&quoted(key).blue().to_string());
                out.push_str(": ");
                write_value(out, item, depth + 1);
            }
            newline(out, depth);
            out.push('}');
        }
    }
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    out.push_str(&INDENT.repeat(depth));
}

/// JSON string literal with escapes
fn quoted(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_layout_matches_pretty_printer() {
        let value = json!({
            "summary": "Team \"Lunch\"",
            "start": "2024-05-10T12:00:00",
            "all_day": false,
            "attendees": ["ana@example.com", "li@example.com"],
            "reminders": [],
            "organizer": {"name": "Ana", "email": null},
            "extra": {},
            "priority": 2.5
        });

        let highlighted = highlight_json(&value);
        assert_ne!(highlighted, serde_json::to_string_pretty(&value).unwrap());
        assert_eq!(
            strip_ansi(&highlighted),
            serde_json::to_string_pretty(&value).unwrap()
        );
    }

    #[test]
    fn test_scalars() {
        assert_eq!(strip_ansi(&highlight_json(&json!(null))), "null");
        assert_eq!(strip_ansi(&highlight_json(&json!("a\nb"))), "\"a\\nb\"");
        assert_eq!(strip_ansi(&highlight_json(&json!([]))), "[]");
    }
}
