use crate::components::session::SessionController;
use tokio::task::JoinSet;
use tracing::debug;

/// A line of user input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text to append to the draft
    Text(String),
    Convert,
    DownloadIcs,
    CalendarLink,
    Show,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

/// What the session loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Redraw,
    Quit,
}

/// Interpret one line of input.
///
/// Lines starting with `:` are commands; `::` escapes a literal leading colon.
pub fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(escaped) = line.strip_prefix("::") {
        return Command::Text(format!(":{}", escaped));
    }

    let Some(command) = line.strip_prefix(':') else {
        return Command::Text(line.to_string());
    };

    match command.trim().to_ascii_lowercase().as_str() {
        "convert" | "c" => Command::Convert,
        "ics" | "i" | "download" => Command::DownloadIcs,
        "link" | "g" | "calendar" => Command::CalendarLink,
        "show" | "s" => Command::Show,
        "clear" => Command::Clear,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Run a command against the session; flows are spawned onto `tasks`
pub fn dispatch(controller: &SessionController, command: Command, tasks: &mut JoinSet<()>) -> Flow {
    match command {
        Command::Text(line) => {
            if !controller.append_line(&line) {
                println!("{}", t!("draft_locked"));
            }
            Flow::Continue
        }
        Command::Convert => {
            let state = controller.snapshot();
            if !state.can_convert() {
                if !state.converting {
                    println!("{}", t!("convert_unavailable"));
                }
                debug!("Convert control is disabled");
                return Flow::Continue;
            }
            let controller = controller.clone();
            tasks.spawn(async move {
                controller.convert().await;
            });
            Flow::Continue
        }
        Command::DownloadIcs => {
            if controller.snapshot().record.is_none() {
                println!("{}", t!("no_record"));
                return Flow::Continue;
            }
            let controller = controller.clone();
            tasks.spawn(async move {
                controller.download_ics().await;
            });
            Flow::Continue
        }
        Command::CalendarLink => {
            if controller.snapshot().record.is_none() {
                println!("{}", t!("no_record"));
                return Flow::Continue;
            }
            let controller = controller.clone();
            tasks.spawn(async move {
                controller.open_calendar_link().await;
            });
            Flow::Continue
        }
        Command::Show => Flow::Redraw,
        Command::Clear => {
            if controller.set_draft("") {
                Flow::Redraw
            } else {
                println!("{}", t!("draft_locked"));
                Flow::Continue
            }
        }
        Command::Help => {
            println!("{}", t!("help"));
            Flow::Continue
        }
        Command::Quit => Flow::Quit,
        Command::Unknown(command) => {
            println!("{}", t!("unknown_command", command = format!(":{}", command)));
            Flow::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line(":convert"), Command::Convert);
        assert_eq!(parse_line(":c"), Command::Convert);
        assert_eq!(parse_line(":ICS"), Command::DownloadIcs);
        assert_eq!(parse_line(":download"), Command::DownloadIcs);
        assert_eq!(parse_line(":link"), Command::CalendarLink);
        assert_eq!(parse_line(":g"), Command::CalendarLink);
        assert_eq!(parse_line(":show"), Command::Show);
        assert_eq!(parse_line(":clear"), Command::Clear);
        assert_eq!(parse_line(":?"), Command::Help);
        assert_eq!(parse_line(":q"), Command::Quit);
        assert_eq!(parse_line(":quit\r\n"), Command::Quit);
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(
            parse_line("Team lunch Friday at noon"),
            Command::Text("Team lunch Friday at noon".to_string())
        );
        assert_eq!(parse_line(""), Command::Text(String::new()));
        assert_eq!(
            parse_line("::00 is when doors open"),
            Command::Text(":00 is when doors open".to_string())
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse_line(":frobnicate"), Command::Unknown("frobnicate".to_string()));
    }
}
