use crate::commands::{dispatch, parse_line, Flow};
use crate::components::session::{SessionController, SessionState};
use crate::components::views::render_page;
use crate::components::{DesktopPlatform, HttpBackend};
use crate::config::Config;
use crate::error::{ClientResult, Error};
use crate::shutdown;
use std::io::BufRead;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,text2ics=info")),
        )
        // Panels go to stdout
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the client config once for the whole session
pub fn load_config() -> miette::Result<Arc<Config>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(config)),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Wire the backend, the platform and the controller, then run the terminal session
pub async fn start_client(config: Arc<Config>) -> miette::Result<()> {
    info!("Using backend {}", config.backend_url);

    let backend = Arc::new(HttpBackend::new(&config));
    let platform = Arc::new(DesktopPlatform::new(&config));
    let controller = SessionController::new(Arc::clone(&config), backend, platform);

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();
    tokio::spawn(shutdown::handle_signals(shutdown_send));

    run_session(controller, spawn_stdin_reader(), shutdown_recv).await?;
    Ok(())
}

/// Read stdin on a dedicated thread so a pending read never holds up shutdown
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (line_tx, line_rx) = mpsc::channel(64);
    std::thread::spawn(move || forward_lines(std::io::stdin().lock(), line_tx));
    line_rx
}

/// Send every line of `reader` to `line_tx` until the input ends or the receiver is gone.
///
/// Invalid UTF-8 is replaced rather than ending the input. Blocks the calling thread.
pub fn forward_lines<R: BufRead>(mut reader: R, line_tx: mpsc::Sender<String>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\r', '\n']).to_string();
                if line_tx.blocking_send(line).is_err() {
                    break;
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        }
    }
}

/// Process input lines until the input ends, `:quit` is entered or a shutdown arrives.
///
/// Flows started before the input ends are awaited; a shutdown signal aborts them.
pub async fn run_session(
    controller: SessionController,
    mut lines: mpsc::Receiver<String>,
    mut shutdown_recv: oneshot::Receiver<()>,
) -> ClientResult<()> {
    let highlight = controller.config().highlight;
    let mut updates = controller.subscribe();
    let mut tasks = JoinSet::new();

    let mut shown = controller.snapshot();
    println!("{}\n", render_page(&shown, highlight));
    println!("{}", t!("help"));

    let interrupted = loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    break false;
                };
                match dispatch(&controller, parse_line(&line), &mut tasks) {
                    Flow::Continue => {}
                    Flow::Redraw => {
                        shown = controller.snapshot();
                        println!("{}\n", render_page(&shown, highlight));
                    }
                    Flow::Quit => break false,
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break false;
                }
                let next = updates.borrow_and_update().clone();
                redraw_if_needed(&mut shown, next, highlight);
            }
            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            _ = &mut shutdown_recv => {
                info!("Received shutdown signal, ending session");
                break true;
            }
        }
    };

    if interrupted {
        tasks.abort_all();
    } else {
        // Let flows started from piped input finish
        while tasks.join_next().await.is_some() {}
        redraw_if_needed(&mut shown, controller.snapshot(), highlight);
    }

    println!("{}", t!("goodbye"));
    Ok(())
}

/// Print the page when anything besides the draft changed
fn redraw_if_needed(shown: &mut SessionState, next: SessionState, highlight: bool) {
    if needs_redraw(shown, &next) {
        println!("{}\n", render_page(&next, highlight));
    }
    *shown = next;
}

fn needs_redraw(shown: &SessionState, next: &SessionState) -> bool {
    shown.converting != next.converting
        || shown.error != next.error
        || shown.record != next.record
        || shown.calendar_link != next.calendar_link
}
