use super::state::SessionState;
use crate::components::backend::EventBackend;
use crate::components::platform::Platform;
use crate::config::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// What a conversion trigger ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertOutcome {
    /// The control was disabled; no request was sent
    Skipped,
    Converted,
    Failed(String),
}

/// What an export trigger ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// There was no record to export
    Skipped,
    Saved(PathBuf),
    /// The link was opened; `cached` is true when no request was needed
    Opened { link: String, cached: bool },
    /// The user was alerted with this message
    Alerted(String),
}

/// Owns the session state and runs the conversion and export flows
#[derive(Clone)]
pub struct SessionController {
    config: Arc<Config>,
    backend: Arc<dyn EventBackend>,
    platform: Arc<dyn Platform>,
    state: Arc<watch::Sender<SessionState>>,
}

impl SessionController {
    pub fn new(
        config: Arc<Config>,
        backend: Arc<dyn EventBackend>,
        platform: Arc<dyn Platform>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            config,
            backend,
            platform,
            state: Arc::new(state),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn can_convert(&self) -> bool {
        self.state.borrow().can_convert()
    }

    /// Replace the draft; returns false while a conversion is in flight
    pub fn set_draft(&self, draft: &str) -> bool {
        self.state.send_if_modified(|state| state.set_draft(draft))
    }

    /// Append a line to the draft; returns false while a conversion is in flight
    pub fn append_line(&self, line: &str) -> bool {
        self.state.send_if_modified(|state| state.append_line(line))
    }

    /// Submit the draft for conversion
    pub async fn convert(&self) -> ConvertOutcome {
        let mut started = None;
        self.state.send_if_modified(|state| {
            started = state.begin_conversion();
            started.is_some()
        });

        let Some((draft, generation)) = started else {
            debug!("Convert ignored: draft is empty or a conversion is running");
            return ConvertOutcome::Skipped;
        };

        info!("Converting event text ({} chars)", draft.len());
        let event_details = self.config.draft_encoding.encode(&draft);
        let result = self.backend.convert(&event_details).await;

        match result {
            Ok(record) => {
                info!("Conversion succeeded with {} fields", record.fields().len());
                self.state
                    .send_modify(|state| state.finish_conversion(generation, Ok(record)));
                ConvertOutcome::Converted
            }
            Err(e) => {
                error!("Conversion failed: {:?}", e);
                let message = e.user_message(&t!("convert_fallback"));
                self.state.send_modify(|state| {
                    state.finish_conversion(generation, Err(message.clone()))
                });
                ConvertOutcome::Failed(message)
            }
        }
    }

    /// Generate the calendar file for the current record and hand it to the platform
    pub async fn download_ics(&self) -> ExportOutcome {
        let snapshot = self.state.borrow().export_snapshot();
        let Some(snapshot) = snapshot else {
            debug!("Download ignored: no event record");
            return ExportOutcome::Skipped;
        };

        info!("Generating .ics file");
        let saved = match self.backend.generate_ics(&snapshot.record).await {
            Ok(download) => self
                .platform
                .present_binary_download(&download.bytes, &download.filename),
            Err(e) => Err(e),
        };

        match saved {
            Ok(path) => ExportOutcome::Saved(path),
            Err(e) => {
                warn!("Calendar file export failed: {:?}", e);
                let message = e.message_or(&t!("ics_fallback"));
                self.platform.alert(&message);
                ExportOutcome::Alerted(message)
            }
        }
    }

    /// Open the calendar link for the current record, generating it on first use
    pub async fn open_calendar_link(&self) -> ExportOutcome {
        let snapshot = self.state.borrow().export_snapshot();
        let Some(snapshot) = snapshot else {
            debug!("Calendar link ignored: no event record");
            return ExportOutcome::Skipped;
        };

        if let Some(link) = snapshot.calendar_link {
            debug!("Reusing cached calendar link");
            return self.open_link(link, true);
        }

        info!("Requesting calendar link");
        match self.backend.calendar_link(&snapshot.record).await {
            Ok(link) => {
                let cached = self
                    .state
                    .send_if_modified(|state| state.cache_link(snapshot.generation, &link));
                if !cached {
                    debug!("Record changed while the link was generated; not caching it");
                }
                self.open_link(link, false)
            }
            Err(e) => {
                warn!("Calendar link export failed: {:?}", e);
                let message = e.message_or(&t!("calendar_fallback"));
                self.platform.alert(&message);
                ExportOutcome::Alerted(message)
            }
        }
    }

    fn open_link(&self, link: String, cached: bool) -> ExportOutcome {
        match self.platform.open_external_link(&link) {
            Ok(()) => ExportOutcome::Opened { link, cached },
            Err(e) => {
                warn!("Failed to open calendar link: {:?}", e);
                let message = e.message_or(&t!("calendar_fallback"));
                self.platform.alert(&message);
                ExportOutcome::Alerted(message)
            }
        }
    }
}
