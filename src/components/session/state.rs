use crate::components::backend::EventRecord;

/// Coarse view of where the session is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiStatus {
    Idle,
    Converting,
    ReadyWithResult,
    ReadyWithError,
}

/// Everything the panels render, owned by the session controller
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub draft: String,
    pub converting: bool,
    pub record: Option<EventRecord>,
    pub error: Option<String>,
    pub calendar_link: Option<String>,
    /// Bumped whenever a conversion starts; tags which record a link belongs to
    pub generation: u64,
}

/// Snapshot handed to an export flow
#[derive(Debug, Clone)]
pub struct ExportSnapshot {
    pub record: EventRecord,
    pub calendar_link: Option<String>,
    pub generation: u64,
}

impl SessionState {
    pub fn status(&self) -> UiStatus {
        if self.converting {
            UiStatus::Converting
        } else if self.error.is_some() {
            UiStatus::ReadyWithError
        } else if self.record.is_some() {
            UiStatus::ReadyWithResult
        } else {
            UiStatus::Idle
        }
    }

    /// The convert control is enabled only for a non-blank draft and no request in flight
    pub fn can_convert(&self) -> bool {
        !self.converting && !self.draft.trim().is_empty()
    }

    /// Replace the draft; refused while converting
    pub fn set_draft(&mut self, draft: &str) -> bool {
        if self.converting {
            return false;
        }
        self.draft = draft.to_string();
        true
    }

    /// Append a line to the draft; refused while converting
    pub fn append_line(&mut self, line: &str) -> bool {
        if self.converting {
            return false;
        }
        if !self.draft.is_empty() {
            self.draft.push('\n');
        }
        self.draft.push_str(line);
        true
    }

    /// Enter `Converting`, clearing the previous outcome.
    ///
    /// Returns the draft to submit and the new generation, or `None` when
    /// the convert control is disabled.
    pub fn begin_conversion(&mut self) -> Option<(String, u64)> {
        if !self.can_convert() {
            return None;
        }
        self.converting = true;
        self.error = None;
        self.record = None;
        self.calendar_link = None;
        self.generation += 1;
        Some((self.draft.clone(), self.generation))
    }

    /// Leave `Converting` with either a record or an error message
    pub fn finish_conversion(&mut self, generation: u64, outcome: Result<EventRecord, String>) {
        if generation != self.generation {
            return;
        }
        self.converting = false;
        match outcome {
            Ok(record) => {
                self.record = Some(record);
                self.error = None;
            }
            Err(message) => {
                self.record = None;
                self.error = Some(message);
            }
        }
    }

    /// Current record plus what an export flow needs to know about it
    pub fn export_snapshot(&self) -> Option<ExportSnapshot> {
        self.record.as_ref().map(|record| ExportSnapshot {
            record: record.clone(),
            calendar_link: self.calendar_link.clone(),
            generation: self.generation,
        })
    }

    /// Cache a link, but only for the record it was generated from
    pub fn cache_link(&mut self, generation: u64, link: &str) -> bool {
        if generation != self.generation || self.record.is_none() {
            return false;
        }
        self.calendar_link = Some(link.to_string());
        true
    }
}
