mod disposition;
mod http;
pub mod models;

pub use disposition::{filename_from_disposition, resolve_filename, DEFAULT_ICS_FILENAME};
pub use http::HttpBackend;
pub use models::{CalendarLinkResponse, ConvertRequest, EventRecord, IcsDownload};

use crate::error::ClientResult;
use async_trait::async_trait;

/// Path of the text-to-event conversion endpoint
pub const CONVERT_PATH: &str = "/convert/json";
/// Path of the calendar-file endpoint
pub const ICS_PATH: &str = "/convert/isc";
/// Path of the calendar-link endpoint
pub const CALENDAR_LINK_PATH: &str = "/convert/google_calendar";

/// Remote service that does the actual event work
#[async_trait]
pub trait EventBackend: Send + Sync {
    /// Turn free-form announcement text into a structured record
    async fn convert(&self, event_details: &str) -> ClientResult<EventRecord>;

    /// Generate a calendar file for a record
    async fn generate_ics(&self, record: &EventRecord) -> ClientResult<IcsDownload>;

    /// Generate a calendar link for a record
    async fn calendar_link(&self, record: &EventRecord) -> ClientResult<String>;
}
