use super::disposition::resolve_filename;
use super::models::{CalendarLinkResponse, ConvertRequest, EventRecord, IcsDownload};
use super::{EventBackend, CALENDAR_LINK_PATH, CONVERT_PATH, ICS_PATH};
use crate::config::Config;
use crate::error::{contract_error, ClientResult, Error};
use async_trait::async_trait;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    /// Create a backend for the configured base URL
    pub fn new(config: &Config) -> Self {
        Self::with_client(&config.backend_url, Client::new())
    }

    /// Create a backend with an existing client
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        let url_str = format!("{}{}", self.base_url, path);
        Url::parse(&url_str)
            .map_err(|e| Error::Config(format!("Failed to build URL {}: {}", url_str, e)))
    }

    /// POST a JSON body and turn non-success statuses into errors
    async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> ClientResult<Response> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let detail = detail_from_body(&error_body);
            debug!("{} answered HTTP {}: {}", path, status, error_body);
            return Err(Error::Status {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl EventBackend for HttpBackend {
    async fn convert(&self, event_details: &str) -> ClientResult<EventRecord> {
        let payload = ConvertRequest {
            event_details: event_details.to_string(),
        };
        debug!("Payload being sent: {:?}", payload);

        let response = self.post_json(CONVERT_PATH, &payload).await?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| contract_error(&format!("Failed to parse conversion response: {}", e)))?;

        EventRecord::from_value(body)
            .ok_or_else(|| contract_error("Conversion response is not a JSON object"))
    }

    async fn generate_ics(&self, record: &EventRecord) -> ClientResult<IcsDownload> {
        let response = self.post_json(ICS_PATH, record).await?;

        let disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .map(|value| header_text(value.as_bytes()));
        let filename = resolve_filename(disposition.as_deref());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(IcsDownload {
            bytes: bytes.to_vec(),
            filename,
        })
    }

    async fn calendar_link(&self, record: &EventRecord) -> ClientResult<String> {
        let response = self.post_json(CALENDAR_LINK_PATH, record).await?;
        let body: CalendarLinkResponse = response
            .json()
            .await
            .map_err(|e| contract_error(&format!("Failed to parse calendar link response: {}", e)))?;

        body.google_calendar_link
            .filter(|link| !link.is_empty())
            .ok_or_else(|| contract_error(&t!("calendar_link_missing")))
    }
}

/// Decode a header value as UTF-8, or as latin-1 when it is not valid UTF-8
fn header_text(bytes: &[u8]) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => text,
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Pull the `detail` field out of an error body, if it has one
fn detail_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(detail) if detail.is_empty() => None,
        Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_from_body() {
        assert_eq!(
            detail_from_body(r#"{"detail":"could not parse date"}"#),
            Some("could not parse date".to_string())
        );
        assert_eq!(
            detail_from_body(r#"{"detail":[{"msg":"field required"}]}"#),
            Some(r#"[{"msg":"field required"}]"#.to_string())
        );
        assert_eq!(detail_from_body(r#"{"detail":""}"#), None);
        assert_eq!(detail_from_body(r#"{"detail":null}"#), None);
        assert_eq!(detail_from_body(r#"{"error":"boom"}"#), None);
        assert_eq!(detail_from_body("Internal Server Error"), None);
    }

    #[test]
    fn test_header_text_decodes_non_ascii() {
        assert_eq!(
            header_text(b"attachment; filename=\"lunch.ics\""),
            "attachment; filename=\"lunch.ics\""
        );
        // UTF-8 first, latin-1 otherwise
        assert_eq!(
            header_text("attachment; filename=\"Café.ics\"".as_bytes()),
            "attachment; filename=\"Café.ics\""
        );
        assert_eq!(
            header_text(b"attachment; filename=\"Caf\xe9.ics\""),
            "attachment; filename=\"Café.ics\""
        );
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let backend = HttpBackend::with_client("http://127.0.0.1:8000/", Client::new());
        assert_eq!(backend.base_url(), "http://127.0.0.1:8000");
        assert_eq!(
            backend.endpoint(CONVERT_PATH).unwrap().as_str(),
            "http://127.0.0.1:8000/convert/json"
        );

        let backend = HttpBackend::with_client("https://example.com/api", Client::new());
        assert_eq!(
            backend.endpoint(ICS_PATH).unwrap().as_str(),
            "https://example.com/api/convert/isc"
        );
    }
}
