use crate::error::{config_error, env_error, ClientResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use url::Url;

/// Backend used outside production
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Optional settings file, relative to the working directory
pub const SETTINGS_FILE: &str = "config/client.toml";

/// How the draft is encoded right before it is submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftEncoding {
    /// Send the text exactly as typed
    #[default]
    Raw,
    /// Escape newlines and double quotes once before submitting
    Escaped,
}

impl DraftEncoding {
    /// Encode the draft for submission
    pub fn encode<'a>(&self, draft: &'a str) -> Cow<'a, str> {
        match self {
            DraftEncoding::Raw => Cow::Borrowed(draft),
            DraftEncoding::Escaped => Cow::Owned(
                draft
                    .replace("\r\n", "\n")
                    .replace('\n', "\\n")
                    .replace('"', "\\\""),
            ),
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "raw" => Some(DraftEncoding::Raw),
            "escaped" => Some(DraftEncoding::Escaped),
            _ => None,
        }
    }
}

/// Settings that may come from `config/client.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileSettings {
    pub production: Option<bool>,
    pub backend_url: Option<String>,
    pub download_dir: Option<PathBuf>,
    pub open_links: Option<bool>,
    pub highlight: Option<bool>,
    pub draft_encoding: Option<DraftEncoding>,
}

/// Client configuration, resolved once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Whether the production backend is used
    pub production: bool,
    /// Base URL every endpoint path is appended to
    pub backend_url: String,
    /// Directory downloaded calendar files are saved into
    pub download_dir: PathBuf,
    /// Open calendar links in the system browser
    pub open_links: bool,
    /// Colorize the parsed event
    pub highlight: bool,
    /// Encoding applied to the draft on submit
    pub draft_encoding: DraftEncoding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            production: false,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            download_dir: PathBuf::from("."),
            open_links: true,
            highlight: true,
            draft_encoding: DraftEncoding::Raw,
        }
    }
}

impl Config {
    /// Load configuration from the settings file, `.env` and the environment
    pub fn load() -> ClientResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let settings = Self::load_settings(Path::new(SETTINGS_FILE))?;
        Self::resolve(settings, |key| env::var(key).ok())
    }

    /// Read the optional settings file
    pub fn load_settings(path: &Path) -> ClientResult<FileSettings> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileSettings::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Merge defaults, file settings and variables from `lookup`, in that order
    pub fn resolve<F>(settings: FileSettings, lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let production = match lookup("PRODUCTION") {
            Some(value) => parse_bool(&value).ok_or_else(|| env_error("PRODUCTION"))?,
            None => settings.production.unwrap_or(defaults.production),
        };

        let configured_url = lookup("BACKEND_URL")
            .or(settings.backend_url)
            .filter(|url| !url.trim().is_empty());
        let backend_url = resolve_backend_url(production, configured_url.as_deref())?;

        let download_dir = lookup("DOWNLOAD_DIR")
            .map(PathBuf::from)
            .or(settings.download_dir)
            .unwrap_or(defaults.download_dir);

        let open_links = match lookup("OPEN_LINKS") {
            Some(value) => parse_bool(&value).ok_or_else(|| env_error("OPEN_LINKS"))?,
            None => settings.open_links.unwrap_or(defaults.open_links),
        };

        let highlight = match lookup("HIGHLIGHT") {
            Some(value) => parse_bool(&value).ok_or_else(|| env_error("HIGHLIGHT"))?,
            None => settings.highlight.unwrap_or(defaults.highlight),
        };

        let draft_encoding = match lookup("DRAFT_ENCODING") {
            Some(value) => {
                DraftEncoding::parse(&value).ok_or_else(|| env_error("DRAFT_ENCODING"))?
            }
            None => settings.draft_encoding.unwrap_or(defaults.draft_encoding),
        };

        Ok(Config {
            production,
            backend_url,
            download_dir,
            open_links,
            highlight,
            draft_encoding,
        })
    }
}

/// Pick the backend base URL: the configured one in production, the local default otherwise
pub fn resolve_backend_url(production: bool, configured: Option<&str>) -> ClientResult<String> {
    let chosen = match (production, configured) {
        (true, Some(url)) => url.trim(),
        (true, None) => {
            warn!(
                "PRODUCTION is set but BACKEND_URL is missing, using {}",
                DEFAULT_BACKEND_URL
            );
            DEFAULT_BACKEND_URL
        }
        (false, _) => DEFAULT_BACKEND_URL,
    };

    let parsed = Url::parse(chosen)
        .map_err(|e| config_error(&format!("Invalid backend URL '{}': {}", chosen, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(config_error(&format!(
            "Backend URL must use http or https: {}",
            chosen
        )));
    }

    Ok(chosen.trim_end_matches('/').to_string())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
