use super::Platform;
use crate::components::backend::DEFAULT_ICS_FILENAME;
use crate::config::Config;
use crate::error::{platform_error, ClientResult};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;
use tracing::{info, warn};

/// Platform backed by the local filesystem, the system browser and the terminal
#[derive(Debug, Clone)]
pub struct DesktopPlatform {
    download_dir: PathBuf,
    open_links: bool,
}

impl DesktopPlatform {
    pub fn new(config: &Config) -> Self {
        Self {
            download_dir: config.download_dir.clone(),
            open_links: config.open_links,
        }
    }

    pub fn with_download_dir(download_dir: impl Into<PathBuf>, open_links: bool) -> Self {
        Self {
            download_dir: download_dir.into(),
            open_links,
        }
    }
}

impl Platform for DesktopPlatform {
    fn present_binary_download(&self, bytes: &[u8], filename: &str) -> ClientResult<PathBuf> {
        fs::create_dir_all(&self.download_dir)?;

        // Staged next to the target; removed on drop unless persisted
        let mut staged = Builder::new()
            .prefix(".text2ics-")
            .suffix(".part")
            .tempfile_in(&self.download_dir)?;
        staged.write_all(bytes)?;
        staged.flush()?;

        let target = unique_target(&self.download_dir, &sanitize_filename(filename));
        match staged.persist_noclobber(&target) {
            Ok(_) => {}
            // FAT and some network mounts have no hard links; `unique_target` already found a free name
            Err(e) if can_retry_with_rename(&e.error, &target) => {
                warn!(
                    "No-clobber save failed ({}), renaming into {}",
                    e.error,
                    target.display()
                );
                e.file.persist(&target).map_err(|e| e.error)?;
            }
            Err(e) => return Err(e.error.into()),
        }

        info!("Saved {} bytes to {}", bytes.len(), target.display());
        println!("{}", t!("download_saved", path = target.display().to_string()));
        Ok(target)
    }

    fn open_external_link(&self, url: &str) -> ClientResult<()> {
        if self.open_links {
            webbrowser::open(url)
                .map_err(|e| platform_error(&format!("Failed to open browser: {}", e)))?;
        }
        info!("Opened calendar link");
        println!("{}", t!("link_opened", link = url));
        Ok(())
    }

    fn alert(&self, message: &str) {
        warn!("Alert: {}", message);
        eprintln!("\n{}\n", t!("alert", message = message));
    }
}

/// Keep only a plain file name, never a path
pub fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| if c == '\\' || c.is_control() { '_' } else { c })
        .collect();

    Path::new(&cleaned)
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty() && name != "." && name != "..")
        .unwrap_or_else(|| DEFAULT_ICS_FILENAME.to_string())
}

/// Whether a failed no-clobber save may fall back to a plain rename
fn can_retry_with_rename(error: &io::Error, target: &Path) -> bool {
    error.kind() != io::ErrorKind::AlreadyExists && !target.exists()
}

/// First free path for `filename` in `dir`: `name.ics`, `name (1).ics`, `name (2).ics`, ...
fn unique_target(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    let extension = path.extension().and_then(|e| e.to_str());

    (1..)
        .map(|n| match extension {
            Some(ext) => dir.join(format!("{} ({}).{}", stem, n, ext)),
            None => dir.join(format!("{} ({})", stem, n)),
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or(candidate)
}
