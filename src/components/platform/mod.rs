mod desktop;

pub use desktop::DesktopPlatform;

use crate::error::ClientResult;
use std::path::PathBuf;

/// Side effects the client needs from its host environment
pub trait Platform: Send + Sync {
    /// Hand a downloaded payload to the user under `filename`; returns where it ended up
    fn present_binary_download(&self, bytes: &[u8], filename: &str) -> ClientResult<PathBuf>;

    /// Show `url` to the user in a browser
    fn open_external_link(&self, url: &str) -> ClientResult<()>;

    /// Interrupt the user with a message
    fn alert(&self, message: &str);
}
