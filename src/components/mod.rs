// Export components
pub mod backend;
pub mod platform;
pub mod session;
pub mod views;

// Re-export the pieces the front end wires together
pub use backend::{EventBackend, HttpBackend};
pub use platform::{DesktopPlatform, Platform};
pub use session::SessionController;
