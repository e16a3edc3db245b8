mod controller;
pub mod state;

pub use controller::{ConvertOutcome, ExportOutcome, SessionController};
pub use state::{ExportSnapshot, SessionState, UiStatus};
