//! Preview & download controller and its display state

pub mod messages;
pub mod preview;
pub mod state;

pub use messages::{Message, Outcome};
pub use preview::PreviewController;
pub use state::{PreviewDisplay, StatusKind, StatusLine, UiPhase, ViewModel};
