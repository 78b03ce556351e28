//! Dashboard terminal UI
//!
//! Renders the session's retained view model with ratatui. The feed client
//! runs on the tokio runtime; everything here runs on the UI thread.

pub mod app;
pub mod state;
pub mod ui;

pub use app::App;
pub use state::TuiDisplay;
