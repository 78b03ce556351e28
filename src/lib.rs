//! Trading Bot Dashboard - Main Library
//!
//! Re-exports the workspace libraries and the helpers shared by the
//! binaries.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (config paths, CLI args)
//! - **dashboard**: Session, projectors and terminal UI (re-exported from workspace)
//! - **hypersockets**: WebSocket client library (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust,ignore
//! use bot_dashboard::bin_common::{load_config_from_env, ConfigType};
//! use bot_dashboard::dashboard::application::visualizer::App;
//! ```

// Re-export workspace libraries for convenience
pub use dashboard;
pub use hypersockets;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;

    pub use cli::{load_config_from_env, parse_args, ConfigType};
}
