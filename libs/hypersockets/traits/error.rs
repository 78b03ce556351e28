use thiserror::Error;

/// Main error type for hypersockets
#[derive(Error, Debug)]
pub enum HyperSocketError {
    /// WebSocket transport error (handshake, read or write failure)
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Connection closed by the remote end
    #[error("Connection closed: {0}")]
    ConnectionClosed(String),

    /// Message parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Channel send error
    #[error("Channel send error: {0}")]
    ChannelSend(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic error
    #[error("Error: {0}")]
    Other(String),
}

/// Result type for hypersockets operations
pub type Result<T> = std::result::Result<T, HyperSocketError>;
