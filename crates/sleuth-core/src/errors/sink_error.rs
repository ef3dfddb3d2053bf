/// Snapshot sink failures. Logged, never fatal.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("snapshot serialization failed: {message}")]
    Serialization { message: String },

    #[error("snapshot write failed: {message}")]
    Io { message: String },
}
