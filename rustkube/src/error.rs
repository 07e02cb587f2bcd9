use std::io;

/// Failure to get an answer out of the external cluster client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0} is not installed")]
    NotFound(String),

    #[error("failed to run {program}: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("`{command}` failed: {detail}")]
    Failed { command: String, detail: String },

    #[error("`{command}` printed nothing")]
    EmptyOutput { command: String },
}
