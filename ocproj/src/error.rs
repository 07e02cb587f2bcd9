/// User-facing failures of the switcher itself.
///
/// Client failures travel separately as [`rustkube::ClientError`].
#[derive(Debug, thiserror::Error)]
pub enum SwitchError {
    #[error("no project exists with name \"{0}\"")]
    UnknownProject(String),

    #[error("no previous project found for current context")]
    NoPreviousProject,

    #[error("unrecognized flag \"{0}\"")]
    UnrecognizedFlag(String),

    #[error("too many flags")]
    TooManyArguments,

    #[error("you did not choose any of the options")]
    PickerAborted,

    #[error("could not list projects (is the cluster accessible?)")]
    PickerUnavailable,
}

impl SwitchError {
    pub fn wants_usage(&self) -> bool {
        matches!(
            self,
            SwitchError::UnrecognizedFlag(_) | SwitchError::TooManyArguments
        )
    }
}
