#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The controller was activated; kicks off the verification read.
    Started,
    /// Result of reading the verification flag. Failed reads arrive as `None`.
    VerificationLoaded(Option<String>),
    /// User chose "Next" on the account notice.
    ProceedClicked,
    /// User chose "Sign Up" on the account notice.
    SignUpClicked,
    /// Result of reading the saved promotion text. Failed reads arrive as `None`.
    SavedPromptLoaded(Option<String>),
    /// User edited the "what to promote" field.
    PromotionEdited(String),
    /// User edited the "where to promote" field.
    TargetingEdited(String),
    /// User chose "Generate Link".
    SubmitClicked,
    /// Inference service answered, or failed.
    LinkResponse(Result<String, ServiceFailure>),
    /// User chose "Generate a New Link" on the result screen.
    RegenerateClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Failure reported by the inference collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceFailure {
    pub message: Option<String>,
}

impl ServiceFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn without_message() -> Self {
        Self::default()
    }
}
