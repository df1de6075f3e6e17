use thiserror::Error;

/// Failures raised by the registration collaborators and steps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("person {0} not found")]
    PersonNotFound(u64),
    #[error("registration rejected for {email}: {reason}")]
    Rejected { email: String, reason: String },
    #[error("authentication failed for {0}")]
    AuthenticationFailed(String),
    #[error("publishing failed: {0}")]
    PublishFailed(String),
    #[error("person {0} has no {1} yet")]
    MissingField(u64, &'static str),
}

crate::impl_error_info!(RegistrationError);
