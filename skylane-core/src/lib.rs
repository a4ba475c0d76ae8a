pub mod flight;
pub mod booking;
pub mod user;
pub mod repository;
pub mod identity;
pub mod pii;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Username already exists: {0}")]
    UsernameTaken(String),
    #[error("Flight {0} does not exist")]
    UnknownFlight(i64),
    #[error("Credential processing failed: {0}")]
    CredentialError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
