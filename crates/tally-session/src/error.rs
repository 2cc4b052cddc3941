use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to generate session token: {0}")]
    TokenGeneration(String),
}
