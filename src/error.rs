//! Application error type.
//!
//! Every fallible operation that can abort a run returns [`AppError`], which carries
//! the process exit status alongside a human-readable message:
//!
//! - `1`: a required input is missing or unreadable
//! - `2`: a malformed option or invalid setting
//! - `3`: the model registry is inconsistent
//! - `4`: writing outputs failed
//!
//! Numerical failures inside a single optimization stage never surface here; the
//! objective absorbs them as infinitely bad candidates.

use crate::diffusion::EngineError;
use crate::models::ModelError;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Unknown(_) => AppError::new(2, err.to_string()),
            ModelError::Engine(inner) => inner.into(),
            ModelError::Arity { .. } | ModelError::Inconsistent { .. } => AppError::new(3, err.to_string()),
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError::new(2, format!("Diffusion evaluation failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_keep_their_message_and_status() {
        let unknown = AppError::from(ModelError::Unknown("XYZ".to_string()));
        assert_eq!(unknown.exit_code(), 2);
        assert!(unknown.message().starts_with("Unknown model 'XYZ'."));

        let arity = AppError::from(ModelError::Arity {
            model: "SI",
            expected: 3,
            got: 2,
        });
        assert_eq!(arity.exit_code(), 3);
        assert_eq!(arity.message(), "SI expects 3 parameters, got 2");
        assert_eq!(arity.to_string(), arity.message());
    }

    #[test]
    fn engine_failures_are_option_errors() {
        let err = AppError::from(ModelError::Engine(EngineError::Singular));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.message(), "Diffusion evaluation failed: singular implicit step");
    }
}
