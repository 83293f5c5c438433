use thiserror::Error;

/// Failure raised by the coefficient domain. It is never recovered inside
/// the basis computation; the whole computation fails with it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GroebnerError {
    #[error("arithmetic simplification failed in `{operation}`: {reason}")]
    ArithmeticSimplificationFailure {
        operation: &'static str,
        reason: String,
    },
}

impl GroebnerError {
    pub fn arithmetic(operation: &'static str, reason: impl Into<String>) -> Self {
        GroebnerError::ArithmeticSimplificationFailure {
            operation,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GroebnerError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown term order `{0}`, expected one of lex, deglex, revlex, degrevlex")]
pub struct ParseTermOrderError(pub String);
