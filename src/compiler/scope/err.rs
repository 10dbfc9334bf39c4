use super::Tag;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    #[error("null scope")]
    NullScope,
    #[error("scope mismatch, expected {expected}, encountered {encountered}")]
    ScopeMismatch { expected: Tag, encountered: Tag },
}
