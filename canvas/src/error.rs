//! Errors raised when the host hands the editor a name it does not recognise.

/// Rejected user input at the command boundary. Never fatal: the editor stays
/// interactive and the offending command has no effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("unknown shape type: {0}")]
    UnknownShapeType(String),
    #[error("unknown mode: {0}")]
    UnknownMode(String),
}
