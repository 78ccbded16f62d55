use thiserror::Error;

pub type BulletGraphResult<T> = Result<T, BulletGraphError>;

#[derive(Debug, Error)]
pub enum BulletGraphError {
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unbalanced style groups: {open} group(s) still open")]
    UnbalancedGroups { open: usize },

    #[error("surface error: {0}")]
    Surface(String),

    #[error("document error: {0}")]
    Document(String),
}
