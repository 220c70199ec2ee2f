pub type BookResult<T> = Result<T, BookError>;

/// Load-time failures.
///
/// Render-time problems (missing media, malformed optional nodes, text/offset mismatches) are
/// never surfaced through this type; they are logged and the affected element is skipped.
#[derive(thiserror::Error, Debug)]
pub enum BookError {
    #[error("syntax error: {0}")]
    Syntax(String),

    /// A structurally required node is absent or empty.
    #[error("missing field: {0}")]
    MissingField(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BookError {
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::Syntax(msg.into())
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
