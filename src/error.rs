use thiserror::Error;

/// Everything that can go wrong while building or evaluating a network.
///
/// Shape problems (`ShapeMismatch`, `InvalidLabel`) are caught at the top of
/// `Network::loss`; configuration problems are caught in `Network::new`.
#[derive(Debug, Error)]
pub enum FcnetError {
    #[error("shape mismatch in {context}: expected {expected}, found {found}")]
    ShapeMismatch {
        context: &'static str,
        expected: String,
        found: String,
    },

    #[error("label {label} at index {index} is out of range for {num_classes} classes")]
    InvalidLabel {
        index: usize,
        label: usize,
        num_classes: usize,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("numeric instability: {0}")]
    NumericInstability(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FcnetError {
    pub(crate) fn shape(
        context: &'static str,
        expected: impl ToString,
        found: impl ToString,
    ) -> Self {
        FcnetError::ShapeMismatch {
            context,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FcnetError>;
