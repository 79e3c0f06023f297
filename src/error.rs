use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Category '{0}' is defined more than once in the keyword table")]
    DuplicateCategory(String),

    #[error("Category name '{0}' is reserved for unmatched ingredients")]
    ReservedCategory(String),

    #[error("Unknown day '{0}' (expected Monday..Sunday)")]
    InvalidDay(String),

    #[error("Unknown meal slot '{0}' (expected Breakfast, Lunch or Dinner)")]
    InvalidSlot(String),

    #[error("Recipe '{0}' not found")]
    RecipeNotFound(String),

    #[error("Recipe '{0}' already exists")]
    RecipeExists(String),

    #[error("{0} must not be blank")]
    BlankName(&'static str),

    #[error("Index {index} is out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl PlannerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlannerError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = PlannerError> = std::result::Result<T, E>;
