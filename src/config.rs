use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::categories::KeywordTable;
use crate::error::Result;

/// Path of the JSON data file.
pub const DATA_FILE_ENV_VAR: &str = "MEAL_PLANNER_DATA";
/// Optional JSON keyword table replacing the built-in one.
pub const KEYWORDS_FILE_ENV_VAR: &str = "MEAL_PLANNER_KEYWORDS";
pub const DEFAULT_DATA_FILE: &str = "data.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub keywords_file: Option<PathBuf>,
}

impl AppConfig {
    /// Resolves settings from explicit values first, then the environment
    /// (including a `.env` file), then defaults.
    pub fn resolve(data_file: Option<PathBuf>, keywords_file: Option<PathBuf>) -> Self {
        dotenv::dotenv().ok();
        Self::resolve_with(data_file, keywords_file, |key| env::var(key).ok())
    }

    fn resolve_with(
        data_file: Option<PathBuf>,
        keywords_file: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let from_env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        Self {
            data_file: data_file
                .or_else(|| from_env(DATA_FILE_ENV_VAR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
            keywords_file: keywords_file.or_else(|| from_env(KEYWORDS_FILE_ENV_VAR)),
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn keyword_table(&self) -> Result<KeywordTable> {
        match &self.keywords_file {
            Some(path) => {
                info!(path = %path.display(), "loading custom keyword table");
                KeywordTable::from_json_file(path)
            }
            None => Ok(KeywordTable::default()),
        }
    }
}
