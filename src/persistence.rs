use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::error::{PlannerError, Result};
use crate::planner::PlannerState;

const JSON_INDENT: &[u8] = b"    ";

/// Loads the planner state. Never fails: a missing file gives an empty state,
/// and an unreadable or corrupt file is logged and replaced by an empty state.
pub async fn load_state(path: &Path) -> PlannerState {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no data file yet; starting with an empty planner");
            return PlannerState::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read data file; starting fresh");
            return PlannerState::default();
        }
    };

    match parse_state(&content) {
        Ok(state) => {
            info!(
                path = %path.display(),
                recipes = state.recipes.len(),
                meals = state.meal_plan.planned_count(),
                "data loaded"
            );
            state
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "data file corrupted; starting fresh");
            PlannerState::default()
        }
    }
}

pub fn parse_state(content: &str) -> Result<PlannerState> {
    Ok(serde_json::from_str(content)?)
}

/// Renders the state as a JSON document indented by four spaces.
pub fn render_state(state: &PlannerState) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    state.serialize(&mut serializer)?;
    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes the state next to `path` and renames it into place, so a crash
/// mid-write never leaves a truncated data file behind.
pub async fn save_state(path: &Path, state: &PlannerState) -> Result<()> {
    let json = render_state(state)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| PlannerError::io(parent, e))?;
    }

    let tmp_path = temp_sibling(path);
    fs::write(&tmp_path, json)
        .await
        .map_err(|e| PlannerError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path)
        .await
        .map_err(|e| PlannerError::io(path, e))?;

    info!(path = %path.display(), "data saved");
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("data.json"));
    name.push(".tmp");
    path.with_file_name(name)
}
