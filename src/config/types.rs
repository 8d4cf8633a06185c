use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub policy: Policy,
}

/// Where state and session files live.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Snapshot file. Defaults to `<data_dir>/unihelp/state.json`.
    #[serde(default)]
    pub state_path: Option<PathBuf>,
    /// Login session file. Defaults to `<config_dir>/unihelp/session.toml`.
    #[serde(default)]
    pub session_path: Option<PathBuf>,
}

/// Which checks the state container performs itself instead of trusting
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Only a question's author may pick the best answer, resolve it, or
    /// rate the helper; resolving needs a best answer and rating needs a
    /// resolved question.
    #[serde(default = "default_true")]
    pub enforce_ownership: bool,
    /// A best answer must be one of the question's own answers.
    #[serde(default = "default_true")]
    pub validate_answer_refs: bool,
}

fn default_true() -> bool {
    true
}

impl Policy {
    /// Trust the caller entirely, matching the unchecked behavior of the
    /// original client.
    pub fn permissive() -> Self {
        Self {
            enforce_ownership: false,
            validate_answer_refs: false,
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            enforce_ownership: true,
            validate_answer_refs: true,
        }
    }
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join("unihelp")
}

impl StorageConfig {
    pub fn resolved_state_path(&self) -> PathBuf {
        self.state_path
            .clone()
            .unwrap_or_else(|| app_dir(dirs::data_dir()).join("state.json"))
    }

    pub fn resolved_session_path(&self) -> PathBuf {
        self.session_path
            .clone()
            .unwrap_or_else(|| app_dir(dirs::config_dir()).join("session.toml"))
    }
}
