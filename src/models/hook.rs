use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HookModel {
    #[serde(default)]
    pub id: Option<String>,
    pub display_name: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HookWorkspace {
    pub current_dir: String,
    #[serde(default)]
    pub project_dir: Option<String>,
}

/// Payload Claude Code pipes into the statusline command
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HookJson {
    #[serde(default)]
    pub session_id: Option<String>,
    pub transcript_path: String,
    #[serde(default)]
    pub cwd: Option<String>,
    pub model: HookModel,
    pub workspace: HookWorkspace,
    #[serde(default)]
    pub version: Option<String>,
}

/// Dotted paths that must be present and hold strings in the payload, in report order.
pub const REQUIRED_KEYS: [(&str, &str); 3] = [
    ("model.display_name", "/model/display_name"),
    ("workspace.current_dir", "/workspace/current_dir"),
    ("transcript_path", "/transcript_path"),
];
