//! Host protocol: messages exchanged with the editor surface.
//!
//! Each message is one JSON object tagged by `type`, e.g.
//! `{"type":"submitTask","task":"...","selectedFiles":["src/a.ts"]}`.

use serde::{Deserialize, Serialize};

use crate::file::WorkspaceFile;
use crate::plan::PlanResult;

/// Messages the host sends in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostRequest {
    /// Generate a plan for `task`, seeded with the user's selection.
    #[serde(rename_all = "camelCase")]
    SubmitTask {
        task: String,
        #[serde(default)]
        selected_files: Vec<String>,
    },

    /// Ask for the current project file listing.
    RequestFiles,
}

/// Messages sent back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostResponse {
    FileList { files: Vec<WorkspaceFile> },

    Plan { plan: PlanResult },

    /// The run failed; the host should return to its pre-submission state.
    ResetTask,

    /// A user-visible failure notice.
    Error { message: String },
}
