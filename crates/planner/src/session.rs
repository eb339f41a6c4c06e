//! A planning session bound to one project root.

use std::path::{Path, PathBuf};
use taskweaver_core::error::Result;
use taskweaver_core::file::WorkspaceFile;
use taskweaver_core::host::{HostRequest, HostResponse};
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::orchestrator::{PlanningRun, TaskPlanner};

/// Message sent to the host when a run fails.
pub const PLAN_FAILED_MESSAGE: &str = "Failed to generate plan";

/// Owns a planner and a root, and runs one submission at a time.
pub struct PlanSession {
    planner: TaskPlanner,
    root: PathBuf,
    gate: Mutex<()>,
}

impl PlanSession {
    pub fn new(planner: TaskPlanner, root: PathBuf) -> Self {
        Self {
            planner,
            root,
            gate: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn planner(&self) -> &TaskPlanner {
        &self.planner
    }

    /// Files offered to the user for selection.
    pub async fn files(&self) -> Vec<WorkspaceFile> {
        self.planner.index().workspace_files(&self.root).await
    }

    /// List the project and run the planner. Overlapping calls queue.
    pub async fn submit(&self, task: &str, selected_files: &[String]) -> Result<PlanningRun> {
        let _running = self.gate.lock().await;
        let all_files = self.planner.index().list_all_files(&self.root).await;
        self.planner
            .run(&self.root, task, selected_files, &all_files)
            .await
    }

    /// Answer one host message.
    pub async fn handle(&self, request: HostRequest) -> Vec<HostResponse> {
        match request {
            HostRequest::RequestFiles => vec![HostResponse::FileList {
                files: self.files().await,
            }],
            HostRequest::SubmitTask {
                task,
                selected_files,
            } => match self.submit(&task, &selected_files).await {
                Ok(run) => {
                    info!(steps = run.plan.steps.len(), "Plan delivered to host");
                    vec![HostResponse::Plan { plan: run.plan }]
                }
                Err(e) => {
                    error!(error = %e, "{PLAN_FAILED_MESSAGE}");
                    vec![
                        HostResponse::Error {
                            message: PLAN_FAILED_MESSAGE.to_string(),
                        },
                        HostResponse::ResetTask,
                    ]
                }
            },
        }
    }
}
