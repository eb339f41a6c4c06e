//! Context assembly: from a task and a file selection to a generated plan.
//!
//! One run is a single pass:
//!
//! 1. ask the model for keywords and overlooked files
//! 2. seed candidates from the selection and the validated suggestions
//! 3. search every keyword concurrently and wait for all of them
//! 4. collapse duplicates, then read every candidate concurrently
//! 5. ask the model for the plan and finalize it
//!
//! Model failures end the run. Search and read failures are logged, counted
//! in the [`AssemblyReport`], and otherwise ignored.

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use taskweaver_config::AppConfig;
use taskweaver_core::error::{Error, IndexError, Result};
use taskweaver_core::file::{FileReference, normalize_path};
use taskweaver_core::index::FileIndex;
use taskweaver_core::plan::PlanResult;
use tracing::{debug, info, warn};

use crate::candidates::CandidateSet;
use crate::client::PlanClient;

type SearchResult = std::result::Result<Vec<PathBuf>, IndexError>;
type ReadResult = std::result::Result<String, IndexError>;

/// Tuning knobs for a run.
#[derive(Debug, Clone)]
pub struct PlannerOptions {
    /// Directories skipped by keyword search.
    pub exclude_dirs: Vec<String>,
    /// Collapse repeated keywords before searching.
    pub dedupe_keywords: bool,
    /// Drop suggested files that are not in the project listing.
    pub validate_missing_files: bool,
    pub max_concurrent_searches: usize,
    pub max_concurrent_reads: usize,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl PlannerOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            exclude_dirs: config.search.exclude_dirs.clone(),
            dedupe_keywords: config.planner.dedupe_keywords,
            validate_missing_files: config.planner.validate_missing_files,
            max_concurrent_searches: config.search.max_concurrent,
            max_concurrent_reads: config.planner.max_concurrent_reads,
        }
    }
}

/// What went into a plan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssemblyReport {
    /// Keywords actually searched, in model order.
    pub keywords: Vec<String>,
    pub failed_searches: usize,
    /// Selected files rejected because they resolve outside the root.
    pub dropped_selected_files: Vec<String>,
    /// Suggested files rejected because the project does not contain them.
    pub dropped_missing_files: Vec<String>,
    /// Distinct candidate files after deduplication.
    pub candidates: usize,
    pub loaded_files: usize,
    /// Candidates that could not be read.
    pub skipped_files: usize,
}

/// The outcome of one run.
#[derive(Debug, Clone, Serialize)]
pub struct PlanningRun {
    pub plan: PlanResult,
    pub report: AssemblyReport,
}

/// Drives one run from task to plan.
pub struct TaskPlanner {
    client: PlanClient,
    index: Arc<dyn FileIndex>,
    options: PlannerOptions,
}

impl TaskPlanner {
    pub fn new(client: PlanClient, index: Arc<dyn FileIndex>, options: PlannerOptions) -> Self {
        Self {
            client,
            index,
            options,
        }
    }

    pub fn index(&self) -> &Arc<dyn FileIndex> {
        &self.index
    }

    pub fn client(&self) -> &PlanClient {
        &self.client
    }

    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }

    /// Run the whole pipeline once.
    ///
    /// `all_files` is the project listing relative to `root`. When it is
    /// empty the returned plan always has `show_missing_information` set.
    pub async fn run(
        &self,
        root: &Path,
        task: &str,
        selected_files: &[String],
        all_files: &[String],
    ) -> Result<PlanningRun> {
        if !root.is_dir() {
            return Err(Error::config(format!(
                "project root {} is not a directory",
                root.display()
            )));
        }
        let no_project_files = all_files.is_empty();
        let mut report = AssemblyReport::default();

        info!(
            root = %root.display(),
            selected = selected_files.len(),
            project_files = all_files.len(),
            "Planning run started"
        );

        let selected = self.accept_selected_files(root, selected_files, &mut report);
        let suggestion = self
            .client
            .generate_keywords(task, &selected, all_files)
            .await?;

        let missing =
            self.accept_missing_files(root, suggestion.missing_files, all_files, &mut report);
        let keywords = self.prepare_keywords(suggestion.keywords);

        let mut candidates = CandidateSet::seed(root, &selected, &missing);
        let hits = self.search_all(root, &keywords, &mut report).await;
        candidates.extend_hits(hits);
        report.keywords = keywords;

        let candidates = candidates.dedup();
        report.candidates = candidates.len();

        let contents = self.load_all(&candidates, &mut report).await;
        report.loaded_files = contents.len();

        info!(
            keywords = report.keywords.len(),
            candidates = report.candidates,
            loaded = report.loaded_files,
            skipped = report.skipped_files,
            "Context assembled"
        );

        let mut plan = self
            .client
            .generate_plan(task, &contents, all_files)
            .await?;
        if no_project_files {
            plan.show_missing_information = true;
        }

        info!(steps = plan.steps.len(), "Plan generated");
        Ok(PlanningRun { plan, report })
    }

    /// Keep only selected files that stay inside the project root.
    fn accept_selected_files(
        &self,
        root: &Path,
        selected: &[String],
        report: &mut AssemblyReport,
    ) -> Vec<String> {
        let root = normalize_path(root);
        let mut accepted = Vec::with_capacity(selected.len());
        for path in selected {
            if FileReference::resolve(&root, path).absolute.starts_with(&root) {
                accepted.push(path.clone());
            } else {
                warn!(file = %path, "Selected file is outside the project; ignoring");
                report.dropped_selected_files.push(path.clone());
            }
        }
        accepted
    }

    /// Keep only suggested files the project actually has.
    fn accept_missing_files(
        &self,
        root: &Path,
        suggested: Vec<String>,
        all_files: &[String],
        report: &mut AssemblyReport,
    ) -> Vec<String> {
        if !self.options.validate_missing_files {
            return suggested;
        }
        let known: HashSet<&str> = all_files.iter().map(String::as_str).collect();
        let mut accepted = Vec::with_capacity(suggested.len());
        for path in suggested {
            let relative = FileReference::resolve(root, &path).relative;
            if known.contains(relative.as_str()) {
                accepted.push(path);
            } else {
                warn!(file = %path, "Model suggested a file outside the project; ignoring");
                report.dropped_missing_files.push(path);
            }
        }
        accepted
    }

    /// Trim, drop blanks, and optionally collapse repeats (first one wins).
    fn prepare_keywords(&self, keywords: Vec<String>) -> Vec<String> {
        let mut seen = BTreeSet::new();
        keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .filter(|k| !self.options.dedupe_keywords || seen.insert(k.clone()))
            .collect()
    }

    /// Search every keyword and return the hits once all searches finished.
    async fn search_all(
        &self,
        root: &Path,
        keywords: &[String],
        report: &mut AssemblyReport,
    ) -> Vec<PathBuf> {
        // Each search owns its inputs so the run future stays `Send`.
        let searches: Vec<BoxFuture<'static, (String, SearchResult)>> = keywords
            .iter()
            .map(|keyword| {
                let index = Arc::clone(&self.index);
                let root = root.to_path_buf();
                let exclude_dirs = self.options.exclude_dirs.clone();
                let keyword = keyword.clone();
                async move {
                    let result = index.search_keyword(&root, &keyword, &exclude_dirs).await;
                    (keyword, result)
                }
                .boxed()
            })
            .collect();
        let results: Vec<(String, SearchResult)> = stream::iter(searches)
            .buffer_unordered(self.options.max_concurrent_searches.max(1))
            .collect()
            .await;

        let mut hits = Vec::new();
        for (keyword, result) in results {
            match result {
                Ok(found) => {
                    debug!(keyword = %keyword, hits = found.len(), "Keyword searched");
                    hits.extend(found);
                }
                Err(e) => {
                    warn!(keyword = %keyword, error = %e, "Keyword search failed; continuing");
                    report.failed_searches += 1;
                }
            }
        }
        hits
    }

    /// Read every candidate. Unreadable files are left out.
    async fn load_all(
        &self,
        candidates: &CandidateSet,
        report: &mut AssemblyReport,
    ) -> BTreeMap<String, String> {
        let reads: Vec<BoxFuture<'static, (FileReference, ReadResult)>> = candidates
            .files()
            .map(|file| {
                let index = Arc::clone(&self.index);
                let file = file.clone();
                async move {
                    let result = index.read_content(&file.absolute).await;
                    (file, result)
                }
                .boxed()
            })
            .collect();
        let results: Vec<(FileReference, ReadResult)> = stream::iter(reads)
            .buffer_unordered(self.options.max_concurrent_reads.max(1))
            .collect()
            .await;

        let mut contents = BTreeMap::new();
        for (file, result) in results {
            match result {
                Ok(text) => {
                    contents.insert(file.relative, text);
                }
                Err(e) => {
                    warn!(file = %file, error = %e, "Skipping unreadable file");
                    report.skipped_files += 1;
                }
            }
        }
        contents
    }
}
