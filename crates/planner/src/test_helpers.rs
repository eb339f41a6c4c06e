//! Shared test helpers for planner tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use taskweaver_core::error::{IndexError, ProviderError};
use taskweaver_core::index::FileIndex;
use taskweaver_core::message::Message;
use taskweaver_core::provider::{Provider, ProviderRequest, ProviderResponse};

pub fn make_text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: None,
        model: "mock-model".into(),
    }
}

/// A mock provider that returns scripted replies in order.
///
/// Each call to `complete` pops the next reply and records the request.
/// Panics if more calls are made than replies provided.
pub struct ScriptedProvider {
    replies: Mutex<Vec<Result<ProviderResponse, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<ProviderResponse, ProviderError>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Keyword reply followed by plan reply.
    pub fn keywords_then_plan(keywords_json: &str, plan_json: &str) -> Self {
        Self::new(vec![
            Ok(make_text_response(keywords_json)),
            Ok(make_text_response(plan_json)),
        ])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Prompt text of the `n`th request.
    pub fn prompt(&self, n: usize) -> String {
        self.requests.lock().unwrap()[n].messages[0].content.clone()
    }

    pub fn request(&self, n: usize) -> ProviderRequest {
        self.requests.lock().unwrap()[n].clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let mut replies = self.replies.lock().unwrap();
        assert!(
            !replies.is_empty(),
            "ScriptedProvider: no reply left for call {}",
            requests.len()
        );
        requests.push(request);
        replies.remove(0)
    }
}

/// In-memory project with injectable read and search failures.
#[derive(Default)]
pub struct MemoryIndex {
    /// Absolute path -> content.
    files: BTreeMap<PathBuf, String>,
    /// Keyword -> relative hits, as ripgrep prints them.
    hits: HashMap<String, Vec<String>>,
    failing_reads: HashSet<PathBuf>,
    failing_keywords: HashSet<String>,
    delays: HashMap<String, Duration>,
    listing: Vec<String>,
    pub searched: Mutex<Vec<String>>,
    pub reads: Mutex<Vec<PathBuf>>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, root: &Path, relative: &str, content: &str) -> Self {
        self.files.insert(root.join(relative), content.to_string());
        self.listing.push(relative.to_string());
        self
    }

    pub fn with_hits(mut self, keyword: &str, hits: &[&str]) -> Self {
        self.hits.insert(
            keyword.to_string(),
            hits.iter().map(|h| h.to_string()).collect(),
        );
        self
    }

    pub fn failing_read(mut self, path: PathBuf) -> Self {
        self.failing_reads.insert(path);
        self
    }

    pub fn failing_search(mut self, keyword: &str) -> Self {
        self.failing_keywords.insert(keyword.to_string());
        self
    }

    /// Hold the search for `keyword` open for `delay`.
    pub fn with_delay(mut self, keyword: &str, delay: Duration) -> Self {
        self.delays.insert(keyword.to_string(), delay);
        self
    }

    pub fn searched(&self) -> Vec<String> {
        let mut out = self.searched.lock().unwrap().clone();
        out.sort();
        out
    }
}

#[async_trait::async_trait]
impl FileIndex for MemoryIndex {
    async fn list_all_files(&self, _root: &Path) -> Vec<String> {
        let mut listing = self.listing.clone();
        listing.sort();
        listing
    }

    async fn read_content(&self, path: &Path) -> Result<String, IndexError> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        if self.failing_reads.contains(path) {
            return Err(IndexError::Read {
                path: path.to_path_buf(),
                reason: "permission denied".into(),
            });
        }
        self.files.get(path).cloned().ok_or_else(|| IndexError::Read {
            path: path.to_path_buf(),
            reason: "No such file or directory".into(),
        })
    }

    async fn search_keyword(
        &self,
        root: &Path,
        keyword: &str,
        _exclude_dirs: &[String],
    ) -> Result<Vec<PathBuf>, IndexError> {
        self.searched.lock().unwrap().push(keyword.to_string());
        if let Some(delay) = self.delays.get(keyword) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing_keywords.contains(keyword) {
            return Err(IndexError::Search {
                keyword: keyword.to_string(),
                reason: "exit code 2: regex parse error".into(),
            });
        }
        Ok(self
            .hits
            .get(keyword)
            .map(|hits| hits.iter().map(|h| root.join(h)).collect())
            .unwrap_or_default())
    }
}
