//! The candidate file set assembled for one run.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use taskweaver_core::file::FileReference;

/// Where a candidate first came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    Selected,
    Suggested,
    KeywordHit,
}

/// Files gathered for a run, before and after deduplication.
///
/// Entries are pushed as they arrive and may repeat; [`CandidateSet::dedup`]
/// collapses them on the normalized absolute path, keeping the first source.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    root: PathBuf,
    entries: Vec<(FileReference, CandidateSource)>,
}

impl CandidateSet {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            entries: Vec::new(),
        }
    }

    /// Selected files followed by the model's missing files.
    pub fn seed(root: &Path, selected: &[String], missing: &[String]) -> Self {
        let mut set = Self::new(root);
        for path in selected {
            set.push(path, CandidateSource::Selected);
        }
        for path in missing {
            set.push(path, CandidateSource::Suggested);
        }
        set
    }

    pub fn push(&mut self, path: impl AsRef<Path>, source: CandidateSource) {
        self.entries.push((FileReference::resolve(&self.root, path), source));
    }

    /// Add keyword-search hits. Relative hits are taken against the root.
    pub fn extend_hits<I, P>(&mut self, hits: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for hit in hits {
            self.push(hit, CandidateSource::KeywordHit);
        }
    }

    pub fn dedup(self) -> Self {
        let mut seen: BTreeMap<FileReference, CandidateSource> = BTreeMap::new();
        for (file, source) in self.entries {
            seen.entry(file).or_insert(source);
        }
        Self {
            root: self.root,
            entries: seen.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        let wanted = FileReference::resolve(&self.root, path);
        self.entries.iter().any(|(file, _)| *file == wanted)
    }

    pub fn source_of(&self, path: impl AsRef<Path>) -> Option<CandidateSource> {
        let wanted = FileReference::resolve(&self.root, path);
        self.entries
            .iter()
            .find(|(file, _)| *file == wanted)
            .map(|(_, source)| *source)
    }

    pub fn files(&self) -> impl Iterator<Item = &FileReference> {
        self.entries.iter().map(|(file, _)| file)
    }

    pub fn absolute_paths(&self) -> Vec<PathBuf> {
        self.files().map(|f| f.absolute.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> &'static Path {
        Path::new("/work/project")
    }

    #[test]
    fn seed_contains_selected_and_missing() {
        let set = CandidateSet::seed(
            root(),
            &["src/a.ts".into(), "src/b.ts".into()],
            &["src/extension.ts".into()],
        );
        for rel in ["src/a.ts", "src/b.ts", "src/extension.ts"] {
            assert!(set.contains(root().join(rel)), "{rel} missing");
        }
        assert_eq!(set.source_of("src/a.ts"), Some(CandidateSource::Selected));
        assert_eq!(
            set.source_of("src/extension.ts"),
            Some(CandidateSource::Suggested)
        );
    }

    #[test]
    fn single_selected_file() {
        let set = CandidateSet::seed(root(), &["a.ts".into()], &[]).dedup();
        assert_eq!(
            set.absolute_paths(),
            vec![PathBuf::from("/work/project/a.ts")]
        );
    }

    #[test]
    fn hits_join_selected_as_absolute_paths() {
        let mut set = CandidateSet::seed(root(), &["src/main.ts".into()], &[]);
        set.extend_hits(["src/x.ts", "src/y.ts"]);
        let set = set.dedup();
        assert_eq!(
            set.absolute_paths(),
            vec![
                PathBuf::from("/work/project/src/main.ts"),
                PathBuf::from("/work/project/src/x.ts"),
                PathBuf::from("/work/project/src/y.ts"),
            ]
        );
        assert_eq!(set.source_of("src/x.ts"), Some(CandidateSource::KeywordHit));
    }

    #[test]
    fn dedup_collapses_spellings_and_keeps_first_source() {
        let mut set = CandidateSet::seed(root(), &["./src/a.ts".into()], &["src/a.ts".into()]);
        set.extend_hits([PathBuf::from("/work/project/src/a.ts")]);
        assert_eq!(set.len(), 3);

        let set = set.dedup();
        assert_eq!(set.len(), 1);
        assert_eq!(set.source_of("src/a.ts"), Some(CandidateSource::Selected));
    }

    #[test]
    fn dedup_is_idempotent() {
        let mut set = CandidateSet::seed(
            root(),
            &["b.ts".into(), "a.ts".into(), "b.ts".into()],
            &["c.ts".into()],
        );
        set.extend_hits(["a.ts", "d.ts"]);
        let once = set.dedup();
        let twice = once.clone().dedup();
        assert_eq!(once, twice);
        assert_eq!(once.len(), 4);
    }

    #[test]
    fn empty_seed() {
        let set = CandidateSet::seed(root(), &[], &[]).dedup();
        assert!(set.is_empty());
    }
}
