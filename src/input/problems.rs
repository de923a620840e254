use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{EXPLAIN_NAME, LEFT_NAMES, RIGHT_NAMES, TITLE_NAME};
use crate::input::InputError;
use crate::input::text::read_text;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub folder: String,
    pub title: String,
    pub image_left: PathBuf,
    pub image_right: PathBuf,
    pub explanation: String,
}

/// Lists complete problem folders under `root` in name order.
///
/// Folders missing an image, the title or the explanation are skipped. A
/// missing root yields no problems.
pub fn scan_problems(root: &Path) -> Result<Vec<Problem>, InputError> {
    if !root.is_dir() {
        tracing::warn!(root = %root.display(), "problem root does not exist");
        return Ok(Vec::new());
    }

    let mut subdirs = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            subdirs.push(path);
        }
    }
    subdirs.sort();

    let mut items = Vec::with_capacity(subdirs.len());
    for sub in subdirs {
        if let Some(problem) = load_problem(&sub)? {
            items.push(problem);
        }
    }
    tracing::info!(root = %root.display(), count = items.len(), "scanned problems");
    Ok(items)
}

fn load_problem(dir: &Path) -> Result<Option<Problem>, InputError> {
    let left = find_first_existing(dir, LEFT_NAMES);
    let right = find_first_existing(dir, RIGHT_NAMES);
    let title_path = dir.join(TITLE_NAME);
    let explain_path = dir.join(EXPLAIN_NAME);

    let (Some(image_left), Some(image_right)) = (left, right) else {
        tracing::debug!(folder = %dir.display(), "skipping: missing image");
        return Ok(None);
    };
    if !title_path.exists() || !explain_path.exists() {
        tracing::debug!(folder = %dir.display(), "skipping: missing text");
        return Ok(None);
    }

    Ok(Some(Problem {
        folder: dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        title: read_text(&title_path)?,
        image_left,
        image_right,
        explanation: read_text(&explain_path)?,
    }))
}

fn find_first_existing(dir: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Scan results keyed by root, refreshed only on explicit invalidation.
#[derive(Debug, Default)]
pub struct ProblemCache {
    entries: HashMap<PathBuf, Vec<Problem>>,
    scans: usize,
}

impl ProblemCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_scan(&mut self, root: &Path) -> Result<&[Problem], InputError> {
        if !self.entries.contains_key(root) {
            let items = scan_problems(root)?;
            self.scans += 1;
            self.entries.insert(root.to_path_buf(), items);
        }
        Ok(self.entries.get(root).map(Vec::as_slice).unwrap_or(&[]))
    }

    /// Like [`get_or_scan`](Self::get_or_scan) but an empty result is an error.
    pub fn require(&mut self, root: &Path) -> Result<&[Problem], InputError> {
        let items = self.get_or_scan(root)?;
        if items.is_empty() {
            return Err(InputError::NoProblems(root.to_path_buf()));
        }
        Ok(items)
    }

    pub fn invalidate(&mut self, root: &Path) {
        self.entries.remove(root);
    }

    /// Drops every cached root; the next lookup rescans.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of directory scans performed so far.
    pub fn scans(&self) -> usize {
        self.scans
    }
}
