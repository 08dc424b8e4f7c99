use crate::app::matcher::{self, IgnoreMatcher};
use crate::app::models::RuntimeConfig;
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::fs;
use std::path::{Path, PathBuf};

const TEE: &str = "\u{251c}\u{2500}\u{2500} ";
const CORNER: &str = "\u{2514}\u{2500}\u{2500} ";
const BAR_EXTENSION: &str = "\u{2502}   ";
const GAP_EXTENSION: &str = "    ";

/// Walks the project directory applying ignore and whitelist filtering.
pub struct Scanner {
    root: PathBuf,
    ignore: IgnoreMatcher,
    whitelist: Vec<String>,
    include_all: bool,
}

impl Scanner {
    pub fn new(config: &RuntimeConfig) -> Result<Self> {
        Ok(Self {
            root: config.project_root.clone(),
            ignore: IgnoreMatcher::new(&config.ignore)?,
            whitelist: config.whitelist.clone(),
            include_all: config.include_all,
        })
    }

    /// Render the ASCII tree for `dir`, `prefix` carrying the accumulated
    /// indentation of the ancestors.
    ///
    /// Entries are filtered before connectors are assigned so that the last
    /// *visible* entry always receives the corner connector.
    pub fn build_tree(&self, dir: &Path, max_depth: i64, prefix: &str) -> Result<String> {
        if max_depth < 0 {
            return Ok(String::new());
        }

        let mut children = Vec::new();
        let read = fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?;
        for entry in read {
            let entry =
                entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
            let is_dir = entry
                .file_type()
                .with_context(|| format!("Failed to stat {}", entry.path().display()))?
                .is_dir();
            let name = entry.file_name().to_string_lossy().into_owned();
            children.push((entry.path(), name, is_dir));
        }
        // Directories first, then case-insensitive lexicographic.
        children.sort_by_key(|(_, name, is_dir)| (!is_dir, name.to_lowercase()));

        let visible: Vec<&(PathBuf, String, bool)> = children
            .iter()
            .filter(|(path, _, is_dir)| self.is_visible(path, *is_dir))
            .collect();

        let mut lines = Vec::new();
        let count = visible.len();
        for (idx, (path, name, is_dir)) in visible.into_iter().enumerate() {
            let is_last = idx + 1 == count;
            let connector = if is_last { CORNER } else { TEE };
            lines.push(format!("{prefix}{connector}{name}"));
            if *is_dir {
                let extension = if is_last { GAP_EXTENSION } else { BAR_EXTENSION };
                let sub = self.build_tree(path, max_depth - 1, &format!("{prefix}{extension}"))?;
                if !sub.is_empty() {
                    lines.extend(sub.lines().map(String::from));
                }
            }
        }

        Ok(lines.join("\n"))
    }

    /// Collect every file under the root (depth-unlimited, independent of
    /// the tree's depth limit) whose suffix is allowed, sorted by full path.
    pub fn collect_files(&self, extensions: &[String]) -> Vec<PathBuf> {
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .ignore(false)
            .parents(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .build();

        let mut files = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Error walking entry: {err}");
                    continue;
                }
            };
            let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
            if !is_file {
                continue;
            }
            let path = entry.path();
            let suffix = match dotted_suffix(path) {
                Some(suffix) => suffix,
                None => continue,
            };
            if !extensions.contains(&suffix) {
                continue;
            }
            let rel = match self.relative(path) {
                Some(rel) => rel,
                None => continue,
            };
            if self.ignore.is_match(&rel) {
                continue;
            }
            if !self.include_all
                && !self.whitelist.is_empty()
                && !matcher::matches_whitelist(&rel, &self.whitelist)
            {
                continue;
            }
            files.push(path.to_path_buf());
        }
        files.sort();
        files
    }

    fn is_visible(&self, path: &Path, is_dir: bool) -> bool {
        let rel = match self.relative(path) {
            Some(rel) => rel,
            None => return false,
        };
        if self.ignore.is_match(&rel) {
            return false;
        }
        if !self.include_all && !self.whitelist.is_empty() {
            if is_dir {
                return matcher::should_show_dir(&rel, &self.whitelist);
            }
            return matcher::matches_whitelist(&rel, &self.whitelist);
        }
        true
    }

    /// `/`-separated path relative to the traversal root.
    fn relative(&self, path: &Path) -> Option<String> {
        let rel = diff_paths(path, &self.root)?;
        Some(rel.to_string_lossy().replace('\\', "/"))
    }
}

fn dotted_suffix(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    Some(format!(".{ext}"))
}
