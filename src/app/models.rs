use std::collections::HashMap;
use std::path::PathBuf;

/// The effective configuration for one generation run, fully resolved
/// before any traversal starts.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub project_root: PathBuf,
    /// Negative depth renders nothing at all.
    pub depth: i64,
    /// Destination path; also the base for relative literalinclude paths.
    pub output: PathBuf,
    /// Dotted suffixes eligible for inclusion blocks, e.g. ".py".
    pub extensions: Vec<String>,
    pub ignore: Vec<String>,
    pub whitelist: Vec<String>,
    /// Bypass the whitelist entirely.
    pub include_all: bool,
    pub title: String,
    pub linenos: bool,
    /// Suffix-to-language overrides layered on top of the built-in table.
    pub extra_languages: HashMap<String, String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            depth: 10,
            output: PathBuf::from("docs/source_tree.rst"),
            extensions: to_strings(&[
                ".js", ".json", ".md", ".py", ".rst", ".toml", ".yaml", ".yml",
            ]),
            ignore: to_strings(&[
                "__pycache__",
                "*.pyc",
                "*.pyo",
                "*.py,cover",
                ".git",
                ".hg",
                ".svn",
                ".tox",
                ".nox",
                ".venv",
                "venv",
                "env",
                "*.egg-info",
                "dist",
                "build",
                "node_modules",
                ".mypy_cache",
                ".pytest_cache",
                ".coverage",
                "htmlcov",
                ".idea",
                ".vscode",
                ".DS_Store",
                "Thumbs.db",
                ".ruff_cache",
                ".coverage.*",
                ".secrets.baseline",
            ]),
            whitelist: Vec::new(),
            include_all: true,
            title: String::from("Project source-tree"),
            linenos: false,
            extra_languages: HashMap::new(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
