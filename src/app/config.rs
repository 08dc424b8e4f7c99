use crate::app::cli::Cli;
use crate::app::models::RuntimeConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Project-level configuration file, looked up at the project root.
const CONFIG_FILE_NAME: &str = "source-tree.toml";

/// The file layer. Every field is optional so that absent keys leave the
/// lower layers untouched. Hyphenated keys are synonyms for the underscored
/// names. A `project_root` key has no field here on purpose: the root is
/// resolved before this layer loads and is immune to it.
#[derive(Deserialize, Debug, Default)]
struct FileConfig {
    depth: Option<i64>,
    output: Option<PathBuf>,
    extensions: Option<Vec<String>>,
    ignore: Option<Vec<String>>,
    whitelist: Option<Vec<String>>,
    #[serde(alias = "include-all")]
    include_all: Option<bool>,
    title: Option<String>,
    linenos: Option<bool>,
    #[serde(alias = "extra-languages")]
    extra_languages: Option<HashMap<String, String>>,
}

/// Merge defaults < config file < CLI arguments, later layers winning
/// key-by-key. Only CLI values that were explicitly provided override.
pub fn resolve_config(cli: Cli) -> Result<RuntimeConfig> {
    let mut cfg = RuntimeConfig::default();

    // The root resolves first: the file layer is located relative to it.
    let root_arg = cli
        .project_root
        .clone()
        .unwrap_or_else(|| cfg.project_root.clone());
    let project_root = fs::canonicalize(&root_arg)
        .with_context(|| format!("Failed to resolve project root {}", root_arg.display()))?;

    apply_file_layer(&mut cfg, load_file_config(&project_root));
    apply_cli_layer(&mut cfg, cli);

    cfg.project_root = project_root;
    Ok(cfg)
}

/// A missing or unparseable file is an empty layer, never an error.
fn load_file_config(project_root: &Path) -> FileConfig {
    let path = project_root.join(CONFIG_FILE_NAME);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) => {
            log::debug!("No config file at {}: {err}", path.display());
            return FileConfig::default();
        }
    };
    match toml::from_str(&content) {
        Ok(parsed) => parsed,
        Err(err) => {
            log::debug!("Ignoring unparseable {}: {err}", path.display());
            FileConfig::default()
        }
    }
}

fn apply_file_layer(cfg: &mut RuntimeConfig, file: FileConfig) {
    if let Some(depth) = file.depth {
        cfg.depth = depth;
    }
    if let Some(output) = file.output {
        cfg.output = output;
    }
    if let Some(extensions) = file.extensions {
        cfg.extensions = extensions;
    }
    if let Some(ignore) = file.ignore {
        cfg.ignore = ignore;
    }
    if let Some(whitelist) = file.whitelist {
        cfg.whitelist = whitelist;
    }
    if let Some(include_all) = file.include_all {
        cfg.include_all = include_all;
    }
    if let Some(title) = file.title {
        cfg.title = title;
    }
    if let Some(linenos) = file.linenos {
        cfg.linenos = linenos;
    }
    if let Some(extra_languages) = file.extra_languages {
        cfg.extra_languages = extra_languages;
    }
}

fn apply_cli_layer(cfg: &mut RuntimeConfig, cli: Cli) {
    if let Some(depth) = cli.depth {
        cfg.depth = depth;
    }
    if let Some(output) = cli.output {
        cfg.output = output;
    }
    if let Some(extensions) = cli.extensions {
        cfg.extensions = extensions;
    }
    if let Some(ignore) = cli.ignore {
        cfg.ignore = ignore;
    }
    if let Some(whitelist) = cli.whitelist {
        cfg.whitelist = whitelist;
    }
    if let Some(include_all) = cli.include_all {
        cfg.include_all = include_all;
    }
    if let Some(title) = cli.title {
        cfg.title = title;
    }
    if let Some(linenos) = cli.linenos {
        cfg.linenos = linenos;
    }
    if let Some(pairs) = cli.extra_languages {
        cfg.extra_languages = pairs.into_iter().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn resolve(args: &[&str]) -> RuntimeConfig {
        let cli = Cli::try_parse_from([&["source-tree"], args].concat()).unwrap();
        resolve_config(cli).unwrap()
    }

    #[test]
    fn defaults_used_without_file_or_flags() {
        let tmp = TempDir::new().unwrap();
        let cfg = resolve(&["--project-root", tmp.path().to_str().unwrap()]);
        assert_eq!(cfg.depth, 10);
        assert_eq!(cfg.title, "Project source-tree");
        assert!(cfg.include_all);
        assert!(!cfg.linenos);
    }

    #[test]
    fn file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "depth = 3\ntitle = \"Tree\"\nextensions = [\".py\", \".rs\"]\nlinenos = true\n",
        )
        .unwrap();
        let cfg = resolve(&["--project-root", tmp.path().to_str().unwrap()]);
        assert_eq!(cfg.depth, 3);
        assert_eq!(cfg.title, "Tree");
        assert_eq!(cfg.extensions, vec![".py", ".rs"]);
        assert!(cfg.linenos);
    }

    #[test]
    fn cli_overrides_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "depth = 3\n").unwrap();
        let cfg = resolve(&[
            "--project-root",
            tmp.path().to_str().unwrap(),
            "--depth",
            "7",
        ]);
        assert_eq!(cfg.depth, 7);
    }

    #[test]
    fn explicit_false_beats_file_layer() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "linenos = true\n").unwrap();
        let cfg = resolve(&[
            "--project-root",
            tmp.path().to_str().unwrap(),
            "--linenos",
            "false",
        ]);
        assert!(!cfg.linenos);
    }

    #[test]
    fn hyphenated_keys_normalised() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "include-all = true\nextra-languages = { \".vue\" = \"vue\" }\n",
        )
        .unwrap();
        let cfg = resolve(&["--project-root", tmp.path().to_str().unwrap()]);
        assert!(cfg.include_all);
        assert_eq!(cfg.extra_languages.get(".vue"), Some(&"vue".to_string()));
    }

    #[test]
    fn project_root_key_in_file_is_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "project_root = \"/somewhere/else\"\ndepth = 2\n",
        )
        .unwrap();
        let cfg = resolve(&["--project-root", tmp.path().to_str().unwrap()]);
        assert_eq!(cfg.project_root, fs::canonicalize(tmp.path()).unwrap());
        assert_eq!(cfg.depth, 2);
    }

    #[test]
    fn unparseable_file_is_an_empty_layer() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "depth = [not toml").unwrap();
        let cfg = resolve(&["--project-root", tmp.path().to_str().unwrap()]);
        assert_eq!(cfg.depth, 10);
    }

    #[test]
    fn project_root_is_canonicalized() {
        let tmp = TempDir::new().unwrap();
        let cfg = resolve(&["--project-root", tmp.path().to_str().unwrap()]);
        assert!(cfg.project_root.is_absolute());
    }
}
