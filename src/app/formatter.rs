use crate::app::language::detect_language;
use crate::app::models::RuntimeConfig;
use crate::app::scanner::Scanner;
use anyhow::Result;
use pathdiff::diff_paths;
use std::path::{Path, PathBuf};

/// Build the full `.rst` document and return it as a string.
///
/// The output path only matters for computing the relative
/// `literalinclude::` arguments; this function never writes the file.
pub fn generate(config: &RuntimeConfig) -> Result<String> {
    let root = &config.project_root;
    let output_abs = crate::app::absolute_output_path(&config.output)?;
    let output_dir = output_abs
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let underline = "=".repeat(config.title.chars().count());
    let header = format!(
        "{title}\n\
         {underline}\n\
         \n\
         Below is the layout of the project (to {depth} levels), followed by\n\
         the contents of each key file.\n\
         \n\
         .. code-block:: text\n\
         \x20\x20\x20:caption: Project directory layout\n\
         \n\
         \x20\x20\x20{root_name}/",
        title = config.title,
        depth = config.depth,
    );

    let scanner = Scanner::new(config)?;
    let tree = scanner.build_tree(root, config.depth, "   ")?;

    let mut parts = vec![header, tree, String::new()];

    for fp in scanner.collect_files(&config.extensions) {
        let rel = posix(diff_paths(&fp, root).unwrap_or_else(|| fp.clone()));
        let include_path = posix(diff_paths(&fp, &output_dir).unwrap_or_else(|| fp.clone()));

        parts.push(rel.clone());
        parts.push("-".repeat(rel.chars().count()));
        parts.push(String::new());
        parts.push(format!(".. literalinclude:: {include_path}"));
        if let Some(lang) = detect_language(&fp, &config.extra_languages) {
            parts.push(format!("   :language: {lang}"));
        }
        parts.push(format!("   :caption: {rel}"));
        if config.linenos {
            parts.push(String::from("   :linenos:"));
        }
        parts.push(String::new());
    }

    Ok(parts.join("\n"))
}

fn posix(path: PathBuf) -> String {
    path.to_string_lossy().replace('\\', "/")
}
