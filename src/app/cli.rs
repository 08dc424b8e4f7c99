use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "source-tree",
    version,
    about = "Generate an .rst file with an ASCII project tree and literalinclude blocks for every source file"
)]
pub struct Cli {
    /// Project directory (default: .)
    #[arg(long, short = 'p')]
    pub project_root: Option<PathBuf>,

    /// Max tree depth (default: 10)
    #[arg(long, short = 'd', allow_negative_numbers = true)]
    pub depth: Option<i64>,

    /// Output .rst path (default: docs/source_tree.rst)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// File extensions to include (e.g. .py .md .rst)
    #[arg(long, short = 'e', num_args = 1.., value_name = "EXT")]
    pub extensions: Option<Vec<String>>,

    /// Glob patterns to ignore
    #[arg(long, short = 'i', num_args = 1.., value_name = "PAT")]
    pub ignore: Option<Vec<String>>,

    /// Only include these directories (ignored when --include-all)
    #[arg(long, short = 'w', num_args = 1.., value_name = "DIR")]
    pub whitelist: Option<Vec<String>>,

    /// Include everything regardless of whitelist
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub include_all: Option<bool>,

    /// RST section title (default: "Project source-tree")
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Add :linenos: to literalinclude directives
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub linenos: Option<bool>,

    /// Extra extension-to-language mappings (e.g. --language .vue=vue)
    #[arg(long = "language", value_name = "EXT=LANG", value_parser = parse_language_pair)]
    pub extra_languages: Option<Vec<(String, String)>>,

    /// Print to stdout instead of writing to a file
    #[arg(long)]
    pub stdout: bool,
}

fn parse_language_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((ext, lang)) if !ext.is_empty() && !lang.is_empty() => {
            Ok((ext.to_string(), lang.to_string()))
        }
        _ => Err(format!("expected EXT=LANG, got {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flags_stay_none() {
        let cli = Cli::try_parse_from(["source-tree"]).unwrap();
        assert!(cli.depth.is_none());
        assert!(cli.include_all.is_none());
        assert!(cli.linenos.is_none());
        assert!(!cli.stdout);
    }

    #[test]
    fn bool_flags_accept_explicit_value() {
        let cli = Cli::try_parse_from(["source-tree", "--include-all", "false"]).unwrap();
        assert_eq!(cli.include_all, Some(false));

        let cli = Cli::try_parse_from(["source-tree", "--linenos"]).unwrap();
        assert_eq!(cli.linenos, Some(true));
    }

    #[test]
    fn negative_depth_is_accepted() {
        let cli = Cli::try_parse_from(["source-tree", "-d", "-1"]).unwrap();
        assert_eq!(cli.depth, Some(-1));
    }

    #[test]
    fn language_pairs_are_parsed() {
        let cli = Cli::try_parse_from(["source-tree", "--language", ".vue=vue"]).unwrap();
        assert_eq!(
            cli.extra_languages,
            Some(vec![(".vue".to_string(), "vue".to_string())])
        );

        assert!(Cli::try_parse_from(["source-tree", "--language", "vue"]).is_err());
    }
}
