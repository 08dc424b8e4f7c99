use std::collections::HashMap;
use std::path::Path;

/// Map a file's dotted suffix to its Sphinx highlight language.
///
/// `extra` takes precedence over the built-in table. Unknown suffixes are a
/// normal outcome and yield `None`, as does an override mapped to an empty
/// string.
pub fn detect_language<'a>(path: &Path, extra: &'a HashMap<String, String>) -> Option<&'a str> {
    let ext = path.extension()?.to_str()?;
    let suffix = format!(".{ext}");
    extra
        .get(&suffix)
        .map(String::as_str)
        .or_else(|| builtin_language(&suffix))
        .filter(|lang| !lang.is_empty())
}

fn builtin_language(suffix: &str) -> Option<&'static str> {
    let lang = match suffix {
        ".py" | ".pyi" => "python",
        ".pyx" => "cython",
        ".js" | ".mjs" => "javascript",
        ".ts" => "typescript",
        ".tsx" => "tsx",
        ".jsx" => "jsx",
        ".java" => "java",
        ".kt" => "kotlin",
        ".md" => "markdown",
        ".yaml" | ".yml" => "yaml",
        ".json" => "json",
        ".sh" | ".bash" | ".zsh" => "bash",
        ".rst" => "rst",
        ".toml" => "toml",
        ".cfg" | ".ini" => "ini",
        ".html" => "html",
        ".jinja" | ".jinja2" => "jinja",
        ".css" => "css",
        ".scss" => "scss",
        ".sass" => "sass",
        ".less" => "less",
        ".sql" => "sql",
        ".rb" => "ruby",
        ".go" => "go",
        ".rs" => "rust",
        ".c" | ".h" => "c",
        ".cpp" | ".hpp" => "cpp",
        ".xml" => "xml",
        ".r" | ".R" => "r",
        ".lua" => "lua",
        ".php" => "php",
        ".swift" => "swift",
        ".dockerfile" => "dockerfile",
        ".tf" => "hcl",
        ".graphql" => "graphql",
        ".proto" => "protobuf",
        ".makefile" => "makefile",
        _ => return None,
    };
    Some(lang)
}
