use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};

/// Compiled ignore patterns with the dual full-path/bare-name semantics.
///
/// A pattern containing `/` is anchored: it is matched, with glob wildcards,
/// against the whole relative path only. A bare pattern is fuzzy: it matches
/// any single path component, and is additionally tried against the whole
/// path wrapped as `*pat*` and `*pat`. The broad wrapped-path match is kept
/// on purpose; existing configurations rely on it.
#[derive(Debug)]
pub struct IgnoreMatcher {
    rules: Vec<PatternRule>,
}

#[derive(Debug)]
enum PatternRule {
    /// Pattern with `/`: glob over the full relative path.
    Anchored(GlobMatcher),
    /// Bare pattern: per-component glob plus wrapped full-path globs.
    Bare {
        component: GlobMatcher,
        infix: GlobMatcher,
        suffix: GlobMatcher,
    },
}

impl IgnoreMatcher {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut rules = Vec::with_capacity(patterns.len());
        for pat in patterns {
            let pat = pat.replace('\\', "/");
            // A pattern that fails to compile (e.g. an unclosed bracket)
            // degrades to a literal match instead of aborting the run.
            let pat = if Glob::new(&pat).is_err() {
                log::warn!("Treating unparseable glob pattern as literal: {pat}");
                globset::escape(&pat)
            } else {
                pat
            };
            let rule = if pat.contains('/') {
                PatternRule::Anchored(compile(&pat)?)
            } else {
                PatternRule::Bare {
                    component: compile(&pat)?,
                    infix: compile(&format!("*{pat}*"))?,
                    suffix: compile(&format!("*{pat}"))?,
                }
            };
            rules.push(rule);
        }
        Ok(Self { rules })
    }

    /// `rel_path` is the `/`-separated path relative to the traversal root.
    pub fn is_match(&self, rel_path: &str) -> bool {
        let rel_path = rel_path.replace('\\', "/");
        for rule in &self.rules {
            match rule {
                PatternRule::Anchored(glob) => {
                    if glob.is_match(&rel_path) {
                        return true;
                    }
                }
                PatternRule::Bare {
                    component,
                    infix,
                    suffix,
                } => {
                    if rel_path.split('/').any(|part| component.is_match(part)) {
                        return true;
                    }
                    if infix.is_match(&rel_path) || suffix.is_match(&rel_path) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

fn compile(pat: &str) -> Result<GlobMatcher> {
    Ok(Glob::new(pat)
        .with_context(|| format!("Invalid glob pattern: {pat}"))?
        .compile_matcher())
}

/// True when `rel_path` equals a whitelist entry or sits below one.
pub fn matches_whitelist(rel_path: &str, whitelist: &[String]) -> bool {
    whitelist.iter().any(|w| {
        let w = w.trim_matches('/');
        rel_path == w || rel_path.starts_with(&format!("{w}/"))
    })
}

/// True when the directory is whitelisted or is an ancestor of an entry,
/// so that the intermediate directories leading to a deep entry still render.
pub fn should_show_dir(rel_path: &str, whitelist: &[String]) -> bool {
    if matches_whitelist(rel_path, whitelist) {
        return true;
    }
    whitelist
        .iter()
        .any(|w| w.trim_matches('/').starts_with(&format!("{rel_path}/")))
}
