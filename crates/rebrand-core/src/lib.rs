use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub mod rules;

pub use rules::{ReplacementRule, RuleSet};

/// File name suffixes whose contents get rewritten when no overrides are
/// supplied. Matching is by suffix, so multi-dot entries like `.xaml.cs`
/// work as expected.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".cs", ".csproj", ".xaml", ".xaml.cs", ".nuspec", ".config", ".sln",
];

/// Directory names excluded from traversal and renaming by default.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &["bin", "obj", ".NuGet", ".git", "packages"];

#[derive(thiserror::Error, Debug)]
pub enum RenameError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("replacement list is empty")]
    EmptyRuleSet,
    #[error("replacement rule has empty match text (replacement: '{replacement}')")]
    EmptyMatchText { replacement: String },
    #[error("cannot rename '{from}' to '{to}': target already exists")]
    RenameCollision { from: PathBuf, to: PathBuf },
}

/// Immutable parameters for one walk. Extension and ignored-directory
/// comparisons are case-insensitive; both lists are lowercased here once so
/// the walk only ever compares lowercased values.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    extensions: Vec<String>,
    ignored_dirs: Vec<String>,
    rules: RuleSet,
}

impl WalkConfig {
    pub fn new<E, D>(extensions: E, ignored_dirs: D, rules: RuleSet) -> Self
    where
        E: IntoIterator<Item = String>,
        D: IntoIterator<Item = String>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        let ignored_dirs = ignored_dirs
            .into_iter()
            .map(|dir| dir.to_lowercase())
            .collect();

        Self {
            extensions,
            ignored_dirs,
            rules,
        }
    }

    pub fn with_defaults(rules: RuleSet) -> Self {
        Self::new(
            DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_string()),
            DEFAULT_IGNORED_DIRS.iter().map(|dir| (*dir).to_string()),
            rules,
        )
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn ignored_dirs(&self) -> &[String] {
        &self.ignored_dirs
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    fn matches_extension(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.extensions.iter().any(|ext| lower.ends_with(ext.as_str()))
    }

    fn is_ignored_dir(&self, dir_name: &str) -> bool {
        let lower = dir_name.to_lowercase();
        self.ignored_dirs.iter().any(|dir| *dir == lower)
    }
}

/// Counters reported back from a completed walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenameSummary {
    pub files_updated: usize,
    pub entries_renamed: usize,
    pub entries_ignored: usize,
}

/// Walks `root` depth-first and applies the configured replacements to file
/// contents and entry names. A missing root is a no-op, not an error.
///
/// A directory's contents are always fully processed before the directory
/// itself is renamed: the rename would invalidate every child path computed
/// under the old name.
pub fn rename_tree(root: &Path, config: &WalkConfig) -> Result<RenameSummary, RenameError> {
    let mut summary = RenameSummary::default();
    walk(root, config, 0, &mut summary)?;
    Ok(summary)
}

fn walk(
    dir: &Path,
    config: &WalkConfig,
    depth: usize,
    summary: &mut RenameSummary,
) -> Result<(), RenameError> {
    if !dir.is_dir() {
        debug!("not a directory, skipping: {}", dir.display());
        return Ok(());
    }

    // Fresh listing for this level. Listings are never carried across
    // recursive calls: renames below this level must not be observed
    // through a stale snapshot.
    let entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;

    for entry in &entries {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match entry_name(&path) {
            Some(name) if config.matches_extension(&name) => {
                rename_item(&path, &name, config, depth, summary)?;
            }
            Some(name) => {
                info!("{}{}: ignored", indent(depth), name);
                summary.entries_ignored += 1;
            }
            None => {
                // Not valid UTF-8, so no rule can match it.
                info!("{}{}: ignored", indent(depth), path.display());
                summary.entries_ignored += 1;
            }
        }
    }

    for entry in &entries {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = entry_name(&path) else {
            info!("{}{}/: ignored", indent(depth), path.display());
            summary.entries_ignored += 1;
            continue;
        };
        info!("{}{}/", indent(depth), name);
        if config.is_ignored_dir(&name) {
            summary.entries_ignored += 1;
            continue;
        }
        // Children first: the rename below would invalidate their paths.
        walk(&path, config, depth + 1, summary)?;
        rename_item(&path, &name, config, depth, summary)?;
    }

    Ok(())
}

/// Rewrites contents (files only), then renames the entry itself when the
/// rule chain changes its name beyond letter case.
fn rename_item(
    path: &Path,
    name: &str,
    config: &WalkConfig,
    depth: usize,
    summary: &mut RenameSummary,
) -> Result<(), RenameError> {
    let updated = rewrite_contents(path, config.rules())?;
    if updated {
        summary.files_updated += 1;
    }
    info!(
        "{}/{}: [{}]",
        indent(depth),
        name,
        if updated { "UPDATED" } else { "-" }
    );

    let new_name = config.rules().apply(name);
    if new_name.to_lowercase() != name.to_lowercase() {
        let new_path = path.with_file_name(&new_name);
        if new_path.exists() {
            // rename(2) would silently replace an existing file here.
            return Err(RenameError::RenameCollision {
                from: path.to_path_buf(),
                to: new_path,
            });
        }
        fs::rename(path, &new_path)?;
        summary.entries_renamed += 1;
        info!("{}/{} -> {}", indent(depth), name, new_name);
    }

    Ok(())
}

/// Applies the rule chain to each line independently; a match never spans a
/// line boundary. Every line is written back terminated with `\n`, which
/// normalizes CRLF input and guarantees a trailing newline. Any touched
/// file counts as updated; the result is not diffed against the original.
fn rewrite_contents(path: &Path, rules: &RuleSet) -> Result<bool, RenameError> {
    if !path.is_file() {
        return Ok(false);
    }

    let contents = fs::read_to_string(path)?;
    let mut rewritten = String::with_capacity(contents.len());
    for line in contents.lines() {
        rewritten.push_str(&rules.apply(line));
        rewritten.push('\n');
    }
    fs::write(path, rewritten)?;

    Ok(true)
}

fn entry_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
