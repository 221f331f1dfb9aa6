use anyhow::Result;
use clap::Parser;
use rebrand_core::ReplacementRule;

#[derive(Parser)]
#[command(name = "rebrand")]
#[command(version)]
#[command(about = "Bulk rename-and-replace across a project tree")]
#[command(
    long_about = "Rewrites occurrences of literal substrings inside text files with matching extensions and renames files and directories whose names contain them, recursively, skipping build output and package cache directories."
)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[arg(
        default_value = ".",
        help = "Target folder; `.` means the directory containing the rebrand executable, anything else is resolved relative to it"
    )]
    pub folder: String,

    #[arg(
        long,
        value_name = "PAIRS",
        help = "Ordered replacement pairs, e.g. \"(Acme.Core.,Initech.);(Acme.,Plus.)\""
    )]
    pub replace: Option<String>,

    #[arg(
        long,
        value_name = "EXTS",
        help = "Additional file extensions to rewrite contents of, e.g. \".props;.targets\""
    )]
    pub extensions: Option<String>,

    #[arg(
        long,
        value_name = "DIRS",
        help = "Additional directory names to skip, e.g. \"target;node_modules\""
    )]
    pub ignore: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(short, long, help = "Only log errors")]
    pub quiet: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Parses the `--replace` grammar: entries split on `;`, surrounding
/// parentheses stripped, fields split on `,` and trimmed. Fields beyond the
/// second are discarded and entries with empty match text are dropped; an
/// entry without a `,` is a configuration error.
pub fn parse_replace_pairs(pairs: &str) -> Result<Vec<ReplacementRule>> {
    let mut rules = Vec::new();
    for entry in pairs.split(';') {
        if entry.trim().is_empty() {
            continue;
        }
        let stripped = entry.trim().trim_start_matches('(').trim_end_matches(')');
        let mut fields = stripped.split(',');
        let (Some(find), Some(replace)) = (fields.next(), fields.next()) else {
            anyhow::bail!("malformed replacement pair '{entry}', expected '(from,to)'");
        };
        let find = find.trim();
        if find.is_empty() {
            continue;
        }
        rules.push(ReplacementRule::new(find, replace.trim()));
    }
    Ok(rules)
}

/// Splits a `;`-separated option value, dropping empty entries.
pub fn parse_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|value| {
            value
                .split(';')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
