//! help command - List available commands

use anyhow::Result;

/// Command names and one-line summaries, in display order.
const COMMANDS: &[(&str, &str)] = &[
    ("help", "List available commands"),
    ("init", "Create the version vault for a document"),
    ("list", "List commits, one per line"),
    ("log", "Show raw backend history"),
    ("commit", "Snapshot a document and its dependencies"),
    ("uncommit", "Roll back the most recent commit"),
    ("checkout", "Restore a document tree from a commit"),
];

/// List valid commands, optionally filtered by a glob-style pattern.
///
/// A pattern that matches nothing falls back to the full list, so an
/// unknown argument still shows the operator what is valid.
pub fn help(pattern: Option<&str>) -> Result<()> {
    let matching: Vec<_> = COMMANDS
        .iter()
        .filter(|(name, _)| pattern.map_or(true, |p| glob_match(p, name)))
        .collect();

    let shown = if matching.is_empty() {
        COMMANDS.iter().collect()
    } else {
        matching
    };

    println!("Commands:");
    for (name, summary) in shown {
        println!("  {name:<10} {summary}");
    }
    Ok(())
}

/// Glob-style match supporting `*` (any run) and `?` (any one char).
fn glob_match(pattern: &str, text: &str) -> bool {
    fn matches(p: &[char], t: &[char]) -> bool {
        match (p.first(), t.first()) {
            (None, None) => true,
            (Some('*'), _) => {
                matches(&p[1..], t) || (!t.is_empty() && matches(p, &t[1..]))
            }
            (Some('?'), Some(_)) => matches(&p[1..], &t[1..]),
            (Some(pc), Some(tc)) if pc == tc => matches(&p[1..], &t[1..]),
            _ => false,
        }
    }
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    matches(&p, &t)
}
