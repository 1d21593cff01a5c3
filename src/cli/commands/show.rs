//! show command - Resolve and print repository metadata
//!
//! This is a read-only command: it resolves metadata for the requested
//! directory and prints it, either human-readable or as JSON. In default
//! mode unresolvable details are printed as empty rather than failing, so
//! the command is safe to call from build scripts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::SecondsFormat;

use crate::git::{resolve_with, RepoInfo, ResolveOptions};

/// Resolve metadata for `path` and print it.
pub fn show(path: Option<PathBuf>, json: bool, strict: bool, metadata_dir: String) -> Result<()> {
    let options = ResolveOptions::default()
        .strict(strict)
        .metadata_dir(metadata_dir);

    let info = resolve_with(path.as_deref(), &options)
        .context("failed to resolve repository metadata")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    print_human(&info);
    Ok(())
}

fn print_human(info: &RepoInfo) {
    let Some(root) = &info.root else {
        println!("No repository found");
        return;
    };

    let branch = match (&info.branch, &info.sha) {
        (Some(branch), _) => branch.clone(),
        (None, Some(_)) => "(detached)".to_string(),
        (None, None) => "(unknown)".to_string(),
    };
    println!("Branch: {}", branch);

    match &info.sha {
        Some(sha) => println!("Commit: {}", sha),
        None => println!("Commit: (unresolved)"),
    }

    if let Some(author) = &info.author {
        println!("Author: {}{}", author, date_suffix(&info.author_date));
    }
    if let Some(committer) = &info.committer {
        println!("Committer: {}{}", committer, date_suffix(&info.committer_date));
    }
    if let Some(message) = &info.commit_message {
        println!("Message: {}", message);
    }
    if !info.parents.is_empty() {
        let parents: Vec<&str> = info.parents.iter().map(|p| p.as_str()).collect();
        println!("Parents: {}", parents.join(", "));
    }

    println!("Tag: {}", info.tag.as_deref().unwrap_or("(none)"));
    match (&info.last_tag, info.commits_since_last_tag) {
        (Some(tag), Some(distance)) => {
            let unit = if distance == 1 { "commit" } else { "commits" };
            println!("Last tag: {} ({} {} ago)", tag, distance, unit);
        }
        _ => println!("Last tag: (none reachable)"),
    }

    println!("Root: {}", root.display());
    if let (Some(worktree), Some(common)) = (&info.worktree_git_dir, &info.common_git_dir) {
        if worktree != common {
            println!("Worktree dir: {}", worktree.display());
        }
        println!("Metadata dir: {}", common.display());
    }
}

fn date_suffix(date: &Option<chrono::DateTime<chrono::Utc>>) -> String {
    match date {
        Some(date) => format!(" ({})", date.to_rfc3339_opts(SecondsFormat::Secs, true)),
        None => String::new(),
    }
}
