//! # Git Module
//!
//! Reads the checked-out branch straight from `.git/HEAD`. Detached heads,
//! linked worktrees (where `.git` is a file) and unreadable files all yield
//! no branch.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

const HEAD_PREFIX: &str = "ref: refs/heads/";

/// Branch name from the contents of a HEAD file.
pub fn parse_head(contents: &str) -> Option<String> {
    contents
        .trim()
        .strip_prefix(HEAD_PREFIX)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
}

fn read_head(repo_dir: &Path) -> Result<String> {
    let head = repo_dir.join(".git").join("HEAD");
    fs::read_to_string(&head).with_context(|| format!("read {}", head.display()))
}

/// Current branch for the repository rooted at `repo_dir`, if any.
pub fn read_branch(repo_dir: &Path) -> Option<String> {
    match read_head(repo_dir) {
        Ok(contents) => parse_head(&contents),
        Err(e) => {
            debug!(error = %format!("{e:#}"), "no git branch");
            None
        }
    }
}
