// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! Branch-name and repository-URL resolution heuristics.
//!
//! Actions accept a handful of symbolic branch names in place of real ones:
//!
//! - `CURR` — the branch currently checked out.
//! - `PREV` or `-` — the branch checked out before the current one.
//! - `PARENT` — the branch the current one most likely forked from,
//!   recovered from `git show-branch -a` topology (experimental).
//!
//! Anything else passes through literally. Resolution shells out to git
//! even in dry-run mode; there is no other way to answer.
//!
//! Repository URLs get a shorthand scheme: `github:user/repo` becomes
//! `git@github.com:user/repo.git`, same for `gitlab:`.

use crate::runner::{Git, RunnerError};

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Name of the branch currently checked out.
pub fn current_branch(git: &Git) -> Result<String> {
    Ok(git.capture(["rev-parse", "--abbrev-ref", "HEAD"])?)
}

/// Name of the previously checked out branch (`@{-1}`).
pub fn previous_branch(git: &Git) -> Result<String> {
    Ok(git.capture(["rev-parse", "--abbrev-ref", "@{-1}"])?)
}

/// Best guess at the branch the current one forked from.
///
/// # Errors
///
/// - Return [`ResolveError::NoParentBranch`] when the topology gives no
///   answer, e.g. on the only branch of a repository.
pub fn parent_branch(git: &Git) -> Result<String> {
    let curr = current_branch(git)?;
    let output = git.capture(["show-branch", "-a"])?;
    parse_parent(&output, &curr).ok_or(ResolveError::NoParentBranch)
}

/// Extract the parent branch name from `git show-branch -a` output.
///
/// The first line carrying a `*` (a commit on the current branch) whose
/// bracketed branch name is not the current branch names the parent.
pub fn parse_parent(output: &str, curr: &str) -> Option<String> {
    let curr_tail = format!("[{curr}");
    for line in output.lines() {
        let cut = match line.find(']') {
            Some(index) => &line[..index],
            None => line,
        };
        if !cut.contains('*') || cut.ends_with(curr_tail.as_str()) {
            continue;
        }
        if let Some(open) = cut.find('[') {
            return Some(cut[open + 1..].trim().to_owned());
        }
    }

    None
}

/// Resolve a symbolic branch name (`CURR`, `PREV`, `PARENT`, `-`) to a
/// real one. Other names pass through untouched.
pub fn resolve_branch(git: &Git, name: &str) -> Result<String> {
    let resolved = match name {
        "CURR" => current_branch(git)?,
        "PREV" | "-" => previous_branch(git)?,
        "PARENT" => parent_branch(git)?,
        _ => name.to_owned(),
    };
    debug!("resolved branch {name} -> {resolved}");

    Ok(resolved)
}

/// Resolve a branch argument, keeping previous-branch spellings as the
/// literal `-` that git-checkout understands natively.
pub fn resolve_except_prev(git: &Git, name: Option<&str>) -> Result<String> {
    match name {
        None | Some("-") | Some("PREV") => Ok("-".to_owned()),
        Some(other) => resolve_branch(git, other),
    }
}

/// Expand `github:`/`gitlab:` shorthand into an SSH clone URL. Any other
/// URL passes through untouched.
///
/// # Errors
///
/// - Return [`ResolveError::InvalidRepositoryUrl`] for shorthand that does
///   not match `host:user/project`.
pub fn resolve_repository_url(url: &str) -> Result<String> {
    static SHORTHAND: OnceLock<Regex> = OnceLock::new();
    let pattern = SHORTHAND.get_or_init(|| {
        Regex::new(r"^(github|gitlab):(?://)?([^/]+)/([^/]+)$").expect("valid regex")
    });

    if !url.starts_with("github:") && !url.starts_with("gitlab:") {
        return Ok(url.to_owned());
    }

    let captures = pattern
        .captures(url)
        .ok_or_else(|| ResolveError::InvalidRepositoryUrl(url.to_owned()))?;
    let (host, user, project) = (&captures[1], &captures[2], &captures[3]);

    Ok(format!("git@{host}.com:{user}/{project}.git"))
}

/// Remote repository configured for a branch, if any.
pub fn remote_of_branch(git: &Git, branch: &str) -> Result<Option<String>> {
    let pattern = format!("^branch\\.{}\\.remote", regex::escape(branch));
    let output = git.capture(["config", "--get-regexp", pattern.as_str()])?;

    Ok(output
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(ToOwned::to_owned)
        .next())
}

/// Whether two revisions point at the same commit.
pub fn same_commit(git: &Git, a: &str, b: &str) -> Result<bool> {
    let output = git.capture(["rev-parse", a, b])?;
    let ids: Vec<&str> = output.split_whitespace().collect();

    Ok(ids.len() == 2 && ids[0] == ids[1])
}

/// Name resolution error types.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Shorthand repository URL does not match `host:user/project`.
    #[error("Invalid repository URL: {0}")]
    InvalidRepositoryUrl(String),

    /// No parent branch could be recovered from the topology.
    #[error("Cannot determine parent branch.")]
    NoParentBranch,

    /// Underlying git capture failed.
    #[error(transparent)]
    Runner(#[from] RunnerError),
}

/// Friendly result alias :3
pub type Result<T, E = ResolveError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn github_shorthand_expands_to_ssh_url() {
        assert_eq!(
            resolve_repository_url("github:user1/repo1").unwrap(),
            "git@github.com:user1/repo1.git"
        );
        assert_eq!(
            resolve_repository_url("github://user1/repo1").unwrap(),
            "git@github.com:user1/repo1.git"
        );
        assert_eq!(
            resolve_repository_url("gitlab:user1/repo1").unwrap(),
            "git@gitlab.com:user1/repo1.git"
        );
    }

    #[test]
    fn other_urls_pass_through() {
        assert_eq!(
            resolve_repository_url("https://example.org/foo.git").unwrap(),
            "https://example.org/foo.git"
        );
        assert_eq!(
            resolve_repository_url("git@example.org:foo/bar.git").unwrap(),
            "git@example.org:foo/bar.git"
        );
    }

    #[test]
    fn malformed_shorthand_is_an_error() {
        let error = resolve_repository_url("github:only-user").unwrap_err();
        assert!(matches!(error, ResolveError::InvalidRepositoryUrl(_)));

        let error = resolve_repository_url("gitlab:a/b/c").unwrap_err();
        assert!(matches!(error, ResolveError::InvalidRepositoryUrl(_)));
    }

    #[test]
    fn parent_is_first_starred_line_of_another_branch() {
        let output = indoc! {"
            ! [main] add README
             * [topic] work in progress
            --
             * [topic] work in progress
            +* [main] add README
        "};

        assert_eq!(parse_parent(output, "topic"), Some("main".to_owned()));
    }

    #[test]
    fn parent_skips_lines_of_the_current_branch() {
        let output = indoc! {"
            * [main] add README
            --
            * [main] add README
        "};

        assert_eq!(parse_parent(output, "main"), None);
    }
}
