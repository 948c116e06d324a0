//! Workspace identity resolution.
//!
//! Worktree checkouts are named after their issue key (expected layout:
//! `~/.worktrees/<repo>/<KEY-123>/...`), so a workspace is identified by
//! scanning its path for an issue-key-shaped segment. Checkouts without one
//! are "main" checkouts and get a `<repo>-<branch>` identifier instead,
//! qualified with the repo name precisely so two different repositories on
//! `master` never collide in the status store.
//!
//! Issue-key matching is kept pure (segments in, identifier out) and
//! separate from directory walking, with the scan order an explicit option:
//! the status dispatcher scans root-to-leaf while the plan-posting hook
//! scans leaf-to-root, and the two orders genuinely disagree on paths that
//! contain more than one key-shaped segment (a repo itself named `MY-5`
//! holding a worktree `STA-123`).

use std::path::Path;

use crate::git;

/// Direction in which path segments are scanned for an issue key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOrder {
    /// First match walking from the path root toward the leaf.
    RootToLeaf,
    /// First match walking from the leaf toward the path root.
    LeafToRoot,
}

/// Return `true` if `segment` is shaped like an issue key.
///
/// An issue key splits once on the first hyphen into an all-uppercase
/// alphabetic prefix of length ≥ 2 and a non-empty numeric suffix
/// (`STA-123`, `ABC-45`). Lowercase prefixes (`sta-123`), single-letter
/// prefixes (`X-99`), and non-numeric suffixes (`STA-12a`, `STA-12-3`) do
/// not qualify.
pub fn is_issue_key(segment: &str) -> bool {
    let Some((prefix, suffix)) = segment.split_once('-') else {
        return false;
    };
    prefix.len() >= 2
        && prefix.chars().all(|c| c.is_ascii_uppercase())
        && !suffix.is_empty()
        && suffix.chars().all(|c| c.is_ascii_digit())
}

/// Find the first issue-key-shaped segment in `segments`, honoring `order`.
pub fn find_issue_key<'a, I>(segments: I, order: ScanOrder) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: DoubleEndedIterator,
{
    let mut iter = segments.into_iter();
    match order {
        ScanOrder::RootToLeaf => iter.find(|s| is_issue_key(s)),
        ScanOrder::LeafToRoot => iter.rev().find(|s| is_issue_key(s)),
    }
}

/// Scan a filesystem path for an issue key.
pub fn issue_key_from_path(path: &Path, order: ScanOrder) -> Option<String> {
    let segments: Vec<&str> = path
        .iter()
        .filter_map(|s| s.to_str())
        .filter(|s| !s.is_empty() && *s != "/")
        .collect();
    find_issue_key(segments, order).map(str::to_string)
}

/// Compose the identifier for a main (non-issue) checkout.
///
/// `<repo>-<branch>` when both are known, the bare branch when only the
/// branch is known, and the `"unknown"` sentinel otherwise. A bare branch
/// name is never used when a repo name is available — that is what keeps
/// two repos both on `master` apart in the store.
pub fn main_checkout_name(branch: Option<&str>, repo: Option<&str>) -> String {
    match (branch, repo) {
        (Some(branch), Some(repo)) => format!("{repo}-{branch}"),
        (Some(branch), None) => branch.to_string(),
        (None, _) => "unknown".to_string(),
    }
}

/// Resolve the workspace identifier for `cwd`.
///
/// Issue-key scan first (root-to-leaf, matching the historical status-hook
/// behavior), then git-derived `<repo>-<branch>` naming. Never fails: any
/// git degradation falls through the chain and bottoms out at `"unknown"`.
pub fn workspace_name(cwd: &Path) -> String {
    if let Some(key) = issue_key_from_path(cwd, ScanOrder::RootToLeaf) {
        return key;
    }

    let branch = git::current_branch(cwd);
    let repo = git::toplevel_basename(cwd);
    main_checkout_name(branch.as_deref(), repo.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn recognizes_issue_key_shapes() {
        assert!(is_issue_key("STA-123"));
        assert!(is_issue_key("ABC-45"));
        assert!(is_issue_key("LONGPREFIX-1"));
    }

    #[test]
    fn rejects_lowercase_and_short_prefixes() {
        assert!(!is_issue_key("sta-123"));
        assert!(!is_issue_key("X-99"));
        assert!(!is_issue_key("Sta-123"));
    }

    #[test]
    fn rejects_non_numeric_suffixes() {
        assert!(!is_issue_key("STA-12a"));
        assert!(!is_issue_key("STA-12-3"));
        assert!(!is_issue_key("STA-"));
        assert!(!is_issue_key("STA"));
        assert!(!is_issue_key(""));
    }

    #[test]
    fn single_key_found_regardless_of_scan_order() {
        let path = PathBuf::from("/home/user/.worktrees/stardust-labs/STA-123/src");
        assert_eq!(
            issue_key_from_path(&path, ScanOrder::RootToLeaf).as_deref(),
            Some("STA-123")
        );
        assert_eq!(
            issue_key_from_path(&path, ScanOrder::LeafToRoot).as_deref(),
            Some("STA-123")
        );
    }

    #[test]
    fn scan_orders_disagree_on_paths_with_two_keys() {
        // A repo named like an issue key holding an issue worktree: the two
        // call-site policies must pick different winners by construction.
        let path = PathBuf::from("/home/user/.worktrees/MY-5/STA-123");
        assert_eq!(
            issue_key_from_path(&path, ScanOrder::RootToLeaf).as_deref(),
            Some("MY-5")
        );
        assert_eq!(
            issue_key_from_path(&path, ScanOrder::LeafToRoot).as_deref(),
            Some("STA-123")
        );
    }

    #[test]
    fn no_key_in_plain_paths() {
        let path = PathBuf::from("/home/user/projects/stardust-labs");
        assert_eq!(issue_key_from_path(&path, ScanOrder::RootToLeaf), None);
        assert_eq!(issue_key_from_path(&path, ScanOrder::LeafToRoot), None);
    }

    #[test]
    fn main_checkout_prefers_repo_qualified_name() {
        assert_eq!(
            main_checkout_name(Some("master"), Some("stardust-labs")),
            "stardust-labs-master"
        );
    }

    #[test]
    fn main_checkout_falls_back_to_bare_branch() {
        assert_eq!(main_checkout_name(Some("master"), None), "master");
    }

    #[test]
    fn main_checkout_bottoms_out_at_unknown() {
        assert_eq!(main_checkout_name(None, None), "unknown");
        assert_eq!(main_checkout_name(None, Some("stardust-labs")), "unknown");
    }

    #[test]
    fn workspace_name_outside_git_is_unknown() {
        // A temp dir has no issue key in its path and is not a git repo
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(workspace_name(dir.path()), "unknown");
    }

    #[test]
    fn workspace_name_uses_issue_key_without_touching_git() {
        let dir = tempfile::tempdir().unwrap();
        let worktree = dir.path().join("STA-777").join("deep").join("nested");
        std::fs::create_dir_all(&worktree).unwrap();
        assert_eq!(workspace_name(&worktree), "STA-777");
    }
}
