use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Kinds of destructive operations that need an extra confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DangerousOp {
    HardReset,
    ForceClean,
    ForcePush,
    InteractiveRebase,
    ForceBranchDelete,
    TagDelete,
    RecursiveForceDelete,
    HistoryFilter,
}

impl DangerousOp {
    /// Short human-readable description shown in the confirmation prompt
    pub fn description(&self) -> &'static str {
        match self {
            DangerousOp::HardReset => "discards uncommitted changes (hard reset)",
            DangerousOp::ForceClean => "permanently deletes untracked files",
            DangerousOp::ForcePush => "overwrites remote history (force push)",
            DangerousOp::InteractiveRebase => "rewrites commit history (interactive rebase)",
            DangerousOp::ForceBranchDelete => "deletes a branch even if it is unmerged",
            DangerousOp::TagDelete => "deletes a tag",
            DangerousOp::RecursiveForceDelete => "recursively deletes files without asking",
            DangerousOp::HistoryFilter => "rewrites the entire repository history",
        }
    }
}

impl fmt::Display for DangerousOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Patterns are checked in order; the first match wins.
const DANGER_PATTERNS: &[(DangerousOp, &str)] = &[
    (DangerousOp::HardReset, r"\bgit\s+reset\b.*\s--hard\b"),
    (
        DangerousOp::ForceClean,
        r"\bgit\s+clean\b.*\s(-[A-Za-z]*f[A-Za-z]*\b|--force\b)",
    ),
    (
        DangerousOp::ForcePush,
        r"\bgit\s+push\b.*\s(-[A-Za-z]*f[A-Za-z]*\b|--force\b|--force-with-lease\b)",
    ),
    (
        DangerousOp::InteractiveRebase,
        r"\bgit\s+rebase\b.*\s(-i\b|--interactive\b)",
    ),
    (
        DangerousOp::ForceBranchDelete,
        concat!(
            r"\bgit\s+branch\b.*\s(",
            r"-[A-Za-z]*D[A-Za-z]*",
            r"|-[A-Za-z]*(d[A-Za-z]*f|f[A-Za-z]*d)[A-Za-z]*",
            r"|(-[A-Za-z]*d[A-Za-z]*|--delete)\b.*\s(-[A-Za-z]*f[A-Za-z]*|--force)",
            r"|(-[A-Za-z]*f[A-Za-z]*|--force)\b.*\s(-[A-Za-z]*d[A-Za-z]*|--delete)",
            r")\b",
        ),
    ),
    (DangerousOp::TagDelete, r"\bgit\s+tag\b.*\s(-d\b|--delete\b)"),
    (
        DangerousOp::RecursiveForceDelete,
        concat!(
            r"\brm\s+(.*\s)?(",
            r"-[A-Za-z]*([rR][A-Za-z]*f|f[A-Za-z]*[rR])[A-Za-z]*",
            r"|(-[A-Za-z]*[rR][A-Za-z]*|--recursive)\b.*\s(-[A-Za-z]*f[A-Za-z]*|--force)",
            r"|(-[A-Za-z]*f[A-Za-z]*|--force)\b.*\s(-[A-Za-z]*[rR][A-Za-z]*|--recursive)",
            r")\b",
        ),
    ),
    (
        DangerousOp::HistoryFilter,
        r"\bgit\s+(filter-branch|filter-repo)\b",
    ),
];

struct DangerRule {
    op: DangerousOp,
    pattern: Regex,
}

static RULES: OnceLock<Vec<DangerRule>> = OnceLock::new();

fn rules() -> &'static [DangerRule] {
    RULES.get_or_init(|| {
        DANGER_PATTERNS
            .iter()
            .map(|(op, pattern)| DangerRule {
                op: *op,
                pattern: Regex::new(pattern).expect("danger pattern must compile"),
            })
            .collect()
    })
}

/// Matches commands against the fixed set of destructive patterns.
///
/// This is advisory: a match only gates an extra confirmation, it never
/// blocks execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct DangerClassifier;

impl DangerClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Return the first dangerous operation the command matches, if any
    pub fn classify(&self, command: &str) -> Option<DangerousOp> {
        rules()
            .iter()
            .find(|rule| rule.pattern.is_match(command))
            .map(|rule| rule.op)
    }

    pub fn is_dangerous(&self, command: &str) -> bool {
        self.classify(command).is_some()
    }
}

/// Shorthand for `DangerClassifier::new().is_dangerous(command)`
pub fn is_dangerous(command: &str) -> bool {
    DangerClassifier::new().is_dangerous(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_reset_detection() {
        let classifier = DangerClassifier::new();
        assert_eq!(
            classifier.classify("git reset --hard HEAD~1"),
            Some(DangerousOp::HardReset)
        );
        assert!(is_dangerous("git reset --hard HEAD~1"));
    }

    #[test]
    fn test_safe_commands() {
        for cmd in [
            "git status",
            "git log --oneline",
            "git reset HEAD file.txt",
            "git push -u origin main",
            "git push origin main",
            "git clean -n",
            "git rebase main",
            "git branch -d merged-feature",
            "git tag v1.0.0",
            "gh pr create --fill",
        ] {
            assert!(!is_dangerous(cmd), "should be safe: {}", cmd);
        }
    }

    #[test]
    fn test_force_clean_detection() {
        let classifier = DangerClassifier::new();
        assert_eq!(classifier.classify("git clean -fd"), Some(DangerousOp::ForceClean));
        assert_eq!(classifier.classify("git clean -xdf"), Some(DangerousOp::ForceClean));
        assert_eq!(classifier.classify("git clean --force"), Some(DangerousOp::ForceClean));
    }

    #[test]
    fn test_force_push_detection() {
        let classifier = DangerClassifier::new();
        assert_eq!(
            classifier.classify("git push --force origin main"),
            Some(DangerousOp::ForcePush)
        );
        assert_eq!(
            classifier.classify("git push -f origin main"),
            Some(DangerousOp::ForcePush)
        );
        assert_eq!(
            classifier.classify("git push --force-with-lease"),
            Some(DangerousOp::ForcePush)
        );
    }

    #[test]
    fn test_interactive_rebase_detection() {
        let classifier = DangerClassifier::new();
        assert_eq!(
            classifier.classify("git rebase -i HEAD~3"),
            Some(DangerousOp::InteractiveRebase)
        );
        assert_eq!(
            classifier.classify("git rebase --interactive main"),
            Some(DangerousOp::InteractiveRebase)
        );
    }

    #[test]
    fn test_forced_branch_delete_detection() {
        let classifier = DangerClassifier::new();
        assert_eq!(
            classifier.classify("git branch -D feature"),
            Some(DangerousOp::ForceBranchDelete)
        );
        assert_eq!(
            classifier.classify("git branch --delete --force feature"),
            Some(DangerousOp::ForceBranchDelete)
        );

        for command in [
            "git branch -d -f feature",
            "git branch -d --force feature",
            "git branch --delete -f feature",
            "git branch -f -d feature",
            "git branch --force --delete feature",
            "git branch -df feature",
        ] {
            assert_eq!(
                classifier.classify(command),
                Some(DangerousOp::ForceBranchDelete),
                "{}",
                command
            );
        }

        assert!(!is_dangerous("git branch -d merged-feature"));
        assert!(!is_dangerous("git branch -f topic origin/main"));
    }

    #[test]
    fn test_tag_delete_detection() {
        let classifier = DangerClassifier::new();
        assert_eq!(classifier.classify("git tag -d v1.0"), Some(DangerousOp::TagDelete));
        assert_eq!(
            classifier.classify("git tag --delete v1.0"),
            Some(DangerousOp::TagDelete)
        );
    }

    #[test]
    fn test_recursive_delete_detection() {
        let classifier = DangerClassifier::new();
        assert_eq!(
            classifier.classify("rm -rf build"),
            Some(DangerousOp::RecursiveForceDelete)
        );
        assert_eq!(
            classifier.classify("git rm -rf --cached vendor"),
            Some(DangerousOp::RecursiveForceDelete)
        );
        assert_eq!(
            classifier.classify("rm -fr build"),
            Some(DangerousOp::RecursiveForceDelete)
        );
        assert!(!is_dangerous("git rm --cached secrets.env"));

        for command in [
            "rm -R -f build",
            "rm -Rf build",
            "rm -r --force build",
            "rm --recursive --force build",
            "rm --force --recursive build",
            "rm -f -r build",
            "rm -v -r -f build",
        ] {
            assert_eq!(
                classifier.classify(command),
                Some(DangerousOp::RecursiveForceDelete),
                "{}",
                command
            );
        }

        assert!(!is_dangerous("rm -r build"));
        assert!(!is_dangerous("rm -f notes.txt"));
        assert!(!is_dangerous("rm -r my-folder-final"));
    }

    #[test]
    fn test_history_filter_detection() {
        let classifier = DangerClassifier::new();
        assert_eq!(
            classifier.classify("git filter-branch --tree-filter 'rm file' HEAD"),
            Some(DangerousOp::HistoryFilter)
        );
        assert_eq!(
            classifier.classify("git filter-repo --path secrets --invert-paths"),
            Some(DangerousOp::HistoryFilter)
        );
    }

    #[test]
    fn test_description_is_displayed() {
        assert!(DangerousOp::ForcePush.to_string().contains("force push"));
    }
}
