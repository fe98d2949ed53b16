//! Ignore rule matching for tree traversal
//!
//! Two rule sources share the same pattern forms but differ in precedence:
//! user rules from the config document are checked first, the built-in
//! defaults second. Matching is pure string work on the entry's
//! project-relative path and bare name; the matcher never touches the
//! filesystem.

/// Built-in exclusions applied after user rules.
const DEFAULT_RULES: &[&str] = &[
    "node_modules",
    ".git",
    ".next",
    "logs",
    "dist",
    "build",
    "target",
    ".DS_Store",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    "*.pyc",
    "*.pyo",
    "*.log",
    ".vscode",
    ".idea",
];

/// A single parsed ignore rule.
///
/// `*suffix` and `prefix*` are the only wildcard forms; anything else is a
/// literal. Wildcards match against the bare name, literals against the
/// relative path (and, for built-ins, the bare name too).
#[derive(Debug, Clone, PartialEq, Eq)]
enum Rule {
    Literal(String),
    Suffix(String),
    Prefix(String),
}

impl Rule {
    fn parse(raw: &str) -> Self {
        if let Some(rest) = raw.strip_prefix('*') {
            Rule::Suffix(rest.to_string())
        } else if let Some(head) = raw.strip_suffix('*') {
            Rule::Prefix(head.to_string())
        } else {
            Rule::Literal(raw.to_string())
        }
    }

    fn matches_name(&self, name: &str) -> bool {
        match self {
            Rule::Literal(lit) => name == lit,
            Rule::Suffix(suffix) => name.ends_with(suffix.as_str()),
            Rule::Prefix(prefix) => name.starts_with(prefix.as_str()),
        }
    }
}

/// Decides whether a filesystem entry is excluded from the tree.
///
/// Rule sets are fixed for the duration of one run; the built-in defaults
/// are compiled in at construction rather than read from any ambient
/// state.
pub struct IgnoreMatcher {
    user: Vec<Rule>,
    builtin: Vec<Rule>,
}

impl IgnoreMatcher {
    pub fn new(user_rules: &[String]) -> Self {
        Self {
            user: user_rules.iter().map(|r| Rule::parse(r)).collect(),
            builtin: DEFAULT_RULES.iter().map(|r| Rule::parse(r)).collect(),
        }
    }

    /// First matching rule wins; user rules take precedence over built-ins.
    pub fn is_ignored(&self, relative: &str, name: &str) -> bool {
        for rule in &self.user {
            match rule {
                Rule::Literal(lit) => {
                    if relative == lit || subtree_of(relative, lit) {
                        return true;
                    }
                }
                wildcard => {
                    if wildcard.matches_name(name) {
                        return true;
                    }
                }
            }
        }
        for rule in &self.builtin {
            match rule {
                Rule::Literal(lit) => {
                    if relative == lit || name == lit {
                        return true;
                    }
                }
                wildcard => {
                    if wildcard.matches_name(name) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

/// True when `relative` lies inside the subtree rooted at `prefix`.
fn subtree_of(relative: &str, prefix: &str) -> bool {
    relative
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(user: &[&str]) -> IgnoreMatcher {
        let rules: Vec<String> = user.iter().map(|s| s.to_string()).collect();
        IgnoreMatcher::new(&rules)
    }

    #[test]
    fn test_user_exact_match() {
        let m = matcher(&["docs/internal"]);
        assert!(m.is_ignored("docs/internal", "internal"));
        assert!(!m.is_ignored("docs/internal2", "internal2"));
    }

    #[test]
    fn test_user_subtree_match() {
        let m = matcher(&["vendor"]);
        assert!(m.is_ignored("vendor", "vendor"));
        assert!(m.is_ignored("vendor/lib/util.js", "util.js"));
        assert!(!m.is_ignored("vendored/file.js", "file.js"));
    }

    #[test]
    fn test_user_wildcard_suffix() {
        let m = matcher(&["*.bak"]);
        assert!(m.is_ignored("src/old.bak", "old.bak"));
        assert!(!m.is_ignored("src/old.bak.txt", "old.bak.txt"));
    }

    #[test]
    fn test_user_wildcard_prefix() {
        let m = matcher(&["tmp*"]);
        assert!(m.is_ignored("tmp_scratch", "tmp_scratch"));
        assert!(!m.is_ignored("src/not_tmp", "not_tmp"));
    }

    #[test]
    fn test_builtin_name_match_at_any_depth() {
        let m = matcher(&[]);
        assert!(m.is_ignored("node_modules", "node_modules"));
        assert!(m.is_ignored("web/node_modules", "node_modules"));
        assert!(m.is_ignored("dist", "dist"));
        assert!(m.is_ignored(".git", ".git"));
    }

    #[test]
    fn test_builtin_wildcard_match() {
        let m = matcher(&[]);
        assert!(m.is_ignored("src/module.pyc", "module.pyc"));
        assert!(m.is_ignored("run/server.log", "server.log"));
        assert!(!m.is_ignored("src/module.py", "module.py"));
    }

    #[test]
    fn test_user_rules_checked_before_builtin() {
        // Both sources match "build"; either way it is ignored.
        let m = matcher(&["build"]);
        assert!(m.is_ignored("build", "build"));
        assert!(m.is_ignored("build/out.js", "out.js"));
    }

    #[test]
    fn test_not_ignored() {
        let m = matcher(&["build"]);
        assert!(!m.is_ignored("src/main.rs", "main.rs"));
        assert!(!m.is_ignored("README.md", "README.md"));
    }
}
