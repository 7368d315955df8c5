//! Named `.stignore` templates applied to freshly paired folders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IgnoreTemplate {
    #[default]
    NodePython,
    Node,
    Python,
}

const COMMON: &[&str] = &[
    "(?d).DS_Store",
    "(?d)Thumbs.db",
    "(?d)._*",
    "*.swp",
    "*.tmp",
    ".idea",
    ".vscode",
    ".env",
    ".env.*",
];

const NODE: &[&str] = &[
    "node_modules",
    ".next",
    ".nuxt",
    ".turbo",
    ".parcel-cache",
    "dist",
    "build",
    "coverage",
    "npm-debug.log*",
    "yarn-error.log*",
    "pnpm-debug.log*",
];

const PYTHON: &[&str] = &[
    "__pycache__",
    "*.pyc",
    "*.pyo",
    ".venv",
    "venv",
    ".mypy_cache",
    ".pytest_cache",
    ".ruff_cache",
    ".tox",
    "*.egg-info",
    "dist",
    "build",
];

impl IgnoreTemplate {
    pub const ALL: [IgnoreTemplate; 3] = [
        IgnoreTemplate::NodePython,
        IgnoreTemplate::Node,
        IgnoreTemplate::Python,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IgnoreTemplate::NodePython => "nodepython",
            IgnoreTemplate::Node => "node",
            IgnoreTemplate::Python => "python",
        }
    }

    fn sections(self) -> &'static [&'static [&'static str]] {
        match self {
            IgnoreTemplate::NodePython => &[COMMON, NODE, PYTHON],
            IgnoreTemplate::Node => &[COMMON, NODE],
            IgnoreTemplate::Python => &[COMMON, PYTHON],
        }
    }
}

impl fmt::Display for IgnoreTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IgnoreTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IgnoreTemplate::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown ignore template '{s}' (expected nodepython, node or python)")
            })
    }
}

/// Ordered ignore patterns for `template`, `.git` appended when asked.
/// Duplicates keep their first position.
pub fn default_ignore(template: IgnoreTemplate, ignore_git: bool) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let git: &[&str] = if ignore_git { &[".git"] } else { &[] };
    for pattern in template.sections().iter().copied().flatten().chain(git) {
        if !lines.iter().any(|existing| existing == pattern) {
            lines.push((*pattern).to_string());
        }
    }
    lines
}
