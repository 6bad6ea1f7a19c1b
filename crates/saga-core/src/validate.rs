//! Static checks on a parsed story.
//!
//! The engine only discovers broken references when the player reaches
//! them. These checks find them up front for script authors.

use std::fmt;

use crate::story::Story;

/// A reference problem found in a story graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryIssue {
    /// An option points at a branch that does not exist.
    DanglingBranch {
        /// Branch holding the option.
        branch: String,
        /// Index of the option within the branch.
        option: usize,
        /// The missing target.
        target: String,
    },
    /// A dialogue line names a character beyond the character table.
    CharacterIndexOutOfRange {
        /// Branch holding the line.
        branch: String,
        /// Index of the line within the branch.
        line: usize,
        /// The out-of-range character index.
        character: usize,
    },
}

impl fmt::Display for StoryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingBranch {
                branch,
                option,
                target,
            } => write!(
                f,
                "branch \"{branch}\" option {}: target \"{target}\" does not exist",
                option + 1
            ),
            Self::CharacterIndexOutOfRange {
                branch,
                line,
                character,
            } => write!(
                f,
                "branch \"{branch}\" line {}: character {character} is not defined",
                line + 1
            ),
        }
    }
}

impl Story {
    /// Find every dangling branch reference and bad character index.
    ///
    /// Issues are ordered by branch name, then by position in the branch.
    pub fn validate(&self) -> Vec<StoryIssue> {
        let mut issues = Vec::new();
        for (name, branch) in &self.branches {
            for (i, line) in branch.lines.iter().enumerate() {
                if line.character >= self.characters.len() {
                    issues.push(StoryIssue::CharacterIndexOutOfRange {
                        branch: name.clone(),
                        line: i,
                        character: line.character,
                    });
                }
            }
            for (i, target) in branch.next_branch_names.iter().enumerate() {
                if !self.branches.contains_key(target) {
                    issues.push(StoryIssue::DanglingBranch {
                        branch: name.clone(),
                        option: i,
                        target: target.clone(),
                    });
                }
            }
        }
        issues
    }
}
