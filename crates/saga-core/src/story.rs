//! The story graph: characters, dialogue lines and branches.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult, ScriptError, ScriptResult};
use crate::script::{ScriptParser, read_source};

/// An RGBA colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Rgba {
    /// Opaque white, the narrator's colour.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Create a colour from its four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Channels scaled to 0-255, truncated toward zero.
    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A speaking character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Display name, empty for the narrator.
    pub name: String,
    /// Colour used for this character's lines.
    pub color: Rgba,
}

impl Character {
    /// Create a character.
    pub fn new(name: impl Into<String>, color: Rgba) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    /// The implicit narrator at index 0.
    pub fn narrator() -> Self {
        Self::new("", Rgba::WHITE)
    }
}

/// One line of dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Index into [`Story::characters`].
    pub character: usize,
    /// The spoken text.
    pub text: String,
}

impl Line {
    /// Create a line spoken by the given character.
    pub fn new(character: usize, text: impl Into<String>) -> Self {
        Self {
            character,
            text: text.into(),
        }
    }
}

/// Stat changes applied when the story enters a branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDeltas {
    /// Weeks that pass.
    pub time: i32,
    /// Change in budget, in millions.
    pub budget: i32,
    /// Change in fan support.
    pub fan: i32,
    /// Change in coach happiness.
    pub coach: i32,
}

impl StatDeltas {
    /// Create a set of deltas.
    pub const fn new(time: i32, budget: i32, fan: i32, coach: i32) -> Self {
        Self {
            time,
            budget,
            fan,
            coach,
        }
    }
}

/// A node in the story graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Dialogue shown when the branch is entered.
    pub lines: Vec<Line>,
    /// Choices offered after the last line.
    pub option_texts: Vec<String>,
    /// Target branch for each choice, parallel to `option_texts`.
    pub next_branch_names: Vec<String>,
    /// Stat changes applied on entering this branch.
    pub deltas: StatDeltas,
}

impl Branch {
    /// Create an empty branch with the given deltas.
    pub fn with_deltas(deltas: StatDeltas) -> Self {
        Self {
            deltas,
            ..Self::default()
        }
    }

    /// Append a dialogue line.
    pub fn with_line(mut self, character: usize, text: impl Into<String>) -> Self {
        self.lines.push(Line::new(character, text));
        self
    }

    /// Append a choice leading to `target`.
    pub fn with_option(mut self, text: impl Into<String>, target: impl Into<String>) -> Self {
        self.option_texts.push(text.into());
        self.next_branch_names.push(target.into());
        self
    }

    /// Whether this branch ends the story (no choices).
    pub fn is_ending(&self) -> bool {
        self.option_texts.is_empty()
    }

    /// Iterate `(display text, target branch)` pairs.
    pub fn options(&self) -> impl Iterator<Item = (&str, &str)> {
        self.option_texts
            .iter()
            .zip(&self.next_branch_names)
            .map(|(text, target)| (text.as_str(), target.as_str()))
    }
}

/// The complete, read-only story graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// All branches keyed by name.
    pub branches: BTreeMap<String, Branch>,
    /// Character table; index 0 is the narrator once a script is parsed.
    pub characters: Vec<Character>,
}

impl Story {
    /// Parse a story from script text.
    pub fn from_source(source: &str) -> ScriptResult<Self> {
        ScriptParser::parse(source)
    }

    /// Load and parse the script at `path`.
    ///
    /// A missing file yields an empty story instead of an error; the engine
    /// then fails on the absent start branch.
    pub fn load(path: &Path) -> ScriptResult<Self> {
        match read_source(path) {
            Ok(source) => Self::from_source(&source),
            Err(ScriptError::AssetMissing { path }) => {
                tracing::warn!(path = %path.display(), "script asset missing, using an empty story");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Look up a branch by name.
    pub fn branch(&self, name: &str) -> EngineResult<&Branch> {
        self.branches
            .get(name)
            .ok_or_else(|| EngineError::DanglingBranch(name.to_string()))
    }

    /// Look up a character by index.
    pub fn character(&self, index: usize) -> EngineResult<&Character> {
        self.characters
            .get(index)
            .ok_or(EngineError::CharacterIndexOutOfRange {
                index,
                len: self.characters.len(),
            })
    }

    /// Format a line as it is shown: speaker name, a space, then the text.
    pub fn render_line(&self, line: &Line) -> EngineResult<String> {
        let speaker = self.character(line.character)?;
        Ok(format!("{} {}", speaker.name, line.text))
    }

    /// Number of branches.
    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    /// Total dialogue lines across all branches.
    pub fn line_count(&self) -> usize {
        self.branches.values().map(|b| b.lines.len()).sum()
    }

    /// Names of branches without choices.
    pub fn endings(&self) -> impl Iterator<Item = &str> {
        self.branches
            .iter()
            .filter(|(_, b)| b.is_ending())
            .map(|(name, _)| name.as_str())
    }
}
