//! Script parser: turns the plain-text story script into a [`Story`].
//!
//! The format is line oriented:
//!
//! ```text
//! 2
//! Coach 0.2 0.6 1.0 1
//! Jadon 1.0 0.3 0.3 1
//!
//! Menu 0 0 0 0
//! 0.The transfer window is open.
//! 1.We need a winger.
//! -2
//! Call Dortmund
//! JadonCall
//! Wait a week
//! Wait
//!
//! JadonCall 1 -2 1 0
//! ...
//! ```
//!
//! The first line holds the character count. Characters follow as
//! whitespace-separated `name r g b a` tokens; whatever is left on the line
//! of the last token is read as the next branch header, which for the usual
//! layout is an empty header and so an empty-named branch. Each branch block
//! is a header (`name dtime dbudget dfan dcoach`), then body lines until a
//! blank line. A body line `<index>.<text>` is dialogue; a line holding a
//! negative number `-n` is followed by `n` pairs of option text and target
//! branch name.

use std::collections::BTreeMap;
use std::ops::Range;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ScriptError, ScriptResult};
use crate::story::{Branch, Character, Line, Rgba, StatDeltas, Story};

/// Read a script file, distinguishing a missing asset from other I/O errors.
pub fn read_source(path: &Path) -> ScriptResult<String> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ScriptError::AssetMissing {
                path: path.to_path_buf(),
            }
        } else {
            ScriptError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Single-pass parser for story scripts.
pub struct ScriptParser<'a> {
    reader: Reader<'a>,
}

impl<'a> ScriptParser<'a> {
    /// Parse a complete script.
    pub fn parse(source: &'a str) -> ScriptResult<Story> {
        let mut parser = Self {
            reader: Reader::new(source),
        };
        let characters = parser.characters()?;
        let branches = parser.branches()?;
        tracing::debug!(
            characters = characters.len(),
            branches = branches.len(),
            "parsed script"
        );
        Ok(Story {
            branches,
            characters,
        })
    }

    fn characters(&mut self) -> ScriptResult<Vec<Character>> {
        let first = self
            .reader
            .next_line()
            .ok_or(ScriptError::MissingCharacterCount)?;
        let count: usize = first.token().parse_as("a character count")?;

        let mut characters = vec![Character::narrator()];

        for found in 0..count {
            let truncated = || ScriptError::TruncatedCharacters {
                expected: count,
                found,
            };
            let name = self.reader.next_token().ok_or_else(truncated)?;
            let mut channels = [0.0f32; 4];
            for channel in &mut channels {
                *channel = self
                    .reader
                    .next_token()
                    .ok_or_else(truncated)?
                    .parse_as("a colour channel")?;
            }
            let [r, g, b, a] = channels;
            characters.push(Character::new(name.text, Rgba::new(r, g, b, a)));
        }

        Ok(characters)
    }

    fn branches(&mut self) -> ScriptResult<BTreeMap<String, Branch>> {
        let mut branches = BTreeMap::new();

        while let Some(header) = self.reader.next_line() {
            let (name, deltas) = parse_header(&header)?;
            let mut branch = Branch::with_deltas(deltas);
            self.body(&name, &mut branch)?;

            tracing::debug!(
                branch = %name,
                lines = branch.lines.len(),
                options = branch.option_texts.len(),
                "parsed branch"
            );
            if branches.insert(name.clone(), branch).is_some() {
                tracing::debug!(branch = %name, "branch redefined, keeping the later block");
            }
        }

        Ok(branches)
    }

    fn body(&mut self, name: &str, branch: &mut Branch) -> ScriptResult<()> {
        while let Some(line) = self.reader.next_line() {
            if line.text.trim().is_empty() {
                break;
            }

            let (index_text, text) = match line.text.find('.') {
                Some(dot) => (&line.text[..dot], &line.text[dot + 1..]),
                None => (line.text, ""),
            };
            let index: i64 = line
                .sub_token(index_text, 0)
                .parse_as("a character index or option count")?;

            match usize::try_from(index) {
                Ok(character) => branch.lines.push(Line::new(character, text)),
                Err(_) => {
                    let expected = usize::try_from(index.unsigned_abs()).unwrap_or(usize::MAX);
                    self.options(name, &line, expected, branch)?;
                }
            }
        }
        Ok(())
    }

    fn options(
        &mut self,
        name: &str,
        count_line: &SourceLine<'a>,
        expected: usize,
        branch: &mut Branch,
    ) -> ScriptResult<()> {
        for found in 0..expected {
            let truncated = || ScriptError::TruncatedOptions {
                branch: name.to_string(),
                line: count_line.number,
                span: count_line.span(),
                expected,
                found,
            };
            let text = self.reader.next_line().ok_or_else(truncated)?;
            let target = self.reader.next_line().ok_or_else(truncated)?;
            branch.option_texts.push(text.text.to_string());
            branch.next_branch_names.push(target.text.to_string());
        }
        Ok(())
    }
}

fn parse_header(header: &SourceLine<'_>) -> ScriptResult<(String, StatDeltas)> {
    if header.text.trim().is_empty() {
        return Ok((String::new(), StatDeltas::default()));
    }

    let tokens = header.tokens();
    let name = tokens[0].text.to_string();
    let delta = |i: usize| -> ScriptResult<i32> {
        match tokens.get(i) {
            Some(token) => token.parse_as("an integer stat delta"),
            None => Err(ScriptError::MalformedToken {
                line: header.number,
                span: header.span().end..header.span().end,
                expected: "an integer stat delta",
                found: String::new(),
            }),
        }
    };

    let deltas = StatDeltas::new(delta(1)?, delta(2)?, delta(3)?, delta(4)?);
    Ok((name, deltas))
}

/// A physical line of the source.
struct SourceLine<'a> {
    /// 1-based line number.
    number: usize,
    /// Byte offset of the line start.
    start: usize,
    /// Line content without the terminator.
    text: &'a str,
}

impl<'a> SourceLine<'a> {
    fn span(&self) -> Range<usize> {
        self.start..self.start + self.text.len()
    }

    /// The whole line, trimmed, as one token.
    fn token(&self) -> Token<'a> {
        self.sub_token(self.text, 0)
    }

    /// A trimmed slice of this line starting `offset` bytes in.
    fn sub_token(&self, slice: &'a str, offset: usize) -> Token<'a> {
        let leading = slice.len() - slice.trim_start().len();
        let text = slice.trim();
        let start = self.start + offset + leading;
        Token {
            text,
            line: self.number,
            span: start..start + text.len(),
        }
    }

    /// Whitespace-separated tokens of this line.
    fn tokens(&self) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut begin = None;
        for (i, c) in self.text.char_indices() {
            match (c.is_whitespace(), begin) {
                (true, Some(b)) => {
                    tokens.push(self.sub_token(&self.text[b..i], b));
                    begin = None;
                }
                (false, None) => begin = Some(i),
                _ => {}
            }
        }
        if let Some(b) = begin {
            tokens.push(self.sub_token(&self.text[b..], b));
        }
        tokens
    }
}

/// A token with its position, for error reporting.
struct Token<'a> {
    text: &'a str,
    line: usize,
    span: Range<usize>,
}

impl Token<'_> {
    fn parse_as<T: FromStr>(&self, expected: &'static str) -> ScriptResult<T> {
        self.text.parse().map_err(|_| ScriptError::MalformedToken {
            line: self.line,
            span: self.span.clone(),
            expected,
            found: self.text.to_string(),
        })
    }
}

/// Sequential reader supporting both whole-line and token extraction.
///
/// Token extraction stops right after the token, so a following
/// [`Reader::next_line`] yields the remainder of that physical line.
struct Reader<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Reader<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
        }
    }

    fn next_line(&mut self) -> Option<SourceLine<'a>> {
        if self.pos >= self.source.len() {
            return None;
        }
        let rest = &self.source[self.pos..];
        let (raw, consumed) = match rest.find('\n') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        let line = SourceLine {
            number: self.line,
            start: self.pos,
            text: raw.strip_suffix('\r').unwrap_or(raw),
        };
        self.pos += consumed;
        self.line += 1;
        Some(line)
    }

    fn next_token(&mut self) -> Option<Token<'a>> {
        let rest = &self.source[self.pos..];
        let skipped = rest.len() - rest.trim_start().len();
        self.line += rest[..skipped].matches('\n').count();
        self.pos += skipped;

        let rest = &self.source[self.pos..];
        if rest.is_empty() {
            return None;
        }
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = Token {
            text: &rest[..len],
            line: self.line,
            span: self.pos..self.pos + len,
        };
        self.pos += len;
        Some(token)
    }
}
