//! The read-only view of the buffer the operations query.
//!
//! [`ModelView`] is what the engine consumes. [`RopeModel`] implements it over
//! a [`ropey::Rope`] snapshot, with a plaintext bracket matcher and
//! caller-supplied tokens, and can apply an [`EditCommand`] to itself.

use std::{
  borrow::Cow,
  collections::HashMap,
};

use ropey::Rope;
use smallvec::SmallVec;
use the_core::chars::{
  char_is_line_ending,
  first_non_whitespace_index,
};
use thiserror::Error;

use crate::{
  command::EditCommand,
  position::{
    Position,
    Range,
  },
  selection::Selection,
};

pub const DEFAULT_BRACKETS: &[(char, char)] = &[('(', ')'), ('[', ']'), ('{', '}')];

/// Classification a tokenizer gives to a span of a line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  #[default]
  Other,
  Comment,
  String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
  /// 0-based char offset where the token starts.
  pub start: usize,
  pub kind:  TokenKind,
}

impl Token {
  pub fn new(start: usize, kind: TokenKind) -> Self {
    Self { start, kind }
  }
}

/// A line's text with its token classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTokens {
  text:   String,
  tokens: Vec<Token>,
}

impl LineTokens {
  pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
    Self {
      text: text.into(),
      tokens,
    }
  }

  /// A line that is one `Other` token.
  pub fn plain(text: impl Into<String>) -> Self {
    Self::new(text, vec![Token::new(0, TokenKind::Other)])
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn tokens(&self) -> &[Token] {
    &self.tokens
  }

  /// Index of the token covering the 0-based char `offset`.
  pub fn token_index_at(&self, offset: usize) -> Option<usize> {
    self.tokens.iter().rposition(|token| token.start <= offset)
  }

  pub fn kind_at(&self, offset: usize) -> Option<TokenKind> {
    self
      .token_index_at(offset)
      .map(|index| self.tokens[index].kind)
  }
}

/// Read-only queries over the buffer. Lines and columns are 1-based.
pub trait ModelView {
  fn line_count(&self) -> usize;

  /// Line text without its terminator.
  fn line_content(&self, line: usize) -> Cow<'_, str>;

  fn line_tokens(&self, line: usize) -> LineTokens;

  /// Nearest unmatched open bracket of `bracket`'s kind before `position`.
  /// `bracket` may be either side of the pair.
  fn find_matching_bracket_up(&self, bracket: char, position: Position) -> Option<Range>;

  fn line_length(&self, line: usize) -> usize {
    self.line_content(line).chars().count()
  }

  fn line_min_column(&self, _line: usize) -> usize {
    1
  }

  fn line_max_column(&self, line: usize) -> usize {
    self.line_length(line) + 1
  }

  /// Column of the first char that is not a space or tab, `None` when the
  /// line is blank.
  fn line_first_non_whitespace_column(&self, line: usize) -> Option<usize> {
    first_non_whitespace_index(&self.line_content(line)).map(|index| index + 1)
  }
}

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
  #[error("position {0} is outside the buffer")]
  PositionOutOfBounds(Position),
}

/// A [`ModelView`] over a rope snapshot.
#[derive(Debug, Clone)]
pub struct RopeModel {
  text:     Rope,
  tokens:   HashMap<usize, Vec<Token>>,
  brackets: SmallVec<[(char, char); 4]>,
}

impl RopeModel {
  pub fn new(text: &str) -> Self {
    Self {
      text:     Rope::from(text),
      tokens:   HashMap::new(),
      brackets: DEFAULT_BRACKETS.iter().copied().collect(),
    }
  }

  pub fn with_brackets(mut self, brackets: impl IntoIterator<Item = (char, char)>) -> Self {
    self.brackets = brackets.into_iter().collect();
    self
  }

  /// Overrides the tokens reported for `line`.
  pub fn set_line_tokens(&mut self, line: usize, tokens: Vec<Token>) {
    self.tokens.insert(line, tokens);
  }

  pub fn text(&self) -> &Rope {
    &self.text
  }

  /// Char index of `pos`, rejecting positions past a line's end.
  pub fn pos_to_char(&self, pos: Position) -> Result<usize> {
    if pos.line == 0 || pos.column == 0 || pos.line > self.line_count() {
      return Err(ModelError::PositionOutOfBounds(pos));
    }
    if pos.column > self.line_max_column(pos.line) {
      return Err(ModelError::PositionOutOfBounds(pos));
    }
    Ok(self.text.line_to_char(pos.line - 1) + pos.column - 1)
  }

  pub fn char_to_pos(&self, char_idx: usize) -> Position {
    let char_idx = char_idx.min(self.text.len_chars());
    let line = self.text.char_to_line(char_idx);
    Position::new(line + 1, char_idx - self.text.line_to_char(line) + 1)
  }

  /// Applies the command's edits and returns the selection it leaves.
  ///
  /// Edits are applied back to front so earlier positions stay valid; tokens
  /// set with [`RopeModel::set_line_tokens`] are dropped.
  pub fn apply(&mut self, command: &EditCommand) -> Result<Selection> {
    let edits = command.edits();
    let mut spans = Vec::with_capacity(edits.len());
    for edit in &edits {
      spans.push((
        self.pos_to_char(edit.range.start)?,
        self.pos_to_char(edit.range.end)?,
        edit.text.as_str(),
      ));
    }

    for (from, to, text) in spans.into_iter().rev() {
      self.text.remove(from..to);
      self.text.insert(from, text);
    }
    self.tokens.clear();

    Ok(command.cursor_after())
  }
}

impl ModelView for RopeModel {
  fn line_count(&self) -> usize {
    self.text.len_lines()
  }

  fn line_content(&self, line: usize) -> Cow<'_, str> {
    let Some(slice) = line
      .checked_sub(1)
      .and_then(|line| self.text.get_line(line))
    else {
      return Cow::Borrowed("");
    };

    let content: Cow<'_, str> = slice.into();
    match content {
      Cow::Borrowed(s) => Cow::Borrowed(s.trim_end_matches(char_is_line_ending)),
      Cow::Owned(mut s) => {
        let len = s.trim_end_matches(char_is_line_ending).len();
        s.truncate(len);
        Cow::Owned(s)
      },
    }
  }

  fn line_tokens(&self, line: usize) -> LineTokens {
    let text = self.line_content(line).into_owned();
    match self.tokens.get(&line) {
      Some(tokens) => LineTokens::new(text, tokens.clone()),
      None => LineTokens::plain(text),
    }
  }

  fn find_matching_bracket_up(&self, bracket: char, position: Position) -> Option<Range> {
    let &(open, close) = self
      .brackets
      .iter()
      .find(|&&(open, close)| open == bracket || close == bracket)?;
    let end = self.pos_to_char(position).ok()?;

    let mut depth = 0usize;
    for idx in (0..end).rev() {
      let ch = self.text.char(idx);
      if ch == close {
        depth += 1;
      } else if ch == open {
        if depth == 0 {
          let start = self.char_to_pos(idx);
          return Some(Range::new(start, start.offset(0, 1)));
        }
        depth -= 1;
      }
    }

    None
  }
}
