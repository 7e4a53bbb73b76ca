//! Language rules: what Enter does at a position, whether an opener should
//! auto-close, and what an electric character triggers.
//!
//! [`LanguageRules`] is the seam to the language registry. [`BracketRules`]
//! is the stock implementation for bracket-structured languages.

use smallvec::{
  SmallVec,
  smallvec,
};
use the_core::chars::{
  char_slice,
  is_blank,
  leading_whitespace,
};
use thiserror::Error;

use crate::{
  Tendril,
  model::{
    LineTokens,
    ModelView,
    TokenKind,
  },
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum IndentAction {
  #[default]
  None,
  Indent,
  /// Expand `{|}` into three lines: opener, indented caret line, closer.
  IndentOutdent,
  Outdent,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnterAction {
  pub indent_action: IndentAction,
  /// Text placed after the indentation on the new line.
  pub append_text:   Tendril,
}

impl EnterAction {
  pub fn new(indent_action: IndentAction, append_text: impl Into<Tendril>) -> Self {
    Self {
      indent_action,
      append_text: append_text.into(),
    }
  }
}

/// An [`EnterAction`] with the indentation of the line it was computed for.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnterActionResult {
  pub enter_action: EnterAction,
  pub indentation:  String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ElectricAction {
  /// Inserted right after the typed char; the caret stays before it.
  pub append_text:        Option<Tendril>,
  /// Bracket whose opener the current line should align with.
  pub match_open_bracket: Option<char>,
}

pub type Result<T> = std::result::Result<T, RuleError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleError {
  #[error("token {index} starts at {start}, past the previous token or the line end")]
  MalformedTokens { index: usize, start: usize },
  #[error("language rules failed: {0}")]
  Other(String),
}

pub trait LanguageRules {
  /// What pressing Enter at (`line`, `column`) should do. `None` when the
  /// language has nothing to say; callers fall back to a plain line break.
  fn enter_action(
    &self,
    model: &dyn ModelView,
    line: usize,
    column: usize,
  ) -> Option<EnterActionResult>;

  /// Whether typing the opener `ch` at `column` should insert its closer.
  fn should_auto_close_pair(&self, ch: char, tokens: &LineTokens, column: usize) -> Result<bool>;

  fn on_electric_character(
    &self,
    ch: char,
    tokens: &LineTokens,
    column: usize,
  ) -> Result<Option<ElectricAction>>;
}

/// An auto-closing pair that is suppressed inside some token kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoClosePair {
  pub open:   char,
  pub close:  char,
  pub not_in: SmallVec<[TokenKind; 2]>,
}

impl AutoClosePair {
  pub fn new(open: char, close: char) -> Self {
    Self {
      open,
      close,
      not_in: SmallVec::new(),
    }
  }

  pub fn not_in(mut self, kinds: impl IntoIterator<Item = TokenKind>) -> Self {
    self.not_in = kinds.into_iter().collect();
    self
  }

  pub fn is_ok(&self, kind: TokenKind) -> bool {
    !self.not_in.contains(&kind)
  }
}

/// Rules for languages whose blocks are delimited by brackets.
#[derive(Debug, Clone)]
pub struct BracketRules {
  brackets:    SmallVec<[(char, char); 4]>,
  pairs:       Vec<AutoClosePair>,
  doc_comment: Option<(Tendril, Tendril)>,
}

impl Default for BracketRules {
  fn default() -> Self {
    let strings_and_comments = [TokenKind::String, TokenKind::Comment];
    Self {
      brackets:    smallvec![('(', ')'), ('[', ']'), ('{', '}')],
      pairs:       vec![
        AutoClosePair::new('(', ')'),
        AutoClosePair::new('[', ']'),
        AutoClosePair::new('{', '}'),
        AutoClosePair::new('"', '"').not_in(strings_and_comments),
        AutoClosePair::new('\'', '\'').not_in(strings_and_comments),
      ],
      doc_comment: None,
    }
  }
}

impl BracketRules {
  pub fn new(
    brackets: impl IntoIterator<Item = (char, char)>,
    pairs: impl IntoIterator<Item = AutoClosePair>,
  ) -> Self {
    Self {
      brackets:    brackets.into_iter().collect(),
      pairs:       pairs.into_iter().collect(),
      doc_comment: None,
    }
  }

  /// Typing the last char of `open` completes it with `close`, e.g. `/**`
  /// followed by ` */`.
  pub fn with_doc_comment(mut self, open: &str, close: &str) -> Self {
    self.doc_comment = Some((open.into(), close.into()));
    self
  }

  fn closer_of(&self, open: char) -> Option<char> {
    self
      .brackets
      .iter()
      .find_map(|&(o, c)| (o == open).then_some(c))
  }

  fn opener_of(&self, close: char) -> Option<char> {
    self
      .brackets
      .iter()
      .find_map(|&(o, c)| (c == close).then_some(o))
  }

  fn electric_doc_comment(&self, ch: char, before: &str) -> Option<ElectricAction> {
    let (open, close) = self.doc_comment.as_ref()?;
    if open.chars().last() != Some(ch) {
      return None;
    }

    let mut typed = before.trim_start().to_string();
    typed.push(ch);
    (typed == open.as_str()).then(|| {
      ElectricAction {
        append_text:        Some(close.clone()),
        match_open_bracket: None,
      }
    })
  }
}

fn validate_tokens(tokens: &LineTokens) -> Result<()> {
  let len = tokens.text().chars().count();
  let mut prev = None;
  for (index, token) in tokens.tokens().iter().enumerate() {
    let out_of_order = prev.is_some_and(|prev| token.start <= prev);
    if out_of_order || (token.start > 0 && token.start >= len) {
      return Err(RuleError::MalformedTokens {
        index,
        start: token.start,
      });
    }
    prev = Some(token.start);
  }
  Ok(())
}

impl LanguageRules for BracketRules {
  fn enter_action(
    &self,
    model: &dyn ModelView,
    line: usize,
    column: usize,
  ) -> Option<EnterActionResult> {
    let text = model.line_content(line);
    let before = char_slice(&text, 0, column.saturating_sub(1));
    let after = char_slice(&text, column.saturating_sub(1), usize::MAX);

    let indentation = leading_whitespace(before).to_string();
    let last_before = before.trim_end().chars().last();
    let first_after = after.trim_start().chars().next();

    let indent_action = match last_before.and_then(|open| self.closer_of(open)) {
      Some(close) if first_after == Some(close) => IndentAction::IndentOutdent,
      Some(_) => IndentAction::Indent,
      None => IndentAction::None,
    };
    let append_text = match indent_action {
      IndentAction::Indent | IndentAction::IndentOutdent => "\t",
      IndentAction::None | IndentAction::Outdent => "",
    };

    Some(EnterActionResult {
      enter_action: EnterAction::new(indent_action, append_text),
      indentation,
    })
  }

  fn should_auto_close_pair(&self, ch: char, tokens: &LineTokens, column: usize) -> Result<bool> {
    validate_tokens(tokens)?;
    if tokens.tokens().is_empty() {
      return Ok(true);
    }

    let kind = tokens
      .kind_at(column.saturating_sub(2))
      .unwrap_or_default();
    Ok(
      self
        .pairs
        .iter()
        .find(|pair| pair.open == ch)
        .is_none_or(|pair| pair.is_ok(kind)),
    )
  }

  fn on_electric_character(
    &self,
    ch: char,
    tokens: &LineTokens,
    column: usize,
  ) -> Result<Option<ElectricAction>> {
    validate_tokens(tokens)?;
    let before = char_slice(tokens.text(), 0, column.saturating_sub(1));

    if let Some(action) = self.electric_doc_comment(ch, before) {
      return Ok(Some(action));
    }

    let Some(open) = self.opener_of(ch) else {
      return Ok(None);
    };
    if !is_blank(before) {
      return Ok(None);
    }

    Ok(Some(ElectricAction {
      append_text:        None,
      match_open_bracket: Some(open),
    }))
  }
}
