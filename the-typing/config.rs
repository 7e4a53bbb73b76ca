//! Editor and language settings the typing operations read.
//!
//! ```
//! use the_typing::TypingConfig;
//!
//! let config = TypingConfig::from_toml(
//!   r#"
//!   tab-size = 2
//!   insert-spaces = false
//!   electric-chars = ["}"]
//!   "#,
//! )
//! .unwrap();
//! assert_eq!(config.one_indent(), "\t");
//! assert_eq!(config.normalize_indentation("    x"), "\t\tx");
//! ```

use std::collections::{
  HashMap,
  HashSet,
};

use serde::Deserialize;
use the_core::indent::normalize_indentation;
use thiserror::Error;

pub const DEFAULT_AUTO_CLOSING_PAIRS: &[(char, char)] =
  &[('(', ')'), ('[', ']'), ('{', '}'), ('"', '"'), ('\'', '\'')];

pub const DEFAULT_SURROUNDING_PAIRS: &[(char, char)] = &[
  ('(', ')'),
  ('[', ']'),
  ('{', '}'),
  ('"', '"'),
  ('\'', '\''),
  ('`', '`'),
];

pub const DEFAULT_ELECTRIC_CHARS: &[char] = &['}', ']', ')'];

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
  #[error("failed to parse typing config: {0}")]
  Parse(#[from] toml::de::Error),
  #[error("tab size must be at least 1")]
  ZeroTabSize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigRaw {
  tab_size:              usize,
  insert_spaces:         bool,
  auto_closing_brackets: bool,
  auto_closing_pairs:    Vec<(char, char)>,
  surrounding_pairs:     Vec<(char, char)>,
  electric_chars:        Vec<char>,
}

impl Default for ConfigRaw {
  fn default() -> Self {
    Self {
      tab_size:              4,
      insert_spaces:         true,
      auto_closing_brackets: true,
      auto_closing_pairs:    DEFAULT_AUTO_CLOSING_PAIRS.to_vec(),
      surrounding_pairs:     DEFAULT_SURROUNDING_PAIRS.to_vec(),
      electric_chars:        DEFAULT_ELECTRIC_CHARS.to_vec(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingConfig {
  tab_size:                 usize,
  insert_spaces:            bool,
  one_indent:               String,
  auto_closing_brackets:    bool,
  auto_closing_pairs_open:  HashMap<char, char>,
  auto_closing_pairs_close: HashMap<char, char>,
  surrounding_pairs:        HashMap<char, char>,
  electric_chars:           HashSet<char>,
}

impl Default for TypingConfig {
  fn default() -> Self {
    Self::new(4, true)
  }
}

impl TypingConfig {
  /// Default pairs and electric chars with the given indentation style.
  /// A zero `tab_size` is raised to 1.
  pub fn new(tab_size: usize, insert_spaces: bool) -> Self {
    let tab_size = tab_size.max(1);
    Self {
      tab_size,
      insert_spaces,
      one_indent: one_indent(tab_size, insert_spaces),
      auto_closing_brackets: true,
      auto_closing_pairs_open: DEFAULT_AUTO_CLOSING_PAIRS.iter().copied().collect(),
      auto_closing_pairs_close: DEFAULT_AUTO_CLOSING_PAIRS
        .iter()
        .map(|&(open, close)| (close, open))
        .collect(),
      surrounding_pairs: DEFAULT_SURROUNDING_PAIRS.iter().copied().collect(),
      electric_chars: DEFAULT_ELECTRIC_CHARS.iter().copied().collect(),
    }
  }

  pub fn from_toml(source: &str) -> Result<Self> {
    let raw: ConfigRaw = toml::from_str(source)?;
    Self::try_from(raw)
  }

  pub fn with_auto_closing_brackets(mut self, enabled: bool) -> Self {
    self.auto_closing_brackets = enabled;
    self
  }

  pub fn with_auto_closing_pairs(mut self, pairs: impl IntoIterator<Item = (char, char)>) -> Self {
    self.auto_closing_pairs_open.clear();
    self.auto_closing_pairs_close.clear();
    for (open, close) in pairs {
      self.auto_closing_pairs_open.insert(open, close);
      self.auto_closing_pairs_close.insert(close, open);
    }
    self
  }

  pub fn with_surrounding_pairs(mut self, pairs: impl IntoIterator<Item = (char, char)>) -> Self {
    self.surrounding_pairs = pairs.into_iter().collect();
    self
  }

  pub fn with_electric_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
    self.electric_chars = chars.into_iter().collect();
    self
  }

  pub fn tab_size(&self) -> usize {
    self.tab_size
  }

  pub fn insert_spaces(&self) -> bool {
    self.insert_spaces
  }

  /// The text of one indentation level: `tab_size` spaces or a tab.
  pub fn one_indent(&self) -> &str {
    &self.one_indent
  }

  pub fn auto_closing_brackets(&self) -> bool {
    self.auto_closing_brackets
  }

  /// Closing char for a registered auto-closing opener.
  pub fn auto_closing_pair_open(&self, open: char) -> Option<char> {
    self.auto_closing_pairs_open.get(&open).copied()
  }

  pub fn is_auto_closing_close(&self, ch: char) -> bool {
    self.auto_closing_pairs_close.contains_key(&ch)
  }

  /// Closing char for a registered surrounding-pair opener.
  pub fn surrounding_pair(&self, open: char) -> Option<char> {
    self.surrounding_pairs.get(&open).copied()
  }

  pub fn is_electric_char(&self, ch: char) -> bool {
    self.electric_chars.contains(&ch)
  }

  /// Converts the leading whitespace of `text` to the configured style.
  pub fn normalize_indentation(&self, text: &str) -> String {
    normalize_indentation(text, self.tab_size, self.insert_spaces)
  }
}

impl TryFrom<ConfigRaw> for TypingConfig {
  type Error = ConfigError;

  fn try_from(raw: ConfigRaw) -> Result<Self> {
    if raw.tab_size == 0 {
      return Err(ConfigError::ZeroTabSize);
    }

    Ok(
      TypingConfig::new(raw.tab_size, raw.insert_spaces)
        .with_auto_closing_brackets(raw.auto_closing_brackets)
        .with_auto_closing_pairs(raw.auto_closing_pairs)
        .with_surrounding_pairs(raw.surrounding_pairs)
        .with_electric_chars(raw.electric_chars),
    )
  }
}

fn one_indent(tab_size: usize, insert_spaces: bool) -> String {
  if insert_spaces {
    " ".repeat(tab_size)
  } else {
    "\t".to_string()
  }
}
