//! Character classification and whitespace scanning over single lines.
//!
//! Line-scanning helpers work in `char` indices, which is the unit columns
//! are expressed in across the editing crates.

#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  matches!(
    ch,
    '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
  )
}

#[inline]
pub fn char_is_whitespace(ch: char) -> bool {
  match ch {
      '\u{0009}' | // Character Tabulation
      '\u{0020}' | // Space
      '\u{00A0}' | // No-break Space
      '\u{180E}' | // Mongolian Vowel Separator
      '\u{202F}' | // Narrow No-break Space
      '\u{205F}' | // Medium Mathematical Space
      '\u{3000}' | // Ideographic Space
      '\u{FEFF}'   // Zero Width No-break Space
      => true,

      // En Quad, Em Quad, En Space, Em Space, Three-per-em Space,
      // Four-per-em Space, Six-per-em Space, Figure Space,
      // Punctuation Space, Thin Space, Hair Space, Zero Width Space.
      ch if ('\u{2000}' ..= '\u{200B}').contains(&ch) => true,

      _ => false,
    }
}

/// Indentation is made of spaces and tabs only.
#[inline]
pub fn char_is_indent(ch: char) -> bool {
  ch == ' ' || ch == '\t'
}

/// Index of the first char that is not a space or a tab.
pub fn first_non_whitespace_index(line: &str) -> Option<usize> {
  line.chars().position(|ch| !char_is_indent(ch))
}

/// Index of the last char that is not a space or a tab.
pub fn last_non_whitespace_index(line: &str) -> Option<usize> {
  let len = line.chars().count();
  line
    .chars()
    .rev()
    .position(|ch| !char_is_indent(ch))
    .map(|from_end| len - from_end - 1)
}

/// The run of spaces and tabs the line starts with.
pub fn leading_whitespace(line: &str) -> &str {
  let end = line
    .char_indices()
    .find(|&(_, ch)| !char_is_indent(ch))
    .map_or(line.len(), |(idx, _)| idx);
  &line[..end]
}

/// True if the line holds nothing but whitespace (or nothing at all).
pub fn is_blank(line: &str) -> bool {
  line.chars().all(char::is_whitespace)
}

/// Byte offset of the char at `char_idx`, or the string length past the end.
pub fn char_to_byte(text: &str, char_idx: usize) -> usize {
  text
    .char_indices()
    .nth(char_idx)
    .map_or(text.len(), |(idx, _)| idx)
}

/// Slice of `text` between two char indices, clamped to the string.
pub fn char_slice(text: &str, from: usize, to: usize) -> &str {
  let start = char_to_byte(text, from);
  let end = char_to_byte(text, to.max(from));
  &text[start..end]
}
