//! Indentation arithmetic: normalizing whitespace to the configured style and
//! computing how many indent units a shift lands on.

use crate::{
  chars::first_non_whitespace_index,
  column::{
    next_tab_stop,
    prev_tab_stop,
    visible_column,
  },
};

/// Rewrites the leading whitespace of `text` in the configured style. The
/// rest of the string is kept as is.
///
/// ```
/// use the_core::indent::normalize_indentation;
///
/// assert_eq!(normalize_indentation("\t  x", 4, true), "      x");
/// assert_eq!(normalize_indentation("      x", 4, false), "\t  x");
/// ```
pub fn normalize_indentation(text: &str, tab_size: usize, insert_spaces: bool) -> String {
  let indent_end = first_non_whitespace_index(text).unwrap_or_else(|| text.chars().count());
  let (indent, rest) = text.split_at(
    text
      .char_indices()
      .nth(indent_end)
      .map_or(text.len(), |(idx, _)| idx),
  );

  let mut spaces = indent
    .chars()
    .map(|ch| if ch == '\t' { tab_size } else { 1 })
    .sum::<usize>();

  let mut normalized = String::with_capacity(spaces + rest.len());
  if !insert_spaces {
    normalized.extend(std::iter::repeat_n('\t', spaces / tab_size));
    spaces %= tab_size;
  }
  normalized.extend(std::iter::repeat_n(' ', spaces));
  normalized.push_str(rest);
  normalized
}

/// Number of indent units at the tab stop after the content starting at the
/// 1-based `column`.
pub fn shift_indent_count(line: &str, column: usize, tab_size: usize) -> usize {
  next_tab_stop(visible_column(line, column, tab_size), tab_size) / tab_size
}

/// Number of indent units at the tab stop before the content starting at the
/// 1-based `column`. Never negative: content already at column 1 stays there.
pub fn unshift_indent_count(line: &str, column: usize, tab_size: usize) -> usize {
  prev_tab_stop(visible_column(line, column, tab_size), tab_size) / tab_size
}
