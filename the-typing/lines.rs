//! Whole-line operations: opening lines above and below, breaking a line
//! without moving the caret, and joining lines.

use the_core::chars::{
  char_is_indent,
  char_slice,
};

use crate::{
  command::EditCommand,
  context::TypingContext,
  enter::enter,
  position::{
    Position,
    Range,
  },
  result::EditOperationResult,
  selection::CursorState,
};

/// Opens a new line above the caret's line and moves onto it.
pub fn line_insert_before(ctx: &TypingContext, cursor: &CursorState) -> EditOperationResult {
  let line = cursor.position().line;
  if line == 1 {
    let start = Range::from_coords(1, 1, 1, 1);
    return EditOperationResult::new(EditCommand::replace_keep_position(start, "\n"));
  }

  let prev = line - 1;
  let end_of_prev = Position::new(prev, ctx.model.line_max_column(prev));
  break_line(ctx, false, Range::point(end_of_prev))
}

/// Opens a new line below the caret's line and moves onto it.
pub fn line_insert_after(ctx: &TypingContext, cursor: &CursorState) -> EditOperationResult {
  let line = cursor.position().line;
  let end_of_line = Position::new(line, ctx.model.line_max_column(line));
  break_line(ctx, false, Range::point(end_of_line))
}

/// Breaks the line at the selection, leaving the caret where it was.
pub fn line_break_insert(ctx: &TypingContext, cursor: &CursorState) -> EditOperationResult {
  break_line(ctx, true, cursor.selection().range())
}

/// [`enter`], or a bare line break when the language has no rule.
fn break_line(ctx: &TypingContext, keep_position: bool, range: Range) -> EditOperationResult {
  let result = enter(ctx, keep_position, range);
  if !result.is_noop() {
    return result;
  }

  let command = if keep_position {
    EditCommand::replace_keep_position(range, "\n")
  } else {
    EditCommand::replace(range, "\n")
  };
  EditOperationResult::new(command).undo_boundary_before()
}

/// Joins the selected lines, or the caret's line with the next one, into a
/// single line. Indentation of the joined lines is dropped and segments are
/// separated by one space, except before a `)` or after existing trailing
/// whitespace.
pub fn join_lines(ctx: &TypingContext, cursor: &CursorState) -> EditOperationResult {
  let model = ctx.model;
  let selection = cursor.selection();
  let range = selection.range();

  let start_line = range.start.line;
  let end_line = if range.is_single_line() {
    (start_line + 1).min(model.line_count())
  } else {
    range.end.line
  };

  let delete = Range::from_coords(start_line, 1, end_line, model.line_max_column(end_line));
  if delete.is_empty() {
    return EditOperationResult::noop();
  }

  let mut joined = model.line_content(start_line).into_owned();
  let mut last_segment = 0;
  for line in start_line + 1..=end_line {
    let text = model.line_content(line);
    let Some(indent_len) = model
      .line_first_non_whitespace_column(line)
      .map(|column| column - 1)
    else {
      last_segment = 0;
      continue;
    };

    let segment = char_slice(&text, indent_len, usize::MAX);
    let mut separate = !joined.is_empty();
    if separate && joined.ends_with(char_is_indent) {
      joined.truncate(joined.trim_end_matches(char_is_indent).len());
      joined.push(' ');
      separate = false;
    }
    if segment.starts_with(')') {
      separate = false;
    }

    if separate {
      joined.push(' ');
    }
    joined.push_str(segment);
    last_segment = segment.chars().count() + usize::from(separate);
  }

  tracing::trace!(start_line, end_line, "join lines");
  let command = if selection.is_empty() {
    EditCommand::replace_with_offset(delete, joined, 0, -(last_segment as isize))
  } else if range.is_single_line() {
    EditCommand::replace_preserving_selection(delete, joined, selection)
  } else {
    let tail = chars_after(ctx, range.end);
    EditCommand::replace_with_offset(delete, joined, 0, -(tail as isize))
  };

  EditOperationResult::new(command).undo_boundaries()
}

/// Chars of `pos`'s line that follow it and survive the join, i.e. not
/// counting stripped indentation.
fn chars_after(ctx: &TypingContext, pos: Position) -> usize {
  let Some(first) = ctx.model.line_first_non_whitespace_column(pos.line) else {
    return 0;
  };
  let from = pos.column.max(first) - 1;
  ctx
    .model
    .line_content(pos.line)
    .chars()
    .count()
    .saturating_sub(from)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::{
    config::TypingConfig,
    model::RopeModel,
    rules::BracketRules,
    selection::Selection,
  };

  type Op = fn(&TypingContext, &CursorState) -> EditOperationResult;

  fn run(op: Op, text: &str, selection: Selection) -> (EditOperationResult, String, Selection) {
    let config = TypingConfig::default();
    let rules = BracketRules::default();
    let mut model = RopeModel::new(text);
    let result = op(&TypingContext::new(&config, &model, &rules), &selection.into());
    let cursor = match result.command() {
      Some(command) => model.apply(command).unwrap(),
      None => selection,
    };
    (result, model.text().to_string(), cursor)
  }

  fn caret(line: usize, column: usize) -> Selection {
    Selection::point(Position::new(line, column))
  }

  fn select(from: (usize, usize), to: (usize, usize)) -> Selection {
    Selection::new(from.into(), to.into())
  }

  #[test]
  fn insert_after_keeps_indentation() {
    let (_, text, cursor) = run(line_insert_after, "  foo\nbar", caret(1, 2));
    assert_eq!(text, "  foo\n  \nbar");
    assert_eq!(cursor, caret(2, 3));
  }

  #[test]
  fn insert_before_first_line() {
    let (result, text, cursor) = run(line_insert_before, "foo", caret(1, 3));
    assert_eq!(text, "\nfoo");
    assert_eq!(cursor, caret(1, 1));
    assert!(!result.should_push_undo_before());
  }

  #[test]
  fn insert_before_uses_previous_line() {
    let (result, text, cursor) = run(line_insert_before, "{\nfoo", caret(2, 2));
    assert_eq!(text, "{\n    \nfoo");
    assert_eq!(cursor, caret(2, 5));
    assert!(result.is_auto_whitespace());
  }

  #[test]
  fn break_insert_keeps_caret() {
    let (_, text, cursor) = run(line_break_insert, "ab", caret(1, 2));
    assert_eq!(text, "a\nb");
    assert_eq!(cursor, caret(1, 2));
  }

  #[test]
  fn join_caret_line_with_next() {
    let (result, text, cursor) = run(join_lines, "foo\n  bar\nbaz", caret(1, 2));
    assert_eq!(text, "foo bar\nbaz");
    assert_eq!(cursor, caret(1, 4));
    assert!(result.should_push_undo_before() && result.should_push_undo_after());
  }

  #[test]
  fn join_collapses_trailing_whitespace() {
    let (_, text, _) = run(join_lines, "foo \t \nbar", caret(1, 1));
    assert_eq!(text, "foo bar");
  }

  #[test]
  fn join_skips_blank_lines() {
    let (_, text, cursor) = run(join_lines, "a\n\n  b", select((1, 1), (3, 2)));
    assert_eq!(text, "a b");
    assert_eq!(cursor, caret(1, 3));
  }

  #[test]
  fn join_before_closing_paren() {
    let (_, text, cursor) = run(join_lines, "  foo(\n  )", select((1, 3), (2, 4)));
    assert_eq!(text, "  foo()");
    assert_eq!(cursor, caret(1, 8));
  }

  #[test]
  fn join_single_line_selection_is_preserved() {
    let selection = select((1, 1), (1, 3));
    let (_, text, cursor) = run(join_lines, "foo\nbar", selection);
    assert_eq!(text, "foo bar");
    assert_eq!(cursor, selection);
  }

  #[test]
  fn join_on_empty_last_line_is_noop() {
    let (result, text, _) = run(join_lines, "foo\n", caret(2, 1));
    assert!(result.is_noop());
    assert!(!result.should_push_undo_before());
    assert_eq!(text, "foo\n");
  }
}
