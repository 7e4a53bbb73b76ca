//! Plain insertion, input-method corrections and paste.

use crate::{
  command::EditCommand,
  context::TypingContext,
  position::Range,
  result::{
    CursorChangeReason,
    EditOperationResult,
  },
  selection::CursorState,
};

/// Replaces the selection with `text` verbatim. No undo boundaries, so
/// consecutive keystrokes coalesce.
pub fn type_without_interceptors(cursor: &CursorState, text: &str) -> EditOperationResult {
  EditOperationResult::new(EditCommand::replace(cursor.selection().range(), text))
}

/// Replaces up to `replace_count` chars before the caret with `text`. The
/// deletion never starts before column 1.
pub fn replace_previous_char(
  cursor: &CursorState,
  text: &str,
  replace_count: usize,
) -> EditOperationResult {
  let pos = cursor.position();
  let start_column = pos.column.saturating_sub(replace_count).max(1);
  let range = Range::from_coords(pos.line, start_column, pos.line, pos.column);
  EditOperationResult::new(EditCommand::replace(range, text))
}

/// Pastes `text` over the selection.
///
/// When the clipboard holds a whole line (`pasted_whole_line`, a single line
/// ending in `\n`) and the selection is a caret or exactly one full line, the
/// text goes in as a new line above the current one instead.
pub fn paste(
  ctx: &TypingContext,
  cursor: &CursorState,
  text: &str,
  pasted_whole_line: bool,
) -> EditOperationResult {
  let selection = cursor.selection();
  let range = selection.range();

  let single_line_text = text.ends_with('\n') && text.matches('\n').count() == 1;
  let on_new_line = pasted_whole_line
    && single_line_text
    && range.is_single_line()
    && (range.is_empty() || {
      let line = range.start.line;
      range.start.column == ctx.model.line_min_column(line)
        && range.end.column == ctx.model.line_max_column(line)
    });

  let command = if on_new_line {
    let line = cursor.position().line;
    EditCommand::replace(Range::from_coords(line, 1, line, 1), text)
  } else {
    EditCommand::replace(range, text)
  };
  tracing::trace!(on_new_line, "paste");

  EditOperationResult::new(command)
    .undo_boundaries()
    .with_reason(CursorChangeReason::Paste)
}
