//! Tab, block indent and block outdent.

use the_core::{
  chars::is_blank,
  column::visible_column,
};

use crate::{
  command::EditCommand,
  context::TypingContext,
  enter::good_indent_for_line,
  position::Range,
  result::EditOperationResult,
  selection::{
    CursorState,
    Selection,
  },
  shift::{
    ShiftCommand,
    ShiftOptions,
  },
};

/// Tab.
///
/// - caret on a blank line: re-indent the line to where Enter on the line
///   above would put it, unless it already starts with that indentation;
/// - caret on a line with content, or a selection inside one line: insert
///   whitespace up to the next tab stop;
/// - selection covering whole lines: indent them as a block.
pub fn tab(ctx: &TypingContext, cursor: &CursorState) -> EditOperationResult {
  let selection = cursor.selection();
  let model = ctx.model;

  if selection.is_empty() {
    let line = selection.start().line;
    let text = model.line_content(line);

    if is_blank(&text) {
      let good_indent = ctx
        .config
        .normalize_indentation(&good_indent_for_line(ctx, line));
      if !text.starts_with(good_indent.as_str()) {
        let range = Range::from_coords(line, 1, line, model.line_max_column(line));
        return EditOperationResult::new(EditCommand::replace(range, good_indent)).auto_whitespace();
      }
    }

    return EditOperationResult::new(jump_to_next_indent(ctx, selection));
  }

  let range = selection.range();
  if range.is_single_line() {
    let max_column = model.line_max_column(range.start.line);
    if range.start.column != 1 || range.end.column != max_column {
      return EditOperationResult::new(jump_to_next_indent(ctx, selection));
    }
  }

  indent(ctx, cursor)
}

/// Replaces the selection with whitespace reaching the next tab stop.
fn jump_to_next_indent(ctx: &TypingContext, selection: Selection) -> EditCommand {
  let config = ctx.config;
  let text = if config.insert_spaces() {
    let start = selection.start();
    let tab_size = config.tab_size();
    let visual_x = visible_column(&ctx.model.line_content(start.line), start.column, tab_size);
    " ".repeat(tab_size - visual_x % tab_size)
  } else {
    "\t".to_string()
  };

  EditCommand::replace(selection.range(), text)
}

/// Indents every line touched by the selection by one level.
pub fn indent(ctx: &TypingContext, cursor: &CursorState) -> EditOperationResult {
  shift(ctx, cursor, false)
}

/// Outdents every line touched by the selection by one level, never past
/// column 1.
pub fn outdent(ctx: &TypingContext, cursor: &CursorState) -> EditOperationResult {
  shift(ctx, cursor, true)
}

fn shift(ctx: &TypingContext, cursor: &CursorState, unshift: bool) -> EditOperationResult {
  let opts = ShiftOptions {
    unshift,
    tab_size: ctx.config.tab_size(),
    one_indent: ctx.config.one_indent().to_string(),
  };
  let command = ShiftCommand::new(ctx.model, cursor.selection(), &opts);
  EditOperationResult::new(EditCommand::Shift(command)).undo_boundaries()
}
