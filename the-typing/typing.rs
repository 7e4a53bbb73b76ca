//! The typed-character interceptor chain.
//!
//! A typed string is offered to each interceptor in [`INTERCEPTORS`] order.
//! The first one that produces a result wins; when none applies the text is
//! inserted as is. Provider failures inside an interceptor are logged and
//! count as the interceptor declining.

use the_core::chars::{
  char_is_whitespace,
  char_slice,
  leading_whitespace,
};

use crate::{
  command::EditCommand,
  context::TypingContext,
  edit::type_without_interceptors,
  enter::enter,
  position::{
    Position,
    Range,
  },
  result::EditOperationResult,
  rules::ElectricAction,
  selection::CursorState,
};

type Interceptor = fn(&TypingContext, &CursorState, char) -> Option<EditOperationResult>;

/// Interceptors in priority order.
const INTERCEPTORS: &[(&str, Interceptor)] = &[
  ("enter", intercept_enter),
  ("auto-close-close", intercept_auto_close_close),
  ("auto-close-open", intercept_auto_close_open),
  ("surround", intercept_surround),
  ("electric", intercept_electric),
];

/// Types `text` at the cursor, letting the interceptors turn it into a line
/// break, an overtype, an auto-closed pair, a surround or an electric edit.
/// Only single-char input is intercepted.
pub fn type_with_interceptors(
  ctx: &TypingContext,
  cursor: &CursorState,
  text: &str,
) -> EditOperationResult {
  let intercepted = single_char(text).and_then(|ch| {
    INTERCEPTORS.iter().find_map(|(name, interceptor)| {
      let result = interceptor(ctx, cursor, ch)?;
      tracing::trace!(interceptor = name, ?ch, "typed char intercepted");
      Some(result)
    })
  });

  intercepted.unwrap_or_else(|| type_without_interceptors(cursor, text))
}

fn single_char(text: &str) -> Option<char> {
  let mut chars = text.chars();
  match (chars.next(), chars.next()) {
    (Some(ch), None) => Some(ch),
    _ => None,
  }
}

/// The char right before `pos` on its line.
fn char_before(ctx: &TypingContext, pos: Position) -> Option<char> {
  let index = pos.column.checked_sub(2)?;
  ctx.model.line_content(pos.line).chars().nth(index)
}

/// The char right after `pos` on its line.
fn char_after(ctx: &TypingContext, pos: Position) -> Option<char> {
  ctx
    .model
    .line_content(pos.line)
    .chars()
    .nth(pos.column.saturating_sub(1))
}

fn intercept_enter(
  ctx: &TypingContext,
  cursor: &CursorState,
  ch: char,
) -> Option<EditOperationResult> {
  if ch != '\n' {
    return None;
  }
  enter(ctx, false, cursor.selection().range()).into_option()
}

/// Typing a closer right in front of the same closer steps over it.
fn intercept_auto_close_close(
  ctx: &TypingContext,
  cursor: &CursorState,
  ch: char,
) -> Option<EditOperationResult> {
  let config = ctx.config;
  let selection = cursor.selection();
  if !config.auto_closing_brackets() || !selection.is_empty() || !config.is_auto_closing_close(ch) {
    return None;
  }

  let pos = selection.head;
  if char_after(ctx, pos) != Some(ch) {
    return None;
  }

  let range = Range::new(pos, pos.offset(0, 1));
  Some(EditOperationResult::new(EditCommand::replace(range, ch.to_string())).undo_boundary_before())
}

/// Typing an opener inserts the pair and leaves the caret between them.
fn intercept_auto_close_open(
  ctx: &TypingContext,
  cursor: &CursorState,
  ch: char,
) -> Option<EditOperationResult> {
  let config = ctx.config;
  let selection = cursor.selection();
  if !config.auto_closing_brackets() || !selection.is_empty() {
    return None;
  }
  let close = config.auto_closing_pair_open(ch)?;

  let pos = selection.head;
  if let Some(before) = char_before(ctx, pos)
    && !char_is_whitespace(before)
    && !config.is_auto_closing_close(before)
  {
    return None;
  }

  let tokens = ctx.model.line_tokens(pos.line);
  match ctx.rules.should_auto_close_pair(ch, &tokens, pos.column) {
    Ok(true) => {},
    Ok(false) => return None,
    Err(err) => {
      tracing::warn!(%err, ?ch, %pos, "auto-close query failed");
      return None;
    },
  }

  let command = EditCommand::replace_with_offset(selection.range(), format!("{ch}{close}"), 0, -1);
  Some(EditOperationResult::new(command).undo_boundary_before())
}

/// Typing a surrounding opener over a selection wraps it.
fn intercept_surround(
  ctx: &TypingContext,
  cursor: &CursorState,
  ch: char,
) -> Option<EditOperationResult> {
  let config = ctx.config;
  let selection = cursor.selection();
  if !config.auto_closing_brackets() || selection.is_empty() {
    return None;
  }
  let close = config.surrounding_pair(ch)?;

  if !selection_has_content(ctx, selection.range()) {
    return None;
  }

  Some(EditOperationResult::new(EditCommand::surround(selection, ch, close)).undo_boundaries())
}

fn selection_has_content(ctx: &TypingContext, range: Range) -> bool {
  (range.start.line..=range.end.line).any(|line| {
    let text = ctx.model.line_content(line);
    let from = if line == range.start.line {
      range.start.column - 1
    } else {
      0
    };
    let to = if line == range.end.line {
      range.end.column - 1
    } else {
      usize::MAX
    };
    char_slice(&text, from, to)
      .chars()
      .any(|ch| !char_is_whitespace(ch))
  })
}

/// Electric chars either complete the line with appended text or re-indent
/// it to line up with the matching open bracket.
fn intercept_electric(
  ctx: &TypingContext,
  cursor: &CursorState,
  ch: char,
) -> Option<EditOperationResult> {
  let selection = cursor.selection();
  if !ctx.config.is_electric_char(ch) || !selection.is_empty() {
    return None;
  }

  let pos = selection.head;
  let tokens = ctx.model.line_tokens(pos.line);
  let action = match ctx.rules.on_electric_character(ch, &tokens, pos.column) {
    Ok(action) => action?,
    Err(err) => {
      tracing::warn!(%err, ?ch, %pos, "electric char query failed");
      return None;
    },
  };

  match action {
    ElectricAction {
      append_text: Some(append),
      ..
    } => {
      let back = append.chars().count() as isize;
      let command =
        EditCommand::replace_with_offset(selection.range(), format!("{ch}{append}"), 0, -back);
      Some(EditOperationResult::new(command).undo_boundary_after())
    },
    ElectricAction {
      match_open_bracket: Some(open),
      ..
    } => reindent_to_open_bracket(ctx, pos, open, ch),
    _ => None,
  }
}

fn reindent_to_open_bracket(
  ctx: &TypingContext,
  pos: Position,
  open: char,
  ch: char,
) -> Option<EditOperationResult> {
  let model = ctx.model;
  let matched = model.find_matching_bracket_up(open, pos)?;
  if matched.start.line == pos.line {
    return None;
  }

  let match_line = model.line_content(matched.start.line);
  let indentation = ctx
    .config
    .normalize_indentation(leading_whitespace(&match_line));

  let line = model.line_content(pos.line);
  let prefix_start = model
    .line_first_non_whitespace_column(pos.line)
    .unwrap_or(pos.column)
    .min(pos.column);
  let prefix = char_slice(&line, prefix_start - 1, pos.column - 1);

  tracing::debug!(%pos, open_at = %matched.start, "re-indent to open bracket");
  let range = Range::from_coords(pos.line, 1, pos.line, pos.column);
  let command = EditCommand::replace(range, format!("{indentation}{prefix}{ch}"));
  Some(EditOperationResult::new(command).undo_boundary_after())
}
