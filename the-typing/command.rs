//! Edit commands: what to replace and where the cursor lands afterwards.
//!
//! A command never touches a buffer. [`EditCommand::edits`] lists the
//! concrete [`TextEdit`]s for the applier (sorted, non-overlapping) and
//! [`EditCommand::cursor_after`] gives the selection in post-edit
//! coordinates.
//!
//! # Cursor placement
//!
//! Single replacements pick one of four [`CursorPlacement`] policies:
//!
//! - **FollowText** - collapsed caret at the end of the inserted text
//! - **KeepPosition** - collapsed caret at the start of the replaced range
//! - **Offset** - end of the inserted text, moved by a line/column delta
//! - **PreserveSelection** - the given selection, unchanged

use smallvec::{
  SmallVec,
  smallvec,
};

use crate::{
  Tendril,
  position::{
    Position,
    Range,
  },
  selection::Selection,
  shift::ShiftCommand,
};

/// One replacement of `range` by `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
  pub range: Range,
  pub text:  Tendril,
}

impl TextEdit {
  pub fn new(range: Range, text: impl Into<Tendril>) -> Self {
    Self {
      range,
      text: text.into(),
    }
  }

  pub fn insert(pos: Position, text: impl Into<Tendril>) -> Self {
    Self::new(Range::point(pos), text)
  }

  /// End of the inserted text once the edit is applied.
  pub fn inserted_end(&self) -> Position {
    self.range.start.traverse(&self.text)
  }
}

pub(crate) fn char_tendril(ch: char) -> Tendril {
  let mut text = Tendril::new();
  text.push(ch);
  text
}

/// How a position sticks when text is inserted exactly at it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Assoc {
  /// Stay before the inserted text.
  Before,
  /// Move after the inserted text.
  After,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorPlacement {
  FollowText,
  KeepPosition,
  Offset { lines: isize, columns: isize },
  PreserveSelection(Selection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceCommand {
  pub edit:   TextEdit,
  pub cursor: CursorPlacement,
}

impl ReplaceCommand {
  pub fn cursor_after(&self) -> Selection {
    match self.cursor {
      CursorPlacement::FollowText => Selection::point(self.edit.inserted_end()),
      CursorPlacement::KeepPosition => Selection::point(self.edit.range.start),
      CursorPlacement::Offset { lines, columns } => {
        Selection::point(self.edit.inserted_end().offset(lines, columns))
      },
      CursorPlacement::PreserveSelection(selection) => selection,
    }
  }
}

/// Wraps a non-empty selection in `open`..`close`, keeping the wrapped text
/// selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurroundCommand {
  pub selection: Selection,
  pub open:      char,
  pub close:     char,
}

impl SurroundCommand {
  pub fn edits(&self) -> SmallVec<[TextEdit; 2]> {
    let range = self.selection.range();
    smallvec![
      TextEdit::insert(range.start, char_tendril(self.open)),
      TextEdit::insert(range.end, char_tendril(self.close)),
    ]
  }

  pub fn cursor_after(&self) -> Selection {
    let range = self.selection.range();
    let start = range.start.offset(0, 1);
    let end = if range.is_single_line() {
      range.end.offset(0, 1)
    } else {
      range.end
    };
    Selection::from_range(Range::new(start, end), self.selection.direction())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
  Replace(ReplaceCommand),
  Surround(SurroundCommand),
  Shift(ShiftCommand),
}

impl EditCommand {
  /// Replaces `range`; the caret follows the inserted text.
  pub fn replace(range: Range, text: impl Into<Tendril>) -> Self {
    Self::replace_with(range, text, CursorPlacement::FollowText)
  }

  /// Replaces `range`; the caret stays at the start of the range.
  pub fn replace_keep_position(range: Range, text: impl Into<Tendril>) -> Self {
    Self::replace_with(range, text, CursorPlacement::KeepPosition)
  }

  /// Replaces `range`; the caret lands at the end of the inserted text moved
  /// by `lines` and `columns`.
  pub fn replace_with_offset(
    range: Range,
    text: impl Into<Tendril>,
    lines: isize,
    columns: isize,
  ) -> Self {
    Self::replace_with(range, text, CursorPlacement::Offset { lines, columns })
  }

  /// Replaces `range`; `selection` is restored as is.
  pub fn replace_preserving_selection(
    range: Range,
    text: impl Into<Tendril>,
    selection: Selection,
  ) -> Self {
    Self::replace_with(range, text, CursorPlacement::PreserveSelection(selection))
  }

  pub fn surround(selection: Selection, open: char, close: char) -> Self {
    Self::Surround(SurroundCommand {
      selection,
      open,
      close,
    })
  }

  fn replace_with(range: Range, text: impl Into<Tendril>, cursor: CursorPlacement) -> Self {
    Self::Replace(ReplaceCommand {
      edit: TextEdit::new(range, text),
      cursor,
    })
  }

  pub fn edits(&self) -> SmallVec<[TextEdit; 2]> {
    match self {
      Self::Replace(command) => smallvec![command.edit.clone()],
      Self::Surround(command) => command.edits(),
      Self::Shift(command) => command.edits().iter().cloned().collect(),
    }
  }

  pub fn cursor_after(&self) -> Selection {
    match self {
      Self::Replace(command) => command.cursor_after(),
      Self::Surround(command) => command.cursor_after(),
      Self::Shift(command) => command.cursor_after(),
    }
  }
}
