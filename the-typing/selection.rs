//! Selections and the cursor state an operation starts from.
//!
//! A [`Selection`] has two positions: `anchor` and `head`. The `head` is the
//! active end, where the caret is drawn. When `anchor == head` the selection
//! is empty and behaves as a plain caret.
//!
//! ```text
//! anchor=1:3, head=1:8: "fo[o bar]baz"  (forward)
//! anchor=1:8, head=1:3: "fo]o bar[baz"  (backward)
//! ```

use crate::{
  movement::Direction,
  position::{
    Position,
    Range,
  },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
  pub anchor: Position,
  pub head:   Position,
}

impl Selection {
  pub fn new(anchor: Position, head: Position) -> Self {
    Self { anchor, head }
  }

  pub fn point(pos: Position) -> Self {
    Self::new(pos, pos)
  }

  /// A selection covering `range` in the given direction.
  pub fn from_range(range: Range, direction: Direction) -> Self {
    match direction {
      Direction::Forward => Self::new(range.start, range.end),
      Direction::Backward => Self::new(range.end, range.start),
    }
  }

  pub fn start(&self) -> Position {
    self.anchor.min(self.head)
  }

  pub fn end(&self) -> Position {
    self.anchor.max(self.head)
  }

  pub fn range(&self) -> Range {
    Range::new(self.anchor, self.head)
  }

  pub fn is_empty(&self) -> bool {
    self.anchor == self.head
  }

  pub fn is_single_line(&self) -> bool {
    self.anchor.line == self.head.line
  }

  pub fn direction(&self) -> Direction {
    if self.head < self.anchor {
      Direction::Backward
    } else {
      Direction::Forward
    }
  }
}

impl From<Position> for Selection {
  fn from(pos: Position) -> Self {
    Selection::point(pos)
  }
}

/// The cursor an operation is invoked with. Never mutated: the caller
/// replaces it once the resulting edit has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
  selection: Selection,
}

impl CursorState {
  pub fn new(selection: Selection) -> Self {
    Self { selection }
  }

  pub fn caret(line: usize, column: usize) -> Self {
    Self::new(Selection::point(Position::new(line, column)))
  }

  pub fn selection(&self) -> Selection {
    self.selection
  }

  /// The active end of the selection.
  pub fn position(&self) -> Position {
    self.selection.head
  }
}

impl From<Selection> for CursorState {
  fn from(selection: Selection) -> Self {
    CursorState::new(selection)
  }
}
