use std::fmt;

use the_core::chars::char_is_line_ending;

/// A point in a text buffer.
/// 1-indexed; `column` counts the chars before it on the line, plus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
  pub line:   usize,
  pub column: usize,
}

impl Position {
  pub const fn new(line: usize, column: usize) -> Self {
    Self { line, column }
  }

  /// Where the caret ends up after inserting `text` at this position.
  /// `\r\n` counts as a single line break.
  pub fn traverse(self, text: impl AsRef<str>) -> Self {
    let Self {
      mut line,
      mut column,
    } = self;
    let mut chars = text.as_ref().chars().peekable();

    while let Some(ch) = chars.next() {
      if char_is_line_ending(ch) && !(ch == '\r' && chars.peek() == Some(&'\n')) {
        line += 1;
        column = 1;
      } else if ch != '\r' || chars.peek() != Some(&'\n') {
        column += 1;
      }
    }

    Self { line, column }
  }

  /// Moves by a signed number of lines and columns, never below (1, 1).
  pub fn offset(self, lines: isize, columns: isize) -> Self {
    Self {
      line:   self.line.saturating_add_signed(lines).max(1),
      column: self.column.saturating_add_signed(columns).max(1),
    }
  }
}

impl From<(usize, usize)> for Position {
  fn from((line, column): (usize, usize)) -> Self {
    Position::new(line, column)
  }
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.column)
  }
}

/// An ordered pair of positions, `start <= end`. May be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
  pub start: Position,
  pub end:   Position,
}

impl Range {
  /// Builds a range, swapping the ends if they are out of order.
  pub fn new(a: Position, b: Position) -> Self {
    if a <= b {
      Self { start: a, end: b }
    } else {
      Self { start: b, end: a }
    }
  }

  pub fn from_coords(
    start_line: usize,
    start_column: usize,
    end_line: usize,
    end_column: usize,
  ) -> Self {
    Self::new(
      Position::new(start_line, start_column),
      Position::new(end_line, end_column),
    )
  }

  pub fn point(pos: Position) -> Self {
    Self {
      start: pos,
      end:   pos,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }

  pub fn is_single_line(&self) -> bool {
    self.start.line == self.end.line
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn traverse_counts_lines_and_columns() {
    let pos = Position::new(3, 5);
    assert_eq!(pos.traverse(""), pos);
    assert_eq!(pos.traverse("ab"), Position::new(3, 7));
    assert_eq!(pos.traverse("\n"), Position::new(4, 1));
    assert_eq!(pos.traverse("x\n  y"), Position::new(4, 4));
    assert_eq!(pos.traverse("\r\n\t"), Position::new(4, 2));
    assert_eq!(pos.traverse("\n\n"), Position::new(5, 1));
  }

  #[test]
  fn offset_is_clamped() {
    let pos = Position::new(2, 3);
    assert_eq!(pos.offset(-1, 4), Position::new(1, 7));
    assert_eq!(pos.offset(0, -10), Position::new(2, 1));
    assert_eq!(pos.offset(-5, 0), Position::new(1, 3));
  }

  #[test]
  fn range_orders_its_ends() {
    let range = Range::from_coords(4, 1, 2, 8);
    assert_eq!(range.start, Position::new(2, 8));
    assert_eq!(range.end, Position::new(4, 1));
    assert!(!range.is_single_line());
    assert!(Range::point(Position::new(1, 1)).is_empty());
  }
}
