//! Block indent and outdent.
//!
//! Each touched line's leading whitespace is replaced by `one_indent`
//! repeated up to the next (indent) or previous (outdent) tab stop, so mixed
//! or misaligned indentation snaps to whole levels.

use smallvec::SmallVec;
use the_core::{
  chars::{
    first_non_whitespace_index,
    is_blank,
  },
  indent::{
    shift_indent_count,
    unshift_indent_count,
  },
};

use crate::{
  command::{
    Assoc,
    TextEdit,
  },
  model::ModelView,
  position::{
    Position,
    Range,
  },
  selection::Selection,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftOptions {
  pub unshift:    bool,
  pub tab_size:   usize,
  pub one_indent: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftCommand {
  edits:  SmallVec<[TextEdit; 4]>,
  cursor: Selection,
}

impl ShiftCommand {
  pub fn new(model: &dyn ModelView, selection: Selection, opts: &ShiftOptions) -> Self {
    let range = selection.range();
    let start_line = range.start.line;
    let mut end_line = range.end.line;
    if range.end.column == 1 && start_line != end_line {
      end_line -= 1;
    }

    let tab_size = opts.tab_size.max(1);
    let mut edits: SmallVec<[TextEdit; 4]> = SmallVec::new();

    for line in start_line..=end_line {
      let text = model.line_content(line);
      let len = text.chars().count();
      let indent_end = first_non_whitespace_index(&text);

      if opts.unshift {
        if len == 0 || indent_end == Some(0) {
          continue;
        }
      } else if len == 0 && !selection.is_empty() {
        continue;
      }

      let indent_end = indent_end.unwrap_or(len);
      let count = if opts.unshift {
        unshift_indent_count(&text, indent_end + 1, tab_size)
      } else {
        shift_indent_count(&text, indent_end + 1, tab_size)
      };

      edits.push(TextEdit::new(
        Range::from_coords(line, 1, line, indent_end + 1),
        opts.one_indent.repeat(count),
      ));
    }

    let caret_on_blank_line =
      selection.is_empty() && is_blank(&model.line_content(start_line));
    let cursor = match edits.last() {
      Some(last) if caret_on_blank_line => Selection::point(last.inserted_end()),
      _ => track_selection(selection, &edits),
    };

    tracing::trace!(edits = edits.len(), unshift = opts.unshift, "shift");
    Self { edits, cursor }
  }

  pub fn edits(&self) -> &[TextEdit] {
    &self.edits
  }

  pub fn cursor_after(&self) -> Selection {
    self.cursor
  }
}

/// Maps `selection` through single-line indentation edits. A non-empty
/// selection starting at column 1 keeps its start there, so it grows to cover
/// the new indentation.
fn track_selection(selection: Selection, edits: &[TextEdit]) -> Selection {
  let (anchor_assoc, head_assoc) = match (selection.is_empty(), selection.head < selection.anchor) {
    (true, _) => (Assoc::After, Assoc::After),
    (false, false) => (Assoc::Before, Assoc::After),
    (false, true) => (Assoc::After, Assoc::Before),
  };

  Selection::new(
    map_position(selection.anchor, edits, anchor_assoc),
    map_position(selection.head, edits, head_assoc),
  )
}

fn map_position(pos: Position, edits: &[TextEdit], assoc: Assoc) -> Position {
  let Some(edit) = edits.iter().find(|edit| edit.range.start.line == pos.line) else {
    return pos;
  };

  let old_end = edit.range.end.column;
  let new_len = edit.text.chars().count();
  let column = if assoc == Assoc::Before && pos.column == 1 {
    1
  } else if pos.column >= old_end {
    pos.column - (old_end - 1) + new_len
  } else {
    new_len + 1
  };

  Position::new(pos.line, column)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::model::RopeModel;

  fn opts(unshift: bool) -> ShiftOptions {
    ShiftOptions {
      unshift,
      tab_size: 4,
      one_indent: "    ".to_string(),
    }
  }

  fn shift(text: &str, selection: Selection, unshift: bool) -> (String, Selection) {
    let mut model = RopeModel::new(text);
    let command = crate::command::EditCommand::Shift(ShiftCommand::new(
      &model,
      selection,
      &opts(unshift),
    ));
    let cursor = model.apply(&command).unwrap();
    (model.text().to_string(), cursor)
  }

  fn pos(line: usize, column: usize) -> Position {
    Position::new(line, column)
  }

  #[test]
  fn indent_snaps_to_next_stop() {
    let (text, cursor) = shift(
      "a\n  b\n\n\tc",
      Selection::new(pos(1, 1), pos(4, 2)),
      false,
    );
    assert_eq!(text, "    a\n    b\n\n        c");
    assert_eq!(cursor, Selection::new(pos(1, 1), pos(4, 9)));
  }

  #[test]
  fn outdent_clamps_at_zero() {
    let (text, cursor) = shift("  foo", Selection::point(pos(1, 4)), true);
    assert_eq!(text, "foo");
    assert_eq!(cursor, Selection::point(pos(1, 2)));

    let (text, _) = shift("      x\ny\n", Selection::new(pos(1, 1), pos(3, 1)), true);
    assert_eq!(text, "    x\ny\n");
  }

  #[test]
  fn caret_on_blank_line_lands_after_indent() {
    let (text, cursor) = shift("foo\n", Selection::point(pos(2, 1)), false);
    assert_eq!(text, "foo\n    ");
    assert_eq!(cursor, Selection::point(pos(2, 5)));
  }

  #[test]
  fn last_line_at_column_one_is_excluded() {
    let (text, cursor) = shift("a\nb", Selection::new(pos(2, 1), pos(1, 1)), false);
    assert_eq!(text, "    a\nb");
    assert_eq!(cursor, Selection::new(pos(2, 1), pos(1, 1)));
  }

  quickcheck::quickcheck! {
    fn outdent_never_grows_indentation(spaces: u8) -> bool {
      let text = format!("{}x", " ".repeat(spaces as usize % 24));
      let (outdented, _) = shift(&text, Selection::point(pos(1, 1)), true);
      outdented.len() <= text.len() && outdented.ends_with('x')
    }

    fn indent_then_outdent_restores_aligned_lines(levels: u8) -> bool {
      let text = format!("{}x", "    ".repeat(levels as usize % 6));
      let whole_line = Selection::new(pos(1, 1), pos(1, text.len() + 1));
      let (indented, cursor) = shift(&text, whole_line, false);
      let mut model = RopeModel::new(&indented);
      let outdent = ShiftCommand::new(&model, cursor, &opts(true));
      let command = crate::command::EditCommand::Shift(outdent);
      model.apply(&command).unwrap();
      model.text().to_string() == text
    }
  }
}
