//! Visible columns and tab stops.
//!
//! A visible column is the 0-based on-screen cell offset of a position: tabs
//! advance to the next tab stop and wide graphemes take two cells.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Width a tab occupies when it starts at `visual_x`.
#[inline]
pub fn tab_width_at(visual_x: usize, tab_size: usize) -> usize {
  tab_size - (visual_x % tab_size)
}

#[inline]
pub fn next_tab_stop(visual_x: usize, tab_size: usize) -> usize {
  visual_x + tab_width_at(visual_x, tab_size)
}

/// The tab stop strictly before `visual_x`, clamped at 0.
#[inline]
pub fn prev_tab_stop(visual_x: usize, tab_size: usize) -> usize {
  match visual_x {
    0 => 0,
    x => (x - 1) - (x - 1) % tab_size,
  }
}

#[must_use]
pub fn grapheme_width(g: &str) -> usize {
  if g.is_ascii() {
    g.len()
  } else {
    UnicodeWidthStr::width(g).max(1)
  }
}

/// Visible column of the 1-based `column` on `line`.
///
/// Columns past the end of the line are clamped to the line length.
pub fn visible_column(line: &str, column: usize, tab_size: usize) -> usize {
  let limit = column.saturating_sub(1);
  let mut chars = 0;
  let mut visual_x = 0;

  for g in line.graphemes(true) {
    if chars >= limit {
      break;
    }
    chars += g.chars().count();
    visual_x += if g == "\t" {
      tab_width_at(visual_x, tab_size)
    } else {
      grapheme_width(g)
    };
  }

  visual_x
}
