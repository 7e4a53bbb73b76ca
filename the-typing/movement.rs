//! Selection orientation.

/// Which way a selection extends from its anchor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
  /// The head is after the anchor (or on it).
  Forward,
  /// The head is before the anchor.
  Backward,
}
