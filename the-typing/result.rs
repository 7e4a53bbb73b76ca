//! The value every operation returns.

use crate::command::EditCommand;

/// Why the cursor moved, for listeners that care.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CursorChangeReason {
  #[default]
  NotSet,
  Paste,
  Explicit,
}

/// One edit command (or none) plus how the applier should treat it.
///
/// A result without a command means "nothing to do": the caller falls back to
/// its default behavior, applies no mutation and pushes no undo boundary. The
/// flag accessors enforce that by reporting `false` for such results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperationResult {
  command:           Option<EditCommand>,
  push_undo_before:  bool,
  push_undo_after:   bool,
  auto_whitespace:   bool,
  reason:            CursorChangeReason,
  reveal_horizontal: bool,
}

impl EditOperationResult {
  pub fn new(command: EditCommand) -> Self {
    Self {
      command:           Some(command),
      push_undo_before:  false,
      push_undo_after:   false,
      auto_whitespace:   false,
      reason:            CursorChangeReason::NotSet,
      reveal_horizontal: true,
    }
  }

  pub fn noop() -> Self {
    Self {
      command:           None,
      push_undo_before:  false,
      push_undo_after:   false,
      auto_whitespace:   false,
      reason:            CursorChangeReason::NotSet,
      reveal_horizontal: false,
    }
  }

  pub fn undo_boundary_before(mut self) -> Self {
    self.push_undo_before = true;
    self
  }

  pub fn undo_boundary_after(mut self) -> Self {
    self.push_undo_after = true;
    self
  }

  pub fn undo_boundaries(self) -> Self {
    self.undo_boundary_before().undo_boundary_after()
  }

  pub fn auto_whitespace(mut self) -> Self {
    self.auto_whitespace = true;
    self
  }

  pub fn with_reason(mut self, reason: CursorChangeReason) -> Self {
    self.reason = reason;
    self
  }

  pub fn without_horizontal_reveal(mut self) -> Self {
    self.reveal_horizontal = false;
    self
  }

  pub fn command(&self) -> Option<&EditCommand> {
    self.command.as_ref()
  }

  pub fn into_command(self) -> Option<EditCommand> {
    self.command
  }

  pub fn is_noop(&self) -> bool {
    self.command.is_none()
  }

  pub fn should_push_undo_before(&self) -> bool {
    self.command.is_some() && self.push_undo_before
  }

  pub fn should_push_undo_after(&self) -> bool {
    self.command.is_some() && self.push_undo_after
  }

  pub fn is_auto_whitespace(&self) -> bool {
    self.command.is_some() && self.auto_whitespace
  }

  pub fn cursor_change_reason(&self) -> CursorChangeReason {
    self.reason
  }

  pub fn should_reveal_horizontal(&self) -> bool {
    self.command.is_some() && self.reveal_horizontal
  }

  /// `Some(self)` unless this is a no-op.
  pub fn into_option(self) -> Option<Self> {
    (!self.is_noop()).then_some(self)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::position::Range;

  #[test]
  fn noop_never_reports_boundaries() {
    let noop = EditOperationResult::noop().undo_boundaries().auto_whitespace();
    assert!(noop.is_noop());
    assert!(!noop.should_push_undo_before());
    assert!(!noop.should_push_undo_after());
    assert!(!noop.is_auto_whitespace());
    assert!(noop.into_option().is_none());
  }

  #[test]
  fn flags_follow_the_builder() {
    let result = EditOperationResult::new(EditCommand::replace(Range::from_coords(1, 1, 1, 1), "x"))
      .undo_boundary_before()
      .with_reason(CursorChangeReason::Paste);
    assert!(result.should_push_undo_before());
    assert!(!result.should_push_undo_after());
    assert!(result.should_reveal_horizontal());
    assert_eq!(result.cursor_change_reason(), CursorChangeReason::Paste);

    let result = result
      .with_reason(CursorChangeReason::Explicit)
      .without_horizontal_reveal();
    assert!(!result.should_reveal_horizontal());
    assert_eq!(result.cursor_change_reason(), CursorChangeReason::Explicit);
  }
}
