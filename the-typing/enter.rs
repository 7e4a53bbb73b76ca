//! Line breaks with computed indentation.
//!
//! The language rules classify the break ([`IndentAction`]) and supply the
//! indentation of the current line plus the text to append on the new one.
//! Every computed indentation goes through the configured normalization
//! before it is inserted.

use the_core::{
  chars::{
    last_non_whitespace_index,
    leading_whitespace,
  },
  indent::unshift_indent_count,
};

use crate::{
  command::EditCommand,
  context::TypingContext,
  position::Range,
  result::EditOperationResult,
  rules::{
    EnterAction,
    EnterActionResult,
    IndentAction,
  },
};

/// Breaks the line at `range`, which is replaced.
///
/// With `keep_position` the caret stays at the start of `range` instead of
/// moving onto the new line. Opens an undo boundary before the edit but not
/// after, so typing on the new line coalesces with it.
pub fn enter(ctx: &TypingContext, keep_position: bool, range: Range) -> EditOperationResult {
  let Some(EnterActionResult {
    enter_action,
    indentation,
  }) = ctx
    .rules
    .enter_action(ctx.model, range.start.line, range.start.column)
  else {
    return EditOperationResult::noop();
  };

  let config = ctx.config;
  let append = append_text(&enter_action);
  tracing::trace!(?enter_action, %indentation, "enter");

  let command = match enter_action.indent_action {
    IndentAction::None | IndentAction::Indent => {
      let text = format!(
        "\n{}",
        config.normalize_indentation(&format!("{indentation}{append}"))
      );
      type_command(range, text, keep_position)
    },
    IndentAction::IndentOutdent => {
      let normal_indent = config.normalize_indentation(&indentation);
      let increased_indent = config.normalize_indentation(&format!("{indentation}{append}"));
      let text = format!("\n{increased_indent}\n{normal_indent}");

      if keep_position {
        EditCommand::replace_keep_position(range, text)
      } else {
        let delta =
          increased_indent.chars().count() as isize - normal_indent.chars().count() as isize;
        EditCommand::replace_with_offset(range, text, -1, delta)
      }
    },
    IndentAction::Outdent => {
      let outdented = outdent_as_tabs(&indentation, config.tab_size());
      let text = format!(
        "\n{}",
        config.normalize_indentation(&format!("{outdented}{append}"))
      );
      type_command(range, text, keep_position)
    },
  };

  EditOperationResult::new(command)
    .undo_boundary_before()
    .auto_whitespace()
}

/// The text to put after the indentation on the new line. Indenting actions
/// with nothing to append go one level deeper.
fn append_text(action: &EnterAction) -> &str {
  match action.indent_action {
    IndentAction::Indent | IndentAction::IndentOutdent if action.append_text.is_empty() => "\t",
    _ => action.append_text.as_str(),
  }
}

fn type_command(range: Range, text: String, keep_position: bool) -> EditCommand {
  if keep_position {
    EditCommand::replace_keep_position(range, text)
  } else {
    EditCommand::replace(range, text)
  }
}

/// `indentation` shifted left by one level, written as tabs.
fn outdent_as_tabs(indentation: &str, tab_size: usize) -> String {
  let column = indentation.chars().count() + 1;
  "\t".repeat(unshift_indent_count(indentation, column, tab_size))
}

/// The indentation a blank `line` should have: what Enter at the end of the
/// nearest non-blank line above would produce. Falls back to a tab when there
/// is no such line or the result is empty.
pub fn good_indent_for_line(ctx: &TypingContext, line: usize) -> String {
  let model = ctx.model;
  let Some(prev_line) = (1..line)
    .rev()
    .find(|&prev| last_non_whitespace_index(&model.line_content(prev)).is_some())
  else {
    return "\t".to_string();
  };

  let result = ctx
    .rules
    .enter_action(model, prev_line, model.line_max_column(prev_line))
    .unwrap_or_else(|| {
      EnterActionResult {
        indentation: leading_whitespace(&model.line_content(prev_line)).to_string(),
        ..Default::default()
      }
    });

  let indentation = match result.enter_action.indent_action {
    IndentAction::Outdent => {
      ctx
        .config
        .normalize_indentation(&outdent_as_tabs(&result.indentation, ctx.config.tab_size()))
    },
    _ => result.indentation,
  };

  let good = format!("{indentation}{}", append_text(&result.enter_action));
  if good.is_empty() {
    "\t".to_string()
  } else {
    good
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::{
    config::TypingConfig,
    model::{
      LineTokens,
      ModelView,
      RopeModel,
    },
    position::Position,
    rules::{
      self,
      ElectricAction,
      EnterAction,
      LanguageRules,
    },
    selection::Selection,
  };

  /// Answers every Enter with the same action and the line's indentation.
  struct FixedEnter(Option<EnterAction>);

  impl LanguageRules for FixedEnter {
    fn enter_action(
      &self,
      model: &dyn ModelView,
      line: usize,
      _column: usize,
    ) -> Option<EnterActionResult> {
      let enter_action = self.0.clone()?;
      Some(EnterActionResult {
        enter_action,
        indentation: leading_whitespace(&model.line_content(line)).to_string(),
      })
    }

    fn should_auto_close_pair(&self, _: char, _: &LineTokens, _: usize) -> rules::Result<bool> {
      Ok(true)
    }

    fn on_electric_character(
      &self,
      _: char,
      _: &LineTokens,
      _: usize,
    ) -> rules::Result<Option<ElectricAction>> {
      Ok(None)
    }
  }

  fn run(text: &str, at: Position, action: EnterAction, keep: bool) -> (String, Selection) {
    let config = TypingConfig::new(4, true);
    let mut model = RopeModel::new(text);
    let rules = FixedEnter(Some(action));
    let result = {
      let ctx = TypingContext::new(&config, &model, &rules);
      enter(&ctx, keep, Range::point(at))
    };
    assert!(result.should_push_undo_before());
    assert!(!result.should_push_undo_after());
    assert!(result.is_auto_whitespace());
    let selection = model.apply(result.command().unwrap()).unwrap();
    (model.text().to_string(), selection)
  }

  #[test]
  fn none_keeps_indentation() {
    let (text, selection) = run(
      "  foo",
      Position::new(1, 6),
      EnterAction::default(),
      false,
    );
    assert_eq!(text, "  foo\n  ");
    assert_eq!(selection, Selection::point(Position::new(2, 3)));
  }

  #[test]
  fn indent_appends_normalized_unit() {
    let (text, selection) = run(
      "\tfoo {",
      Position::new(1, 7),
      EnterAction::new(IndentAction::Indent, "\t"),
      false,
    );
    assert_eq!(text, "\tfoo {\n        ");
    assert_eq!(selection, Selection::point(Position::new(2, 9)));
  }

  #[test]
  fn indent_outdent_lands_on_middle_line() {
    let (text, selection) = run(
      "{}",
      Position::new(1, 2),
      EnterAction::new(IndentAction::IndentOutdent, "    "),
      false,
    );
    assert_eq!(text, "{\n    \n}");
    assert_eq!(selection, Selection::point(Position::new(2, 5)));
  }

  #[test]
  fn indenting_actions_default_to_one_level() {
    let (text, selection) = run(
      "{}",
      Position::new(1, 2),
      EnterAction::new(IndentAction::IndentOutdent, ""),
      false,
    );
    assert_eq!(text, "{\n    \n}");
    assert_eq!(selection, Selection::point(Position::new(2, 5)));

    let (text, _) = run(
      "  if x {",
      Position::new(1, 9),
      EnterAction::new(IndentAction::Indent, ""),
      false,
    );
    assert_eq!(text, "  if x {\n      ");
  }

  #[test]
  fn indent_outdent_keeping_position() {
    let (text, selection) = run(
      "  ()",
      Position::new(1, 4),
      EnterAction::new(IndentAction::IndentOutdent, "\t"),
      true,
    );
    assert_eq!(text, "  (\n      \n  )");
    assert_eq!(selection, Selection::point(Position::new(1, 4)));
  }

  #[test]
  fn outdent_removes_one_level() {
    let (text, _) = run(
      "        break;",
      Position::new(1, 15),
      EnterAction::new(IndentAction::Outdent, ""),
      false,
    );
    assert_eq!(text, "        break;\n    ");

    let (text, _) = run(
      "  x",
      Position::new(1, 4),
      EnterAction::new(IndentAction::Outdent, ""),
      false,
    );
    assert_eq!(text, "  x\n");
  }

  #[test]
  fn missing_rule_is_a_noop() {
    let config = TypingConfig::default();
    let model = RopeModel::new("foo");
    let rules = FixedEnter(None);
    let ctx = TypingContext::new(&config, &model, &rules);
    let result = enter(&ctx, false, Range::point(Position::new(1, 4)));
    assert!(result.is_noop());
    assert!(!result.should_push_undo_before());
  }

  #[test]
  fn good_indent_scans_upward() {
    let config = TypingConfig::new(4, true);
    let model = RopeModel::new("    foo\n\n  \n");
    let rules = FixedEnter(Some(EnterAction::default()));
    let ctx = TypingContext::new(&config, &model, &rules);
    assert_eq!(good_indent_for_line(&ctx, 3), "    ");
    assert_eq!(good_indent_for_line(&ctx, 1), "\t");

    let model = RopeModel::new("foo\n");
    let ctx = TypingContext::new(&config, &model, &rules);
    assert_eq!(good_indent_for_line(&ctx, 2), "\t");

    let indent = FixedEnter(Some(EnterAction::new(IndentAction::Indent, "")));
    let model = RopeModel::new("  {\n");
    let ctx = TypingContext::new(&config, &model, &indent);
    assert_eq!(good_indent_for_line(&ctx, 2), "  \t");

    let outdent = FixedEnter(Some(EnterAction::new(IndentAction::Outdent, "")));
    let model = RopeModel::new("        x\n");
    let ctx = TypingContext::new(&config, &model, &outdent);
    assert_eq!(good_indent_for_line(&ctx, 2), "    ");
  }
}
